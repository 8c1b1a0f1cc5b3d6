//! Rewriting note text to add wikilinks.
//!
//! Mentions are wrapped rightmost first so that offsets of the mentions still
//! to be rewritten stay valid while earlier text grows.

use vaultweave_core::{DEFAULT_BRACKET_WINDOW, LinkChange, LinkSuggestion};
use vaultweave_parser::{MentionMatcher, extract_links};

/// New text and the insertions that produced it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InsertOutcome {
    pub text: String,
    pub changes: Vec<LinkChange>,
}

impl InsertOutcome {
    pub fn is_unchanged(&self) -> bool {
        self.changes.is_empty()
    }
}

/// Pure text rewriter; never touches the filesystem
#[derive(Debug, Clone, Copy)]
pub struct LinkInserter {
    bracket_window: usize,
}

impl Default for LinkInserter {
    fn default() -> Self {
        Self::new(DEFAULT_BRACKET_WINDOW)
    }
}

impl LinkInserter {
    pub fn new(bracket_window: usize) -> Self {
        Self { bracket_window }
    }

    /// Wrap unlinked mentions of every suggestion at or above `threshold`.
    ///
    /// A suggestion whose target is already linked anywhere in the text is
    /// skipped, so running the inserter on its own output changes nothing.
    /// Every mention becomes `[[Target]]` whatever its case, which keeps
    /// words inside a new link within the bracket window of later targets.
    pub fn insert(
        &self,
        text: &str,
        suggestions: &[LinkSuggestion],
        threshold: f64,
    ) -> InsertOutcome {
        let mut current = text.to_string();
        let mut changes = Vec::new();

        for suggestion in suggestions.iter().filter(|s| s.confidence >= threshold) {
            let target = suggestion.target_note.as_str();
            if extract_links(&current).contains(target) {
                continue;
            }
            let Some(matcher) = MentionMatcher::new(target) else {
                continue;
            };

            let mentions = matcher.find_unlinked(&current, self.bracket_window);
            for mention in mentions.into_iter().rev() {
                let written = mention.text(&current).to_string();
                current.replace_range(mention.start..mention.end, &format!("[[{}]]", target));
                changes.push(LinkChange {
                    target: target.to_string(),
                    position: mention.start,
                    mention: written,
                });
            }
        }

        InsertOutcome {
            text: current,
            changes,
        }
    }
}

/// [`LinkInserter::insert`] with the default bracket window
pub fn insert_links(text: &str, suggestions: &[LinkSuggestion], threshold: f64) -> InsertOutcome {
    LinkInserter::default().insert(text, suggestions, threshold)
}
