//! Plain-text mentions of note names.
//!
//! A mention is a case-insensitive occurrence of a note name that is not
//! glued to surrounding word characters. Whether a mention already sits
//! inside `[[...]]` is decided by looking a fixed number of characters to
//! each side, not by parsing the surrounding link.

use regex::{Regex, RegexBuilder};

/// One occurrence of a note name, as byte offsets into the searched text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Mention {
    pub start: usize,
    pub end: usize,
}

impl Mention {
    /// The matched text, in the case it was written
    pub fn text<'a>(&self, content: &'a str) -> &'a str {
        &content[self.start..self.end]
    }
}

/// Compiled matcher for one note name
#[derive(Debug, Clone)]
pub struct MentionMatcher {
    name: String,
    pattern: Regex,
}

impl MentionMatcher {
    /// Build a matcher; `None` for blank names.
    pub fn new(name: &str) -> Option<Self> {
        if name.trim().is_empty() {
            return None;
        }
        match RegexBuilder::new(&regex::escape(name))
            .case_insensitive(true)
            .build()
        {
            Ok(pattern) => Some(Self {
                name: name.to_string(),
                pattern,
            }),
            Err(e) => {
                log::warn!("Cannot build mention pattern for '{}': {}", name, e);
                None
            }
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Every word-bounded mention, in text order
    pub fn find_all(&self, content: &str) -> Vec<Mention> {
        self.pattern
            .find_iter(content)
            .filter(|m| is_word_bounded(content, m.start(), m.end()))
            .map(|m| Mention {
                start: m.start(),
                end: m.end(),
            })
            .collect()
    }

    /// Mentions not already wrapped in brackets, in text order
    pub fn find_unlinked(&self, content: &str, window: usize) -> Vec<Mention> {
        self.find_all(content)
            .into_iter()
            .filter(|m| !is_already_linked(content, m.start, m.end, window))
            .collect()
    }
}

/// Word-bounded, case-insensitive mentions of `name` in `content`
pub fn find_mentions(content: &str, name: &str) -> Vec<Mention> {
    MentionMatcher::new(name)
        .map(|matcher| matcher.find_all(content))
        .unwrap_or_default()
}

/// Heuristic check whether `content[start..end]` already sits inside a link.
///
/// True when `[[` occurs within `window` characters before the mention and
/// `]]` within `window` characters after it.
pub fn is_already_linked(content: &str, start: usize, end: usize, window: usize) -> bool {
    if window == 0 {
        return false;
    }
    let before = &content[..start];
    let before_start = before
        .char_indices()
        .rev()
        .nth(window - 1)
        .map(|(idx, _)| idx)
        .unwrap_or(0);
    let before = &before[before_start..];

    let after = &content[end..];
    let after_end = after
        .char_indices()
        .nth(window)
        .map(|(idx, _)| idx)
        .unwrap_or(after.len());
    let after = &after[..after_end];

    before.contains("[[") && after.contains("]]")
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

fn is_word_bounded(content: &str, start: usize, end: usize) -> bool {
    let before_ok = content[..start]
        .chars()
        .next_back()
        .is_none_or(|c| !is_word_char(c));
    let after_ok = content[end..].chars().next().is_none_or(|c| !is_word_char(c));
    before_ok && after_ok
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts<'a>(content: &'a str, mentions: &[Mention]) -> Vec<&'a str> {
        mentions.iter().map(|m| m.text(content)).collect()
    }

    #[test]
    fn test_case_insensitive_word_bounded() {
        let content = "Python, python3 and PYTHON.";
        let mentions = find_mentions(content, "python");
        assert_eq!(texts(content, &mentions), vec!["Python", "PYTHON"]);
    }

    #[test]
    fn test_underscore_is_word_char() {
        assert!(find_mentions("my_note here", "note").is_empty());
    }

    #[test]
    fn test_regex_metacharacters_escaped() {
        let content = "I like C++ a lot";
        let mentions = find_mentions(content, "C++");
        assert_eq!(mentions.len(), 1);
        assert_eq!(mentions[0].start, 7);
    }

    #[test]
    fn test_blank_name_has_no_matcher() {
        assert!(MentionMatcher::new("  ").is_none());
        assert!(find_mentions("anything", "").is_empty());
    }

    #[test]
    fn test_already_linked_window() {
        let content = "see [[note2]] there";
        let start = content.find("note2").unwrap();
        assert!(is_already_linked(content, start, start + 5, 10));

        let far = format!("[[{}note2{}]]", "x ".repeat(10), " y".repeat(10));
        let start = far.find("note2").unwrap();
        assert!(!is_already_linked(&far, start, start + 5, 10));
    }

    #[test]
    fn test_window_counts_characters() {
        // 9 multibyte chars between `[[` and the mention stay inside the window
        let content = "[[ééééééééénote]]";
        let start = content.find("note").unwrap();
        assert!(is_already_linked(content, start, start + 4, 11));
        assert!(!is_already_linked(content, start, start + 4, 10));
    }

    #[test]
    fn test_find_unlinked_skips_bracketed() {
        let matcher = MentionMatcher::new("note2").unwrap();
        let content = "[[note2]] and note2";
        let mentions = matcher.find_unlinked(content, 10);
        assert_eq!(mentions.len(), 1);
        assert_eq!(mentions[0].start, 14);
    }
}
