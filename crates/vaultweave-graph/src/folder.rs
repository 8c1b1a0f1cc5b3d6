//! Single-folder analysis: loading, link suggestions and recommendations.

use crate::structure::review_structure;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;
use tracing::instrument;
use vaultweave_core::utils::truncate_chars;
use vaultweave_core::{AnalyzerConfig, FolderIndex, LinkSuggestion, Note, StructureSuggestion};
use vaultweave_parser::{Mention, MentionMatcher, NoteParser};

/// Base confidence of a suggestion backed by a single mention
pub const BASE_MENTION_CONFIDENCE: f64 = 0.8;
/// Confidence added per extra mention
pub const MENTION_STEP: f64 = 0.05;
/// Extra mentions that still raise confidence
pub const MAX_EXTRA_MENTIONS: usize = 3;
/// Weight of topic overlap in mention confidence
pub const TOPIC_WEIGHT: f64 = 0.05;

const MENTION_SNIPPET_CHARS: usize = 200;
const TOPIC_SNIPPET_CHARS: usize = 150;
const MAX_TOPIC_SNIPPETS: usize = 3;

/// Summary numbers for one note
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NoteInfo {
    pub word_count: usize,
    pub current_links: usize,
    /// Notes of the same folder linking here
    pub folder_backlinks: usize,
    pub headings: usize,
    pub code_blocks: usize,
    /// `category:keyword` strings
    pub topics: Vec<String>,
}

/// Everything the analyzer can say about one note
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NoteRecommendations {
    pub note_name: String,
    pub link_suggestions: Vec<LinkSuggestion>,
    pub related_suggestions: Vec<LinkSuggestion>,
    pub structure_suggestions: Vec<StructureSuggestion>,
    pub note_info: NoteInfo,
}

/// Mention matchers for every note of one folder, compiled once
#[derive(Debug, Clone, Default)]
pub struct FolderMatchers {
    by_name: BTreeMap<String, MentionMatcher>,
}

impl FolderMatchers {
    pub fn new(index: &FolderIndex) -> Self {
        let by_name = index
            .notes()
            .filter_map(|note| Some((note.name.clone(), MentionMatcher::new(&note.name)?)))
            .collect();
        Self { by_name }
    }

    pub fn get(&self, name: &str) -> Option<&MentionMatcher> {
        self.by_name.get(name)
    }

    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }
}

/// Loads one folder and proposes links between its notes
#[derive(Debug, Clone)]
pub struct FolderAnalyzer {
    config: AnalyzerConfig,
    parser: NoteParser,
}

impl FolderAnalyzer {
    pub fn new(config: AnalyzerConfig) -> Self {
        let parser = NoteParser::from_config(&config);
        Self { config, parser }
    }

    pub fn config(&self) -> &AnalyzerConfig {
        &self.config
    }

    pub fn parser(&self) -> &NoteParser {
        &self.parser
    }

    /// Parse every note file directly inside `path`.
    ///
    /// A missing or unreadable folder yields an empty index. Notes that cannot
    /// be read are logged and left out.
    #[instrument(skip(self, path), fields(folder = %folder), name = "folder_load")]
    pub fn load(&self, folder: &str, path: &Path) -> FolderIndex {
        let mut index = FolderIndex::new(folder, path);

        let entries = match std::fs::read_dir(path) {
            Ok(entries) => entries,
            Err(e) => {
                log::debug!("Folder {} not loadable: {}", path.display(), e);
                return index;
            }
        };

        for entry in entries {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    log::warn!("Failed to read entry in {}: {}", path.display(), e);
                    continue;
                }
            };
            let file_path = entry.path();
            if !file_path.is_file() || !self.config.is_note_file(&file_path) {
                continue;
            }
            let Some(name) = file_path.file_stem().and_then(|s| s.to_str()) else {
                log::warn!("Skipping note with non UTF-8 name: {:?}", file_path);
                continue;
            };

            match std::fs::read_to_string(&file_path) {
                Ok(content) => {
                    let note = self.parser.parse(name, &content);
                    log::debug!(
                        "Parsed {}: {} words, {} links",
                        file_path.display(),
                        note.word_count,
                        note.links.len()
                    );
                    index.insert(note);
                }
                Err(e) => {
                    log::warn!("Failed to read note {}: {}", file_path.display(), e);
                }
            }
        }

        log::info!("Loaded {} notes from folder {}", index.len(), folder);
        index
    }

    /// Link suggestions for `note_name` from unlinked mentions of other notes
    /// in the same folder.
    ///
    /// Ordered by descending confidence, then descending mention count, then
    /// target name. Unknown notes yield no suggestions.
    pub fn suggest_links(&self, index: &FolderIndex, note_name: &str) -> Vec<LinkSuggestion> {
        self.suggest_links_with(index, &FolderMatchers::new(index), note_name)
    }

    /// [`suggest_links`](Self::suggest_links) with matchers compiled by the
    /// caller, for loops over every note of a folder
    pub fn suggest_links_with(
        &self,
        index: &FolderIndex,
        matchers: &FolderMatchers,
        note_name: &str,
    ) -> Vec<LinkSuggestion> {
        let Some(note) = index.get(note_name) else {
            return Vec::new();
        };
        let lines = split_lines(&note.content);
        let keywords = note.topic_keywords();

        let mut suggestions: Vec<LinkSuggestion> = index
            .notes()
            .filter(|other| other.name != note.name && !note.links_to(&other.name))
            .filter_map(|other| {
                let matcher = matchers.get(&other.name)?;
                let mentions = matcher.find_unlinked(&note.content, self.config.bracket_window);
                if mentions.is_empty() {
                    return None;
                }
                let overlap = jaccard(&keywords, &other.topic_keywords());
                Some(LinkSuggestion {
                    target_note: other.name.clone(),
                    context_snippets: mention_snippets(&note.content, &lines, &mentions),
                    confidence: mention_confidence(mentions.len(), overlap),
                    mention_count: mentions.len(),
                })
            })
            .collect();

        rank_suggestions(&mut suggestions);
        suggestions.truncate(self.config.max_link_suggestions);
        suggestions
    }

    /// Notes sharing enough topics with `note_name` that are neither linked
    /// nor mentioned by it. Confidence is the topic overlap.
    pub fn suggest_related(&self, index: &FolderIndex, note_name: &str) -> Vec<LinkSuggestion> {
        self.suggest_related_with(index, &FolderMatchers::new(index), note_name)
    }

    /// [`suggest_related`](Self::suggest_related) with caller-compiled matchers
    pub fn suggest_related_with(
        &self,
        index: &FolderIndex,
        matchers: &FolderMatchers,
        note_name: &str,
    ) -> Vec<LinkSuggestion> {
        let Some(note) = index.get(note_name) else {
            return Vec::new();
        };
        let lines = split_lines(&note.content);
        let keywords = note.topic_keywords();

        let mut suggestions: Vec<LinkSuggestion> = index
            .notes()
            .filter(|other| other.name != note.name && !note.links_to(&other.name))
            .filter(|other| {
                matchers
                    .get(&other.name)
                    .is_none_or(|matcher| matcher.find_all(&note.content).is_empty())
            })
            .filter_map(|other| {
                let other_keywords = other.topic_keywords();
                let overlap = jaccard(&keywords, &other_keywords);
                if overlap <= self.config.topic_overlap_threshold {
                    return None;
                }
                let evidence = topic_snippets(&lines, &other_keywords);
                if evidence.is_empty() {
                    return None;
                }
                Some(LinkSuggestion {
                    target_note: other.name.clone(),
                    mention_count: evidence.len(),
                    context_snippets: evidence,
                    confidence: overlap,
                })
            })
            .collect();

        rank_suggestions(&mut suggestions);
        suggestions.truncate(self.config.max_link_suggestions);
        suggestions
    }

    /// Link, related and structure suggestions plus summary numbers for one note
    pub fn recommend(&self, index: &FolderIndex, note_name: &str) -> Option<NoteRecommendations> {
        let note = index.get(note_name)?;
        let matchers = FolderMatchers::new(index);
        Some(NoteRecommendations {
            note_name: note.name.clone(),
            link_suggestions: self.suggest_links_with(index, &matchers, note_name),
            related_suggestions: self.suggest_related_with(index, &matchers, note_name),
            structure_suggestions: review_structure(note),
            note_info: note_info(note, folder_backlinks(index, &note.name)),
        })
    }
}

/// Confidence of a mention-backed suggestion, capped at 1.0
pub fn mention_confidence(mentions: usize, topic_overlap: f64) -> f64 {
    let extra = mentions.saturating_sub(1).min(MAX_EXTRA_MENTIONS) as f64;
    (BASE_MENTION_CONFIDENCE + MENTION_STEP * extra + TOPIC_WEIGHT * topic_overlap.clamp(0.0, 1.0))
        .min(1.0)
}

/// Jaccard similarity of two keyword sets; 0 when either is empty
pub fn jaccard(a: &BTreeSet<&str>, b: &BTreeSet<&str>) -> f64 {
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }
    let intersection = a.intersection(b).count();
    let union = a.union(b).count();
    intersection as f64 / union as f64
}

/// Sort by descending confidence, descending mentions, ascending name
pub fn rank_suggestions(suggestions: &mut [LinkSuggestion]) {
    suggestions.sort_by(|a, b| {
        b.confidence
            .total_cmp(&a.confidence)
            .then_with(|| b.mention_count.cmp(&a.mention_count))
            .then_with(|| a.target_note.cmp(&b.target_note))
    });
}

fn folder_backlinks(index: &FolderIndex, name: &str) -> usize {
    index.backlinks().get(name).map_or(0, |sources| sources.len())
}

fn note_info(note: &Note, folder_backlinks: usize) -> NoteInfo {
    NoteInfo {
        word_count: note.word_count,
        current_links: note.links.len(),
        folder_backlinks,
        headings: note.headings.len(),
        code_blocks: note.code_block_count,
        topics: note.topics.iter().map(ToString::to_string).collect(),
    }
}

fn split_lines(content: &str) -> Vec<&str> {
    content
        .split('\n')
        .map(|line| line.trim_end_matches('\r'))
        .collect()
}

/// Line `i` with one line of context on each side
fn context_around(lines: &[&str], i: usize, max_chars: usize) -> String {
    let start = i.saturating_sub(1);
    let end = (i + 2).min(lines.len());
    truncate_chars(lines[start..end].join(" ").trim(), max_chars)
}

/// One snippet per distinct line holding a mention
fn mention_snippets(content: &str, lines: &[&str], mentions: &[Mention]) -> Vec<String> {
    let line_numbers: BTreeSet<usize> = mentions
        .iter()
        .map(|m| content[..m.start].matches('\n').count())
        .collect();
    line_numbers
        .into_iter()
        .filter(|&i| i < lines.len())
        .map(|i| context_around(lines, i, MENTION_SNIPPET_CHARS))
        .collect()
}

/// Up to three distinct snippets around lines mentioning one of `keywords`
fn topic_snippets(lines: &[&str], keywords: &BTreeSet<&str>) -> Vec<String> {
    let mut snippets: Vec<String> = Vec::new();
    for (i, line) in lines.iter().enumerate() {
        let lower = line.to_lowercase();
        if !keywords.iter().any(|keyword| lower.contains(*keyword)) {
            continue;
        }
        let snippet = context_around(lines, i, TOPIC_SNIPPET_CHARS);
        if !snippets.contains(&snippet) {
            snippets.push(snippet);
        }
        if snippets.len() == MAX_TOPIC_SNIPPETS {
            break;
        }
    }
    snippets
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn index_of(notes: &[(&str, &str)]) -> FolderIndex {
        let parser = NoteParser::default();
        let mut index = FolderIndex::new("Coding", "/vault/Coding");
        for (name, content) in notes {
            index.insert(parser.parse(name, content));
        }
        index
    }

    fn analyzer() -> FolderAnalyzer {
        FolderAnalyzer::new(AnalyzerConfig::default())
    }

    #[test]
    fn test_load_reads_only_direct_note_files() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("alpha.md"), "Alpha links [[beta]]").unwrap();
        fs::write(temp.path().join("beta.md"), "Beta").unwrap();
        fs::write(temp.path().join("notes.txt"), "not a note").unwrap();
        fs::create_dir(temp.path().join("nested")).unwrap();
        fs::write(temp.path().join("nested").join("gamma.md"), "Gamma").unwrap();

        let index = analyzer().load("Coding", temp.path());
        assert_eq!(index.names().collect::<Vec<_>>(), vec!["alpha", "beta"]);
        assert!(index.get("alpha").unwrap().links_to("beta"));
    }

    #[test]
    fn test_load_missing_folder_is_empty() {
        let temp = TempDir::new().unwrap();
        let index = analyzer().load("Missing", &temp.path().join("missing"));
        assert!(index.is_empty());
        assert_eq!(index.folder, "Missing");
    }

    #[test]
    fn test_load_skips_unreadable_note() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("good.md"), "fine").unwrap();
        fs::write(temp.path().join("bad.md"), [0xff, 0xfe, 0x00]).unwrap();

        let index = analyzer().load("Coding", temp.path());
        assert_eq!(index.names().collect::<Vec<_>>(), vec!["good"]);
    }

    #[test]
    fn test_suggest_links_finds_unlinked_mentions() {
        let index = index_of(&[
            ("Overview", "Start with Rust basics.\nThen read [[Ownership]].\nRust basics again."),
            ("Rust basics", "Basics"),
            ("Ownership", "Borrowing"),
            ("Lifetimes", "Not mentioned"),
        ]);

        let suggestions = analyzer().suggest_links(&index, "Overview");
        assert_eq!(suggestions.len(), 1);
        let s = &suggestions[0];
        assert_eq!(s.target_note, "Rust basics");
        assert_eq!(s.mention_count, 2);
        assert_eq!(s.context_snippets.len(), 2);
        assert!((s.confidence - 0.85).abs() < 1e-9);
    }

    #[test]
    fn test_suggest_links_ignores_bracketed_and_partial_mentions() {
        let index = index_of(&[
            ("a", "see [[b|the b note]] and bee and abc"),
            ("b", "target"),
            ("c", "the [[c d]] x"),
        ]);
        assert!(analyzer().suggest_links(&index, "a").is_empty());
    }

    #[test]
    fn test_suggest_links_ordering() {
        let index = index_of(&[
            ("hub", "alpha beta beta gamma"),
            ("alpha", ""),
            ("beta", ""),
            ("gamma", ""),
        ]);
        let names: Vec<_> = analyzer()
            .suggest_links(&index, "hub")
            .into_iter()
            .map(|s| s.target_note)
            .collect();
        assert_eq!(names, vec!["beta", "alpha", "gamma"]);
    }

    #[test]
    fn test_suggest_links_respects_max() {
        let names: Vec<String> = (0..15).map(|i| format!("n{}", i)).collect();
        let hub = names.join(" ");
        let mut pairs: Vec<(&str, &str)> = vec![("hub", hub.as_str())];
        pairs.extend(names.iter().map(|name| (name.as_str(), "")));
        let index = index_of(&pairs);

        assert_eq!(analyzer().suggest_links(&index, "hub").len(), 10);
    }

    #[test]
    fn test_shared_matchers_match_per_call_results() {
        let index = index_of(&[
            ("hub", "alpha beta beta, see [[gamma]]"),
            ("alpha", "back to hub"),
            ("beta", ""),
            ("gamma", "hub"),
        ]);
        let matchers = FolderMatchers::new(&index);
        assert_eq!(matchers.len(), 4);

        let analyzer = analyzer();
        for name in ["hub", "alpha", "beta", "gamma"] {
            assert_eq!(
                analyzer.suggest_links_with(&index, &matchers, name),
                analyzer.suggest_links(&index, name)
            );
            assert_eq!(
                analyzer.suggest_related_with(&index, &matchers, name),
                analyzer.suggest_related(&index, name)
            );
        }
        assert_eq!(analyzer.suggest_links_with(&index, &matchers, "alpha")[0].target_note, "hub");
    }

    #[test]
    fn test_unknown_note_yields_nothing() {
        let index = index_of(&[("a", "b")]);
        assert!(analyzer().suggest_links(&index, "zzz").is_empty());
        assert!(analyzer().recommend(&index, "zzz").is_none());
    }

    #[test]
    fn test_mention_confidence_is_capped() {
        assert!((mention_confidence(1, 0.0) - 0.8).abs() < 1e-9);
        assert!((mention_confidence(4, 0.0) - 0.95).abs() < 1e-9);
        assert!((mention_confidence(40, 1.0) - 1.0).abs() < 1e-9);
        assert!(mention_confidence(2, 0.5) > mention_confidence(2, 0.0));
    }

    #[test]
    fn test_suggest_related_by_topic() {
        let index = index_of(&[
            ("web", "Building apps with react and python"),
            ("api", "A flask service.\nUses python and react for the client."),
            ("ops", "docker only"),
        ]);
        let related = analyzer().suggest_related(&index, "web");
        assert_eq!(related.len(), 1);
        assert_eq!(related[0].target_note, "api");
        assert!(related[0].confidence > 0.3);
        assert!(!related[0].context_snippets.is_empty());
    }

    #[test]
    fn test_recommend_bundles_everything() {
        let index = index_of(&[
            ("a", "# A\n\nmentions b and python"),
            ("b", ""),
            ("c", "[[a]]"),
            ("d", "[[a]] [[missing]]"),
        ]);
        let rec = analyzer().recommend(&index, "a").unwrap();
        assert_eq!(rec.note_name, "a");
        assert_eq!(rec.link_suggestions.len(), 1);
        assert_eq!(rec.note_info.folder_backlinks, 2);
        assert_eq!(rec.note_info.headings, 1);
        assert_eq!(rec.note_info.topics, vec!["languages:python"]);
        assert!(!rec.structure_suggestions.is_empty());
    }

    #[test]
    fn test_jaccard() {
        let a: BTreeSet<&str> = ["x", "y"].into_iter().collect();
        let b: BTreeSet<&str> = ["y", "z"].into_iter().collect();
        assert!((jaccard(&a, &b) - 1.0 / 3.0).abs() < 1e-9);
        assert_eq!(jaccard(&a, &BTreeSet::new()), 0.0);
    }
}
