//! Core data models for vault analysis.
//!
//! These types are designed to be:
//! - **Serializable**: All types derive Serialize/Deserialize
//! - **Immutable snapshots**: built once per analysis run, never mutated afterwards
//! - **Deterministic**: ordered collections (`BTreeMap`/`BTreeSet`) everywhere
//!   iteration order can leak into output

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::path::PathBuf;

/// Folder identifier reserved for notes stored directly in the vault root.
///
/// No directory entry can be called `.`, so the sentinel never collides with
/// a real subfolder.
pub const ROOT_FOLDER: &str = ".";

/// Build the vault-wide identifier `"<folder>/<name>"` of a note.
pub fn qualified_name(folder: &str, note: &str) -> String {
    format!("{}/{}", folder, note)
}

/// A markdown heading (level 1-6) in document order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Heading {
    pub level: u8,
    pub text: String,
}

impl Heading {
    pub fn new(level: u8, text: impl Into<String>) -> Self {
        Self {
            level,
            text: text.into(),
        }
    }
}

/// A topic inferred from the keyword dictionary, e.g. `languages:python`
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Topic {
    pub category: String,
    pub keyword: String,
}

impl Topic {
    pub fn new(category: impl Into<String>, keyword: impl Into<String>) -> Self {
        Self {
            category: category.into(),
            keyword: keyword.into(),
        }
    }
}

impl fmt::Display for Topic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.category, self.keyword)
    }
}

/// One parsed note.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Note {
    /// Filename stem, unique within its folder
    pub name: String,
    /// Raw text body
    pub content: String,
    /// Whitespace-delimited token count
    pub word_count: usize,
    /// Wikilink targets (aliases resolved to the target)
    pub links: BTreeSet<String>,
    /// Tags without the leading `#`, nested tags kept whole
    pub tags: BTreeSet<String>,
    pub headings: Vec<Heading>,
    /// At least one fenced code block is present
    pub code_blocks: bool,
    pub code_block_count: usize,
    /// Fenced blocks without a language info string
    pub unlabeled_code_blocks: usize,
    pub topics: BTreeSet<Topic>,
}

impl Note {
    /// An empty note with the given name
    pub fn empty(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            content: String::new(),
            word_count: 0,
            links: BTreeSet::new(),
            tags: BTreeSet::new(),
            headings: Vec::new(),
            code_blocks: false,
            code_block_count: 0,
            unlabeled_code_blocks: 0,
            topics: BTreeSet::new(),
        }
    }

    /// Check if this note already links to `target` (exact, case-sensitive)
    pub fn links_to(&self, target: &str) -> bool {
        self.links.contains(target)
    }

    /// Topic keywords without their categories
    pub fn topic_keywords(&self) -> BTreeSet<&str> {
        self.topics.iter().map(|t| t.keyword.as_str()).collect()
    }
}

/// All notes of one folder, keyed by note name.
///
/// Links may point at names that are not in the index; such dangling
/// references are valid.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FolderIndex {
    /// Folder identifier relative to the vault root (`/`-separated)
    pub folder: String,
    /// Absolute location of the folder on disk
    pub path: PathBuf,
    notes: BTreeMap<String, Note>,
}

impl FolderIndex {
    pub fn new(folder: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            folder: folder.into(),
            path: path.into(),
            notes: BTreeMap::new(),
        }
    }

    /// Insert a note, replacing any previous note of the same name
    pub fn insert(&mut self, note: Note) {
        self.notes.insert(note.name.clone(), note);
    }

    pub fn get(&self, name: &str) -> Option<&Note> {
        self.notes.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.notes.contains_key(name)
    }

    /// Notes in name order
    pub fn notes(&self) -> impl Iterator<Item = &Note> {
        self.notes.values()
    }

    /// Note names in name order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.notes.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    /// Folder-local backlinks: note name -> names of notes in this folder linking to it.
    ///
    /// Only targets that exist in the folder are reported.
    pub fn backlinks(&self) -> BTreeMap<String, BTreeSet<String>> {
        let mut backlinks: BTreeMap<String, BTreeSet<String>> = BTreeMap::new();
        for note in self.notes.values() {
            for link in &note.links {
                if self.notes.contains_key(link) {
                    backlinks
                        .entry(link.clone())
                        .or_default()
                        .insert(note.name.clone());
                }
            }
        }
        backlinks
    }

    /// Path of the file backing `name`, given the note file extension
    pub fn note_path(&self, name: &str, extension: &str) -> PathBuf {
        self.path.join(format!("{}.{}", name, extension))
    }
}

/// Frequency of one topic across a folder
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopicCount {
    pub topic: Topic,
    pub count: usize,
}

/// Aggregate statistics for one folder
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FolderStats {
    pub name: String,
    pub note_count: usize,
    pub total_words: usize,
    pub total_links: usize,
    pub orphaned_notes: usize,
    pub notes_with_code: usize,
    /// Most frequent topics, highest count first
    pub top_topics: Vec<TopicCount>,
    /// Note names in name order
    pub notes: Vec<String>,
    /// Names of the orphaned notes
    pub orphans: Vec<String>,
}

/// Notes of other folders mentioned by one note without a link
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrossFolderSuggestion {
    /// Qualified source note (`folder/name`)
    pub source: String,
    /// Qualified candidate targets in discovery order
    pub targets: Vec<String>,
}

/// Immutable snapshot of one full-vault analysis run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VaultAnalysis {
    pub vault_path: String,
    /// RFC 3339 timestamp
    pub analysis_date: String,
    pub total_folders: usize,
    pub total_notes: usize,
    pub total_words: usize,
    pub total_links: usize,
    pub global_orphaned_notes: usize,
    pub folder_stats: Vec<FolderStats>,
    /// Ordered by folder discovery order, then note name
    pub cross_folder_suggestions: Vec<CrossFolderSuggestion>,
    /// Composite score in [0, 100], one decimal
    pub vault_health_score: f64,
}

impl VaultAnalysis {
    /// Fraction of notes that are orphaned (0 for an empty vault)
    pub fn orphan_ratio(&self) -> f64 {
        if self.total_notes == 0 {
            return 0.0;
        }
        self.global_orphaned_notes as f64 / self.total_notes as f64
    }

    /// Average number of outgoing links per note (0 for an empty vault)
    pub fn average_links_per_note(&self) -> f64 {
        if self.total_notes == 0 {
            return 0.0;
        }
        self.total_links as f64 / self.total_notes as f64
    }

    /// Cross-folder candidates for one qualified source note
    pub fn cross_folder_targets(&self, source: &str) -> Option<&[String]> {
        self.cross_folder_suggestions
            .iter()
            .find(|s| s.source == source)
            .map(|s| s.targets.as_slice())
    }
}

/// A candidate edge proposed by heuristic matching
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinkSuggestion {
    pub target_note: String,
    /// Surrounding text for each mention (evidence)
    pub context_snippets: Vec<String>,
    /// In [0, 1]
    pub confidence: f64,
    /// At least 1
    pub mention_count: usize,
}

impl fmt::Display for LinkSuggestion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Link to [[{}]] (confidence: {:.1}%)",
            self.target_note,
            self.confidence * 100.0
        )
    }
}

/// One bracket insertion performed (or planned) by the link inserter
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkChange {
    pub target: String,
    /// Byte offset of the mention in the text it was found in
    pub position: usize,
    /// The mention text that was wrapped
    pub mention: String,
}

impl fmt::Display for LinkChange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Linked '{}' at position {}", self.target, self.position)
    }
}

/// Kind of structural improvement suggested for a note
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StructureKind {
    AddHeadings,
    HeadingHierarchy,
    CodeOrganization,
    CodeLanguageTags,
    TopicSections,
    AddTags,
}

impl fmt::Display for StructureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::AddHeadings => "add_headings",
            Self::HeadingHierarchy => "heading_hierarchy",
            Self::CodeOrganization => "code_organization",
            Self::CodeLanguageTags => "code_language_tags",
            Self::TopicSections => "topic_sections",
            Self::AddTags => "add_tags",
        };
        f.write_str(name)
    }
}

/// A suggestion for improving the structure of a note
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StructureSuggestion {
    pub kind: StructureKind,
    pub description: String,
    pub examples: Vec<String>,
}

impl fmt::Display for StructureSuggestion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.description)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn note(name: &str, links: &[&str]) -> Note {
        let mut note = Note::empty(name);
        note.links = links.iter().map(|s| s.to_string()).collect();
        note
    }

    #[test]
    fn test_qualified_name() {
        assert_eq!(qualified_name("Coding", "Rust"), "Coding/Rust");
        assert_eq!(qualified_name(ROOT_FOLDER, "Inbox"), "./Inbox");
    }

    #[test]
    fn test_topic_display() {
        let topic = Topic::new("languages", "python");
        assert_eq!(topic.to_string(), "languages:python");
    }

    #[test]
    fn test_folder_index_backlinks_ignore_dangling() {
        let mut index = FolderIndex::new("Coding", "/vault/Coding");
        index.insert(note("a", &["b", "missing"]));
        index.insert(note("b", &["a"]));
        index.insert(note("c", &["b"]));

        let backlinks = index.backlinks();
        assert_eq!(backlinks.len(), 2);
        assert_eq!(
            backlinks["b"].iter().collect::<Vec<_>>(),
            vec!["a", "c"]
        );
        assert!(!backlinks.contains_key("missing"));
    }

    #[test]
    fn test_folder_index_names_are_sorted() {
        let mut index = FolderIndex::new("x", "/x");
        index.insert(note("zeta", &[]));
        index.insert(note("alpha", &[]));
        assert_eq!(index.names().collect::<Vec<_>>(), vec!["alpha", "zeta"]);
        assert_eq!(
            index.note_path("alpha", "md"),
            PathBuf::from("/x/alpha.md")
        );
    }

    #[test]
    fn test_vault_analysis_ratios_on_empty_vault() {
        let analysis = VaultAnalysis {
            vault_path: "/v".to_string(),
            analysis_date: String::new(),
            total_folders: 0,
            total_notes: 0,
            total_words: 0,
            total_links: 0,
            global_orphaned_notes: 0,
            folder_stats: vec![],
            cross_folder_suggestions: vec![],
            vault_health_score: 0.0,
        };
        assert_eq!(analysis.orphan_ratio(), 0.0);
        assert_eq!(analysis.average_links_per_note(), 0.0);
        assert!(analysis.cross_folder_targets("a/b").is_none());
    }

    #[test]
    fn test_link_change_display() {
        let change = LinkChange {
            target: "note2".to_string(),
            position: 4,
            mention: "note2".to_string(),
        };
        assert_eq!(change.to_string(), "Linked 'note2' at position 4");
    }
}
