//! Vault-wide link graph merged from per-folder indexes.
//!
//! Building happens in two phases. Folders are first parsed into independent
//! [`FolderIndex`] values, then [`GlobalGraph::merge`] folds them into one
//! value. The backlink map is derived in that fold and never updated
//! afterwards, so the merge result does not depend on folder order.

use std::collections::{BTreeMap, BTreeSet};
use vaultweave_core::{CrossFolderSuggestion, FolderIndex, Note, qualified_name};

/// All notes of the analyzed folders plus the global backlink map
#[derive(Debug, Clone, Default)]
pub struct GlobalGraph {
    /// Folder indexes in discovery order
    folders: Vec<FolderIndex>,
    /// Qualified note name -> position of its folder in `folders`
    qualified: BTreeMap<String, usize>,
    /// Raw link target -> qualified names of the notes linking to it
    backlinks: BTreeMap<String, BTreeSet<String>>,
}

impl GlobalGraph {
    /// Fold folder indexes into one graph
    pub fn merge(folders: Vec<FolderIndex>) -> Self {
        let backlinks = folders.iter().fold(
            BTreeMap::<String, BTreeSet<String>>::new(),
            |mut acc, index| {
                for note in index.notes() {
                    for target in &note.links {
                        acc.entry(target.clone())
                            .or_default()
                            .insert(qualified_name(&index.folder, &note.name));
                    }
                }
                acc
            },
        );

        let qualified = folders
            .iter()
            .enumerate()
            .flat_map(|(pos, index)| {
                index
                    .names()
                    .map(move |name| (qualified_name(&index.folder, name), pos))
            })
            .collect();

        Self {
            folders,
            qualified,
            backlinks,
        }
    }

    /// Folder indexes in discovery order
    pub fn folders(&self) -> &[FolderIndex] {
        &self.folders
    }

    pub fn folder(&self, folder: &str) -> Option<&FolderIndex> {
        self.folders.iter().find(|index| index.folder == folder)
    }

    pub fn folder_count(&self) -> usize {
        self.folders.len()
    }

    /// `(folder, note)` pairs in discovery order, then name order
    pub fn notes(&self) -> impl Iterator<Item = (&str, &Note)> {
        self.folders
            .iter()
            .flat_map(|index| index.notes().map(move |note| (index.folder.as_str(), note)))
    }

    /// Look a note up by its qualified name
    pub fn note(&self, qualified: &str) -> Option<&Note> {
        let pos = *self.qualified.get(qualified)?;
        let index = self.folders.get(pos)?;
        let name = qualified.strip_prefix(index.folder.as_str())?.strip_prefix('/')?;
        index.get(name)
    }

    pub fn backlinks(&self) -> &BTreeMap<String, BTreeSet<String>> {
        &self.backlinks
    }

    /// Qualified names of the notes linking to `name`, from any folder
    pub fn backlinks_to(&self, name: &str) -> Option<&BTreeSet<String>> {
        self.backlinks.get(name)
    }

    /// No outgoing links and no incoming links from anywhere in the vault
    pub fn is_orphan(&self, note: &Note) -> bool {
        note.links.is_empty()
            && self
                .backlinks
                .get(&note.name)
                .is_none_or(BTreeSet::is_empty)
    }

    /// Qualified names of all orphaned notes
    pub fn orphans(&self) -> Vec<String> {
        self.notes()
            .filter(|(_, note)| self.is_orphan(note))
            .map(|(folder, note)| qualified_name(folder, &note.name))
            .collect()
    }

    pub fn total_notes(&self) -> usize {
        self.folders.iter().map(FolderIndex::len).sum()
    }

    pub fn total_words(&self) -> usize {
        self.notes().map(|(_, note)| note.word_count).sum()
    }

    pub fn total_links(&self) -> usize {
        self.notes().map(|(_, note)| note.links.len()).sum()
    }

    pub fn notes_with_code(&self) -> usize {
        self.notes().filter(|(_, note)| note.code_blocks).count()
    }

    pub fn orphan_count(&self) -> usize {
        self.notes().filter(|(_, note)| self.is_orphan(note)).count()
    }

    /// Notes of other folders whose names occur in a note's text without a link.
    ///
    /// Matching is a case-insensitive substring test. Sources and targets
    /// follow discovery order, then name order. Lists are not capped.
    pub fn find_cross_folder_connections(&self) -> Vec<CrossFolderSuggestion> {
        // Lowercased once per note name and once per source text
        let lowered_names: Vec<Vec<(&Note, String)>> = self
            .folders
            .iter()
            .map(|index| {
                index
                    .notes()
                    .map(|note| (note, note.name.to_lowercase()))
                    .collect()
            })
            .collect();

        let mut suggestions = Vec::new();
        for source_index in &self.folders {
            for note in source_index.notes() {
                let content = note.content.to_lowercase();
                let targets: Vec<String> = self
                    .folders
                    .iter()
                    .zip(&lowered_names)
                    .filter(|(other, _)| other.folder != source_index.folder)
                    .flat_map(|(other, names)| {
                        names
                            .iter()
                            .filter(|(candidate, lower)| {
                                !lower.is_empty()
                                    && !note.links_to(&candidate.name)
                                    && content.contains(lower.as_str())
                            })
                            .map(move |(candidate, _)| qualified_name(&other.folder, &candidate.name))
                    })
                    .collect();

                if !targets.is_empty() {
                    suggestions.push(CrossFolderSuggestion {
                        source: qualified_name(&source_index.folder, &note.name),
                        targets,
                    });
                }
            }
        }

        log::debug!(
            "Found cross-folder candidates for {} notes",
            suggestions.len()
        );
        suggestions
    }
}
