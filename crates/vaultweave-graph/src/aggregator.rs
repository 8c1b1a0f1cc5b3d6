//! Vault-wide aggregation: folder discovery, merge, orphans, cross-folder
//! candidates and the health score.

use crate::folder::FolderAnalyzer;
use crate::global::GlobalGraph;
use crate::health::HealthInputs;
use crate::stats::folder_stats;
use chrono::{Local, SecondsFormat};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use tracing::instrument;
use vaultweave_core::utils::{relative_to_vault, to_posix};
use vaultweave_core::{AnalyzerConfig, FolderIndex, FolderStats, ROOT_FOLDER, VaultAnalysis};
use walkdir::WalkDir;

/// Word count above which a note without headings is flagged by
/// [`VaultAggregator::folder_suggestions`]
pub const UNSTRUCTURED_NOTE_WORDS: usize = 200;
const MAX_UNSTRUCTURED_EXAMPLES: usize = 5;

/// Urgency of a folder suggestion
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    Medium,
    Low,
}

/// Kind of folder-level improvement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FolderSuggestionKind {
    OrphanedNotes,
    AddStructure,
}

/// A folder-level improvement and the notes it concerns
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FolderSuggestion {
    pub kind: FolderSuggestionKind,
    pub title: String,
    pub notes: Vec<String>,
    pub priority: Priority,
}

/// Analyzes a whole vault, one folder at a time
#[derive(Debug, Clone)]
pub struct VaultAggregator {
    vault_root: PathBuf,
    analyzer: FolderAnalyzer,
}

impl VaultAggregator {
    pub fn new(vault_root: impl Into<PathBuf>, config: AnalyzerConfig) -> Self {
        Self {
            vault_root: vault_root.into(),
            analyzer: FolderAnalyzer::new(config),
        }
    }

    pub fn vault_root(&self) -> &Path {
        &self.vault_root
    }

    pub fn analyzer(&self) -> &FolderAnalyzer {
        &self.analyzer
    }

    pub fn config(&self) -> &AnalyzerConfig {
        self.analyzer.config()
    }

    /// Folders holding at least one note file, as sorted `/`-separated paths
    /// relative to the vault root. Notes in the root itself are reported
    /// under [`ROOT_FOLDER`]. A missing vault yields no folders.
    #[instrument(skip(self), fields(vault = %self.vault_root.display()), name = "vault_discover_folders")]
    pub fn discover_folders(&self) -> Vec<String> {
        let config = self.config();
        let mut folders = BTreeSet::new();

        let walker = WalkDir::new(&self.vault_root)
            .follow_links(false)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| {
                entry.depth() == 0
                    || !entry.file_type().is_dir()
                    || entry
                        .file_name()
                        .to_str()
                        .is_none_or(|name| !config.is_excluded_dir(name))
            });

        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    log::warn!("Skipping unreadable vault entry: {}", e);
                    continue;
                }
            };
            if !entry.file_type().is_file() || !config.is_note_file(entry.path()) {
                continue;
            }
            let Some(parent) = entry.path().parent() else {
                continue;
            };
            match relative_to_vault(&self.vault_root, parent) {
                Ok(relative) if relative.as_os_str().is_empty() => {
                    folders.insert(ROOT_FOLDER.to_string());
                }
                Ok(relative) => {
                    folders.insert(to_posix(&relative));
                }
                Err(e) => log::warn!("Skipping {}: {}", entry.path().display(), e),
            }
        }

        log::info!("Discovered {} folders", folders.len());
        folders.into_iter().collect()
    }

    /// Location on disk of a folder identifier
    pub fn folder_path(&self, folder: &str) -> PathBuf {
        if folder == ROOT_FOLDER {
            self.vault_root.clone()
        } else {
            folder
                .split('/')
                .fold(self.vault_root.clone(), |path, part| path.join(part))
        }
    }

    /// Parse one folder into an index
    pub fn load_folder(&self, folder: &str) -> FolderIndex {
        self.analyzer.load(folder, &self.folder_path(folder))
    }

    /// Statistics of one folder analyzed on its own.
    ///
    /// Links from other folders are not seen here, so orphan counts can be
    /// higher than in a full-vault analysis. A missing folder yields zeros.
    pub fn analyze_folder(&self, folder: &str) -> FolderStats {
        let index = self.load_folder(folder);
        let graph = GlobalGraph::merge(vec![index.clone()]);
        folder_stats(&index, &graph, self.config().top_topics)
    }

    /// Parse the selected folders and merge them.
    ///
    /// With a subset, only discovered folders named in it are used, in
    /// discovery order; unknown names are dropped. Folders without notes are
    /// left out of the graph.
    #[instrument(skip(self, subset), name = "vault_build_graph")]
    pub fn build_graph(&self, subset: Option<&[String]>) -> GlobalGraph {
        let folders: Vec<String> = self
            .discover_folders()
            .into_iter()
            .filter(|folder| subset.is_none_or(|wanted| wanted.iter().any(|w| w == folder)))
            .collect();

        if let Some(wanted) = subset {
            for missing in wanted.iter().filter(|w| !folders.contains(w)) {
                log::debug!("Requested folder not found: {}", missing);
            }
        }

        let indexes: Vec<FolderIndex> = folders
            .iter()
            .map(|folder| self.load_folder(folder))
            .filter(|index| !index.is_empty())
            .collect();

        GlobalGraph::merge(indexes)
    }

    /// Analyze the whole vault, or the named subset of its folders.
    ///
    /// Returns `None` when no folder produced any note.
    #[instrument(skip(self, subset), fields(vault = %self.vault_root.display()), name = "vault_analyze")]
    pub fn analyze_entire_vault(&self, subset: Option<&[String]>) -> Option<VaultAnalysis> {
        log::info!("Starting vault analysis of {}", self.vault_root.display());

        let graph = self.build_graph(subset);
        if graph.total_notes() == 0 {
            log::warn!("No notes found in vault {}", self.vault_root.display());
            return None;
        }

        Some(self.summarize(&graph))
    }

    /// Build the analysis snapshot of an already merged graph
    pub fn summarize(&self, graph: &GlobalGraph) -> VaultAnalysis {
        let top_n = self.config().top_topics;
        let folder_stats = graph
            .folders()
            .iter()
            .map(|index| folder_stats(index, graph, top_n))
            .collect();
        let cross_folder_suggestions = graph.find_cross_folder_connections();
        let health = HealthInputs::from_graph(graph).score();

        log::info!(
            "Analyzed {} notes in {} folders, health score {}",
            graph.total_notes(),
            graph.folder_count(),
            health.score
        );

        VaultAnalysis {
            vault_path: self.vault_root.display().to_string(),
            analysis_date: Local::now().to_rfc3339_opts(SecondsFormat::Secs, false),
            total_folders: graph.folder_count(),
            total_notes: graph.total_notes(),
            total_words: graph.total_words(),
            total_links: graph.total_links(),
            global_orphaned_notes: graph.orphan_count(),
            folder_stats,
            cross_folder_suggestions,
            vault_health_score: health.score,
        }
    }

    /// Folder-level improvements: orphaned notes (judged vault-wide) and long
    /// notes without headings.
    pub fn folder_suggestions(&self, graph: &GlobalGraph, folder: &str) -> Vec<FolderSuggestion> {
        let Some(index) = graph.folder(folder) else {
            return Vec::new();
        };
        let mut suggestions = Vec::new();

        let orphaned: Vec<String> = index
            .notes()
            .filter(|note| graph.is_orphan(note))
            .map(|note| note.name.clone())
            .collect();
        if !orphaned.is_empty() {
            suggestions.push(FolderSuggestion {
                kind: FolderSuggestionKind::OrphanedNotes,
                title: format!("Connect {} orphaned notes", orphaned.len()),
                notes: orphaned,
                priority: Priority::High,
            });
        }

        let unstructured: Vec<String> = index
            .notes()
            .filter(|note| note.word_count > UNSTRUCTURED_NOTE_WORDS && note.headings.is_empty())
            .map(|note| note.name.clone())
            .collect();
        if !unstructured.is_empty() {
            suggestions.push(FolderSuggestion {
                kind: FolderSuggestionKind::AddStructure,
                title: format!("Add headings to {} long notes", unstructured.len()),
                notes: unstructured
                    .into_iter()
                    .take(MAX_UNSTRUCTURED_EXAMPLES)
                    .collect(),
                priority: Priority::Medium,
            });
        }

        suggestions
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write(root: &Path, relative: &str, content: &str) {
        let path = root.join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, content).unwrap();
    }

    fn aggregator(root: &Path) -> VaultAggregator {
        VaultAggregator::new(root, AnalyzerConfig::default())
    }

    #[test]
    fn test_discover_folders() {
        let temp = TempDir::new().unwrap();
        let root = temp.path();
        write(root, "inbox.md", "root note");
        write(root, "Coding/rust.md", "");
        write(root, "Projects/Rust/cli.md", "");
        write(root, "Projects/readme.txt", "");
        write(root, ".obsidian/workspace.md", "");
        write(root, "Coding/.git/HEAD.md", "");
        fs::create_dir_all(root.join("Empty")).unwrap();

        assert_eq!(
            aggregator(root).discover_folders(),
            vec![".", "Coding", "Projects/Rust"]
        );
    }

    #[test]
    fn test_discover_missing_vault() {
        let temp = TempDir::new().unwrap();
        assert!(aggregator(&temp.path().join("nope")).discover_folders().is_empty());
        assert!(aggregator(&temp.path().join("nope")).analyze_entire_vault(None).is_none());
    }

    #[test]
    fn test_folder_path() {
        let agg = VaultAggregator::new("/vault", AnalyzerConfig::default());
        assert_eq!(agg.folder_path(ROOT_FOLDER), PathBuf::from("/vault"));
        assert_eq!(
            agg.folder_path("Projects/Rust"),
            PathBuf::from("/vault/Projects/Rust")
        );
    }

    #[test]
    fn test_subset_drops_unknown_folders() {
        let temp = TempDir::new().unwrap();
        let root = temp.path();
        write(root, "A/a.md", "[[b]]");
        write(root, "B/b.md", "");

        let subset = vec!["B".to_string(), "Nope".to_string()];
        let analysis = aggregator(root).analyze_entire_vault(Some(&subset)).unwrap();
        assert_eq!(analysis.total_folders, 1);
        assert_eq!(analysis.folder_stats[0].name, "B");
        // the link from A is not part of this run
        assert_eq!(analysis.global_orphaned_notes, 1);

        let none = vec!["Nope".to_string()];
        assert!(aggregator(root).analyze_entire_vault(Some(&none)).is_none());
    }

    #[test]
    fn test_analyze_folder_alone_misses_cross_folder_backlinks() {
        let temp = TempDir::new().unwrap();
        let root = temp.path();
        write(root, "Coding/Rust.md", "A systems language");
        write(root, "Journal/today.md", "Wrote [[Rust]]");

        let agg = aggregator(root);
        assert_eq!(agg.analyze_folder("Coding").orphaned_notes, 1);

        let analysis = agg.analyze_entire_vault(None).unwrap();
        assert_eq!(analysis.global_orphaned_notes, 0);

        let missing = agg.analyze_folder("Missing");
        assert_eq!(missing.name, "Missing");
        assert_eq!(missing.note_count, 0);
    }

    #[test]
    fn test_folder_suggestions() {
        let temp = TempDir::new().unwrap();
        let root = temp.path();
        write(root, "Notes/long.md", &"word ".repeat(250));
        write(root, "Notes/short.md", "# Title\n[[long]]");
        write(root, "Notes/lonely.md", "alone");

        let agg = aggregator(root);
        let graph = agg.build_graph(None);
        let suggestions = agg.folder_suggestions(&graph, "Notes");

        assert_eq!(suggestions.len(), 2);
        assert_eq!(suggestions[0].kind, FolderSuggestionKind::OrphanedNotes);
        assert_eq!(suggestions[0].notes, vec!["lonely"]);
        assert_eq!(suggestions[1].kind, FolderSuggestionKind::AddStructure);
        assert_eq!(suggestions[1].notes, vec!["long"]);
        assert!(agg.folder_suggestions(&graph, "Other").is_empty());
    }
}
