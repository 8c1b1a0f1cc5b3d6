//! Automatic linking of a whole folder.
//!
//! A run plans every rewrite first, checks the plan against the safety
//! profile, takes a backup, then writes note by note. A failed write is
//! rolled back to the note's original text and reported; the run continues
//! with the next note.

use crate::backup::BackupStore;
use crate::inserter::LinkInserter;
use crate::store::{FsStore, NoteStore};
use serde::{Deserialize, Serialize};
use similar::{ChangeTag, TextDiff};
use std::path::PathBuf;
use tracing::instrument;
use vaultweave_core::{AnalyzerConfig, LinkChange, Result, SafetyLevel};
use vaultweave_graph::{FolderMatchers, VaultAggregator};

/// Planned or applied rewrite of one note
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NoteLinkResult {
    pub note: String,
    pub path: PathBuf,
    pub changes: Vec<LinkChange>,
    #[serde(skip)]
    pub original: String,
    #[serde(skip)]
    pub updated: String,
}

/// A note whose rewrite could not be written
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkFailure {
    pub note: String,
    pub error: String,
    /// The original text was written back
    pub restored: bool,
}

/// Outcome of [`AutoLinker::link_folder`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AutoLinkReport {
    pub folder: String,
    pub dry_run: bool,
    pub threshold: f64,
    pub safety_level: SafetyLevel,
    pub backup_id: Option<String>,
    /// Notes rewritten (or, in a dry run, that would be)
    pub notes: Vec<NoteLinkResult>,
    pub failures: Vec<LinkFailure>,
}

impl NoteLinkResult {
    /// Changed lines of the rewrite, `-` for the original and `+` for the
    /// updated text
    pub fn diff(&self) -> String {
        let diff = TextDiff::from_lines(&self.original, &self.updated);
        let mut preview = String::new();

        for change in diff.iter_all_changes() {
            let sign = match change.tag() {
                ChangeTag::Delete => "-",
                ChangeTag::Insert => "+",
                ChangeTag::Equal => continue,
            };
            preview.push_str(&format!("{} {}", sign, change));
            if change.missing_newline() {
                preview.push('\n');
            }
        }
        preview
    }
}

impl AutoLinkReport {
    pub fn total_changes(&self) -> usize {
        self.notes.iter().map(|n| n.changes.len()).sum()
    }
}

/// Applies link suggestions to the notes of one folder
pub struct AutoLinker<S: NoteStore = FsStore> {
    aggregator: VaultAggregator,
    inserter: LinkInserter,
    store: S,
    backups: Option<BackupStore>,
    safety_level: SafetyLevel,
}

impl AutoLinker<FsStore> {
    /// Filesystem-backed linker with backups in the configured directory
    pub fn new(vault_root: impl Into<PathBuf>, config: AnalyzerConfig) -> Self {
        let backups = BackupStore::new(config.backup_dir.clone());
        Self::with_store(vault_root, config, FsStore).with_backups(Some(backups))
    }
}

impl<S: NoteStore> AutoLinker<S> {
    /// Linker writing through `store`, without backups
    pub fn with_store(vault_root: impl Into<PathBuf>, config: AnalyzerConfig, store: S) -> Self {
        let inserter = LinkInserter::new(config.bracket_window);
        Self {
            aggregator: VaultAggregator::new(vault_root, config),
            inserter,
            store,
            backups: None,
            safety_level: SafetyLevel::default(),
        }
    }

    pub fn with_backups(mut self, backups: Option<BackupStore>) -> Self {
        self.backups = backups;
        self
    }

    pub fn with_safety_level(mut self, level: SafetyLevel) -> Self {
        self.safety_level = level;
        self
    }

    pub fn safety_level(&self) -> SafetyLevel {
        self.safety_level
    }

    /// Plan the rewrites of every note in `folder` without writing anything
    pub fn plan_folder(&self, folder: &str, threshold: f64) -> Vec<NoteLinkResult> {
        let index = self.aggregator.load_folder(folder);
        let analyzer = self.aggregator.analyzer();
        let extension = &self.aggregator.config().note_extension;
        let matchers = FolderMatchers::new(&index);

        index
            .notes()
            .filter_map(|note| {
                let suggestions: Vec<_> = analyzer
                    .suggest_links_with(&index, &matchers, &note.name)
                    .into_iter()
                    .filter(|s| s.confidence >= threshold)
                    .collect();
                if suggestions.is_empty() {
                    return None;
                }
                let outcome = self.inserter.insert(&note.content, &suggestions, threshold);
                if outcome.is_unchanged() {
                    return None;
                }
                Some(NoteLinkResult {
                    note: note.name.clone(),
                    path: index.note_path(&note.name, extension),
                    changes: outcome.changes,
                    original: note.content.clone(),
                    updated: outcome.text,
                })
            })
            .collect()
    }

    /// Link unlinked mentions across one folder.
    ///
    /// Fails with a safety-limit error, before touching any file, when the
    /// plan exceeds the safety profile.
    #[instrument(skip(self), fields(safety = %self.safety_level), name = "vault_link_folder")]
    pub fn link_folder(&self, folder: &str, threshold: f64, dry_run: bool) -> Result<AutoLinkReport> {
        let plan = self.plan_folder(folder, threshold);
        let total_changes: usize = plan.iter().map(|n| n.changes.len()).sum();
        log::info!(
            "Planned {} links in {} notes of {}",
            total_changes,
            plan.len(),
            folder
        );

        self.safety_level.check(plan.len(), total_changes)?;

        let mut report = AutoLinkReport {
            folder: folder.to_string(),
            dry_run,
            threshold,
            safety_level: self.safety_level,
            backup_id: None,
            notes: Vec::new(),
            failures: Vec::new(),
        };

        if dry_run || plan.is_empty() {
            report.notes = plan;
            return Ok(report);
        }

        if let Some(backups) = &self.backups {
            let paths: Vec<PathBuf> = plan.iter().map(|n| n.path.clone()).collect();
            let manifest =
                backups.create(self.aggregator.vault_root(), &paths, self.safety_level)?;
            report.backup_id = Some(manifest.backup_id);
        }

        for result in plan {
            match self.store.write(&result.path, &result.updated) {
                Ok(()) => {
                    log::info!(
                        "Updated {} with {} links",
                        result.path.display(),
                        result.changes.len()
                    );
                    report.notes.push(result);
                }
                Err(e) => {
                    log::warn!("Failed to write {}: {}", result.path.display(), e);
                    let restored = match self.store.write(&result.path, &result.original) {
                        Ok(()) => true,
                        Err(restore_err) => {
                            log::warn!(
                                "Failed to restore {}: {}",
                                result.path.display(),
                                restore_err
                            );
                            false
                        }
                    };
                    report.failures.push(LinkFailure {
                        note: result.note,
                        error: e.to_string(),
                        restored,
                    });
                }
            }
        }

        Ok(report)
    }
}
