//! # Vault Writes
//!
//! Everything in vaultweave that modifies notes on disk.
//!
//! - [`inserter::LinkInserter`] rewrites note text, wrapping unlinked
//!   mentions in `[[wikilinks]]`. Pure; never touches the filesystem.
//! - [`store::NoteStore`] reads and writes note files. [`store::FsStore`]
//!   writes through a temp file renamed over the target.
//! - [`backup::BackupStore`] copies notes aside before a run and restores
//!   them after verifying their hashes.
//! - [`linker::AutoLinker`] ties these together for one folder, under a
//!   [`SafetyLevel`](vaultweave_core::SafetyLevel) profile.
//!
//! ## Quick Start
//!
//! ```no_run
//! use vaultweave_core::{AnalyzerConfig, SafetyLevel};
//! use vaultweave_vault::AutoLinker;
//!
//! let linker = AutoLinker::new("/path/to/vault", AnalyzerConfig::default())
//!     .with_safety_level(SafetyLevel::Balanced);
//! let report = linker.link_folder("Coding", 0.7, true)?;
//! println!("{} links would be inserted", report.total_changes());
//! # Ok::<(), vaultweave_core::Error>(())
//! ```
//!
//! Rewriting text directly:
//!
//! ```
//! use vaultweave_core::LinkSuggestion;
//! use vaultweave_vault::insert_links;
//!
//! let suggestion = LinkSuggestion {
//!     target_note: "Ownership".to_string(),
//!     context_snippets: vec![],
//!     confidence: 0.85,
//!     mention_count: 1,
//! };
//! let outcome = insert_links("Read about ownership.", &[suggestion], 0.7);
//! assert_eq!(outcome.text, "Read about [[Ownership]].");
//! ```

pub mod backup;
pub mod inserter;
pub mod linker;
pub mod store;

pub use backup::{BackupEntry, BackupManifest, BackupStore};
pub use inserter::{InsertOutcome, LinkInserter, insert_links};
pub use linker::{AutoLinkReport, AutoLinker, LinkFailure, NoteLinkResult};
pub use store::{FsStore, NoteStore};

pub mod prelude {
    pub use crate::backup::BackupStore;
    pub use crate::inserter::{LinkInserter, insert_links};
    pub use crate::linker::{AutoLinkReport, AutoLinker};
    pub use crate::store::{FsStore, NoteStore};
    pub use vaultweave_core::prelude::*;
}
