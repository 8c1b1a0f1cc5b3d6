//! # vaultweave
//!
//! Obsidian vault health analysis, cross-folder link discovery and safe
//! auto-linking.
//!
//! This crate re-exports the workspace crates and carries the
//! settings layer shared by the `vaultweave` binary:
//!
//! - [`vaultweave_parser`]: note parsing
//! - [`vaultweave_graph`]: folder analysis, global graph, health score
//! - [`vaultweave_vault`]: link insertion, atomic writes, backups
//! - [`vaultweave_export`]: Markdown, JSON and CSV reports
//! - [`vaultweave_oracle`]: optional semantic oracle
//!
//! ## Example
//!
//! ```no_run
//! use vaultweave::prelude::*;
//!
//! let config = vaultweave::settings::load_settings(None)?;
//! let aggregator = VaultAggregator::new("/path/to/vault", config);
//! if let Some(analysis) = aggregator.analyze_entire_vault(None) {
//!     println!("Health: {}/100", analysis.vault_health_score);
//! }
//! # Ok::<(), vaultweave::Error>(())
//! ```

pub mod settings;

pub use vaultweave_core::prelude::*;
pub use vaultweave_export as export;
pub use vaultweave_graph as graph;
pub use vaultweave_oracle as oracle;
pub use vaultweave_parser as parser;
pub use vaultweave_vault as vault;

pub mod prelude {
    pub use vaultweave_core::prelude::*;
    pub use vaultweave_export::{ReportOptions, VaultAnalysisExporter, render_markdown};
    pub use vaultweave_graph::{FolderAnalyzer, GlobalGraph, VaultAggregator};
    pub use vaultweave_parser::NoteParser;
    pub use vaultweave_vault::{AutoLinker, BackupStore, LinkInserter};
}
