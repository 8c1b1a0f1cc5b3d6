//! # Vault Graph Analysis
//!
//! Folder analysis and vault-wide aggregation for vaultweave.
//!
//! Provides:
//! - Folder loading and link suggestions from unlinked mentions ([`FolderAnalyzer`])
//! - Related-by-topic suggestions and note structure review
//! - A global link graph merged from per-folder indexes ([`GlobalGraph`])
//! - Orphan detection across folders
//! - Cross-folder connection candidates
//! - Vault health scoring
//!
//! ## Quick Start
//!
//! ```no_run
//! use vaultweave_core::AnalyzerConfig;
//! use vaultweave_graph::VaultAggregator;
//!
//! let aggregator = VaultAggregator::new("/path/to/vault", AnalyzerConfig::default());
//! match aggregator.analyze_entire_vault(None) {
//!     Some(analysis) => println!("Health: {}", analysis.vault_health_score),
//!     None => println!("No notes found"),
//! }
//! ```
//!
//! ## Pipeline
//!
//! 1. [`VaultAggregator::discover_folders`] lists folders holding notes
//! 2. [`FolderAnalyzer::load`] parses each folder into an independent index
//! 3. [`GlobalGraph::merge`] folds the indexes and derives global backlinks
//! 4. Orphans, cross-folder candidates and the health score are read off the
//!    merged graph
//!
//! Orphan status is only meaningful after step 3: a note's only incoming link
//! may come from another folder.
//!
//! ```
//! use vaultweave_core::FolderIndex;
//! use vaultweave_graph::GlobalGraph;
//! use vaultweave_parser::NoteParser;
//!
//! let parser = NoteParser::default();
//! let mut coding = FolderIndex::new("Coding", "/vault/Coding");
//! coding.insert(parser.parse("Rust", "A language"));
//! let mut journal = FolderIndex::new("Journal", "/vault/Journal");
//! journal.insert(parser.parse("today", "Wrote [[Rust]]"));
//!
//! let graph = GlobalGraph::merge(vec![coding, journal]);
//! assert_eq!(graph.orphan_count(), 0);
//! ```

pub mod aggregator;
pub mod folder;
pub mod global;
pub mod health;
pub mod stats;
pub mod structure;

pub use aggregator::{FolderSuggestion, FolderSuggestionKind, Priority, VaultAggregator};
pub use folder::{FolderAnalyzer, FolderMatchers, NoteInfo, NoteRecommendations, jaccard, mention_confidence, rank_suggestions};
pub use global::GlobalGraph;
pub use health::{HealthBreakdown, HealthInputs, health_score};
pub use stats::{folder_stats, top_topics};
pub use structure::review_structure;
