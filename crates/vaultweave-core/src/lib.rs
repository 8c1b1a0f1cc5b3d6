//! # vaultweave core
//!
//! Core data models, error types, and configuration for vault analysis.
//! This crate defines the canonical types that all other crates depend on.
//!
//! ## Architecture Principles
//!
//! - **Value types only**: notes, stats and analyses are plain immutable records
//! - **Zero Panic in Libraries**: All errors are `Result<T, Error>`
//! - **Empty is not an error**: missing folders and empty vaults surface as empty values
//! - **Builder Pattern for Complex Types**: configuration uses a builder
//!
//! ## Core Modules
//!
//! - [`models`] - Note, FolderIndex, FolderStats, VaultAnalysis, LinkSuggestion, ...
//! - [`error`] - Error enum and Result alias
//! - [`config`] - Analyzer configuration
//! - [`topics`] - Keyword dictionary for topic inference
//! - [`profiles`] - Safety profiles for auto-linking
//! - [`utils`] - JSON/CSV helpers, hashing, path helpers
//!
//! ## Usage Examples
//!
//! ```
//! use vaultweave_core::prelude::*;
//!
//! let config = AnalyzerConfig::builder()
//!     .max_link_suggestions(5)
//!     .build()
//!     .unwrap();
//! assert_eq!(config.note_extension, "md");
//!
//! let topics = config.topics.infer("Notes on Rust and Docker");
//! assert!(topics.contains(&Topic::new("tools", "docker")));
//! ```

pub mod config;
pub mod error;
pub mod models;
pub mod profiles;
pub mod topics;
pub mod utils;

pub use config::*;
pub use error::{Error, Result};
pub use models::*;
pub use profiles::{SafetyLevel, SafetyLimits};
pub use topics::TopicDictionary;
pub use utils::{CsvBuilder, compute_hash, to_json_string};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::config::{AnalyzerConfig, DEFAULT_BRACKET_WINDOW};
    pub use crate::error::{Error, Result};
    pub use crate::models::{
        CrossFolderSuggestion, FolderIndex, FolderStats, Heading, LinkChange, LinkSuggestion,
        Note, ROOT_FOLDER, StructureKind, StructureSuggestion, Topic, TopicCount, VaultAnalysis,
        qualified_name,
    };
    pub use crate::profiles::{SafetyLevel, SafetyLimits};
    pub use crate::topics::TopicDictionary;
}
