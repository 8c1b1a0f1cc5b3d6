//! # Semantic Oracle
//!
//! Optional, model-backed judgments layered on top of the deterministic
//! analysis. Nothing in the graph or vault crates depends on this crate.
//!
//! - [`SemanticOracle`] answers typed [`OracleRequest`]s with
//!   [`OracleResponse`]s.
//! - [`PromptOracle`] adapts any text [`Completion`] backend: it builds the
//!   prompt, strips Markdown fences from the reply and fills missing fields
//!   with defaults.
//! - [`SemanticLinker`] judges every note pair of a folder and turns the
//!   accepted connections into [`LinkSuggestion`](vaultweave_core::LinkSuggestion)s.
//! - [`GapAnalyzer`] asks for missing bridge, topic and fundamentals notes.
//!
//! ## Example
//!
//! ```
//! use vaultweave_core::{FolderIndex, Note, Result};
//! use vaultweave_oracle::{PromptOracle, SemanticLinker, to_link_suggestions};
//!
//! let backend = |_prompt: &str| -> Result<String> {
//!     Ok(r#"{"should_link": true, "relationship_type": "prerequisite", "confidence": 0.9}"#.into())
//! };
//!
//! let mut index = FolderIndex::new("Coding", "/vault/Coding");
//! index.insert(Note::empty("Ownership"));
//! index.insert(Note::empty("Borrowing"));
//!
//! let connections = SemanticLinker::new(PromptOracle::new(backend)).analyze(&index);
//! assert_eq!(connections.len(), 1);
//!
//! let suggestions = to_link_suggestions(&connections);
//! assert_eq!(suggestions["Borrowing"][0].target_note, "Ownership");
//! assert_eq!(suggestions["Ownership"][0].target_note, "Borrowing");
//! ```
//!
//! Oracle failures never abort an analysis: a failed pair or gap prompt is
//! logged and skipped.

pub mod gaps;
pub mod linker;
pub mod oracle;
pub mod prompt;
pub mod response;

pub use gaps::{GapAnalyzer, render_gap_report};
pub use linker::{SemanticConnection, SemanticLinker, render_semantic_report, to_link_suggestions};
pub use oracle::{Completion, OracleRequest, OracleResponse, PromptOracle, SemanticOracle};
pub use response::{ConnectionJudgment, ContentGap, GapKind, parse_gaps, parse_judgment, strip_code_fences};
