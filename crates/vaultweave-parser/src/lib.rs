//! # vaultweave parser
//!
//! Turns the raw text of one note into a [`vaultweave_core::Note`].
//!
//! This crate provides:
//! - Wikilink extraction (`[[Target]]`, `[[Target|Display]]`), aliases resolved to the target
//! - Tag extraction (`#tag`, `#tag/subtag`), nested tags kept whole
//! - Heading extraction (levels 1-6, document order)
//! - Fenced code block detection via `pulldown-cmark`
//! - Topic inference against a keyword dictionary
//! - Mention finding for note names, with the "already bracketed" window heuristic
//!
//! ## Quick Start
//!
//! ```
//! use vaultweave_parser::NoteParser;
//!
//! let parser = NoteParser::default();
//! let note = parser.parse("tips", "# Tips\n\nSee [[A]] and [[A|alias]] #rust/async");
//!
//! assert_eq!(note.links.len(), 1);
//! assert!(note.links.contains("A"));
//! assert!(note.tags.contains("rust/async"));
//! assert_eq!(note.headings[0].text, "Tips");
//! ```
//!
//! ## Mentions
//!
//! ```
//! use vaultweave_parser::{MentionMatcher, is_already_linked};
//!
//! let content = "see [[note2]] and note2";
//! let matcher = MentionMatcher::new("note2").unwrap();
//! assert_eq!(matcher.find_all(content).len(), 2);
//! assert_eq!(matcher.find_unlinked(content, 10).len(), 1);
//! ```

pub mod engine;
pub mod parsers;

pub use engine::NoteParser;
pub use parsers::{
    CodeFenceSummary, Mention, MentionMatcher, extract_headings,
    extract_links, extract_tags, find_mentions, is_already_linked, summarize_code_fences,
    word_count,
};

/// Re-export for convenience
pub mod prelude {
    pub use crate::engine::NoteParser;
    pub use crate::parsers::{MentionMatcher, extract_links, extract_tags};
}
