//! Element parsers, one per syntax.
//!
//! Each parser is a pure function of the note text and never fails.

pub mod code_blocks;
pub mod headings;
pub mod mentions;
pub mod tags;
pub mod wikilinks;

pub use code_blocks::{CodeFenceSummary, summarize_code_fences};
pub use headings::extract_headings;
pub use mentions::{Mention, MentionMatcher, find_mentions, is_already_linked};
pub use tags::extract_tags;
pub use wikilinks::extract_links;

/// Whitespace-delimited token count of the raw text
pub fn word_count(content: &str) -> usize {
    content.split_whitespace().count()
}
