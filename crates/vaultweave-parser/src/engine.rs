//! Note parsing engine.
//!
//! Runs every element parser over one note's text and assembles the
//! resulting [`Note`]. Parsing is a pure function of the text: it never
//! fails and an empty string yields a note with empty fields.

use crate::parsers::{
    extract_headings, extract_links, extract_tags, summarize_code_fences, word_count,
};
use vaultweave_core::{AnalyzerConfig, Note, TopicDictionary};

/// Parser producing [`Note`] values from raw text
#[derive(Debug, Clone, Default)]
pub struct NoteParser {
    topics: TopicDictionary,
}

impl NoteParser {
    /// Create a parser using the given topic dictionary
    pub fn new(topics: TopicDictionary) -> Self {
        Self { topics }
    }

    /// Create a parser from the analyzer configuration
    pub fn from_config(config: &AnalyzerConfig) -> Self {
        Self::new(config.topics.clone())
    }

    pub fn topics(&self) -> &TopicDictionary {
        &self.topics
    }

    /// Parse one note
    pub fn parse(&self, name: &str, content: &str) -> Note {
        let fences = summarize_code_fences(content);

        Note {
            name: name.to_string(),
            content: content.to_string(),
            word_count: word_count(content),
            links: extract_links(content),
            tags: extract_tags(content),
            headings: extract_headings(content),
            code_blocks: fences.has_code(),
            code_block_count: fences.count,
            unlabeled_code_blocks: fences.unlabeled,
            topics: self.topics.infer(content),
        }
    }
}
