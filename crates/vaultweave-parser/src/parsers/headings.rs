//! Heading parser: # H1, ## H2, etc.

use regex::Regex;
use std::sync::LazyLock;
use vaultweave_core::Heading;

/// Matches # Heading, ## Heading, etc.
static HEADING_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(#{1,6})[ \t]+(.+)$").unwrap());

/// Parse all headings from content, in document order
pub fn extract_headings(content: &str) -> Vec<Heading> {
    content
        .lines()
        .filter_map(|line| {
            let caps = HEADING_PATTERN.captures(line)?;
            let level = caps.get(1)?.as_str().len() as u8;
            let text = caps.get(2)?.as_str().trim();
            if text.is_empty() {
                return None;
            }
            Some(Heading::new(level, text))
        })
        .collect()
}
