//! Wikilink parser: `[[Note]]`, `[[Note|Display]]`
//!
//! Embeds (`![[Note]]`) are matched as well; the leading `!` is not part of
//! the pattern.

use regex::Regex;
use std::collections::BTreeSet;
use std::sync::LazyLock;

/// Matches `[[target]]` and `[[target|display]]`, capturing the target only
static WIKILINK_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[\[([^\]|]+)(?:\|[^\]]+)?\]\]").unwrap());

/// Extract the set of link targets from content.
///
/// Display text never enters the set and the target keeps its case.
pub fn extract_links(content: &str) -> BTreeSet<String> {
    if !content.contains("[[") {
        return BTreeSet::new();
    }

    WIKILINK_PATTERN
        .captures_iter(content)
        .filter_map(|caps| caps.get(1))
        .map(|target| target.as_str().to_string())
        .collect()
}
