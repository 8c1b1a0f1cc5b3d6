//! Tag parser: #tag, #parent/child

use regex::Regex;
use std::collections::BTreeSet;
use std::sync::LazyLock;

/// Matches #tag or #parent/child tags; nested levels stay in one capture
static TAG_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"#(\w+(?:/\w+)*)").unwrap());

/// Extract all tags from content, without the leading `#`
pub fn extract_tags(content: &str) -> BTreeSet<String> {
    if !content.contains('#') {
        return BTreeSet::new();
    }

    TAG_PATTERN
        .captures_iter(content)
        .filter_map(|caps| caps.get(1))
        .map(|name| name.as_str().to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nested_tag_not_collapsed() {
        let tags = extract_tags("#a #a/b");
        assert_eq!(tags.into_iter().collect::<Vec<_>>(), vec!["a", "a/b"]);
    }

    #[test]
    fn test_duplicates_removed() {
        let tags = extract_tags("#rust and #rust again, then #python");
        assert_eq!(tags.len(), 2);
    }

    #[test]
    fn test_heading_marker_is_not_a_tag() {
        assert!(extract_tags("# Title\n## Section").is_empty());
    }

    #[test]
    fn test_trailing_slash_not_included() {
        let tags = extract_tags("#project/ done");
        assert!(tags.contains("project"));
        assert_eq!(tags.len(), 1);
    }
}
