//! Keyword dictionary used to infer note topics.
//!
//! The dictionary maps a category (`languages`, `tools`, ...) to the keywords
//! that place a note in that category. It is loaded once at startup and
//! treated as read-only for the rest of the run.

use crate::models::Topic;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Category -> keywords lookup table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TopicDictionary {
    categories: BTreeMap<String, Vec<String>>,
}

impl TopicDictionary {
    /// Build a dictionary; keywords are lowercased and deduplicated per category.
    pub fn new<C, K>(categories: impl IntoIterator<Item = (C, Vec<K>)>) -> Self
    where
        C: Into<String>,
        K: AsRef<str>,
    {
        let categories = categories
            .into_iter()
            .map(|(category, keywords)| {
                let mut seen = BTreeSet::new();
                let keywords = keywords
                    .iter()
                    .map(|k| k.as_ref().trim().to_lowercase())
                    .filter(|k| !k.is_empty() && seen.insert(k.clone()))
                    .collect();
                (category.into(), keywords)
            })
            .collect();
        Self { categories }
    }

    /// A dictionary with no categories (topic inference disabled)
    pub fn empty() -> Self {
        Self {
            categories: BTreeMap::new(),
        }
    }

    /// Iterate `(category, keyword)` pairs in category order
    pub fn entries(&self) -> impl Iterator<Item = (&str, &str)> {
        self.categories.iter().flat_map(|(category, keywords)| {
            keywords
                .iter()
                .map(move |keyword| (category.as_str(), keyword.as_str()))
        })
    }

    /// Topics whose keyword occurs in `content`, compared case-insensitively.
    ///
    /// Matching is plain substring containment, so `java` also fires on
    /// `javascript`.
    pub fn infer(&self, content: &str) -> BTreeSet<Topic> {
        if content.is_empty() {
            return BTreeSet::new();
        }
        let lower = content.to_lowercase();
        self.entries()
            .filter(|(_, keyword)| lower.contains(keyword))
            .map(|(category, keyword)| Topic::new(category, keyword))
            .collect()
    }

    pub fn category_count(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.values().all(Vec::is_empty)
    }
}

impl Default for TopicDictionary {
    fn default() -> Self {
        Self::new([
            (
                "languages",
                vec![
                    "python",
                    "javascript",
                    "java",
                    "cpp",
                    "rust",
                    "go",
                    "ruby",
                    "php",
                    "swift",
                    "kotlin",
                ],
            ),
            (
                "frameworks",
                vec![
                    "react", "django", "flask", "spring", "express", "vue", "angular", "laravel",
                ],
            ),
            (
                "concepts",
                vec![
                    "algorithm",
                    "data structure",
                    "design pattern",
                    "api",
                    "database",
                    "testing",
                    "debugging",
                ],
            ),
            (
                "tools",
                vec![
                    "git",
                    "docker",
                    "kubernetes",
                    "jenkins",
                    "aws",
                    "azure",
                    "terraform",
                    "ansible",
                ],
            ),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_dictionary_categories() {
        let dict = TopicDictionary::default();
        assert_eq!(dict.category_count(), 4);
        assert!(dict.entries().any(|(c, k)| c == "tools" && k == "docker"));
    }

    #[test]
    fn test_infer_is_case_insensitive() {
        let dict = TopicDictionary::default();
        let topics = dict.infer("Deploying a Python service with DOCKER");
        assert!(topics.contains(&Topic::new("languages", "python")));
        assert!(topics.contains(&Topic::new("tools", "docker")));
    }

    #[test]
    fn test_infer_multiword_keyword() {
        let dict = TopicDictionary::default();
        let topics = dict.infer("Every Data Structure has trade-offs");
        assert!(topics.contains(&Topic::new("concepts", "data structure")));
    }

    #[test]
    fn test_keywords_normalized() {
        let dict = TopicDictionary::new([("misc", vec![" Zig ", "zig", ""])]);
        assert_eq!(dict.entries().collect::<Vec<_>>(), vec![("misc", "zig")]);
    }

    #[test]
    fn test_empty_content_has_no_topics() {
        assert!(TopicDictionary::default().infer("").is_empty());
        assert!(TopicDictionary::empty().is_empty());
    }
}
