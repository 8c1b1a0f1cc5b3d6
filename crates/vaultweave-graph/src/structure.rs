//! Structural review of a single note.

use std::collections::{BTreeMap, BTreeSet};
use vaultweave_core::{Note, StructureKind, StructureSuggestion};

/// Word count above which a note without headings gets `add_headings`
pub const LONG_NOTE_WORDS: usize = 300;
/// Fenced blocks above which `code_organization` is suggested
pub const MANY_CODE_BLOCKS: usize = 3;
/// Topics above which `topic_sections` is considered
pub const MANY_TOPICS: usize = 5;
/// Categories above which `topic_sections` is suggested
pub const MANY_CATEGORIES: usize = 2;
/// Tag examples listed by `add_tags`
pub const MAX_TAG_EXAMPLES: usize = 5;

/// Suggest structural improvements for one note
pub fn review_structure(note: &Note) -> Vec<StructureSuggestion> {
    let mut suggestions = Vec::new();

    if note.word_count > LONG_NOTE_WORDS && note.headings.is_empty() {
        suggestions.push(suggestion(
            StructureKind::AddHeadings,
            "This note is long but has no headings. Consider adding structure.",
            &["## Overview", "## Implementation", "## Examples", "## Related Topics"],
        ));
    }

    if note.headings.len() > 1 {
        let deep = note.headings.iter().any(|h| h.level > 2);
        let has_h1 = note.headings.iter().any(|h| h.level == 1);
        if deep && !has_h1 {
            suggestions.push(suggestion(
                StructureKind::HeadingHierarchy,
                "Consider adding a main H1 heading to establish document hierarchy.",
                &[],
            ));
        }
    }

    if note.code_block_count > MANY_CODE_BLOCKS {
        suggestions.push(suggestion(
            StructureKind::CodeOrganization,
            "Multiple code blocks found. Consider organizing them under headings.",
            &["## Setup", "## Implementation", "## Testing", "## Usage Examples"],
        ));
    }

    if note.unlabeled_code_blocks > 0 {
        suggestions.push(StructureSuggestion {
            kind: StructureKind::CodeLanguageTags,
            description: format!(
                "Found {} code blocks without language tags. Add language for better syntax highlighting.",
                note.unlabeled_code_blocks
            ),
            examples: vec![
                "```python".to_string(),
                "```javascript".to_string(),
                "```bash".to_string(),
            ],
        });
    }

    if note.topics.len() > MANY_TOPICS {
        let mut categories: BTreeMap<&str, usize> = BTreeMap::new();
        for topic in &note.topics {
            *categories.entry(topic.category.as_str()).or_default() += 1;
        }
        if categories.len() > MANY_CATEGORIES {
            suggestions.push(StructureSuggestion {
                kind: StructureKind::TopicSections,
                description: "This note covers multiple topic areas. Consider organizing into sections."
                    .to_string(),
                examples: categories
                    .keys()
                    .map(|category| format!("## {}", title_case(category)))
                    .collect(),
            });
        }
    }

    let missing_tags: BTreeSet<&str> = note
        .topic_keywords()
        .into_iter()
        .filter(|keyword| !note.tags.contains(*keyword))
        .collect();
    if !missing_tags.is_empty() {
        suggestions.push(StructureSuggestion {
            kind: StructureKind::AddTags,
            description: "Consider adding tags for better discoverability.".to_string(),
            examples: missing_tags
                .into_iter()
                .take(MAX_TAG_EXAMPLES)
                .map(|keyword| format!("#{}", keyword))
                .collect(),
        });
    }

    suggestions
}

fn suggestion(kind: StructureKind, description: &str, examples: &[&str]) -> StructureSuggestion {
    StructureSuggestion {
        kind,
        description: description.to_string(),
        examples: examples.iter().map(|s| s.to_string()).collect(),
    }
}

fn title_case(text: &str) -> String {
    text.split(' ')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
