//! Prompt text sent to completion-backed oracles.

use crate::response::GapKind;
use vaultweave_core::Note;

/// Characters of each note shown when judging a pair
pub const CONNECTION_PREVIEW_CHARS: usize = 800;
/// Characters of content in a note summary
pub const SUMMARY_CONTENT_CHARS: usize = 1000;
/// Characters of each summary listed in a gap prompt
pub const GAP_SUMMARY_CHARS: usize = 200;

/// First `max_chars` characters of `text`
pub fn preview(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

/// Title, topics, tags and the start of the content
pub fn note_summary(note: &Note) -> String {
    let topics: Vec<String> = note.topics.iter().map(ToString::to_string).collect();
    let tags: Vec<&str> = note.tags.iter().map(String::as_str).collect();
    format!(
        "Title: {}\nTopics: {}\nTags: {}\nContent preview: {}...",
        note.name,
        topics.join(", "),
        tags.join(", "),
        preview(&note.content, SUMMARY_CONTENT_CHARS)
    )
}

pub fn connection_prompt(source: &Note, target: &Note) -> String {
    format!(
        r#"Analyze these two Obsidian notes and determine if they should be linked based on semantic relationships.

Note 1: "{}"
Content preview: {}...

Note 2: "{}"
Content preview: {}...

Determine:
1. Should these notes be linked? (yes/no)
2. What type of relationship exists? (prerequisite, related_concept, example_of, continuation, methodology, tool_for, etc.)
3. Explanation of the relationship (1-2 sentences)
4. Confidence score (0.0-1.0)
5. Suggested context for where to add the link

Respond with ONLY a JSON object (no markdown formatting):
{{
    "should_link": boolean,
    "relationship_type": "string",
    "explanation": "string",
    "confidence": float,
    "suggested_context": "string"
}}"#,
        source.name,
        preview(&source.content, CONNECTION_PREVIEW_CHARS),
        target.name,
        preview(&target.content, CONNECTION_PREVIEW_CHARS)
    )
}

pub fn gap_prompt(kind: GapKind, notes: &[Note]) -> String {
    let listing: Vec<String> = notes
        .iter()
        .map(|note| {
            let summary = note_summary(note);
            format!("- {}: {}...", note.name, preview(&summary, GAP_SUMMARY_CHARS))
        })
        .collect();

    let (intro, ask, steps, example_title) = match kind {
        GapKind::Bridge => (
            "Analyze these Obsidian notes and identify missing \"bridge\" content that would connect related concepts.",
            "Identify 2-3 missing bridge notes that would connect these existing notes. For each gap, provide:",
            [
                "What type of bridge content is missing",
                "Suggested title for the missing note",
                "Why this bridge is important",
                "Which existing notes it would connect",
                "Key topics it should cover",
            ],
            "Connecting Python Development with Note Organization",
        ),
        GapKind::Topic => (
            "Analyze these notes for incomplete topic coverage - areas that are mentioned but not fully explored.",
            "Identify 2-3 topics that are mentioned across notes but lack dedicated coverage. For each gap:",
            [
                "What topic needs deeper coverage",
                "Suggested title for a comprehensive note",
                "Why this topic deserves its own note",
                "Which existing notes reference it",
                "Key subtopics to cover",
            ],
            "Python Testing Strategies",
        ),
        GapKind::Fundamentals => (
            "Analyze these notes and identify missing foundational content that would support the existing knowledge.",
            "Identify 1-2 fundamental notes that are missing - basic concepts that other notes assume knowledge of. For each:",
            [
                "What fundamental concept is missing",
                "Suggested title for the foundational note",
                "Why this foundation is important",
                "Which advanced notes would benefit from this foundation",
                "Key fundamentals to cover",
            ],
            "Python Development Environment Basics",
        ),
    };

    let steps: Vec<String> = steps
        .iter()
        .enumerate()
        .map(|(i, step)| format!("{}. {}", i + 1, step))
        .collect();

    format!(
        r#"{intro}

Notes:
{listing}

{ask}

{steps}

Respond with ONLY a JSON array:
[
  {{
    "gap_type": "{gap_type}",
    "title": "{example_title}",
    "description": "string",
    "priority": "high|medium|low",
    "confidence": float,
    "related_notes": ["existing note names"],
    "suggested_content": ["key points"],
    "tags": ["tags"]
  }}
]"#,
        listing = listing.join("\n"),
        steps = steps.join("\n"),
        gap_type = kind.default_gap_type(),
    )
}
