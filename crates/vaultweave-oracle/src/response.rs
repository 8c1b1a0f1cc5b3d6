//! Oracle response shapes and tolerant parsing of model output.
//!
//! Language models wrap JSON in Markdown fences and drop fields; parsing
//! strips the fences and fills missing fields with fixed defaults.

use serde::{Deserialize, Serialize};
use vaultweave_core::{Error, Result};

/// Verdict on whether two notes should be linked
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConnectionJudgment {
    #[serde(default)]
    pub should_link: bool,
    #[serde(default = "default_relationship")]
    pub relationship_type: String,
    /// In [0, 1]; 0 when the oracle gave none
    #[serde(default)]
    pub confidence: f64,
    #[serde(default)]
    pub explanation: String,
    #[serde(default)]
    pub suggested_context: String,
}

fn default_relationship() -> String {
    "related".to_string()
}

/// Kind of content-gap prompt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GapKind {
    /// Missing notes that would connect existing ones
    Bridge,
    /// Topics mentioned across notes without their own note
    Topic,
    /// Foundational notes other notes assume
    Fundamentals,
}

impl GapKind {
    pub const ALL: [GapKind; 3] = [Self::Bridge, Self::Topic, Self::Fundamentals];

    /// `gap_type` assumed when the oracle omits it
    pub fn default_gap_type(self) -> &'static str {
        match self {
            Self::Bridge => "bridge_connection",
            Self::Topic => "topic_coverage",
            Self::Fundamentals => "fundamental_missing",
        }
    }
}

/// A note the vault is missing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentGap {
    pub gap_type: String,
    pub title: String,
    pub description: String,
    /// `high`, `medium` or `low`
    pub priority: String,
    pub confidence: f64,
    pub related_notes: Vec<String>,
    pub suggested_content: Vec<String>,
    pub tags: Vec<String>,
}

#[derive(Deserialize)]
struct RawGap {
    #[serde(default)]
    gap_type: Option<String>,
    #[serde(default)]
    title: String,
    #[serde(default)]
    description: String,
    #[serde(default = "default_priority")]
    priority: String,
    #[serde(default = "default_gap_confidence")]
    confidence: f64,
    #[serde(default)]
    related_notes: Vec<String>,
    #[serde(default)]
    suggested_content: Vec<String>,
    #[serde(default)]
    tags: Vec<String>,
}

fn default_priority() -> String {
    "medium".to_string()
}

fn default_gap_confidence() -> f64 {
    0.5
}

/// Remove a surrounding ```` ```json ```` / ```` ``` ```` fence, if any
pub fn strip_code_fences(text: &str) -> &str {
    let mut body = text.trim();
    if let Some(rest) = body.strip_prefix("```json") {
        body = rest;
    } else if let Some(rest) = body.strip_prefix("```") {
        body = rest;
    }
    if let Some(rest) = body.strip_suffix("```") {
        body = rest;
    }
    body.trim()
}

/// Parse a connection judgment; confidence is clamped to [0, 1]
pub fn parse_judgment(text: &str) -> Result<ConnectionJudgment> {
    let mut judgment: ConnectionJudgment = serde_json::from_str(strip_code_fences(text))
        .map_err(|e| Error::oracle(format!("Unparseable connection judgment: {}", e)))?;
    judgment.confidence = judgment.confidence.clamp(0.0, 1.0);
    Ok(judgment)
}

/// Parse a JSON array of gaps produced for `kind`
pub fn parse_gaps(text: &str, kind: GapKind) -> Result<Vec<ContentGap>> {
    let raw: Vec<RawGap> = serde_json::from_str(strip_code_fences(text))
        .map_err(|e| Error::oracle(format!("Unparseable gap list: {}", e)))?;

    Ok(raw
        .into_iter()
        .map(|gap| ContentGap {
            gap_type: gap
                .gap_type
                .unwrap_or_else(|| kind.default_gap_type().to_string()),
            title: gap.title,
            description: gap.description,
            priority: gap.priority,
            confidence: gap.confidence.clamp(0.0, 1.0),
            related_notes: gap.related_notes,
            suggested_content: gap.suggested_content,
            tags: gap.tags,
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_code_fences() {
        assert_eq!(strip_code_fences("```json\n{\"a\":1}\n```"), "{\"a\":1}");
        assert_eq!(strip_code_fences("```\n[]\n```"), "[]");
        assert_eq!(strip_code_fences("  {}  "), "{}");
    }

    #[test]
    fn test_judgment_defaults() {
        let judgment = parse_judgment("{\"should_link\": true}").unwrap();
        assert!(judgment.should_link);
        assert_eq!(judgment.relationship_type, "related");
        assert_eq!(judgment.confidence, 0.0);
        assert!(judgment.explanation.is_empty());
    }

    #[test]
    fn test_judgment_in_fence_with_clamp() {
        let text = "```json\n{\"should_link\": true, \"relationship_type\": \"prerequisite\", \"confidence\": 1.4}\n```";
        let judgment = parse_judgment(text).unwrap();
        assert_eq!(judgment.relationship_type, "prerequisite");
        assert_eq!(judgment.confidence, 1.0);
    }

    #[test]
    fn test_invalid_json_is_oracle_error() {
        let err = parse_judgment("Sure! Here is my answer").unwrap_err();
        assert!(matches!(err, Error::Oracle { .. }));
    }

    #[test]
    fn test_gap_defaults_follow_kind() {
        let gaps = parse_gaps("[{\"title\": \"Testing\"}]", GapKind::Topic).unwrap();
        assert_eq!(gaps.len(), 1);
        assert_eq!(gaps[0].gap_type, "topic_coverage");
        assert_eq!(gaps[0].priority, "medium");
        assert_eq!(gaps[0].confidence, 0.5);
        assert!(gaps[0].related_notes.is_empty());

        let gaps = parse_gaps(
            "[{\"gap_type\": \"custom\", \"title\": \"X\", \"confidence\": 0.9}]",
            GapKind::Bridge,
        )
        .unwrap();
        assert_eq!(gaps[0].gap_type, "custom");
        assert_eq!(gaps[0].confidence, 0.9);
    }
}
