//! Pairwise semantic link discovery.

use crate::oracle::SemanticOracle;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt::{self, Write as _};
use tracing::instrument;
use vaultweave_core::{FolderIndex, LinkSuggestion};

/// Judgments at or below this confidence are dropped
pub const MIN_SEMANTIC_CONFIDENCE: f64 = 0.5;
/// Reverse edges are proposed at this fraction of the forward confidence
pub const REVERSE_CONFIDENCE_FACTOR: f64 = 0.8;

/// A relationship the oracle judged worth linking
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SemanticConnection {
    pub source_note: String,
    pub target_note: String,
    pub relationship_type: String,
    pub explanation: String,
    pub confidence: f64,
    pub suggested_context: String,
}

/// Asks an oracle about every unordered pair of notes in a folder
pub struct SemanticLinker<O> {
    oracle: O,
}

impl<O: SemanticOracle> SemanticLinker<O> {
    pub fn new(oracle: O) -> Self {
        Self { oracle }
    }

    /// Judge each pair once, in note-name order.
    ///
    /// A failed oracle call is logged and the pair skipped. Connections are
    /// returned by descending confidence; ties keep pair order.
    #[instrument(skip(self, index), fields(folder = %index.folder, notes = index.len()))]
    pub fn analyze(&self, index: &FolderIndex) -> Vec<SemanticConnection> {
        let notes: Vec<_> = index.notes().collect();
        let mut connections = Vec::new();

        for (i, source) in notes.iter().enumerate() {
            for target in &notes[i + 1..] {
                log::debug!("Judging {} <-> {}", source.name, target.name);
                let judgment = match self.oracle.judge_connection(source, target) {
                    Ok(judgment) => judgment,
                    Err(e) => {
                        log::warn!(
                            "Oracle failed for {} <-> {}: {}",
                            source.name,
                            target.name,
                            e
                        );
                        continue;
                    }
                };
                if judgment.should_link && judgment.confidence > MIN_SEMANTIC_CONFIDENCE {
                    connections.push(SemanticConnection {
                        source_note: source.name.clone(),
                        target_note: target.name.clone(),
                        relationship_type: judgment.relationship_type,
                        explanation: judgment.explanation,
                        confidence: judgment.confidence,
                        suggested_context: judgment.suggested_context,
                    });
                }
            }
        }

        connections.sort_by(|a, b| b.confidence.total_cmp(&a.confidence));
        log::info!("Found {} semantic connections", connections.len());
        connections
    }
}

/// Suggestions per note: the forward edge at full confidence and the reverse
/// edge at [`REVERSE_CONFIDENCE_FACTOR`] of it
pub fn to_link_suggestions(
    connections: &[SemanticConnection],
) -> BTreeMap<String, Vec<LinkSuggestion>> {
    let mut suggestions: BTreeMap<String, Vec<LinkSuggestion>> = BTreeMap::new();

    for conn in connections {
        suggestions
            .entry(conn.source_note.clone())
            .or_default()
            .push(LinkSuggestion {
                target_note: conn.target_note.clone(),
                context_snippets: vec![conn.suggested_context.clone()],
                confidence: conn.confidence,
                mention_count: 1,
            });
        suggestions
            .entry(conn.target_note.clone())
            .or_default()
            .push(LinkSuggestion {
                target_note: conn.source_note.clone(),
                context_snippets: vec![format!("Reverse connection: {}", conn.explanation)],
                confidence: conn.confidence * REVERSE_CONFIDENCE_FACTOR,
                mention_count: 1,
            });
    }

    suggestions
}

/// Markdown report of semantic connections
pub fn render_semantic_report(connections: &[SemanticConnection]) -> String {
    let mut out = String::new();
    // Writing to a String cannot fail
    let _ = write_semantic_report(&mut out, connections);
    out
}

fn write_semantic_report(out: &mut String, connections: &[SemanticConnection]) -> fmt::Result {
    writeln!(out, "# 🧠 AI Semantic Link Discovery Report")?;
    writeln!(out)?;
    writeln!(out, "Found {} semantic connections", connections.len())?;
    writeln!(out)?;

    for conn in connections {
        writeln!(out, "## {} → {}", conn.source_note, conn.target_note)?;
        writeln!(out, "**Relationship:** {}", conn.relationship_type)?;
        writeln!(out, "**Confidence:** {:.0}%", conn.confidence * 100.0)?;
        writeln!(out, "**Explanation:** {}", conn.explanation)?;
        writeln!(out, "**Suggested Context:** {}", conn.suggested_context)?;
        writeln!(out)?;
    }
    Ok(())
}
