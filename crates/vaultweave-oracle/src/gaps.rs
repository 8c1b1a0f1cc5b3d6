//! Content-gap analysis: notes the vault is missing.

use crate::oracle::SemanticOracle;
use crate::response::{ContentGap, GapKind};
use std::fmt::{self, Write as _};
use tracing::instrument;
use vaultweave_core::{FolderIndex, Note};

/// Runs every [`GapKind`] prompt over a folder
pub struct GapAnalyzer<O> {
    oracle: O,
}

impl<O: SemanticOracle> GapAnalyzer<O> {
    pub fn new(oracle: O) -> Self {
        Self { oracle }
    }

    /// Gaps of all kinds by descending confidence.
    ///
    /// A kind whose oracle call fails contributes nothing; the others are
    /// still reported.
    #[instrument(skip(self, index), fields(folder = %index.folder, notes = index.len()))]
    pub fn analyze(&self, index: &FolderIndex) -> Vec<ContentGap> {
        if index.is_empty() {
            return Vec::new();
        }
        let notes: Vec<Note> = index.notes().cloned().collect();

        let mut gaps = Vec::new();
        for kind in GapKind::ALL {
            match self.oracle.find_gaps(kind, &notes) {
                Ok(found) => {
                    log::debug!("{:?} analysis found {} gaps", kind, found.len());
                    gaps.extend(found);
                }
                Err(e) => log::warn!("{:?} gap analysis failed: {}", kind, e),
            }
        }

        gaps.sort_by(|a, b| b.confidence.total_cmp(&a.confidence));
        gaps
    }
}

/// Markdown report grouping gaps by priority
pub fn render_gap_report(gaps: &[ContentGap]) -> String {
    if gaps.is_empty() {
        return "# Content Gap Analysis\n\nNo significant content gaps identified.".to_string();
    }

    let mut out = String::new();
    // Writing to a String cannot fail
    let _ = write_gap_report(&mut out, gaps);
    out
}

fn write_gap_report(out: &mut String, gaps: &[ContentGap]) -> fmt::Result {
    writeln!(out, "# 🔍 Content Gap Analysis Report")?;
    writeln!(out)?;
    writeln!(out, "Found {} content gaps to address", gaps.len())?;
    writeln!(out)?;

    for (label, priority) in [
        ("High Priority", "high"),
        ("Medium Priority", "medium"),
        ("Low Priority", "low"),
    ] {
        let group: Vec<&ContentGap> = gaps.iter().filter(|g| g.priority == priority).collect();
        if group.is_empty() {
            continue;
        }
        writeln!(out, "## 🎯 {} Gaps", label)?;
        writeln!(out)?;

        for gap in group {
            writeln!(out, "### {}", gap.title)?;
            writeln!(out, "**Type:** {}", gap.gap_type)?;
            writeln!(out, "**Confidence:** {:.0}%", gap.confidence * 100.0)?;
            writeln!(out, "**Description:** {}", gap.description)?;
            writeln!(out)?;

            if !gap.related_notes.is_empty() {
                writeln!(out, "**Connects to:**")?;
                for note in &gap.related_notes {
                    writeln!(out, "- [[{}]]", note)?;
                }
                writeln!(out)?;
            }
            if !gap.suggested_content.is_empty() {
                writeln!(out, "**Should cover:**")?;
                for item in &gap.suggested_content {
                    writeln!(out, "- {}", item)?;
                }
                writeln!(out)?;
            }
            if !gap.tags.is_empty() {
                let tags: Vec<String> = gap.tags.iter().map(|t| format!("#{}", t)).collect();
                writeln!(out, "**Suggested tags:** {}", tags.join(", "))?;
                writeln!(out)?;
            }
            writeln!(out, "---")?;
            writeln!(out)?;
        }
    }
    Ok(())
}
