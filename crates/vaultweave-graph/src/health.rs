//! Vault health scoring.
//!
//! The score is a weighted sum of four ratios, each clamped to [0, 1]:
//!
//! | Ratio            | Definition                          | Weight |
//! |------------------|-------------------------------------|--------|
//! | linking          | min(links / notes, 1)               | 0.3    |
//! | non-orphan       | 1 - orphans / notes                 | 0.3    |
//! | structure        | notes with code / notes             | 0.2    |
//! | folder diversity | min(folders / 5, 1)                 | 0.2    |
//!
//! The sum is scaled to [0, 100] and rounded to one decimal. A vault with
//! no notes scores 0.

use crate::global::GlobalGraph;
use serde::{Deserialize, Serialize};

pub const LINKING_WEIGHT: f64 = 0.3;
pub const NON_ORPHAN_WEIGHT: f64 = 0.3;
pub const STRUCTURE_WEIGHT: f64 = 0.2;
pub const DIVERSITY_WEIGHT: f64 = 0.2;
/// Folder count at which folder diversity saturates
pub const DIVERSITY_FOLDERS: f64 = 5.0;

/// Raw counts the score is computed from
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthInputs {
    pub total_notes: usize,
    pub total_links: usize,
    pub orphaned_notes: usize,
    pub notes_with_code: usize,
    pub folder_count: usize,
}

/// Sub-scores and the final score
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct HealthBreakdown {
    pub linking_ratio: f64,
    pub non_orphan_ratio: f64,
    pub structure_ratio: f64,
    pub folder_diversity: f64,
    /// In [0, 100], one decimal
    pub score: f64,
}

impl HealthInputs {
    pub fn from_graph(graph: &GlobalGraph) -> Self {
        Self {
            total_notes: graph.total_notes(),
            total_links: graph.total_links(),
            orphaned_notes: graph.orphan_count(),
            notes_with_code: graph.notes_with_code(),
            folder_count: graph.folder_count(),
        }
    }

    /// Compute the sub-scores and the weighted score
    pub fn score(&self) -> HealthBreakdown {
        if self.total_notes == 0 {
            return HealthBreakdown::default();
        }

        let notes = self.total_notes as f64;
        let linking_ratio = clamp_unit(self.total_links as f64 / notes);
        let non_orphan_ratio = clamp_unit(1.0 - self.orphaned_notes as f64 / notes);
        let structure_ratio = clamp_unit(self.notes_with_code as f64 / notes);
        let folder_diversity = clamp_unit(self.folder_count as f64 / DIVERSITY_FOLDERS);

        let weighted = linking_ratio * LINKING_WEIGHT
            + non_orphan_ratio * NON_ORPHAN_WEIGHT
            + structure_ratio * STRUCTURE_WEIGHT
            + folder_diversity * DIVERSITY_WEIGHT;

        HealthBreakdown {
            linking_ratio,
            non_orphan_ratio,
            structure_ratio,
            folder_diversity,
            score: round_one_decimal(weighted * 100.0),
        }
    }
}

/// Health score of a merged graph
pub fn health_score(graph: &GlobalGraph) -> f64 {
    HealthInputs::from_graph(graph).score().score
}

fn clamp_unit(value: f64) -> f64 {
    value.clamp(0.0, 1.0)
}

fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn inputs(notes: usize, links: usize, orphans: usize, code: usize, folders: usize) -> HealthInputs {
        HealthInputs {
            total_notes: notes,
            total_links: links,
            orphaned_notes: orphans,
            notes_with_code: code,
            folder_count: folders,
        }
    }

    #[test]
    fn test_empty_vault_scores_zero() {
        assert_eq!(inputs(0, 0, 0, 0, 3).score().score, 0.0);
        assert_eq!(health_score(&GlobalGraph::default()), 0.0);
    }

    #[test]
    fn test_perfect_vault_scores_hundred() {
        let breakdown = inputs(10, 40, 0, 10, 7).score();
        assert_eq!(breakdown.linking_ratio, 1.0);
        assert_eq!(breakdown.folder_diversity, 1.0);
        assert_eq!(breakdown.score, 100.0);
    }

    #[test]
    fn test_single_orphan_note() {
        let breakdown = inputs(1, 0, 1, 0, 1).score();
        assert_eq!(breakdown.non_orphan_ratio, 0.0);
        assert_eq!(breakdown.score, 4.0);
    }

    #[test]
    fn test_rounded_to_one_decimal() {
        let score = inputs(3, 1, 1, 1, 2).score().score;
        assert_eq!(score, (score * 10.0).round() / 10.0);
        assert_eq!(score, 44.7);
    }

    #[test]
    fn test_monotonic_in_linking_and_non_orphan() {
        let mut previous = 0.0;
        for links in 0..=12 {
            let score = inputs(10, links, 5, 2, 2).score().score;
            assert!(score >= previous);
            assert!((0.0..=100.0).contains(&score));
            previous = score;
        }

        let mut previous = 0.0;
        for orphans in (0..=10).rev() {
            let score = inputs(10, 3, orphans, 2, 2).score().score;
            assert!(score >= previous);
            previous = score;
        }
    }

    #[test]
    fn test_sub_scores_clamped() {
        let breakdown = inputs(2, 1, 5, 9, 1).score();
        assert_eq!(breakdown.non_orphan_ratio, 0.0);
        assert_eq!(breakdown.structure_ratio, 1.0);
    }
}
