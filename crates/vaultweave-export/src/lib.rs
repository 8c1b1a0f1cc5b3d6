//! # Export System
//!
//! Renders a [`VaultAnalysis`] for people and for downstream tools.
//!
//! ## Quick Start
//!
//! ```no_run
//! use vaultweave_core::AnalyzerConfig;
//! use vaultweave_export::{ReportOptions, VaultAnalysisExporter, render_markdown};
//! use vaultweave_graph::VaultAggregator;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = AnalyzerConfig::default();
//! let aggregator = VaultAggregator::new("/path/to/vault", config.clone());
//! if let Some(analysis) = aggregator.analyze_entire_vault(None) {
//!     println!("{}", render_markdown(&analysis, &ReportOptions::from(&config)));
//!     println!("{}", VaultAnalysisExporter::to_json(&analysis)?);
//!     println!("{}", VaultAnalysisExporter::to_csv(&analysis));
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Export Formats
//!
//! ### Markdown
//! - Health banner and overview table
//! - One subsection per folder, largest first
//! - Cross-folder opportunities, capped per [`ReportOptions`]
//! - Threshold-driven recommendations
//!
//! ### JSON
//! - Pretty-printed
//! - Full structure preserved, including every cross-folder suggestion
//!
//! ### CSV
//! - One row per folder
//! - Header row included
//! - Fields quoted when needed

pub mod markdown;

pub use markdown::{
    HealthTier, ReportOptions, default_report_path, format_thousands, health_banner,
    recommendations, render_markdown, write_markdown,
};

use vaultweave_core::prelude::*;
use vaultweave_core::{CsvBuilder, to_json_string};

/// Export format options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    /// Markdown report
    Markdown,
    /// JSON format (pretty-printed)
    Json,
    /// CSV format (one row per folder)
    Csv,
}

impl ExportFormat {
    pub fn extension(self) -> &'static str {
        match self {
            Self::Markdown => "md",
            Self::Json => "json",
            Self::Csv => "csv",
        }
    }
}

/// Vault analysis exporter
pub struct VaultAnalysisExporter;

impl VaultAnalysisExporter {
    /// Export the whole analysis as JSON
    pub fn to_json(analysis: &VaultAnalysis) -> Result<String> {
        to_json_string(analysis, "vault analysis")
    }

    /// Export per-folder statistics as CSV
    pub fn to_csv(analysis: &VaultAnalysis) -> String {
        analysis
            .folder_stats
            .iter()
            .fold(
                CsvBuilder::new(&[
                    "folder",
                    "note_count",
                    "total_words",
                    "total_links",
                    "orphaned_notes",
                    "notes_with_code",
                    "top_topics",
                ]),
                |csv, folder| {
                    let topics: Vec<String> = folder
                        .top_topics
                        .iter()
                        .map(|t| t.topic.to_string())
                        .collect();
                    csv.add_row(vec![
                        folder.name.clone(),
                        folder.note_count.to_string(),
                        folder.total_words.to_string(),
                        folder.total_links.to_string(),
                        folder.orphaned_notes.to_string(),
                        folder.notes_with_code.to_string(),
                        topics.join("|"),
                    ])
                },
            )
            .build()
    }

    /// Render in the given format
    pub fn export(
        analysis: &VaultAnalysis,
        format: ExportFormat,
        options: &ReportOptions,
    ) -> Result<String> {
        match format {
            ExportFormat::Markdown => Ok(render_markdown(analysis, options)),
            ExportFormat::Json => Self::to_json(analysis),
            ExportFormat::Csv => Ok(Self::to_csv(analysis)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn analysis() -> VaultAnalysis {
        VaultAnalysis {
            vault_path: "/vault".to_string(),
            analysis_date: "2025-01-01T00:00:00+00:00".to_string(),
            total_folders: 2,
            total_notes: 3,
            total_words: 30,
            total_links: 2,
            global_orphaned_notes: 1,
            folder_stats: vec![
                FolderStats {
                    name: "Coding, misc".to_string(),
                    note_count: 2,
                    total_words: 20,
                    total_links: 2,
                    orphaned_notes: 0,
                    notes_with_code: 1,
                    top_topics: vec![
                        TopicCount {
                            topic: Topic::new("languages", "rust"),
                            count: 2,
                        },
                        TopicCount {
                            topic: Topic::new("tools", "git"),
                            count: 1,
                        },
                    ],
                    notes: vec!["a".to_string(), "b".to_string()],
                    orphans: vec![],
                },
                FolderStats {
                    name: ROOT_FOLDER.to_string(),
                    note_count: 1,
                    total_words: 10,
                    total_links: 0,
                    orphaned_notes: 1,
                    notes_with_code: 0,
                    top_topics: vec![],
                    notes: vec!["lonely".to_string()],
                    orphans: vec!["lonely".to_string()],
                },
            ],
            cross_folder_suggestions: vec![CrossFolderSuggestion {
                source: "./lonely".to_string(),
                targets: vec!["Coding, misc/a".to_string()],
            }],
            vault_health_score: 41.3,
        }
    }

    #[test]
    fn test_json_export_preserves_structure() {
        let json = VaultAnalysisExporter::to_json(&analysis()).unwrap();
        let parsed: VaultAnalysis = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.folder_stats.len(), 2);
        assert_eq!(parsed.cross_folder_targets("./lonely").unwrap().len(), 1);
        assert!(json.contains("\"vault_health_score\": 41.3"));
    }

    #[test]
    fn test_csv_one_row_per_folder() {
        let csv = VaultAnalysisExporter::to_csv(&analysis());
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(
            lines[0],
            "folder,note_count,total_words,total_links,orphaned_notes,notes_with_code,top_topics"
        );
        assert_eq!(
            lines[1],
            "\"Coding, misc\",2,20,2,0,1,languages:rust|tools:git"
        );
        assert_eq!(lines[2], ".,1,10,0,1,0,");
    }

    #[test]
    fn test_export_dispatch() {
        let options = ReportOptions::default();
        let md = VaultAnalysisExporter::export(&analysis(), ExportFormat::Markdown, &options).unwrap();
        assert!(md.contains("**Health Score:** 41.3/100 🟡"));
        let csv = VaultAnalysisExporter::export(&analysis(), ExportFormat::Csv, &options).unwrap();
        assert!(csv.starts_with("folder,"));
        assert_eq!(ExportFormat::Json.extension(), "json");
    }
}
