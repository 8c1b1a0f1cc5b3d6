//! Markdown rendering of a [`VaultAnalysis`].
//!
//! Section order is fixed: title, generation metadata with the health banner,
//! overview table, one subsection per folder (largest first), cross-folder
//! opportunities, recommendations.

use chrono::{DateTime, Local};
use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};
use vaultweave_core::{AnalyzerConfig, Error, FolderStats, Result, VaultAnalysis};

/// Folders listing more notes than this show a sample instead
const FULL_NOTE_LIST_MAX: usize = 10;
const SAMPLE_NOTES: usize = 5;

/// Health tier used by the recommendations section
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HealthTier {
    Excellent,
    Good,
    Moderate,
    Low,
}

impl HealthTier {
    pub fn from_score(score: f64) -> Self {
        if score >= 80.0 {
            Self::Excellent
        } else if score >= 60.0 {
            Self::Good
        } else if score >= 40.0 {
            Self::Moderate
        } else {
            Self::Low
        }
    }

    fn verdict(self) -> &'static str {
        match self {
            Self::Excellent => {
                "🎉 **Excellent Health Score!** Your vault is well-connected and organized."
            }
            Self::Good => {
                "👍 **Good Health Score** - Your vault has solid structure with room for improvement."
            }
            Self::Moderate => "⚠️ **Moderate Health Score** - Your vault needs some attention.",
            Self::Low => "🚨 **Low Health Score** - Your vault needs significant improvement.",
        }
    }
}

/// Traffic-light emoji shown next to the score
pub fn health_banner(score: f64) -> &'static str {
    if score >= 70.0 {
        "🟢"
    } else if score >= 40.0 {
        "🟡"
    } else {
        "🔴"
    }
}

/// Caps applied to the cross-folder section
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportOptions {
    pub max_cross_sources: usize,
    pub max_cross_targets: usize,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self {
            max_cross_sources: 10,
            max_cross_targets: 3,
        }
    }
}

impl From<&AnalyzerConfig> for ReportOptions {
    fn from(config: &AnalyzerConfig) -> Self {
        Self {
            max_cross_sources: config.report_max_cross_sources,
            max_cross_targets: config.report_max_cross_targets,
        }
    }
}

/// Render the full report
pub fn render_markdown(analysis: &VaultAnalysis, options: &ReportOptions) -> String {
    let mut out = String::new();
    // Writing to a String cannot fail
    let _ = write_report_body(&mut out, analysis, options);
    out
}

/// Render and write the report, creating parent directories
pub fn write_markdown(
    analysis: &VaultAnalysis,
    path: &Path,
    options: &ReportOptions,
) -> Result<PathBuf> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).map_err(Error::io)?;
    }
    fs::write(path, render_markdown(analysis, options)).map_err(Error::io)?;
    log::info!("Report saved to {}", path.display());
    Ok(path.to_path_buf())
}

/// `reports/vault_analysis_<YYYYmmdd_HHMMSS>.md`
pub fn default_report_path(now: DateTime<Local>) -> PathBuf {
    PathBuf::from("reports").join(format!(
        "vault_analysis_{}.md",
        now.format("%Y%m%d_%H%M%S")
    ))
}

/// `1234567` as `1,234,567`
pub fn format_thousands(n: usize) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

fn write_report_body(
    out: &mut String,
    analysis: &VaultAnalysis,
    options: &ReportOptions,
) -> std::fmt::Result {
    let score = analysis.vault_health_score;

    writeln!(out, "# 🔍 Obsidian Vault Analysis Report")?;
    writeln!(out)?;
    writeln!(out, "**Generated:** {}", analysis.analysis_date)?;
    writeln!(out, "**Vault Path:** `{}`", analysis.vault_path)?;
    writeln!(out, "**Health Score:** {:.1}/100 {}", score, health_banner(score))?;
    writeln!(out)?;

    writeln!(out, "## 📊 Overview")?;
    writeln!(out)?;
    writeln!(out, "| Metric | Value |")?;
    writeln!(out, "|--------|-------|")?;
    writeln!(out, "| Total Folders | {} |", analysis.total_folders)?;
    writeln!(out, "| Total Notes | {} |", analysis.total_notes)?;
    writeln!(out, "| Total Words | {} |", format_thousands(analysis.total_words))?;
    writeln!(out, "| Total Links | {} |", analysis.total_links)?;
    writeln!(out, "| Orphaned Notes | {} |", analysis.global_orphaned_notes)?;
    writeln!(out)?;

    writeln!(out, "## 📁 Folder Analysis")?;
    writeln!(out)?;
    let mut folders: Vec<&FolderStats> = analysis.folder_stats.iter().collect();
    // Stable: equal counts keep discovery order
    folders.sort_by(|a, b| b.note_count.cmp(&a.note_count));
    for folder in folders {
        write_folder(out, folder)?;
    }

    if !analysis.cross_folder_suggestions.is_empty() {
        writeln!(out, "## 🌉 Cross-Folder Connection Opportunities")?;
        writeln!(out)?;
        for suggestion in analysis
            .cross_folder_suggestions
            .iter()
            .take(options.max_cross_sources)
        {
            writeln!(out, "**{}** could link to:", suggestion.source)?;
            for target in suggestion.targets.iter().take(options.max_cross_targets) {
                writeln!(out, "- {}", target)?;
            }
            writeln!(out)?;
        }
    }

    writeln!(out, "## 💡 Recommendations")?;
    writeln!(out)?;
    writeln!(out, "{}", HealthTier::from_score(score).verdict())?;
    writeln!(out)?;
    for line in recommendations(analysis) {
        writeln!(out, "- {}", line)?;
    }
    Ok(())
}

fn write_folder(out: &mut String, folder: &FolderStats) -> std::fmt::Result {
    writeln!(out, "### 📂 {}", folder.name)?;
    writeln!(out)?;
    writeln!(out, "- **Notes:** {}", folder.note_count)?;
    writeln!(out, "- **Words:** {}", format_thousands(folder.total_words))?;
    writeln!(out, "- **Links:** {}", folder.total_links)?;
    writeln!(out, "- **Orphaned:** {}", folder.orphaned_notes)?;
    writeln!(out, "- **With Code:** {}", folder.notes_with_code)?;

    if !folder.top_topics.is_empty() {
        let topics: Vec<String> = folder
            .top_topics
            .iter()
            .map(|t| t.topic.to_string())
            .collect();
        writeln!(out, "- **Top Topics:** {}", topics.join(", "))?;
    }

    if folder.notes.len() <= FULL_NOTE_LIST_MAX {
        writeln!(out, "- **Note List:** {}", folder.notes.join(", "))?;
    } else {
        writeln!(
            out,
            "- **Sample Notes:** {} (and {} more)",
            folder.notes[..SAMPLE_NOTES].join(", "),
            folder.notes.len() - SAMPLE_NOTES
        )?;
    }
    writeln!(out)
}

/// Threshold-driven recommendation lines, without the leading bullet
pub fn recommendations(analysis: &VaultAnalysis) -> Vec<String> {
    let mut lines = Vec::new();

    if analysis.orphan_ratio() > 0.2 {
        lines.push(format!(
            "🔗 **Connect Orphaned Notes:** {} notes have no connections ({:.1}% of vault)",
            analysis.global_orphaned_notes,
            analysis.orphan_ratio() * 100.0
        ));
    }

    if !analysis.cross_folder_suggestions.is_empty() {
        lines.push(format!(
            "🌉 **Cross-Folder Linking:** Found {} opportunities to connect folders",
            analysis.cross_folder_suggestions.len()
        ));
    }

    if analysis.total_notes > 0 && analysis.average_links_per_note() < 0.5 {
        lines.push(format!(
            "📎 **Increase Linking:** Average of {:.1} links per note (aim for 2-3)",
            analysis.average_links_per_note()
        ));
    }

    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use vaultweave_core::{CrossFolderSuggestion, Topic, TopicCount};

    fn folder(name: &str, notes: usize) -> FolderStats {
        FolderStats {
            name: name.to_string(),
            note_count: notes,
            total_words: 1500 * notes,
            total_links: notes,
            orphaned_notes: 0,
            notes_with_code: 1,
            top_topics: vec![TopicCount {
                topic: Topic::new("languages", "rust"),
                count: 2,
            }],
            notes: (0..notes).map(|i| format!("note{:02}", i)).collect(),
            orphans: vec![],
        }
    }

    fn analysis() -> VaultAnalysis {
        let cross = (0..12)
            .map(|i| CrossFolderSuggestion {
                source: format!("Coding/src{:02}", i),
                targets: (0..5).map(|t| format!("Philosophy/t{}", t)).collect(),
            })
            .collect();
        VaultAnalysis {
            vault_path: "/vault".to_string(),
            analysis_date: "2025-01-01T00:00:00+00:00".to_string(),
            total_folders: 2,
            total_notes: 14,
            total_words: 21000,
            total_links: 2,
            global_orphaned_notes: 4,
            folder_stats: vec![folder("Philosophy", 2), folder("Coding", 12)],
            cross_folder_suggestions: cross,
            vault_health_score: 55.0,
        }
    }

    #[test]
    fn test_section_order_and_header() {
        let report = render_markdown(&analysis(), &ReportOptions::default());
        let sections = [
            "# 🔍 Obsidian Vault Analysis Report",
            "**Vault Path:** `/vault`",
            "**Health Score:** 55.0/100 🟡",
            "## 📊 Overview",
            "| Total Words | 21,000 |",
            "## 📁 Folder Analysis",
            "### 📂 Coding",
            "### 📂 Philosophy",
            "## 🌉 Cross-Folder Connection Opportunities",
            "## 💡 Recommendations",
            "⚠️ **Moderate Health Score**",
        ];
        let mut last = 0;
        for section in sections {
            let pos = report[last..]
                .find(section)
                .unwrap_or_else(|| panic!("missing or out of order: {}", section));
            last += pos;
        }
    }

    #[test]
    fn test_cross_folder_caps() {
        let report = render_markdown(&analysis(), &ReportOptions::default());
        assert!(report.contains("**Coding/src09** could link to:"));
        assert!(!report.contains("Coding/src10"));
        assert!(report.contains("- Philosophy/t2"));
        assert!(!report.contains("- Philosophy/t3"));
    }

    #[test]
    fn test_large_folder_shows_sample() {
        let report = render_markdown(&analysis(), &ReportOptions::default());
        assert!(report.contains("- **Sample Notes:** note00, note01, note02, note03, note04 (and 7 more)"));
        assert!(report.contains("- **Note List:** note00, note01"));
        assert!(report.contains("- **Top Topics:** languages:rust"));
    }

    #[test]
    fn test_recommendation_rules() {
        let lines = recommendations(&analysis());
        assert_eq!(lines.len(), 3);
        assert!(lines[0].contains("4 notes have no connections (28.6% of vault)"));
        assert!(lines[1].contains("Found 12 opportunities"));
        assert!(lines[2].contains("Average of 0.1 links per note"));

        let mut healthy = analysis();
        healthy.global_orphaned_notes = 0;
        healthy.cross_folder_suggestions.clear();
        healthy.total_links = 30;
        assert!(recommendations(&healthy).is_empty());
    }

    #[test]
    fn test_empty_cross_folder_section_omitted() {
        let mut a = analysis();
        a.cross_folder_suggestions.clear();
        let report = render_markdown(&a, &ReportOptions::default());
        assert!(!report.contains("Cross-Folder Connection Opportunities"));
    }

    #[test]
    fn test_banner_and_tiers() {
        assert_eq!(health_banner(70.0), "🟢");
        assert_eq!(health_banner(69.9), "🟡");
        assert_eq!(health_banner(40.0), "🟡");
        assert_eq!(health_banner(39.9), "🔴");
        assert_eq!(HealthTier::from_score(80.0), HealthTier::Excellent);
        assert_eq!(HealthTier::from_score(79.9), HealthTier::Good);
        assert_eq!(HealthTier::from_score(40.0), HealthTier::Moderate);
        assert_eq!(HealthTier::from_score(0.0), HealthTier::Low);
    }

    #[test]
    fn test_format_thousands() {
        assert_eq!(format_thousands(0), "0");
        assert_eq!(format_thousands(999), "999");
        assert_eq!(format_thousands(1000), "1,000");
        assert_eq!(format_thousands(1234567), "1,234,567");
    }

    #[test]
    fn test_write_creates_parent_dirs() {
        let temp = tempfile::TempDir::new().unwrap();
        let path = temp.path().join("reports").join("out.md");
        write_markdown(&analysis(), &path, &ReportOptions::default()).unwrap();
        let written = fs::read_to_string(&path).unwrap();
        assert!(written.starts_with("# 🔍 Obsidian Vault Analysis Report"));
    }

    #[test]
    fn test_default_report_path() {
        let path = default_report_path(Local::now());
        let name = path.file_name().unwrap().to_str().unwrap();
        assert!(path.starts_with("reports"));
        assert!(name.starts_with("vault_analysis_"));
        assert!(name.ends_with(".md"));
    }
}
