//! End-to-end scenarios over real vault directories

use std::fs;
use std::path::Path;
use tempfile::TempDir;
use vaultweave::export::{ReportOptions, VaultAnalysisExporter, render_markdown};
use vaultweave::prelude::*;
use vaultweave::vault::insert_links;

/// Helper to create a test vault from (relative path, content) pairs
fn create_test_vault(files: &[(&str, &str)]) -> TempDir {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    for (path, content) in files {
        let full = temp_dir.path().join(path);
        fs::create_dir_all(full.parent().unwrap()).unwrap();
        fs::write(full, content).unwrap();
    }
    temp_dir
}

fn coding_and_philosophy() -> TempDir {
    create_test_vault(&[
        (
            "Coding/Rust.md",
            "# Rust\n\nRust uses Ownership and Borrowing. See [[Ownership]].",
        ),
        ("Coding/Ownership.md", "Memory model."),
        ("Coding/Borrowing.md", "References."),
        ("Philosophy/Ethics.md", "[[Logic]] matters"),
        ("Philosophy/Logic.md", "Back to [[Ethics]]"),
    ])
}

fn aggregator(root: &Path) -> VaultAggregator {
    VaultAggregator::new(root, AnalyzerConfig::default())
}

#[test]
fn test_two_folder_vault() {
    let vault = coding_and_philosophy();
    let analysis = aggregator(vault.path()).analyze_entire_vault(None).unwrap();

    assert_eq!(analysis.total_folders, 2);
    assert_eq!(analysis.total_notes, 5);
    assert_eq!(analysis.total_links, 3);
    assert_eq!(analysis.global_orphaned_notes, 1);
    assert!(analysis.cross_folder_suggestions.is_empty());
    assert!(analysis.vault_health_score > 0.0);
    assert!(analysis.vault_health_score < 100.0);
    assert!((analysis.vault_health_score - 50.0).abs() < 0.05);

    let coding = analysis
        .folder_stats
        .iter()
        .find(|f| f.name == "Coding")
        .unwrap();
    assert_eq!(coding.orphans, vec!["Borrowing".to_string()]);
}

#[test]
fn test_cross_folder_mention_suggested() {
    let vault = create_test_vault(&[
        ("Coding/Rust.md", "Type systems are a kind of Logic."),
        ("Philosophy/Logic.md", "Formal reasoning."),
        ("Philosophy/Ethics.md", "See [[Logic]]."),
    ]);
    let analysis = aggregator(vault.path()).analyze_entire_vault(None).unwrap();

    assert_eq!(
        analysis.cross_folder_targets("Coding/Rust"),
        Some(&["Philosophy/Logic".to_string()][..])
    );
    // Ethics links to Logic already, and Logic is in its own folder
    assert!(analysis.cross_folder_targets("Philosophy/Ethics").is_none());
}

#[test]
fn test_single_orphan_note() {
    let vault = create_test_vault(&[("Inbox/lonely.md", "Nothing references this.")]);
    let aggregator = aggregator(vault.path());
    let analysis = aggregator.analyze_entire_vault(None).unwrap();
    assert_eq!(analysis.global_orphaned_notes, 1);

    let graph = aggregator.build_graph(None);
    let health = vaultweave::graph::HealthInputs::from_graph(&graph).score();
    assert_eq!(health.non_orphan_ratio, 0.0);
}

#[test]
fn test_cross_folder_backlink_clears_orphan() {
    let vault = create_test_vault(&[
        ("Coding/Rust.md", "A language."),
        ("Journal/today.md", "Learned [[Rust]] today."),
    ]);
    let aggregator = aggregator(vault.path());

    // Alone, the Coding folder has an orphan
    assert_eq!(aggregator.analyze_folder("Coding").orphaned_notes, 1);

    // Merged with Journal, Rust has an incoming link
    let analysis = aggregator.analyze_entire_vault(None).unwrap();
    assert_eq!(analysis.global_orphaned_notes, 0);
}

#[test]
fn test_root_notes_and_excluded_dirs() {
    let vault = create_test_vault(&[
        ("index.md", "[[Rust]]"),
        ("Coding/Rust.md", "A language."),
        (".obsidian/workspace.md", "ignored"),
        ("Coding/.git/HEAD.md", "ignored"),
    ]);
    let folders = aggregator(vault.path()).discover_folders();
    assert_eq!(folders, vec![".".to_string(), "Coding".to_string()]);
}

#[test]
fn test_folder_subset_and_empty_results() {
    let vault = coding_and_philosophy();
    let aggregator = aggregator(vault.path());

    let subset = vec!["Philosophy".to_string(), "Missing".to_string()];
    let analysis = aggregator.analyze_entire_vault(Some(&subset)).unwrap();
    assert_eq!(analysis.total_folders, 1);
    assert_eq!(analysis.total_notes, 2);

    let nothing = vec!["Missing".to_string()];
    assert!(aggregator.analyze_entire_vault(Some(&nothing)).is_none());

    let empty = TempDir::new().unwrap();
    assert!(
        VaultAggregator::new(empty.path(), AnalyzerConfig::default())
            .analyze_entire_vault(None)
            .is_none()
    );
    assert!(
        VaultAggregator::new(empty.path().join("absent"), AnalyzerConfig::default())
            .analyze_entire_vault(None)
            .is_none()
    );
}

#[test]
fn test_report_and_exports() {
    let vault = coding_and_philosophy();
    let analysis = aggregator(vault.path()).analyze_entire_vault(None).unwrap();

    let report = render_markdown(&analysis, &ReportOptions::default());
    assert!(report.contains("**Health Score:** 50.0/100 🟡"));
    assert!(report.contains("| Total Notes | 5 |"));
    let coding = report.find("### 📂 Coding").unwrap();
    let philosophy = report.find("### 📂 Philosophy").unwrap();
    assert!(coding < philosophy);

    let json = VaultAnalysisExporter::to_json(&analysis).unwrap();
    let parsed: VaultAnalysis = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed, analysis);

    let csv = VaultAnalysisExporter::to_csv(&analysis);
    assert_eq!(csv.lines().count(), 3);
}

#[test]
fn test_auto_link_then_reanalyze_and_restore() {
    let vault = coding_and_philosophy();
    let backups = TempDir::new().unwrap();
    let config = AnalyzerConfig::builder()
        .backup_dir(backups.path())
        .build()
        .unwrap();

    let linker = AutoLinker::new(vault.path(), config.clone());
    let report = linker.link_folder("Coding", 0.7, false).unwrap();
    assert_eq!(report.notes.len(), 1);
    assert_eq!(report.notes[0].note, "Rust");
    assert_eq!(report.total_changes(), 1);

    let rust = fs::read_to_string(vault.path().join("Coding/Rust.md")).unwrap();
    assert_eq!(
        rust,
        "# Rust\n\nRust uses Ownership and [[Borrowing]]. See [[Ownership]]."
    );

    let analysis = VaultAggregator::new(vault.path(), config.clone())
        .analyze_entire_vault(None)
        .unwrap();
    assert_eq!(analysis.global_orphaned_notes, 0);
    assert_eq!(analysis.total_links, 4);

    let again = linker.link_folder("Coding", 0.7, false).unwrap();
    assert_eq!(again.total_changes(), 0);

    let backup_id = report.backup_id.unwrap();
    BackupStore::new(backups.path())
        .restore(&backup_id, vault.path())
        .unwrap();
    let restored = fs::read_to_string(vault.path().join("Coding/Rust.md")).unwrap();
    assert!(restored.ends_with("Ownership and Borrowing. See [[Ownership]]."));
}

#[test]
fn test_reverse_order_insertion() {
    let suggestion = LinkSuggestion {
        target_note: "note2".to_string(),
        context_snippets: vec![],
        confidence: 0.9,
        mention_count: 2,
    };
    let outcome = insert_links("see note2 and note2 again", &[suggestion], 0.7);
    assert_eq!(outcome.text, "see [[note2]] and [[note2]] again");
}
