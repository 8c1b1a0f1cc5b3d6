//! vaultweave CLI

use anyhow::{Context, Result, bail};
use chrono::Local;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;
use vaultweave::export::{
    ExportFormat, ReportOptions, VaultAnalysisExporter, default_report_path, write_markdown,
};
use vaultweave::graph::{FolderMatchers, VaultAggregator};
use vaultweave::settings::{expand_path, load_settings};
use vaultweave::vault::{AutoLinker, BackupStore};
use vaultweave::{AnalyzerConfig, SafetyLevel, VaultAnalysis};

/// vaultweave - vault health analysis and safe auto-linking for Obsidian
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// YAML settings file
    #[arg(long, global = true, env = "VAULTWEAVE_CONFIG")]
    config: Option<PathBuf>,

    /// Debug logging (RUST_LOG still wins when set)
    #[arg(short, long, global = true, action = clap::ArgAction::SetTrue)]
    verbose: bool,

    /// Log output format on stderr
    #[arg(long, global = true, value_enum, default_value_t = LogFormat::Human)]
    log_format: LogFormat,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum LogFormat {
    Human,
    Json,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Analyze the whole vault and write a Markdown report
    Analyze {
        /// Path to the vault
        vault: String,

        /// Only analyze these folders
        #[arg(long, num_args = 1..)]
        folders: Vec<String>,

        /// Report path (default: reports/vault_analysis_<timestamp>.md)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Also write a JSON export next to the report
        #[arg(long, action = clap::ArgAction::SetTrue)]
        json: bool,

        /// Also write a per-folder CSV export next to the report
        #[arg(long, action = clap::ArgAction::SetTrue)]
        csv: bool,
    },

    /// Show link suggestions for a folder, or full recommendations for one note
    Suggest {
        vault: String,

        #[arg(short, long)]
        folder: String,

        #[arg(short, long)]
        note: Option<String>,
    },

    /// Wrap unlinked mentions in a folder in wikilinks
    Link {
        vault: String,

        #[arg(short, long)]
        folder: String,

        /// Minimum confidence (default from settings)
        #[arg(short, long)]
        threshold: Option<f64>,

        /// Show the changes without writing anything
        #[arg(long, action = clap::ArgAction::SetTrue)]
        dry_run: bool,

        /// paranoid, conservative, balanced or aggressive
        #[arg(long, default_value = "conservative")]
        safety: SafetyLevel,

        /// Skip the backup before writing
        #[arg(long, action = clap::ArgAction::SetTrue)]
        no_backup: bool,
    },

    /// Manage auto-link backups
    Backups {
        #[command(subcommand)]
        action: BackupAction,
    },

    /// Write or check a YAML settings file
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigAction {
    /// Write the default settings to a file
    Init {
        path: PathBuf,

        /// Overwrite an existing file
        #[arg(long, action = clap::ArgAction::SetTrue)]
        force: bool,
    },

    /// Parse and validate a settings file on its own
    Check { path: PathBuf },
}

#[derive(Subcommand, Debug)]
enum BackupAction {
    /// List backups, newest first
    List,

    /// Copy the files of a backup back into the vault
    Restore {
        backup_id: String,

        #[arg(long)]
        vault: String,

        /// Required; restoring overwrites current notes
        #[arg(long, action = clap::ArgAction::SetTrue)]
        confirm: bool,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.log_format);

    match run(cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn init_logging(verbose: bool, format: LogFormat) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(if verbose { "debug" } else { "info" }));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    let _ = match format {
        LogFormat::Human => builder.try_init(),
        LogFormat::Json => builder.json().try_init(),
    };
}

fn run(cli: Cli) -> Result<ExitCode> {
    if let Command::Config { action } = &cli.command {
        return config_file(action);
    }
    let config = load_settings(cli.config.as_deref()).context("Failed to load settings")?;
    log::debug!("vaultweave v{}", env!("CARGO_PKG_VERSION"));

    match cli.command {
        Command::Analyze {
            vault,
            folders,
            output,
            json,
            csv,
        } => analyze(&vault, &folders, output, json, csv, config),
        Command::Suggest {
            vault,
            folder,
            note,
        } => suggest(&vault, &folder, note.as_deref(), config),
        Command::Link {
            vault,
            folder,
            threshold,
            dry_run,
            safety,
            no_backup,
        } => link(&vault, &folder, threshold, dry_run, safety, no_backup, config),
        Command::Backups { action } => backups(action, &config),
        Command::Config { action } => config_file(&action),
    }
}

fn vault_root(raw: &str) -> Result<PathBuf> {
    let path = expand_path(raw)?;
    if !path.is_dir() {
        bail!("Vault path {} is not a directory", path.display());
    }
    Ok(path)
}

fn analyze(
    vault: &str,
    folders: &[String],
    output: Option<PathBuf>,
    json: bool,
    csv: bool,
    config: AnalyzerConfig,
) -> Result<ExitCode> {
    let root = vault_root(vault)?;
    let options = ReportOptions::from(&config);
    let aggregator = VaultAggregator::new(&root, config);

    let subset = (!folders.is_empty()).then_some(folders);
    let Some(analysis) = aggregator.analyze_entire_vault(subset) else {
        eprintln!("No analyzable notes found in {}", root.display());
        return Ok(ExitCode::FAILURE);
    };

    print_summary(&analysis);

    let report_path = output.unwrap_or_else(|| default_report_path(Local::now()));
    write_markdown(&analysis, &report_path, &options)
        .with_context(|| format!("Failed to write report {}", report_path.display()))?;
    println!("\n📄 Report saved to: {}", report_path.display());

    let mut exports = Vec::new();
    if json {
        exports.push(ExportFormat::Json);
    }
    if csv {
        exports.push(ExportFormat::Csv);
    }
    for format in exports {
        let path = report_path.with_extension(format.extension());
        let content = VaultAnalysisExporter::export(&analysis, format, &options)?;
        std::fs::write(&path, content)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        println!("📄 Export saved to: {}", path.display());
    }

    Ok(ExitCode::SUCCESS)
}

fn print_summary(analysis: &VaultAnalysis) {
    println!("🔍 Vault: {}", analysis.vault_path);
    println!("Health Score: {:.1}/100", analysis.vault_health_score);
    println!(
        "Folders: {} | Notes: {} | Words: {} | Links: {} | Orphans: {}",
        analysis.total_folders,
        analysis.total_notes,
        analysis.total_words,
        analysis.total_links,
        analysis.global_orphaned_notes
    );
    if !analysis.cross_folder_suggestions.is_empty() {
        println!(
            "Cross-folder opportunities: {}",
            analysis.cross_folder_suggestions.len()
        );
    }
}

fn suggest(vault: &str, folder: &str, note: Option<&str>, config: AnalyzerConfig) -> Result<ExitCode> {
    let root = vault_root(vault)?;
    let aggregator = VaultAggregator::new(&root, config);
    let index = aggregator.load_folder(folder);
    if index.is_empty() {
        eprintln!("No notes found in folder '{}'", folder);
        return Ok(ExitCode::FAILURE);
    }
    let analyzer = aggregator.analyzer();

    if let Some(name) = note {
        let Some(recs) = analyzer.recommend(&index, name) else {
            bail!("Note '{}' not found in folder '{}'", name, folder);
        };
        println!(
            "📝 {} ({} words, {} links out, {} in from this folder)",
            recs.note_name,
            recs.note_info.word_count,
            recs.note_info.current_links,
            recs.note_info.folder_backlinks
        );
        println!("\n🔗 Link suggestions:");
        for s in &recs.link_suggestions {
            println!("  {} ({} mentions)", s, s.mention_count);
            for snippet in &s.context_snippets {
                println!("      {}", snippet.replace('\n', " "));
            }
        }
        println!("\n🧭 Related notes:");
        for s in &recs.related_suggestions {
            println!("  {}", s);
        }
        println!("\n🏗️ Structure:");
        for s in &recs.structure_suggestions {
            println!("  {}", s);
        }
        return Ok(ExitCode::SUCCESS);
    }

    let matchers = FolderMatchers::new(&index);
    for note in index.notes() {
        let suggestions = analyzer.suggest_links_with(&index, &matchers, &note.name);
        if suggestions.is_empty() {
            continue;
        }
        println!("📝 {}", note.name);
        for s in suggestions {
            println!("  {} ({} mentions)", s, s.mention_count);
        }
    }
    Ok(ExitCode::SUCCESS)
}

fn link(
    vault: &str,
    folder: &str,
    threshold: Option<f64>,
    dry_run: bool,
    safety: SafetyLevel,
    no_backup: bool,
    config: AnalyzerConfig,
) -> Result<ExitCode> {
    let root = vault_root(vault)?;
    let threshold = threshold.unwrap_or(config.link_confidence_threshold);
    if !(0.0..=1.0).contains(&threshold) {
        bail!("Threshold must be between 0 and 1, got {}", threshold);
    }

    let mut linker = AutoLinker::new(&root, config).with_safety_level(safety);
    if no_backup {
        linker = linker.with_backups(None);
    }

    let report = linker.link_folder(folder, threshold, dry_run)?;

    for result in &report.notes {
        println!("📝 {} ({} links)", result.note, result.changes.len());
        for change in &result.changes {
            println!("  {}", change);
        }
        if dry_run {
            print!("{}", result.diff());
        }
    }
    for failure in &report.failures {
        println!(
            "⚠️ {}: {} ({})",
            failure.note,
            failure.error,
            if failure.restored { "restored" } else { "NOT restored" }
        );
    }

    let verb = if dry_run { "Would insert" } else { "Inserted" };
    println!(
        "\n{} {} links in {} notes ({} mode)",
        verb,
        report.total_changes(),
        report.notes.len(),
        report.safety_level
    );
    if let Some(id) = &report.backup_id {
        println!("💾 Backup: {}", id);
    }

    Ok(if report.failures.is_empty() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

fn backups(action: BackupAction, config: &AnalyzerConfig) -> Result<ExitCode> {
    let store = BackupStore::new(&config.backup_dir);

    match action {
        BackupAction::List => {
            let manifests = store.list()?;
            if manifests.is_empty() {
                println!("No backups in {}", store.root().display());
            }
            for m in manifests {
                println!(
                    "{}  {}  {} files  {}  {}",
                    m.backup_id,
                    m.timestamp,
                    m.files.len(),
                    m.safety_level,
                    m.vault_path.display()
                );
            }
        }
        BackupAction::Restore {
            backup_id,
            vault,
            confirm,
        } => {
            let root = vault_root(&vault)?;
            if !confirm {
                let manifest = store.get(&backup_id)?;
                println!(
                    "Backup {} would overwrite {} files in {}. Re-run with --confirm.",
                    backup_id,
                    manifest.files.len(),
                    root.display()
                );
                return Ok(ExitCode::FAILURE);
            }
            let restored = store.restore(&backup_id, &root)?;
            for path in &restored {
                println!("  restored {}", display_relative(path));
            }
            println!("Restored {} files from {}", restored.len(), backup_id);
        }
    }
    Ok(ExitCode::SUCCESS)
}

fn config_file(action: &ConfigAction) -> Result<ExitCode> {
    match action {
        ConfigAction::Init { path, force } => {
            if path.exists() && !force {
                bail!("{} already exists; pass --force to overwrite", path.display());
            }
            AnalyzerConfig::default().save_yaml(path)?;
            println!("Default settings written to {}", path.display());
        }
        ConfigAction::Check { path } => {
            let config = AnalyzerConfig::load_yaml(path)?;
            println!(
                "{} is valid ({} excluded dirs, bracket window {}, threshold {})",
                path.display(),
                config.excluded_dirs.len(),
                config.bracket_window,
                config.link_confidence_threshold
            );
        }
    }
    Ok(ExitCode::SUCCESS)
}

fn display_relative(path: &Path) -> String {
    vaultweave_core::utils::to_posix(path)
}
