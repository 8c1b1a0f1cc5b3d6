//! Analyzer configuration.
//!
//! Follows a builder pattern for programmatic construction and serde (YAML)
//! for file-based configuration. Every field has a default so partial config
//! files are valid.

use crate::error::{Error, Result};
use crate::topics::TopicDictionary;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

/// Characters inspected on each side of a mention when deciding whether it
/// already sits inside `[[...]]`.
pub const DEFAULT_BRACKET_WINDOW: usize = 10;

/// Configuration shared by parsing, analysis, linking and reporting
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyzerConfig {
    /// Note file extension without the dot
    pub note_extension: String,
    /// Directory names never descended into during discovery
    pub excluded_dirs: BTreeSet<String>,
    /// Keyword dictionary for topic inference
    pub topics: TopicDictionary,
    /// Lookaround window for the "already bracketed" heuristic
    pub bracket_window: usize,
    /// Maximum link suggestions returned per note
    pub max_link_suggestions: usize,
    /// Minimum Jaccard overlap for related-by-topic suggestions
    pub topic_overlap_threshold: f64,
    /// Number of topics kept in each folder summary
    pub top_topics: usize,
    /// Default confidence threshold for automatic link insertion
    pub link_confidence_threshold: f64,
    /// Source notes listed in the report's cross-folder section
    pub report_max_cross_sources: usize,
    /// Targets listed per source note in the report
    pub report_max_cross_targets: usize,
    /// Where auto-link backups are stored
    pub backup_dir: PathBuf,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            note_extension: "md".to_string(),
            excluded_dirs: [".obsidian", ".git", ".vscode", "__pycache__", "node_modules"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            topics: TopicDictionary::default(),
            bracket_window: DEFAULT_BRACKET_WINDOW,
            max_link_suggestions: 10,
            topic_overlap_threshold: 0.3,
            top_topics: 5,
            link_confidence_threshold: 0.7,
            report_max_cross_sources: 10,
            report_max_cross_targets: 3,
            backup_dir: PathBuf::from(".vaultweave_backups"),
        }
    }
}

impl AnalyzerConfig {
    /// Create the default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a builder from the defaults
    pub fn builder() -> AnalyzerConfigBuilder {
        AnalyzerConfigBuilder::new()
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        let ext = self.note_extension.trim();
        if ext.is_empty() || ext.starts_with('.') {
            return Err(Error::validation_error(
                "note_extension must be non-empty and given without a leading dot",
            ));
        }

        if self.bracket_window == 0 {
            return Err(Error::validation_error("bracket_window must be at least 1"));
        }

        for (name, value) in [
            ("topic_overlap_threshold", self.topic_overlap_threshold),
            ("link_confidence_threshold", self.link_confidence_threshold),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(Error::validation_error(format!(
                    "{} must be within [0, 1], got {}",
                    name, value
                )));
            }
        }

        Ok(())
    }

    /// Whether `path` carries the configured note extension
    pub fn is_note_file(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e == self.note_extension)
    }

    /// Whether a directory with this name is skipped during discovery
    pub fn is_excluded_dir(&self, name: &str) -> bool {
        self.excluded_dirs.contains(name)
    }

    /// Save configuration as YAML
    pub fn save_yaml(&self, path: &Path) -> Result<()> {
        let yaml = serde_yaml::to_string(self)
            .map_err(|e| Error::config_error(format!("Failed to serialize config: {}", e)))?;

        std::fs::write(path, yaml).map_err(|e| {
            Error::config_error(format!(
                "Failed to save config to {}: {}",
                path.display(),
                e
            ))
        })
    }

    /// Load and validate configuration from a YAML file
    pub fn load_yaml(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(Error::file_not_found(path));
        }

        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::config_error(format!(
                "Failed to load config from {}: {}",
                path.display(),
                e
            ))
        })?;

        let config: Self = serde_yaml::from_str(&content)
            .map_err(|e| Error::parse_error(format!("Invalid configuration: {}", e)))?;
        config.validate()?;
        Ok(config)
    }
}

/// Builder for AnalyzerConfig
pub struct AnalyzerConfigBuilder {
    config: AnalyzerConfig,
}

impl AnalyzerConfigBuilder {
    /// Create a new builder from the defaults
    pub fn new() -> Self {
        Self {
            config: AnalyzerConfig::default(),
        }
    }

    pub fn note_extension(mut self, ext: impl Into<String>) -> Self {
        self.config.note_extension = ext.into();
        self
    }

    /// Add a directory name to skip during discovery
    pub fn exclude_dir(mut self, name: impl Into<String>) -> Self {
        self.config.excluded_dirs.insert(name.into());
        self
    }

    pub fn topics(mut self, topics: TopicDictionary) -> Self {
        self.config.topics = topics;
        self
    }

    pub fn bracket_window(mut self, window: usize) -> Self {
        self.config.bracket_window = window;
        self
    }

    pub fn max_link_suggestions(mut self, max: usize) -> Self {
        self.config.max_link_suggestions = max;
        self
    }

    pub fn link_confidence_threshold(mut self, threshold: f64) -> Self {
        self.config.link_confidence_threshold = threshold;
        self
    }

    pub fn backup_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config.backup_dir = dir.into();
        self
    }

    /// Build and validate
    pub fn build(self) -> Result<AnalyzerConfig> {
        self.config.validate()?;
        Ok(self.config)
    }
}

impl Default for AnalyzerConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
