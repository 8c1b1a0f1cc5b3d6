//! Shared utilities for operations across vaultweave crates.
//!
//! Provides helpers for:
//! - Serialization with consistent error handling
//! - CSV building
//! - Content hashing
//! - Vault-relative path handling
//! - Snippet truncation

use crate::{Error, Result};
use sha2::{Digest, Sha256};
use std::path::{Component, Path, PathBuf};

/// Generic JSON serialization with consistent error handling
pub fn to_json_string<T: serde::Serialize + ?Sized>(data: &T, context: &str) -> Result<String> {
    serde_json::to_string_pretty(data).map_err(|e| {
        Error::config_error(format!("Failed to serialize {} as JSON: {}", context, e))
    })
}

/// CSV builder with a fluent API.
///
/// Fields containing commas, quotes or newlines are quoted.
pub struct CsvBuilder {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl CsvBuilder {
    /// Create a new CSV with headers
    pub fn new(headers: &[&str]) -> Self {
        Self {
            headers: headers.iter().map(|s| s.to_string()).collect(),
            rows: Vec::new(),
        }
    }

    /// Add a row of owned values
    pub fn add_row(mut self, values: Vec<String>) -> Self {
        self.rows.push(values);
        self
    }

    /// Build the CSV string
    pub fn build(self) -> String {
        let mut csv = join_csv_row(&self.headers);
        csv.push('\n');
        for row in &self.rows {
            csv.push_str(&join_csv_row(row));
            csv.push('\n');
        }
        csv
    }
}

fn join_csv_row(values: &[String]) -> String {
    values
        .iter()
        .map(|v| escape_csv_field(v))
        .collect::<Vec<_>>()
        .join(",")
}

fn escape_csv_field(value: &str) -> String {
    if value.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

/// SHA-256 of the content as lowercase hex
pub fn compute_hash(content: &[u8]) -> String {
    format!("{:x}", Sha256::digest(content))
}

/// Path of `path` relative to `vault_root`, rejecting anything outside the vault.
pub fn relative_to_vault(vault_root: &Path, path: &Path) -> Result<PathBuf> {
    let relative = path.strip_prefix(vault_root).map_err(|_| {
        Error::invalid_path(format!(
            "{} is not inside vault {}",
            path.display(),
            vault_root.display()
        ))
    })?;

    if relative
        .components()
        .any(|c| !matches!(c, Component::Normal(_)))
    {
        return Err(Error::invalid_path(format!(
            "{} escapes the vault root",
            path.display()
        )));
    }

    Ok(relative.to_path_buf())
}

/// `/`-joined form of a relative path, independent of the platform separator
pub fn to_posix(relative: &Path) -> String {
    relative
        .components()
        .filter_map(|c| match c {
            Component::Normal(part) => part.to_str(),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}

/// Cut `text` to at most `max_chars` characters, appending `...` when cut
pub fn truncate_chars(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => format!("{}...", &text[..idx]),
        None => text.to_string(),
    }
}
