//! Backups taken before notes are rewritten.
//!
//! Each backup is a directory `backup_<timestamp>` under the backup root. It
//! mirrors the vault-relative paths of the saved notes and carries a
//! `metadata.json` manifest with a SHA-256 hash per file.

use chrono::Local;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use vaultweave_core::utils::relative_to_vault;
use vaultweave_core::{Error, Result, SafetyLevel, compute_hash};

const MANIFEST_FILE: &str = "metadata.json";
const BACKUP_PREFIX: &str = "backup_";

/// One saved file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackupEntry {
    /// Path relative to the vault root
    pub path: PathBuf,
    /// SHA-256 of the saved content, lowercase hex
    pub hash: String,
    pub size: u64,
}

/// Contents of `metadata.json`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackupManifest {
    pub backup_id: String,
    /// RFC 3339 creation time
    pub timestamp: String,
    pub vault_path: PathBuf,
    pub safety_level: SafetyLevel,
    pub files: Vec<BackupEntry>,
}

/// Directory of backups
#[derive(Debug, Clone)]
pub struct BackupStore {
    root: PathBuf,
}

impl BackupStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Copy `files` (absolute paths inside `vault_root`) into a new backup.
    ///
    /// Files that no longer exist are left out of the manifest.
    pub fn create(
        &self,
        vault_root: &Path,
        files: &[PathBuf],
        safety_level: SafetyLevel,
    ) -> Result<BackupManifest> {
        fs::create_dir_all(&self.root).map_err(Error::io)?;
        let now = Local::now();
        let (backup_id, backup_dir) = self.reserve_dir(&now.format("%Y%m%d_%H%M%S_%3f").to_string())?;

        let mut entries = Vec::new();
        for file in files {
            if !file.exists() {
                log::debug!("Not backing up missing file {}", file.display());
                continue;
            }
            let relative = relative_to_vault(vault_root, file)?;
            let content = fs::read(file).map_err(Error::io)?;

            let target = backup_dir.join(&relative);
            if let Some(parent) = target.parent() {
                fs::create_dir_all(parent).map_err(Error::io)?;
            }
            fs::write(&target, &content).map_err(Error::io)?;

            entries.push(BackupEntry {
                path: relative,
                hash: compute_hash(&content),
                size: content.len() as u64,
            });
        }

        let manifest = BackupManifest {
            backup_id,
            timestamp: now.to_rfc3339(),
            vault_path: vault_root.to_path_buf(),
            safety_level,
            files: entries,
        };
        let json = serde_json::to_string_pretty(&manifest).map_err(|e| {
            Error::backup_error(format!("Failed to serialize backup manifest: {}", e))
        })?;
        fs::write(backup_dir.join(MANIFEST_FILE), json).map_err(Error::io)?;

        log::info!(
            "Created backup {} with {} files",
            manifest.backup_id,
            manifest.files.len()
        );
        Ok(manifest)
    }

    /// All readable manifests, newest first
    pub fn list(&self) -> Result<Vec<BackupManifest>> {
        let entries = match fs::read_dir(&self.root) {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(Error::io(e)),
        };

        let mut manifests = Vec::new();
        for entry in entries {
            let entry = entry.map_err(Error::io)?;
            let name = entry.file_name();
            let is_backup = name.to_str().is_some_and(|n| n.starts_with(BACKUP_PREFIX));
            if !is_backup || !entry.path().is_dir() {
                continue;
            }
            match read_manifest(&entry.path()) {
                Ok(manifest) => manifests.push(manifest),
                Err(e) => log::warn!("Ignoring backup {}: {}", entry.path().display(), e),
            }
        }

        manifests.sort_by(|a, b| {
            b.timestamp
                .cmp(&a.timestamp)
                .then_with(|| b.backup_id.cmp(&a.backup_id))
        });
        Ok(manifests)
    }

    /// Load one manifest
    pub fn get(&self, backup_id: &str) -> Result<BackupManifest> {
        let dir = self.backup_dir(backup_id)?;
        if !dir.join(MANIFEST_FILE).exists() {
            return Err(Error::not_found(format!("backup {}", backup_id)));
        }
        read_manifest(&dir)
    }

    /// Copy every file of a backup back into `vault_root`.
    ///
    /// All copies are verified against their recorded hash first; if any
    /// copy is missing or altered nothing is restored. Returns the restored
    /// vault-relative paths.
    pub fn restore(&self, backup_id: &str, vault_root: &Path) -> Result<Vec<PathBuf>> {
        let manifest = self.get(backup_id)?;
        let dir = self.backup_dir(backup_id)?;

        let mut verified = Vec::with_capacity(manifest.files.len());
        for entry in &manifest.files {
            let saved = dir.join(&entry.path);
            let content = fs::read(&saved).map_err(|e| {
                Error::backup_error(format!(
                    "Backup copy {} unreadable: {}",
                    saved.display(),
                    e
                ))
            })?;
            if compute_hash(&content) != entry.hash {
                return Err(Error::backup_error(format!(
                    "Backup copy {} does not match its recorded hash",
                    entry.path.display()
                )));
            }
            verified.push((entry.path.clone(), content));
        }

        let mut restored = Vec::with_capacity(verified.len());
        for (relative, content) in verified {
            let destination = vault_root.join(&relative);
            if let Some(parent) = destination.parent() {
                fs::create_dir_all(parent).map_err(Error::io)?;
            }
            fs::write(&destination, content).map_err(Error::io)?;
            restored.push(relative);
        }

        log::info!("Restored {} files from backup {}", restored.len(), backup_id);
        Ok(restored)
    }

    fn backup_dir(&self, backup_id: &str) -> Result<PathBuf> {
        let valid = backup_id.starts_with(BACKUP_PREFIX)
            && !backup_id.contains(['/', '\\'])
            && !backup_id.contains("..");
        if !valid {
            return Err(Error::invalid_path(format!("invalid backup id '{}'", backup_id)));
        }
        Ok(self.root.join(backup_id))
    }

    /// Create a fresh backup directory, suffixing the id on collision
    fn reserve_dir(&self, stamp: &str) -> Result<(String, PathBuf)> {
        let mut attempt = 0;
        loop {
            let id = if attempt == 0 {
                format!("{}{}", BACKUP_PREFIX, stamp)
            } else {
                format!("{}{}_{}", BACKUP_PREFIX, stamp, attempt)
            };
            let dir = self.root.join(&id);
            match fs::create_dir(&dir) {
                Ok(()) => return Ok((id, dir)),
                Err(e) if e.kind() == ErrorKind::AlreadyExists => attempt += 1,
                Err(e) => return Err(Error::io(e)),
            }
        }
    }
}

fn read_manifest(dir: &Path) -> Result<BackupManifest> {
    let json = fs::read_to_string(dir.join(MANIFEST_FILE)).map_err(Error::io)?;
    serde_json::from_str(&json)
        .map_err(|e| Error::parse_error(format!("Invalid backup manifest: {}", e)))
}
