//! Error types for vaultweave.
//!
//! All fallible library operations return [`Result`] with the [`Error`] enum.
//! Structural absence (missing folders, empty vaults) is deliberately *not*
//! represented here: those cases surface as empty values.

use std::io;
use std::path::PathBuf;
use thiserror::Error as ThisError;

/// The core error type for all vaultweave operations.
#[derive(ThisError, Debug)]
pub enum Error {
    /// File system error
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// File not found
    #[error("File not found: {path}")]
    FileNotFound { path: PathBuf },

    /// Invalid file path (outside vault, not UTF-8, etc.)
    #[error("Invalid file path: {reason}")]
    InvalidPath { reason: String },

    /// Parse error
    #[error("Parse error: {reason}")]
    ParseError { reason: String },

    /// Invalid configuration
    #[error("Configuration error: {reason}")]
    ConfigError { reason: String },

    /// Validation error
    #[error("Validation error: {reason}")]
    ValidationError { reason: String },

    /// Note or folder not found
    #[error("Not found: {key}")]
    NotFound { key: String },

    /// An auto-link run would exceed the active safety profile
    #[error("Safety limit exceeded: {reason}")]
    SafetyLimit { reason: String },

    /// Backup creation or restore failed
    #[error("Backup error: {reason}")]
    BackupError { reason: String },

    /// The external semantic oracle failed or answered garbage
    #[error("Oracle error: {reason}")]
    Oracle { reason: String },

    /// Generic unclassified error
    #[error("Error: {0}")]
    Other(String),
}

/// Convenient Result type alias
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create an IO error
    pub fn io(err: io::Error) -> Self {
        Error::Io(err)
    }

    /// Create a file not found error
    pub fn file_not_found(path: impl Into<PathBuf>) -> Self {
        Error::FileNotFound { path: path.into() }
    }

    /// Create an invalid path error
    pub fn invalid_path(reason: impl Into<String>) -> Self {
        Error::InvalidPath {
            reason: reason.into(),
        }
    }

    /// Create a parse error
    pub fn parse_error(reason: impl Into<String>) -> Self {
        Error::ParseError {
            reason: reason.into(),
        }
    }

    /// Create a configuration error
    pub fn config_error(reason: impl Into<String>) -> Self {
        Error::ConfigError {
            reason: reason.into(),
        }
    }

    /// Create a validation error
    pub fn validation_error(reason: impl Into<String>) -> Self {
        Error::ValidationError {
            reason: reason.into(),
        }
    }

    /// Create a not found error
    pub fn not_found(key: impl Into<String>) -> Self {
        Error::NotFound { key: key.into() }
    }

    /// Create a safety limit error
    pub fn safety_limit(reason: impl Into<String>) -> Self {
        Error::SafetyLimit {
            reason: reason.into(),
        }
    }

    /// Create a backup error
    pub fn backup_error(reason: impl Into<String>) -> Self {
        Error::BackupError {
            reason: reason.into(),
        }
    }

    /// Create an oracle error
    pub fn oracle(reason: impl Into<String>) -> Self {
        Error::Oracle {
            reason: reason.into(),
        }
    }

    /// Create a generic error
    pub fn other(msg: impl Into<String>) -> Self {
        Error::Other(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let err = Error::file_not_found("/path/to/file");
        assert!(err.to_string().contains("File not found"));

        let err = Error::safety_limit("too many files: 30 > 25");
        assert!(err.to_string().contains("Safety limit exceeded"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::PermissionDenied, "read-only");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
        assert!(err.to_string().contains("read-only"));
    }
}
