//! Safety profiles for automatic link insertion
//!
//! Each profile caps how much a single auto-link run may change:
//! - Paranoid: a handful of files, for trying things out
//! - Conservative: the default
//! - Balanced: medium-sized folders
//! - Aggressive: large folders, reviewed afterwards

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Limits enforced before any file is modified
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SafetyLimits {
    pub max_files: usize,
    pub max_changes: usize,
}

/// Profile selector for auto-link runs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SafetyLevel {
    Paranoid,
    #[default]
    Conservative,
    Balanced,
    Aggressive,
}

impl SafetyLevel {
    /// Limits for this profile
    pub fn limits(self) -> SafetyLimits {
        let (max_files, max_changes) = match self {
            Self::Paranoid => (5, 25),
            Self::Conservative => (25, 100),
            Self::Balanced => (50, 250),
            Self::Aggressive => (100, 500),
        };
        SafetyLimits {
            max_files,
            max_changes,
        }
    }

    /// Reject a planned run that touches too many files or inserts too many links
    pub fn check(self, files: usize, changes: usize) -> Result<()> {
        let limits = self.limits();
        if files > limits.max_files {
            return Err(Error::safety_limit(format!(
                "too many files for {} mode: {} > {}",
                self, files, limits.max_files
            )));
        }
        if changes > limits.max_changes {
            return Err(Error::safety_limit(format!(
                "too many changes for {} mode: {} > {}",
                self, changes, limits.max_changes
            )));
        }
        Ok(())
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Paranoid => "paranoid",
            Self::Conservative => "conservative",
            Self::Balanced => "balanced",
            Self::Aggressive => "aggressive",
        }
    }
}

impl fmt::Display for SafetyLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SafetyLevel {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "paranoid" => Ok(Self::Paranoid),
            "conservative" => Ok(Self::Conservative),
            "balanced" => Ok(Self::Balanced),
            "aggressive" => Ok(Self::Aggressive),
            other => Err(Error::config_error(format!(
                "unknown safety level '{}' (expected paranoid, conservative, balanced or aggressive)",
                other
            ))),
        }
    }
}
