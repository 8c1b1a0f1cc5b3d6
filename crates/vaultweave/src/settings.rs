//! Layered settings for the command line.
//!
//! Precedence, lowest first: built-in defaults, the optional YAML file given
//! with `--config`, then `VAULTWEAVE__*` environment variables
//! (`VAULTWEAVE__BRACKET_WINDOW=12`, `VAULTWEAVE__EXCLUDED_DIRS=.git,.trash`).

use config::{Config, Environment, File, FileFormat};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use vaultweave_core::{AnalyzerConfig, Error, Result};

pub const ENV_PREFIX: &str = "VAULTWEAVE";

/// Load settings from the process environment and an optional file
pub fn load_settings(config_file: Option<&Path>) -> Result<AnalyzerConfig> {
    load_settings_with_env(config_file, None)
}

/// Like [`load_settings`], reading variables from `env` instead of the
/// process environment when given
pub fn load_settings_with_env(
    config_file: Option<&Path>,
    env: Option<HashMap<String, String>>,
) -> Result<AnalyzerConfig> {
    let mut builder = Config::builder();

    if let Some(path) = config_file {
        if !path.exists() {
            return Err(Error::file_not_found(path));
        }
        builder = builder.add_source(File::from(path).format(FileFormat::Yaml));
    }

    builder = builder.add_source(
        Environment::with_prefix(ENV_PREFIX)
            .separator("__")
            .try_parsing(true)
            .list_separator(",")
            .with_list_parse_key("excluded_dirs")
            .source(env),
    );

    let config: AnalyzerConfig = builder
        .build()
        .and_then(|c| c.try_deserialize())
        .map_err(|e| Error::config_error(format!("Failed to load settings: {}", e)))?;
    config.validate()?;

    log::debug!(
        "Settings loaded (file: {})",
        config_file.map_or_else(|| "none".to_string(), |p| p.display().to_string())
    );
    Ok(config)
}

/// Expand `~` and environment variables in a user-supplied path
pub fn expand_path(raw: &str) -> Result<PathBuf> {
    let expanded = shellexpand::full(raw)
        .map_err(|e| Error::invalid_path(format!("Failed to expand path: {}", e)))?;
    Ok(PathBuf::from(expanded.as_ref()))
}
