//! Loading [`AppConfig`] from disk.

pub use pasture_core::config::*;

use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    Validation(String),
}

/// Reads, parses and validates a TOML config file.
pub fn load_from_path(path: impl AsRef<Path>) -> Result<AppConfig, ConfigError> {
    let content = std::fs::read_to_string(path.as_ref())?;
    let config: AppConfig = toml::from_str(&content)?;
    config
        .validate()
        .map_err(|e| ConfigError::Validation(format!("{e:#}")))?;
    Ok(config)
}

/// Like [`load_from_path`], but a missing file yields the defaults.
pub fn load_or_default(path: impl AsRef<Path>) -> Result<AppConfig, ConfigError> {
    let path = path.as_ref();
    if !path.exists() {
        tracing::warn!(path = %path.display(), "Config file not found, using defaults");
        return Ok(AppConfig::default());
    }
    load_from_path(path)
}
