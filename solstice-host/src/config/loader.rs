//! Configuration loading
//!
//! Reads an override file if one is given, otherwise the embedded default.
//! Any failure falls back to the next source so the simulator always starts.

use std::path::{Path, PathBuf};
use std::{env, fs};

use log::{info, warn};
use thiserror::Error;

use super::HostConfig;

/// Embedded default configuration (edit face.toml and rebuild to customize)
pub const EMBEDDED_CONFIG: &str = include_str!("../../face.toml");

/// Environment variable naming an override file
pub const CONFIG_ENV: &str = "SOLSTICE_CONFIG";

/// Configuration loading errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Override file could not be read
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// TOML syntax or schema error
    #[error("invalid configuration: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Parse a configuration document
pub fn parse_config(text: &str) -> Result<HostConfig, ConfigError> {
    Ok(toml::from_str(text)?)
}

/// Read and parse a configuration file
pub fn read_config(path: &Path) -> Result<HostConfig, ConfigError> {
    let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_config(&text)
}

/// Override path from the first argument, or from `SOLSTICE_CONFIG`
pub fn config_path(arg: Option<String>) -> Option<PathBuf> {
    arg.or_else(|| env::var(CONFIG_ENV).ok())
        .filter(|p| !p.is_empty())
        .map(PathBuf::from)
}

/// Load configuration, falling back to the embedded default and then to
/// built-in defaults
pub fn load_config(path: Option<&Path>) -> HostConfig {
    if let Some(path) = path {
        match read_config(path) {
            Ok(config) => {
                info!("Loaded configuration from {}", path.display());
                return config;
            }
            Err(e) => warn!("{}; using embedded configuration", e),
        }
    }

    match parse_config(EMBEDDED_CONFIG) {
        Ok(config) => config,
        Err(e) => {
            warn!("Embedded configuration rejected ({}); using defaults", e);
            HostConfig::default()
        }
    }
}
