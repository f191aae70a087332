//! Configuration file loading for the command-line front end.
//!
//! Settings come from `gambit.toml` in the current directory, or from the
//! file named with `--config`.

use gambit_core::FenError;
use gambit_engine::{DrawRules, Position};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur when loading or parsing configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("Failed to read config file {path}: {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },
    /// Failed to parse the configuration file as valid TOML.
    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),
    /// The configured starting position is not a valid state string.
    #[error("Invalid start_fen: {0}")]
    InvalidStartFen(#[from] FenError),
}

/// Settings shared by every subcommand.
#[derive(Debug, Deserialize, Serialize, Default, Clone, PartialEq)]
pub struct CliConfig {
    /// Starting position used when `--fen` is not given.
    /// Defaults to the standard initial setup.
    #[serde(default)]
    pub start_fen: Option<String>,
    /// Draw thresholds applied to game status.
    #[serde(default)]
    pub rules: DrawRules,
}

impl CliConfig {
    /// Loads the configuration.
    ///
    /// An explicit `path` must exist. Without one, the default file is read
    /// when present and defaults are used otherwise.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ReadError`] if the file cannot be read,
    /// [`ConfigError::ParseError`] if it contains invalid TOML, or
    /// [`ConfigError::InvalidStartFen`] if its starting position is malformed.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let config_path = match path {
            Some(path) => path.to_path_buf(),
            None if Self::config_path().exists() => Self::config_path(),
            None => return Ok(Self::default()),
        };
        let content =
            std::fs::read_to_string(&config_path).map_err(|source| ConfigError::ReadError {
                path: config_path.clone(),
                source,
            })?;
        let config = Self::parse(&content)?;
        tracing::debug!(path = %config_path.display(), "loaded configuration");
        Ok(config)
    }

    /// Parses configuration text and validates the starting position.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        let config: CliConfig = toml::from_str(content)?;
        if let Some(fen) = &config.start_fen {
            Position::from_fen(fen)?;
        }
        Ok(config)
    }

    /// Returns the path to the default configuration file.
    pub fn config_path() -> PathBuf {
        PathBuf::from("gambit.toml")
    }
}
