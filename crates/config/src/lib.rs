#![deny(clippy::pedantic, unsafe_code)]
#![allow(clippy::module_name_repetitions)]

//! Configuration management for cbuild
//!
//! Configuration is layered, lowest precedence first:
//! - Default values (hard-coded, see [`constants`])
//! - Configuration file (`~/.config/cbuild/config.toml`)
//! - CLI flags (applied by the binary)

pub mod constants;
pub mod core;

pub use core::{CMakeConfig, GeneralConfig};

use cbuild_errors::{ConfigError, Error};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::debug;

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub general: GeneralConfig,

    #[serde(default)]
    pub cmake: CMakeConfig,
}

impl Config {
    /// Get the default config file path
    ///
    /// # Errors
    ///
    /// Returns an error if the system config directory cannot be determined.
    pub fn default_path() -> Result<PathBuf, Error> {
        let config_dir = dirs::config_dir().ok_or_else(|| ConfigError::NotFound {
            path: "config directory".to_string(),
        })?;
        Ok(config_dir
            .join(constants::APP_DIR)
            .join(constants::CONFIG_FILE))
    }

    /// Load configuration from file
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::NotFound` if the file does not exist, an I/O error
    /// if it exists but cannot be read, and `ConfigError::ParseError` if the
    /// contents are not valid TOML.
    pub async fn load_from_file(path: &Path) -> Result<Self, Error> {
        let contents = fs::read_to_string(path).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                ConfigError::NotFound {
                    path: path.display().to_string(),
                }
                .into()
            } else {
                Error::io_with_path(&e, path)
            }
        })?;

        debug!(path = %path.display(), "loaded config file");

        Self::from_toml_str(&contents).map_err(|message| {
            ConfigError::ParseError {
                path: path.display().to_string(),
                message,
            }
            .into()
        })
    }

    /// Parse configuration from a TOML string
    ///
    /// # Errors
    ///
    /// Returns the parser's message if the string is not valid configuration.
    pub fn from_toml_str(contents: &str) -> Result<Self, String> {
        toml::from_str(contents).map_err(|e| e.to_string())
    }

    /// Load configuration with fallback to defaults
    ///
    /// A missing default file is not an error. When the config directory
    /// itself cannot be determined, defaults are used.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration file exists but cannot be read
    /// or contains invalid TOML syntax.
    pub async fn load() -> Result<Self, Error> {
        let Ok(config_path) = Self::default_path() else {
            return Ok(Self::default());
        };

        if config_path.exists() {
            Self::load_from_file(&config_path).await
        } else {
            Ok(Self::default())
        }
    }

    /// Load configuration from an optional path or use default
    ///
    /// If path is provided, loads from that file and a missing file is an
    /// error. If path is None, uses the default loading behavior.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file cannot be read or parsed
    pub async fn load_or_default(path: Option<&Path>) -> Result<Self, Error> {
        match path {
            Some(config_path) => Self::load_from_file(config_path).await,
            None => Self::load().await,
        }
    }
}

/// Directory for debug log files
///
/// Prefers the platform state dir, then the local data dir, then the
/// system temp dir.
#[must_use]
pub fn logs_dir() -> PathBuf {
    dirs::state_dir()
        .or_else(dirs::data_local_dir)
        .unwrap_or_else(std::env::temp_dir)
        .join(constants::APP_DIR)
        .join(constants::LOGS_SUBDIR)
}
