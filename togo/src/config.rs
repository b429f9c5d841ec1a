//! Configuration module for Togo.
//!
//! This module resolves where the store files live from environment variables.
//!
//! # Environment Variables
//!
//! | Variable | Required | Default | Description |
//! |----------|----------|---------|-------------|
//! | `TOGO_HOME` | No | home directory | Directory holding both store files |
//! | `TOGO_STORE_FILE` | No | `.togo.store` | File name of the to-do store |
//! | `TOGO_CONFIG_FILE` | No | `.togo.config` | File name of the identity ledger |
//!
//! # Example
//!
//! ```no_run
//! use togo::config::Config;
//!
//! let config = Config::from_env().expect("Failed to load configuration");
//! println!("Store: {}", config.store_path.display());
//! ```

use std::env;
use std::path::{Path, PathBuf};

use directories::BaseDirs;
use thiserror::Error;

/// Default to-do store file name, relative to the home directory.
pub const DEFAULT_STORE_FILE: &str = ".togo.store";

/// Default identity ledger file name, relative to the home directory.
pub const DEFAULT_CONFIG_FILE: &str = ".togo.config";

/// Errors that can occur during configuration parsing.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Environment variable has an invalid value.
    #[error("invalid value for {key}: {message}")]
    InvalidValue { key: String, message: String },

    /// Failed to determine home directory.
    #[error("failed to determine home directory")]
    NoHomeDirectory,
}

/// Locations of the two store files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Path of the to-do store (JSON array of records).
    pub store_path: PathBuf,

    /// Path of the identity ledger (JSON array of identities).
    pub session_path: PathBuf,
}

impl Config {
    /// Builds a configuration with the default file names inside `dir`.
    #[must_use]
    pub fn in_dir(dir: &Path) -> Self {
        Self {
            store_path: dir.join(DEFAULT_STORE_FILE),
            session_path: dir.join(DEFAULT_CONFIG_FILE),
        }
    }

    /// Creates a new `Config` by parsing environment variables.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if:
    /// - `TOGO_HOME` is unset and the home directory cannot be determined
    /// - `TOGO_HOME` is set but empty
    /// - a file name variable is empty or contains a path separator
    pub fn from_env() -> Result<Self, ConfigError> {
        // Optional: TOGO_HOME (default: user home directory)
        let home_dir = match env::var("TOGO_HOME") {
            Ok(val) if val.trim().is_empty() => {
                return Err(ConfigError::InvalidValue {
                    key: "TOGO_HOME".to_string(),
                    message: "directory cannot be empty".to_string(),
                });
            }
            Ok(val) => PathBuf::from(val),
            Err(_) => BaseDirs::new()
                .ok_or(ConfigError::NoHomeDirectory)?
                .home_dir()
                .to_path_buf(),
        };

        let store_file = file_name_from_env("TOGO_STORE_FILE", DEFAULT_STORE_FILE)?;
        let config_file = file_name_from_env("TOGO_CONFIG_FILE", DEFAULT_CONFIG_FILE)?;

        Ok(Self {
            store_path: home_dir.join(store_file),
            session_path: home_dir.join(config_file),
        })
    }
}

/// Reads a bare file name from `key`, falling back to `default`.
fn file_name_from_env(key: &str, default: &str) -> Result<String, ConfigError> {
    let Ok(val) = env::var(key) else {
        return Ok(default.to_string());
    };

    let name = val.trim();
    if name.is_empty() {
        return Err(ConfigError::InvalidValue {
            key: key.to_string(),
            message: "file name cannot be empty".to_string(),
        });
    }
    if name.contains('/') || name.contains('\\') {
        return Err(ConfigError::InvalidValue {
            key: key.to_string(),
            message: format!("expected a file name, got path '{name}'"),
        });
    }

    Ok(name.to_string())
}
