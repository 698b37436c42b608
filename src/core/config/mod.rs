//! core::config
//!
//! Configuration schema and loading.
//!
//! # Precedence
//!
//! Values are resolved in this order (later overrides earlier):
//! 1. Built-in defaults
//! 2. Config file
//! 3. CLI flags (applied by [`crate::cli`], not here)
//!
//! # Config Locations
//!
//! Searched in order, first existing file wins:
//! 1. `$QALC_BTC_CONFIG` if set
//! 2. `$XDG_CONFIG_HOME/qalc-btc/config.toml`
//! 3. `~/.qalc-btc/config.toml`
//!
//! A missing config file is not an error.
//!
//! # Example
//!
//! ```no_run
//! use qalc_btc::core::config::Config;
//!
//! let config = Config::load().unwrap();
//! let settings = config.settings().unwrap();
//! println!("Units file: {}", settings.units_file.display());
//! println!("Average endpoint: {}", settings.endpoints.average);
//! ```

pub mod schema;

pub use schema::{EndpointsConfig, FileConfig};

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use thiserror::Error;

use crate::core::paths;
use crate::rates::Endpoints;

/// Default HTTP request timeout.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Errors from configuration operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file '{path}'")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config file '{path}': {message}")]
    ParseError { path: PathBuf, message: String },

    #[error("invalid config value: {0}")]
    InvalidValue(String),

    #[error("home directory not found")]
    NoHomeDir,
}

/// Loaded configuration file, if any.
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Parsed file contents (defaults when no file was found).
    pub file: FileConfig,
    /// Path the config was loaded from.
    path: Option<PathBuf>,
}

impl Config {
    /// Load configuration from the default locations.
    ///
    /// # Errors
    ///
    /// Returns an error if a config file exists but cannot be read, parsed
    /// or validated.
    pub fn load() -> Result<Self, ConfigError> {
        let home = dirs::home_dir();
        let candidates = paths::config_candidates(|key| std::env::var(key).ok(), home.as_deref());

        match candidates.into_iter().find(|path| path.exists()) {
            Some(path) => Self::from_path(&path),
            None => Ok(Self::default()),
        }
    }

    /// Load configuration from an explicit file.
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;

        let file: FileConfig = toml::from_str(&contents).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        file.validate()?;

        Ok(Self {
            file,
            path: Some(path.to_path_buf()),
        })
    }

    /// Get the path the config was loaded from.
    pub fn loaded_from(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Resolve settings against the current user's home directory.
    pub fn settings(&self) -> Result<Settings, ConfigError> {
        Settings::resolve(&self.file, dirs::home_dir().as_deref())
    }
}

/// Fully resolved run settings handed to the engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Units file to read and rewrite.
    pub units_file: PathBuf,
    /// Built-in or configured rate endpoints.
    pub endpoints: Endpoints,
    /// HTTP request timeout.
    pub timeout: Duration,
}

impl Settings {
    /// Apply a config file over the built-in defaults.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::NoHomeDir` if the units file path needs a home
    /// directory and none is known.
    pub fn resolve(file: &FileConfig, home: Option<&Path>) -> Result<Self, ConfigError> {
        let units_file = match &file.units_file {
            Some(path) => paths::expand_tilde_with(path, home.map(Path::to_path_buf))
                .ok_or(ConfigError::NoHomeDir)?,
            None => paths::default_units_file(home.ok_or(ConfigError::NoHomeDir)?),
        };

        let mut endpoints = Endpoints::default();
        if let Some(configured) = &file.endpoints {
            if let Some(average) = &configured.average {
                endpoints.average = average.clone();
            }
            if let Some(last) = &configured.last {
                endpoints.last = last.clone();
            }
        }

        let timeout = Duration::from_secs(file.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS));

        Ok(Self {
            units_file,
            endpoints,
            timeout,
        })
    }
}
