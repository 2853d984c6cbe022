//! core::config
//!
//! Configuration schema and loading.
//!
//! # Precedence
//!
//! Configuration values are resolved in this order (later overrides earlier):
//! 1. Default values
//! 2. Global config file
//! 3. CLI flags (applied through [`Config::override_api_base`])
//!
//! # Config Locations
//!
//! Searched in order:
//! 1. `$WORLDWISE_CONFIG` if set
//! 2. `$XDG_CONFIG_HOME/worldwise/config.toml`
//! 3. `~/.worldwise/config.toml` (canonical write location)
//!
//! # Example
//!
//! ```no_run
//! use worldwise::core::config::Config;
//!
//! let config = Config::load().unwrap();
//! println!("API: {}", config.api_base());
//! println!("Ordering: {}", config.ordering());
//! ```

pub mod schema;

pub use schema::{GlobalConfig, SelectionOrdering};

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::remote::geocode::DEFAULT_GEOCODE_URL;
use crate::remote::http::DEFAULT_USER_AGENT;

/// API base used when nothing is configured.
pub const DEFAULT_API_BASE: &str = "http://localhost:8000/";

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV_VAR: &str = "WORLDWISE_CONFIG";

/// Errors from configuration operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config file '{path}': {message}")]
    ParseError { path: PathBuf, message: String },

    #[error("failed to write config file '{path}': {source}")]
    WriteError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid config value: {0}")]
    InvalidValue(String),

    #[error("home directory not found")]
    NoHomeDir,
}

/// Effective configuration.
///
/// Accessor methods apply defaults for anything left unset.
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Values read from the config file
    pub global: GlobalConfig,
    /// Path to the config file (if one was loaded)
    path: Option<PathBuf>,
}

impl Config {
    /// Load configuration from the default locations.
    ///
    /// # Errors
    ///
    /// Returns an error if a config file exists but cannot be read, parsed,
    /// or validated. A missing file is not an error (defaults are used).
    pub fn load() -> Result<Config, ConfigError> {
        match Self::locate() {
            Some(path) => Self::load_from(&path),
            None => Ok(Config::default()),
        }
    }

    /// Load configuration from a specific file.
    pub fn load_from(path: &Path) -> Result<Config, ConfigError> {
        let global = Self::read_config(path)?;
        global.validate()?;
        log::debug!("loaded config from {}", path.display());

        Ok(Config {
            global,
            path: Some(path.to_path_buf()),
        })
    }

    /// Find the first existing config file.
    fn locate() -> Option<PathBuf> {
        // 1. Check $WORLDWISE_CONFIG
        if let Ok(path) = std::env::var(CONFIG_ENV_VAR) {
            let path = PathBuf::from(path);
            if path.exists() {
                return Some(path);
            }
        }

        // 2. Check $XDG_CONFIG_HOME/worldwise/config.toml
        if let Ok(xdg_home) = std::env::var("XDG_CONFIG_HOME") {
            let path = PathBuf::from(xdg_home).join("worldwise/config.toml");
            if path.exists() {
                return Some(path);
            }
        }

        // 3. Check ~/.worldwise/config.toml
        dirs::home_dir()
            .map(|home| home.join(".worldwise/config.toml"))
            .filter(|path| path.exists())
    }

    /// Read and parse a config file.
    fn read_config(path: &Path) -> Result<GlobalConfig, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;

        toml::from_str(&contents).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Get the canonical path for the config file.
    ///
    /// Returns `~/.worldwise/config.toml`. `worldwise config set` writes
    /// here when no config file was loaded.
    pub fn global_config_path() -> Result<PathBuf, ConfigError> {
        let home = dirs::home_dir().ok_or(ConfigError::NoHomeDir)?;
        Ok(home.join(".worldwise/config.toml"))
    }

    /// Write the config file to its canonical location atomically.
    pub fn write_global(config: &GlobalConfig) -> Result<PathBuf, ConfigError> {
        let path = Self::global_config_path()?;
        Self::write_config_atomic(&path, config)?;
        Ok(path)
    }

    /// Write a config file atomically.
    ///
    /// Creates parent directories if needed, writes a temp file next to the
    /// target, then renames it into place.
    pub fn write_config_atomic(path: &Path, config: &GlobalConfig) -> Result<(), ConfigError> {
        config.validate()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| ConfigError::WriteError {
                path: path.to_path_buf(),
                source: e,
            })?;
        }

        let contents =
            toml::to_string_pretty(config).map_err(|e| ConfigError::InvalidValue(e.to_string()))?;

        let temp_path = path.with_extension("toml.tmp");
        let mut file = fs::File::create(&temp_path).map_err(|e| ConfigError::WriteError {
            path: temp_path.clone(),
            source: e,
        })?;

        file.write_all(contents.as_bytes())
            .map_err(|e| ConfigError::WriteError {
                path: temp_path.clone(),
                source: e,
            })?;

        file.sync_all().map_err(|e| ConfigError::WriteError {
            path: temp_path.clone(),
            source: e,
        })?;

        fs::rename(&temp_path, path).map_err(|e| ConfigError::WriteError {
            path: path.to_path_buf(),
            source: e,
        })?;

        Ok(())
    }

    /// Replace the API base with a value from the command line.
    ///
    /// # Errors
    ///
    /// Returns `InvalidValue` if the URL cannot address the collection.
    pub fn override_api_base(&mut self, api_base: &str) -> Result<(), ConfigError> {
        schema::validate_api_base(api_base)?;
        self.global.api_base = Some(api_base.to_string());
        Ok(())
    }

    // =========================================================================
    // Accessor methods with defaults
    // =========================================================================

    /// Path of the loaded config file, if any.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Base URL of the city API.
    ///
    /// Defaults to `http://localhost:8000/`.
    pub fn api_base(&self) -> &str {
        self.global.api_base.as_deref().unwrap_or(DEFAULT_API_BASE)
    }

    /// Ordering of concurrent city fetches.
    ///
    /// Defaults to completion order.
    pub fn ordering(&self) -> SelectionOrdering {
        self.global.ordering.unwrap_or_default()
    }

    /// User-Agent header value.
    pub fn user_agent(&self) -> &str {
        self.global
            .user_agent
            .as_deref()
            .unwrap_or(DEFAULT_USER_AGENT)
    }

    /// Reverse geocoding endpoint.
    pub fn geocode_url(&self) -> &str {
        self.global
            .geocode_url
            .as_deref()
            .unwrap_or(DEFAULT_GEOCODE_URL)
    }
}
