//! Core configuration struct and loading logic.
//!
//! This module provides the main [`Config`] struct which aggregates all
//! configuration options for the hourglass application.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::logging::LoggingConfig;
use crate::persistence::{
    find_config_file, read_config_file, read_config_file_async, write_config_file,
};
use crate::service::ServiceConfig;

/// Environment variable overriding [`ServiceConfig::state_dir`].
pub const ENV_STATE_DIR: &str = "HOURGLASS_STATE_DIR";

/// Environment variable overriding [`LoggingConfig::filter`].
pub const ENV_LOG_FILTER: &str = "HOURGLASS_LOG";

/// The main configuration struct for the hourglass application.
///
/// # Examples
///
/// ```
/// use hourglass_config::{Config, ServiceConfig};
///
/// // Create a default config
/// let config = Config::default();
/// assert!(config.selection.is_empty());
///
/// // Create a custom config
/// let config = Config {
///     service: ServiceConfig::with_state_dir("/tmp/hourglass"),
///     selection: vec!["a1b2".to_string()],
///     ..Default::default()
/// };
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Where the scheduler service keeps its state.
    #[serde(default)]
    pub service: ServiceConfig,

    /// Ids of the items the force-start toggle acts on.
    #[serde(default)]
    pub selection: Vec<String>,

    /// Log output settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Creates a new default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from the default file locations.
    ///
    /// Searches for configuration files in the following order:
    ///
    /// 1. Local: `./hourglass.json5` or `./hourglass.json`
    /// 2. User: `<config_dir>/hourglass/config.json5` or `<config_dir>/hourglass/config.json`
    ///
    /// If no configuration file is found, returns a default configuration.
    /// Environment overrides (`HOURGLASS_STATE_DIR`, `HOURGLASS_LOG`) are
    /// applied on top.
    ///
    /// # Errors
    ///
    /// Returns an error if a configuration file is found but cannot be
    /// read or parsed, or if the result fails validation.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use hourglass_config::Config;
    ///
    /// # async fn example() -> hourglass_config::Result<()> {
    /// let config = Config::load().await?;
    /// println!("Log filter: {}", config.logging.filter);
    /// # Ok(())
    /// # }
    /// ```
    pub async fn load() -> Result<Self> {
        let mut config = match find_config_file() {
            Some(path) => read_config_file_async(&path).await?,
            None => Self::default(),
        };
        config.apply_env_overrides(|key| std::env::var(key).ok());
        config.validate()?;
        Ok(config)
    }

    /// Loads configuration from a specific file.
    ///
    /// No environment overrides are applied.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, or if the
    /// result fails validation.
    pub fn load_from(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let config: Config = read_config_file(path)?;
        config.validate()?;
        Ok(config)
    }

    /// Saves the configuration to a file as pretty JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub fn save_to(&self, path: impl AsRef<std::path::Path>) -> Result<()> {
        write_config_file(path, self)
    }

    /// Applies environment overrides using the given lookup.
    ///
    /// Empty values are ignored.
    ///
    /// # Examples
    ///
    /// ```
    /// use hourglass_config::Config;
    ///
    /// let mut config = Config::default();
    /// config.apply_env_overrides(|key| match key {
    ///     "HOURGLASS_LOG" => Some("hourglass=debug".to_string()),
    ///     _ => None,
    /// });
    /// assert_eq!(config.logging.filter, "hourglass=debug");
    /// ```
    pub fn apply_env_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(dir) = lookup(ENV_STATE_DIR).filter(|v| !v.is_empty()) {
            self.service.state_dir = Some(PathBuf::from(dir));
        }
        if let Some(filter) = lookup(ENV_LOG_FILTER).filter(|v| !v.is_empty()) {
            self.logging.filter = filter;
        }
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if validation fails.
    pub fn validate(&self) -> Result<()> {
        self.logging.validate()?;
        Ok(())
    }

    /// Returns whether any items are selected.
    #[must_use]
    pub fn has_selection(&self) -> bool {
        !self.selection.is_empty()
    }
}
