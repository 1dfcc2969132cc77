//! Logging section of the configuration.
//!
//! The terminal belongs to the TUI, so log output goes to a file. The
//! [`LoggingConfig`] type names that file and the default filter directive
//! used when `RUST_LOG` is not set.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Result};

/// Default filter directive.
pub const DEFAULT_FILTER: &str = "hourglass=info";

/// Default log file name, relative to the state directory.
pub const DEFAULT_LOG_FILE: &str = "hourglass.log";

/// Configuration for log output.
///
/// # Examples
///
/// ```
/// use hourglass_config::LoggingConfig;
///
/// let config = LoggingConfig::default();
/// assert_eq!(config.filter, "hourglass=info");
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Filter directive in `tracing-subscriber` `EnvFilter` syntax.
    #[serde(default = "default_filter")]
    pub filter: String,

    /// Log file path. Relative paths are resolved against the state
    /// directory.
    #[serde(default = "default_file")]
    pub file: PathBuf,
}

fn default_filter() -> String {
    DEFAULT_FILTER.to_string()
}

fn default_file() -> PathBuf {
    PathBuf::from(DEFAULT_LOG_FILE)
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: default_filter(),
            file: default_file(),
        }
    }
}

impl LoggingConfig {
    /// Returns the log file path, resolved against `base` when relative.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::path::Path;
    /// use hourglass_config::LoggingConfig;
    ///
    /// let config = LoggingConfig::default();
    /// assert_eq!(
    ///     config.resolve_file(Path::new("/var/lib/hourglass")),
    ///     Path::new("/var/lib/hourglass/hourglass.log"),
    /// );
    /// ```
    #[must_use]
    pub fn resolve_file(&self, base: &Path) -> PathBuf {
        if self.file.is_absolute() {
            self.file.clone()
        } else {
            base.join(&self.file)
        }
    }

    /// Validates the logging configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the filter or the file name is empty.
    pub fn validate(&self) -> Result<()> {
        if self.filter.trim().is_empty() {
            return Err(ConfigError::InvalidLogging {
                reason: "filter is empty".to_string(),
            });
        }
        if self.file.as_os_str().is_empty() {
            return Err(ConfigError::InvalidLogging {
                reason: "file is empty".to_string(),
            });
        }
        Ok(())
    }
}
