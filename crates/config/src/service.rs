//! Service section of the configuration.
//!
//! This module provides the [`ServiceConfig`] type which tells the
//! in-process scheduler service where to keep its files.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::persistence::default_data_dir;

/// Configuration for the file-backed scheduler service.
///
/// # Examples
///
/// ```
/// use hourglass_config::ServiceConfig;
///
/// let config = ServiceConfig::with_state_dir("/tmp/hourglass");
/// assert_eq!(
///     config.resolve_state_dir().unwrap(),
///     std::path::PathBuf::from("/tmp/hourglass"),
/// );
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceConfig {
    /// Directory holding `scheduler.json` and `forced.json`.
    ///
    /// Defaults to `<data_dir>/hourglass` when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state_dir: Option<PathBuf>,
}

impl ServiceConfig {
    /// Creates a service configuration pointing at a specific directory.
    #[must_use]
    pub fn with_state_dir(dir: impl Into<PathBuf>) -> Self {
        Self {
            state_dir: Some(dir.into()),
        }
    }

    /// Returns the directory the service should use.
    ///
    /// # Errors
    ///
    /// Returns an error if no directory is configured and the platform data
    /// directory cannot be determined.
    pub fn resolve_state_dir(&self) -> Result<PathBuf> {
        match &self.state_dir {
            Some(dir) => Ok(dir.clone()),
            None => default_data_dir(),
        }
    }
}
