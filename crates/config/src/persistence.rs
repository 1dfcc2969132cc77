//! Configuration file reading and writing.
//!
//! # File Formats
//!
//! - JSON5 (`.json5`): Preferred format with comments and trailing commas
//! - JSON (`.json`): Standard JSON format
//!
//! Files are always written back as pretty-printed JSON, which the JSON5
//! reader accepts as well.
//!
//! # File Locations
//!
//! Configuration is searched in the following order:
//!
//! 1. Local: `./hourglass.json5` or `./hourglass.json`
//! 2. User: `<config_dir>/hourglass/config.json5` or `<config_dir>/hourglass/config.json`

use std::path::{Path, PathBuf};

use crate::error::{ConfigError, Result};

/// Local configuration file names, in priority order.
const CONFIG_FILE_NAMES: &[&str] = &["hourglass.json5", "hourglass.json"];

/// Application directory name under the platform config and data dirs.
pub const APP_DIR: &str = "hourglass";

/// User config file names, in priority order.
const USER_CONFIG_FILE_NAMES: &[&str] = &["config.json5", "config.json"];

/// Finds the first configuration file that exists.
///
/// Returns `None` if no file is present in any searched location.
#[must_use]
pub fn find_config_file() -> Option<PathBuf> {
    let local = CONFIG_FILE_NAMES.iter().map(PathBuf::from);
    let user = dirs::config_dir()
        .map(|dir| dir.join(APP_DIR))
        .into_iter()
        .flat_map(|dir| USER_CONFIG_FILE_NAMES.iter().map(move |name| dir.join(name)));

    local.chain(user).find(|path| path.exists())
}

/// Returns the user configuration directory (`<config_dir>/hourglass`).
///
/// # Errors
///
/// Returns an error if the platform config directory cannot be determined.
pub fn user_config_dir() -> Result<PathBuf> {
    dirs::config_dir()
        .map(|d| d.join(APP_DIR))
        .ok_or(ConfigError::NoBaseDirectory { kind: "config" })
}

/// Returns the default data directory (`<data_dir>/hourglass`).
///
/// The service state files and the log file live here unless configured
/// otherwise.
///
/// # Errors
///
/// Returns an error if the platform data directory cannot be determined.
pub fn default_data_dir() -> Result<PathBuf> {
    dirs::data_dir()
        .map(|d| d.join(APP_DIR))
        .ok_or(ConfigError::NoBaseDirectory { kind: "data" })
}

/// Parses configuration text (JSON5 or JSON).
///
/// # Errors
///
/// Returns an error if the content cannot be parsed.
pub fn parse_config<T: serde::de::DeserializeOwned>(content: &str) -> Result<T> {
    serde_json5::from_str(content).map_err(ConfigError::from)
}

/// Reads and parses a configuration file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or its content cannot be
/// parsed.
pub fn read_config_file<T: serde::de::DeserializeOwned>(path: impl AsRef<Path>) -> Result<T> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadFile {
        path: path.to_path_buf(),
        source: e,
    })?;
    parse_config(&content)
}

/// Reads and parses a configuration file without blocking the runtime.
///
/// # Errors
///
/// Returns an error if the file cannot be read or its content cannot be
/// parsed.
pub async fn read_config_file_async<T: serde::de::DeserializeOwned>(
    path: impl AsRef<Path>,
) -> Result<T> {
    let path = path.as_ref();
    let content = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| ConfigError::ReadFile {
            path: path.to_path_buf(),
            source: e,
        })?;
    parse_config(&content)
}

/// Writes a configuration to a file as pretty JSON.
///
/// Parent directories are created as needed.
///
/// # Errors
///
/// Returns an error if the parent directory cannot be created, the file
/// cannot be written, or the value cannot be serialized.
pub fn write_config_file<T: serde::Serialize>(path: impl AsRef<Path>, config: &T) -> Result<()> {
    let path = path.as_ref();
    let write_err = |e: std::io::Error| ConfigError::WriteFile {
        path: path.to_path_buf(),
        source: e,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty() && !p.exists()) {
        std::fs::create_dir_all(parent).map_err(write_err)?;
    }

    let content = serde_json::to_string_pretty(config)?;
    std::fs::write(path, content).map_err(write_err)
}
