//! Error types for configuration operations.
//!
//! This module defines the error types that can occur during configuration
//! loading, parsing, and validation.

use std::path::PathBuf;

/// Errors that can occur during configuration operations.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read a configuration file.
    #[error("failed to read config file at {path}: {source}")]
    ReadFile {
        /// The path that could not be read.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to write a configuration file.
    #[error("failed to write config file at {path}: {source}")]
    WriteFile {
        /// The path that could not be written.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse JSON5 configuration.
    #[error("failed to parse config: {0}")]
    ParseJson5(#[from] serde_json5::Error),

    /// Failed to serialize configuration to JSON.
    #[error("failed to serialize config: {0}")]
    SerializeJson(#[from] serde_json::Error),

    /// The logging section is unusable.
    #[error("invalid logging config: {reason}")]
    InvalidLogging {
        /// The reason the logging config is invalid.
        reason: String,
    },

    /// Failed to determine a base directory (config or data).
    #[error("could not determine the {kind} directory")]
    NoBaseDirectory {
        /// Which directory was being resolved.
        kind: &'static str,
    },
}

/// A specialized Result type for configuration operations.
pub type Result<T> = std::result::Result<T, ConfigError>;
