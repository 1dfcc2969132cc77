//! Error types for scheduler service operations.
//!
//! This module defines the errors that can occur while loading or storing
//! service state, and the failures a remote-style service call can report.

use std::path::PathBuf;

/// Errors that can occur during service operations.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    /// An I/O error occurred on a state file.
    #[error("I/O error on {path}: {source}")]
    Io {
        /// The file or directory involved.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// A state file holds content that cannot be parsed.
    #[error("failed to parse {path}: {source}")]
    Parse {
        /// The file that could not be parsed.
        path: PathBuf,
        /// The underlying JSON error.
        #[source]
        source: serde_json::Error,
    },

    /// Failed to serialize service state.
    #[error("failed to serialize state: {0}")]
    Serialize(#[from] serde_json::Error),

    /// A record failed protocol validation.
    #[error(transparent)]
    Protocol(#[from] hourglass_protocol::ProtocolError),

    /// The service could not handle the request.
    #[error("service unavailable: {reason}")]
    Unavailable {
        /// Why the request could not be handled.
        reason: String,
    },
}

/// A specialized Result type for service operations.
pub type Result<T> = std::result::Result<T, ServiceError>;
