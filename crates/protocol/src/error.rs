//! Error types for the hourglass-protocol crate.
//!
//! This module defines the errors that can occur when validating or
//! (de)serializing protocol types.

use thiserror::Error;

/// Errors that can occur during protocol operations.
#[derive(Debug, Error)]
pub enum ProtocolError {
    /// Failed to serialize a protocol type to JSON.
    #[error("failed to serialize to JSON: {0}")]
    SerializationFailed(#[source] serde_json::Error),

    /// Failed to deserialize a protocol type from JSON.
    #[error("failed to deserialize from JSON: {0}")]
    DeserializationFailed(#[source] serde_json::Error),

    /// An integer does not name a schedule state.
    #[error("unknown schedule state value: {0}")]
    UnknownState(i64),

    /// A schedule matrix has the wrong shape or holds unknown values.
    #[error("invalid schedule matrix: {reason}")]
    InvalidMatrix {
        /// What is wrong with the matrix.
        reason: String,
    },
}

/// A specialized Result type for protocol operations.
pub type Result<T> = std::result::Result<T, ProtocolError>;
