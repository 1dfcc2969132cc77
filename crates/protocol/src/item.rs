//! Identifiers for the items a schedule controls.

use serde::{Deserialize, Serialize};

/// Opaque identifier of a scheduled item (for example a torrent hash).
///
/// # Examples
///
/// ```
/// use hourglass_protocol::ItemId;
///
/// let id = ItemId::from("a1b2c3");
/// assert_eq!(id.as_str(), "a1b2c3");
/// assert_eq!(id.to_string(), "a1b2c3");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(String);

impl ItemId {
    /// Creates an identifier.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ItemId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for ItemId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for ItemId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
