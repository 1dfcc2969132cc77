//! Service interfaces consumed by the preferences page.
//!
//! The page never talks to a concrete backend. It holds these traits behind
//! `Arc<dyn ...>` so the composition root decides what answers the calls:
//! the in-process [`LocalService`](crate::LocalService) in the binary, or a
//! scripted double in tests.

use async_trait::async_trait;
use hourglass_protocol::{ItemId, SchedulerConfig};

use crate::error::Result;

/// Reads and writes the scheduler configuration record.
#[async_trait]
pub trait ConfigService: Send + Sync {
    /// Returns the stored record.
    async fn get_config(&self) -> Result<SchedulerConfig>;

    /// Replaces the stored record.
    async fn set_config(&self, config: SchedulerConfig) -> Result<()>;
}

/// Reads and writes the per-item force-start flag.
#[async_trait]
pub trait ForcedStateService: Send + Sync {
    /// Returns one flag per id, in the same order. Unknown ids are `false`.
    async fn get_forced(&self, ids: &[ItemId]) -> Result<Vec<bool>>;

    /// Sets the flag on every id.
    async fn set_forced(&self, ids: &[ItemId], forced: bool) -> Result<()>;
}

/// Exposes the ids of the currently selected items.
pub trait SelectionProvider: Send + Sync {
    /// Returns the selected ids.
    fn selected_ids(&self) -> Vec<ItemId>;
}

/// A selection fixed at construction time.
///
/// # Examples
///
/// ```
/// use hourglass_service::{SelectionProvider, StaticSelection};
///
/// let selection = StaticSelection::from_strings(["a1", "b2"]);
/// assert_eq!(selection.selected_ids().len(), 2);
/// ```
#[derive(Debug, Clone, Default)]
pub struct StaticSelection {
    ids: Vec<ItemId>,
}

impl StaticSelection {
    /// Creates a selection of the given ids.
    #[must_use]
    pub fn new(ids: Vec<ItemId>) -> Self {
        Self { ids }
    }

    /// Creates a selection from raw id strings.
    pub fn from_strings<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(ids.into_iter().map(ItemId::new).collect())
    }
}

impl SelectionProvider for StaticSelection {
    fn selected_ids(&self) -> Vec<ItemId> {
        self.ids.clone()
    }
}
