//! Per-item force-start bookkeeping.
//!
//! Every known item carries two flags: `forced` (set by the user through the
//! force-start toggle) and `paused` (set when the scheduler itself paused the
//! item). The tracker turns a schedule state into the pause/resume actions
//! the session should perform, and never touches an item the user paused.

use std::collections::BTreeMap;

use hourglass_protocol::{ItemId, ScheduleState};
use serde::{Deserialize, Serialize};

/// Flags stored for one item.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemFlags {
    /// The item keeps running while the schedule is paused.
    #[serde(default)]
    pub forced: bool,
    /// The scheduler paused this item.
    #[serde(default)]
    pub paused: bool,
}

/// What the session should do with an item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemAction {
    /// Pause the item.
    Pause(ItemId),
    /// Resume the item.
    Resume(ItemId),
}

/// Flags for every known item, keyed by id.
///
/// # Examples
///
/// ```
/// use hourglass_protocol::{ItemId, ScheduleState};
/// use hourglass_service::tracker::{ItemAction, ItemTracker};
///
/// let mut tracker = ItemTracker::default();
/// let id = ItemId::from("a1");
/// tracker.touch(&id);
///
/// let actions = tracker.apply(ScheduleState::Paused, [&id], |_| false);
/// assert_eq!(actions, vec![ItemAction::Pause(id.clone())]);
///
/// let actions = tracker.apply(ScheduleState::Normal, [&id], |_| false);
/// assert_eq!(actions, vec![ItemAction::Resume(id)]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemTracker {
    items: BTreeMap<ItemId, ItemFlags>,
}

impl ItemTracker {
    /// Returns the number of known items.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns `true` if no item is known.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns the ids of all known items.
    pub fn ids(&self) -> impl Iterator<Item = &ItemId> {
        self.items.keys()
    }

    /// Returns the flags of an item, if known.
    #[must_use]
    pub fn flags(&self, id: &ItemId) -> Option<ItemFlags> {
        self.items.get(id).copied()
    }

    /// Returns the forced flag of an item; unknown items are not forced.
    #[must_use]
    pub fn is_forced(&self, id: &ItemId) -> bool {
        self.items.get(id).is_some_and(|flags| flags.forced)
    }

    /// Registers an item with cleared flags if it is not known yet.
    pub fn touch(&mut self, id: &ItemId) -> &mut ItemFlags {
        self.items.entry(id.clone()).or_default()
    }

    /// Sets the forced flag on every id, registering unknown ones.
    pub fn set_forced<'a>(&mut self, ids: impl IntoIterator<Item = &'a ItemId>, forced: bool) {
        for id in ids {
            self.touch(id).forced = forced;
        }
    }

    /// Computes the actions for `ids` under `state` and updates the flags.
    ///
    /// `user_paused` reports whether an item is currently paused outside
    /// the scheduler's control; such items are never flagged.
    pub fn apply<'a>(
        &mut self,
        state: ScheduleState,
        ids: impl IntoIterator<Item = &'a ItemId>,
        user_paused: impl Fn(&ItemId) -> bool,
    ) -> Vec<ItemAction> {
        let mut actions = Vec::new();
        for id in ids {
            let already_paused = user_paused(id);
            let flags = self.touch(id);
            match state {
                ScheduleState::Normal | ScheduleState::Throttled => {
                    if flags.paused {
                        flags.paused = false;
                        actions.push(ItemAction::Resume(id.clone()));
                    }
                }
                ScheduleState::Paused => {
                    if flags.forced {
                        flags.paused = false;
                        actions.push(ItemAction::Resume(id.clone()));
                    } else if !already_paused {
                        flags.paused = true;
                        actions.push(ItemAction::Pause(id.clone()));
                    }
                }
            }
        }
        actions
    }

    /// Clears the flags of a finished item.
    ///
    /// Returns `true` if the item was forced and has been released.
    pub fn finish(&mut self, id: &ItemId) -> bool {
        match self.items.get_mut(id) {
            Some(flags) if flags.forced => {
                *flags = ItemFlags::default();
                true
            }
            _ => false,
        }
    }

    /// Forgets the given items. Returns how many were known.
    pub fn remove<'a>(&mut self, ids: impl IntoIterator<Item = &'a ItemId>) -> usize {
        ids.into_iter()
            .filter(|id| self.items.remove(*id).is_some())
            .count()
    }

    /// Forgets every item not in `valid`. Returns how many were dropped.
    pub fn prune(&mut self, valid: &[ItemId]) -> usize {
        let before = self.items.len();
        self.items.retain(|id, _| valid.contains(id));
        before - self.items.len()
    }
}
