//! Test utilities for the TUI crate.
//!
//! This module provides common helpers used across test modules: buffer
//! rendering for snapshot tests and a scripted service double.

use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use hourglass_protocol::{ItemId, SchedulerConfig};
use hourglass_service::{ConfigService, ForcedStateService, Result, ServiceError};
use ratatui::buffer::Buffer;

/// Converts a ratatui [`Buffer`] to a string representation.
///
/// Each row of the buffer becomes a line in the output string. Trailing
/// whitespace is trimmed from each line to produce cleaner output suitable
/// for snapshot testing.
#[must_use]
pub(crate) fn buffer_to_string(buf: &Buffer) -> String {
    let mut result = String::new();
    for y in 0..buf.area.height {
        for x in 0..buf.area.width {
            if let Some(cell) = buf.cell((x, y)) {
                result.push_str(cell.symbol());
            }
        }
        // Trim trailing whitespace from each line for cleaner snapshots
        let trimmed = result.trim_end_matches(' ');
        result.truncate(trimmed.len());
        result.push('\n');
    }
    result
}

/// An in-memory service whose calls can be made to fail.
#[derive(Debug, Default)]
pub(crate) struct FakeService {
    pub(crate) config: Mutex<SchedulerConfig>,
    pub(crate) forced: Mutex<HashMap<ItemId, bool>>,
    pub(crate) fail_get_config: AtomicBool,
    pub(crate) fail_set_config: AtomicBool,
    pub(crate) fail_set_forced: AtomicBool,
}

impl FakeService {
    pub(crate) fn with_config(config: SchedulerConfig) -> Self {
        Self {
            config: Mutex::new(config),
            ..Default::default()
        }
    }

    pub(crate) fn stored_config(&self) -> SchedulerConfig {
        self.config.lock().unwrap().clone()
    }

    pub(crate) fn is_forced(&self, id: &str) -> bool {
        self.forced
            .lock()
            .unwrap()
            .get(&ItemId::from(id))
            .copied()
            .unwrap_or(false)
    }

    fn check(flag: &AtomicBool, call: &str) -> Result<()> {
        if flag.load(Ordering::SeqCst) {
            return Err(ServiceError::Unavailable {
                reason: format!("{call} refused"),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl ConfigService for FakeService {
    async fn get_config(&self) -> Result<SchedulerConfig> {
        Self::check(&self.fail_get_config, "get_config")?;
        Ok(self.stored_config())
    }

    async fn set_config(&self, config: SchedulerConfig) -> Result<()> {
        Self::check(&self.fail_set_config, "set_config")?;
        *self.config.lock().unwrap() = config;
        Ok(())
    }
}

#[async_trait]
impl ForcedStateService for FakeService {
    async fn get_forced(&self, ids: &[ItemId]) -> Result<Vec<bool>> {
        let forced = self.forced.lock().unwrap();
        Ok(ids
            .iter()
            .map(|id| forced.get(id).copied().unwrap_or(false))
            .collect())
    }

    async fn set_forced(&self, ids: &[ItemId], value: bool) -> Result<()> {
        Self::check(&self.fail_set_forced, "set_forced")?;
        let mut forced = self.forced.lock().unwrap();
        for id in ids {
            forced.insert(id.clone(), value);
        }
        Ok(())
    }
}
