//! The configuration record exchanged with the configuration service.

use serde::{Deserialize, Serialize};

use crate::error::{ProtocolError, Result};
use crate::matrix::ScheduleMatrix;

/// Sentinel for a limit that is unlimited or disabled.
pub const UNLIMITED: i64 = -1;

/// Smallest value a limit field accepts.
pub const MIN_LIMIT: i64 = UNLIMITED;

/// Largest value a limit field accepts.
pub const MAX_LIMIT: i64 = 99_999;

/// The scheduler configuration record.
///
/// Field names match the keys the service stores. The limits apply while
/// the schedule is in the throttled state; speeds are in KiB/s.
///
/// # Examples
///
/// ```
/// use hourglass_protocol::{SchedulerConfig, UNLIMITED};
///
/// let config = SchedulerConfig::default();
/// assert_eq!(config.low_down, UNLIMITED);
/// assert!(config.force_use_individual);
/// assert!(!config.ignore_scheduler);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SchedulerConfig {
    /// The weekly schedule, hour-major.
    pub button_state: ScheduleMatrix,
    /// Maximum download speed while throttled (KiB/s).
    pub low_down: i64,
    /// Maximum upload speed while throttled (KiB/s).
    pub low_up: i64,
    /// Maximum number of active items while throttled.
    pub low_active: i64,
    /// Maximum number of active downloading items while throttled.
    pub low_active_down: i64,
    /// Maximum number of active seeding items while throttled.
    pub low_active_up: i64,
    /// Whether forced items are handled individually.
    pub force_use_individual: bool,
    /// Whether an item loses its forced flag once it finishes.
    pub force_unforce_finished: bool,
    /// Whether the schedule is ignored (always normal).
    #[serde(alias = "ignore_schedule")]
    pub ignore_scheduler: bool,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            button_state: ScheduleMatrix::default(),
            low_down: UNLIMITED,
            low_up: UNLIMITED,
            low_active: UNLIMITED,
            low_active_down: UNLIMITED,
            low_active_up: UNLIMITED,
            force_use_individual: true,
            force_unforce_finished: true,
            ignore_scheduler: false,
        }
    }
}

impl SchedulerConfig {
    /// Parses a record from JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed or the schedule matrix is
    /// invalid.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(ProtocolError::DeserializationFailed)
    }

    /// Serializes the record to pretty JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(ProtocolError::SerializationFailed)
    }

    /// Returns the five limits in display order.
    #[must_use]
    pub fn limits(&self) -> [i64; 5] {
        [
            self.low_down,
            self.low_up,
            self.low_active,
            self.low_active_down,
            self.low_active_up,
        ]
    }
}
