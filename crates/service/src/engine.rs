//! The schedule engine.
//!
//! Maps wall-clock time onto the weekly schedule and derives the limits
//! that apply in each state. Everything here is pure so it can be driven
//! with fixed timestamps in tests.

use std::time::Duration;

use chrono::{DateTime, Datelike, TimeZone, Timelike};
use hourglass_protocol::{ScheduleState, SchedulerConfig, UNLIMITED, Weekday};

/// Bytes per KiB, the unit speed limits are configured in.
const KIB: i64 = 1024;

/// Returns the state scheduled for a weekday and hour.
///
/// Always [`ScheduleState::Normal`] while the scheduler is ignored.
///
/// # Examples
///
/// ```
/// use hourglass_protocol::{ScheduleState, SchedulerConfig, Weekday};
/// use hourglass_service::engine::state_at;
///
/// let mut config = SchedulerConfig::default();
/// config.button_state.set(Weekday::Sat, 2, ScheduleState::Paused);
/// assert_eq!(state_at(&config, Weekday::Sat, 2), ScheduleState::Paused);
///
/// config.ignore_scheduler = true;
/// assert_eq!(state_at(&config, Weekday::Sat, 2), ScheduleState::Normal);
/// ```
#[must_use]
pub fn state_at(config: &SchedulerConfig, day: Weekday, hour: u8) -> ScheduleState {
    if config.ignore_scheduler {
        ScheduleState::Normal
    } else {
        config.button_state.get(day, hour)
    }
}

/// Returns the state scheduled for the slot containing `now`.
#[must_use]
pub fn current_state<Tz: TimeZone>(config: &SchedulerConfig, now: &DateTime<Tz>) -> ScheduleState {
    let day = Weekday::from(now.weekday());
    // hour() is always in 0..24
    let hour = u8::try_from(now.hour()).unwrap_or(0);
    state_at(config, day, hour)
}

/// Returns the time left until the next top of the hour.
///
/// Never zero: at exactly `hh:00:00` the next boundary is an hour away.
#[must_use]
pub fn delay_to_next_hour<Tz: TimeZone>(now: &DateTime<Tz>) -> Duration {
    let elapsed = u64::from(now.minute()) * 60 + u64::from(now.second());
    Duration::from_secs(3600 - elapsed)
}

/// Limits applied while the schedule is [`ScheduleState::Throttled`].
///
/// `None` means unlimited.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThrottleSettings {
    /// Download rate limit in bytes per second.
    pub download_rate: Option<u64>,
    /// Upload rate limit in bytes per second.
    pub upload_rate: Option<u64>,
    /// Maximum number of active items.
    pub active: Option<u32>,
    /// Maximum number of active downloading items.
    pub active_downloading: Option<u32>,
    /// Maximum number of active seeding items.
    pub active_seeding: Option<u32>,
}

impl ThrottleSettings {
    /// Derives the throttled limits from a record.
    ///
    /// Speed limits are converted from KiB/s to bytes/s. Any negative value
    /// means unlimited.
    ///
    /// # Examples
    ///
    /// ```
    /// use hourglass_protocol::SchedulerConfig;
    /// use hourglass_service::engine::ThrottleSettings;
    ///
    /// let config = SchedulerConfig { low_down: 50, ..Default::default() };
    /// let limits = ThrottleSettings::from_config(&config);
    /// assert_eq!(limits.download_rate, Some(50 * 1024));
    /// assert_eq!(limits.upload_rate, None);
    /// ```
    #[must_use]
    pub fn from_config(config: &SchedulerConfig) -> Self {
        Self {
            download_rate: rate_limit(config.low_down),
            upload_rate: rate_limit(config.low_up),
            active: count_limit(config.low_active),
            active_downloading: count_limit(config.low_active_down),
            active_seeding: count_limit(config.low_active_up),
        }
    }

    /// Returns `true` if no limit is set.
    #[must_use]
    pub fn is_unlimited(&self) -> bool {
        *self == Self::UNLIMITED
    }

    /// Settings with every limit lifted.
    pub const UNLIMITED: Self = Self {
        download_rate: None,
        upload_rate: None,
        active: None,
        active_downloading: None,
        active_seeding: None,
    };
}

fn rate_limit(kib: i64) -> Option<u64> {
    if kib <= UNLIMITED {
        return None;
    }
    u64::try_from(kib.saturating_mul(KIB)).ok()
}

fn count_limit(value: i64) -> Option<u32> {
    if value <= UNLIMITED {
        return None;
    }
    Some(u32::try_from(value).unwrap_or(u32::MAX))
}

#[cfg(test)]
mod tests {
    use chrono::{FixedOffset, NaiveDate};

    use super::*;

    fn at(year: i32, month: u32, day: u32, h: u32, m: u32, s: u32) -> DateTime<FixedOffset> {
        let naive = NaiveDate::from_ymd_opt(year, month, day)
            .unwrap()
            .and_hms_opt(h, m, s)
            .unwrap();
        FixedOffset::east_opt(0)
            .unwrap()
            .from_local_datetime(&naive)
            .unwrap()
    }

    #[test]
    fn current_state_uses_local_weekday_and_hour() {
        let mut config = SchedulerConfig::default();
        config
            .button_state
            .set(Weekday::Wed, 14, ScheduleState::Throttled);

        // 2026-10-21 is a Wednesday
        let now = at(2026, 10, 21, 14, 30, 0);
        assert_eq!(current_state(&config, &now), ScheduleState::Throttled);

        let later = at(2026, 10, 21, 15, 0, 0);
        assert_eq!(current_state(&config, &later), ScheduleState::Normal);
    }

    #[test]
    fn ignore_scheduler_forces_normal() {
        let mut config = SchedulerConfig {
            ignore_scheduler: true,
            ..Default::default()
        };
        config.button_state.set(Weekday::Sun, 0, ScheduleState::Paused);
        // 2026-10-25 is a Sunday
        assert_eq!(
            current_state(&config, &at(2026, 10, 25, 0, 5, 0)),
            ScheduleState::Normal
        );
    }

    #[test]
    fn delay_to_next_hour_counts_remaining_seconds() {
        assert_eq!(
            delay_to_next_hour(&at(2026, 1, 1, 10, 59, 30)),
            Duration::from_secs(30)
        );
        assert_eq!(
            delay_to_next_hour(&at(2026, 1, 1, 10, 15, 0)),
            Duration::from_secs(45 * 60)
        );
        assert_eq!(
            delay_to_next_hour(&at(2026, 1, 1, 10, 0, 0)),
            Duration::from_secs(3600)
        );
    }

    #[test]
    fn default_record_is_unlimited() {
        assert!(ThrottleSettings::from_config(&SchedulerConfig::default()).is_unlimited());
    }

    #[test]
    fn throttle_settings_convert_units() {
        let config = SchedulerConfig {
            low_down: 100,
            low_up: 20,
            low_active: 8,
            low_active_down: 3,
            low_active_up: -1,
            ..Default::default()
        };
        let limits = ThrottleSettings::from_config(&config);
        assert_eq!(limits.download_rate, Some(102_400));
        assert_eq!(limits.upload_rate, Some(20_480));
        assert_eq!(limits.active, Some(8));
        assert_eq!(limits.active_downloading, Some(3));
        assert_eq!(limits.active_seeding, None);
    }

    #[test]
    fn zero_is_a_real_limit() {
        let config = SchedulerConfig {
            low_up: 0,
            ..Default::default()
        };
        assert_eq!(ThrottleSettings::from_config(&config).upload_rate, Some(0));
    }
}
