//! In-process scheduler service backed by the state directory.
//!
//! [`LocalService`] answers both [`ConfigService`] and
//! [`ForcedStateService`] from a [`StateStore`], re-evaluates the schedule
//! whenever the record changes, and can drive hourly re-evaluation from a
//! background task.

use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Local};
use hourglass_protocol::{ItemId, ScheduleState, SchedulerConfig};
use tokio::sync::Mutex;
use tracing::{debug, info, instrument, warn};

use crate::engine::{ThrottleSettings, current_state, delay_to_next_hour};
use crate::error::Result;
use crate::service::{ConfigService, ForcedStateService};
use crate::store::StateStore;
use crate::tracker::{ItemAction, ItemTracker};

/// The outcome of one schedule evaluation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Evaluation {
    /// The state now in effect.
    pub state: ScheduleState,
    /// Whether the state differs from the previous evaluation.
    pub changed: bool,
    /// The limits to apply, present only while throttled.
    pub throttle: Option<ThrottleSettings>,
    /// Per-item pause/resume actions.
    pub actions: Vec<ItemAction>,
}

#[derive(Debug)]
struct Inner {
    record: SchedulerConfig,
    items: ItemTracker,
    active: Option<ScheduleState>,
    /// Actions not yet collected by the host.
    outbox: Vec<ItemAction>,
}

/// File-backed implementation of the scheduler services.
///
/// # Examples
///
/// ```no_run
/// use hourglass_service::{ConfigService, LocalService};
///
/// # async fn example() -> hourglass_service::Result<()> {
/// let service = LocalService::open("/tmp/hourglass".into()).await?;
/// let record = service.get_config().await?;
/// println!("ignoring schedule: {}", record.ignore_scheduler);
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct LocalService {
    store: StateStore,
    inner: Mutex<Inner>,
}

impl LocalService {
    /// Opens the service on a state directory, loading stored state.
    ///
    /// Missing files yield the default record and no item flags.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created or a stored file
    /// is unreadable.
    #[instrument]
    pub async fn open(state_dir: PathBuf) -> Result<Self> {
        let store = StateStore::open(state_dir).await?;
        let record = store.load_record().await?.unwrap_or_default();
        let items = store.load_items().await?.unwrap_or_default();
        debug!(items = items.len(), "service state loaded");

        Ok(Self {
            store,
            inner: Mutex::new(Inner {
                record,
                items,
                active: None,
                outbox: Vec::new(),
            }),
        })
    }

    /// Returns the state found by the last evaluation.
    pub async fn active_state(&self) -> Option<ScheduleState> {
        self.inner.lock().await.active
    }

    /// Re-evaluates the schedule for the current local time.
    ///
    /// # Errors
    ///
    /// Returns an error if the item flags cannot be stored.
    pub async fn evaluate(&self) -> Result<Evaluation> {
        self.evaluate_at(Local::now()).await
    }

    /// Re-evaluates the schedule for `now`.
    ///
    /// Logs state transitions and applies the item rules when
    /// `force_use_individual` is on.
    ///
    /// # Errors
    ///
    /// Returns an error if the item flags cannot be stored.
    pub async fn evaluate_at(&self, now: DateTime<Local>) -> Result<Evaluation> {
        let mut inner = self.inner.lock().await;
        let state = current_state(&inner.record, &now);
        let changed = inner.active != Some(state);
        if changed {
            info!(from = ?inner.active, to = %state, "schedule state changed");
            inner.active = Some(state);
        }

        let throttle = (state == ScheduleState::Throttled)
            .then(|| ThrottleSettings::from_config(&inner.record));

        let actions = if inner.record.force_use_individual {
            let Inner { items, .. } = &mut *inner;
            let ids: Vec<ItemId> = items.ids().cloned().collect();
            items.apply(state, &ids, |_| false)
        } else {
            Vec::new()
        };

        if !actions.is_empty() {
            debug!(count = actions.len(), "item actions");
            inner.outbox.extend(actions.iter().cloned());
            self.store.save_items(&inner.items).await?;
        }

        Ok(Evaluation {
            state,
            changed,
            throttle,
            actions,
        })
    }

    /// Drains the pause/resume actions produced since the last call.
    ///
    /// Evaluations and forced-flag changes queue their actions here for
    /// the host session to carry out.
    pub async fn take_actions(&self) -> Vec<ItemAction> {
        std::mem::take(&mut self.inner.lock().await.outbox)
    }

    /// Handles an item finishing.
    ///
    /// Clears its forced flag when `force_unforce_finished` is on. Returns
    /// `true` if the flag was cleared.
    ///
    /// # Errors
    ///
    /// Returns an error if the item flags cannot be stored.
    #[instrument(skip(self))]
    pub async fn item_finished(&self, id: &ItemId) -> Result<bool> {
        let mut inner = self.inner.lock().await;
        if !inner.record.force_unforce_finished || !inner.items.finish(id) {
            return Ok(false);
        }
        debug!("released forced item");
        self.store.save_items(&inner.items).await?;
        Ok(true)
    }

    /// Forgets removed items.
    ///
    /// # Errors
    ///
    /// Returns an error if the item flags cannot be stored.
    pub async fn remove_items(&self, ids: &[ItemId]) -> Result<usize> {
        let mut inner = self.inner.lock().await;
        let removed = inner.items.remove(ids);
        if removed > 0 {
            self.store.save_items(&inner.items).await?;
        }
        Ok(removed)
    }

    /// Forgets every item not in `valid`.
    ///
    /// # Errors
    ///
    /// Returns an error if the item flags cannot be stored.
    pub async fn prune(&self, valid: &[ItemId]) -> Result<usize> {
        let mut inner = self.inner.lock().await;
        let dropped = inner.items.prune(valid);
        if dropped > 0 {
            debug!(dropped, "pruned stale items");
            self.store.save_items(&inner.items).await?;
        }
        Ok(dropped)
    }

    /// Evaluates the schedule now, then again at every top of the hour,
    /// forever.
    ///
    /// Meant to be spawned; abort the task to stop it.
    pub async fn run_schedule(self: Arc<Self>) {
        if let Err(e) = self.evaluate().await {
            warn!(error = %e, "startup evaluation failed");
        }
        loop {
            let delay = delay_to_next_hour(&Local::now());
            debug!(secs = delay.as_secs(), "next schedule check");
            tokio::time::sleep(delay).await;
            if let Err(e) = self.evaluate().await {
                warn!(error = %e, "scheduled evaluation failed");
            }
        }
    }
}

#[async_trait]
impl ConfigService for LocalService {
    async fn get_config(&self) -> Result<SchedulerConfig> {
        Ok(self.inner.lock().await.record.clone())
    }

    #[instrument(skip(self, config))]
    async fn set_config(&self, config: SchedulerConfig) -> Result<()> {
        self.store.save_record(&config).await?;
        self.inner.lock().await.record = config;
        info!("scheduler config updated");
        self.evaluate().await?;
        Ok(())
    }
}

#[async_trait]
impl ForcedStateService for LocalService {
    async fn get_forced(&self, ids: &[ItemId]) -> Result<Vec<bool>> {
        let inner = self.inner.lock().await;
        Ok(ids.iter().map(|id| inner.items.is_forced(id)).collect())
    }

    #[instrument(skip(self), fields(count = ids.len()))]
    async fn set_forced(&self, ids: &[ItemId], forced: bool) -> Result<()> {
        let mut inner = self.inner.lock().await;
        inner.items.set_forced(ids, forced);

        let active = inner.active;
        if inner.record.force_use_individual {
            if let Some(state) = active {
                let actions = inner.items.apply(state, ids, |_| false);
                debug!(count = actions.len(), "item actions");
                inner.outbox.extend(actions);
            }
        }

        self.store.save_items(&inner.items).await
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use hourglass_protocol::Weekday;
    use tempfile::TempDir;

    use super::*;

    async fn open(dir: &TempDir) -> LocalService {
        LocalService::open(dir.path().to_path_buf()).await.unwrap()
    }

    fn wednesday_afternoon() -> DateTime<Local> {
        // 2026-10-21 is a Wednesday
        Local
            .with_ymd_and_hms(2026, 10, 21, 14, 30, 0)
            .single()
            .unwrap()
    }

    #[tokio::test]
    async fn fresh_directory_serves_defaults() {
        let dir = TempDir::new().unwrap();
        let service = open(&dir).await;

        assert_eq!(service.get_config().await.unwrap(), SchedulerConfig::default());
        let flags = service
            .get_forced(&[ItemId::from("a"), ItemId::from("b")])
            .await
            .unwrap();
        assert_eq!(flags, vec![false, false]);
    }

    #[tokio::test]
    async fn set_config_persists_across_reopen() {
        let dir = TempDir::new().unwrap();
        let mut record = SchedulerConfig {
            low_down: 256,
            ignore_scheduler: true,
            ..Default::default()
        };
        record
            .button_state
            .set(Weekday::Tue, 8, ScheduleState::Throttled);

        open(&dir).await.set_config(record.clone()).await.unwrap();
        assert_eq!(open(&dir).await.get_config().await.unwrap(), record);
    }

    #[tokio::test]
    async fn forced_flags_persist_and_stay_parallel() {
        let dir = TempDir::new().unwrap();
        let (a, b, c) = (ItemId::from("a"), ItemId::from("b"), ItemId::from("c"));

        let service = open(&dir).await;
        service.set_forced(&[a.clone(), c.clone()], true).await.unwrap();
        service.set_forced(&[c.clone()], false).await.unwrap();

        let reopened = open(&dir).await;
        let flags = reopened.get_forced(&[c, b, a]).await.unwrap();
        assert_eq!(flags, vec![false, false, true]);
    }

    #[tokio::test]
    async fn evaluation_reports_transitions_and_limits() {
        let dir = TempDir::new().unwrap();
        let service = open(&dir).await;

        let mut record = SchedulerConfig {
            low_up: 10,
            ..Default::default()
        };
        record
            .button_state
            .set(Weekday::Wed, 14, ScheduleState::Throttled);
        service.set_config(record).await.unwrap();

        let first = service.evaluate_at(wednesday_afternoon()).await.unwrap();
        assert_eq!(first.state, ScheduleState::Throttled);
        assert_eq!(first.throttle.unwrap().upload_rate, Some(10 * 1024));
        assert_eq!(service.active_state().await, Some(ScheduleState::Throttled));

        let second = service.evaluate_at(wednesday_afternoon()).await.unwrap();
        assert!(!second.changed);
    }

    #[tokio::test]
    async fn paused_slot_pauses_unforced_items() {
        let dir = TempDir::new().unwrap();
        let service = open(&dir).await;
        let (a, b) = (ItemId::from("a"), ItemId::from("b"));
        service.set_forced(&[a.clone()], true).await.unwrap();
        service.set_forced(&[b.clone()], false).await.unwrap();

        let mut record = SchedulerConfig::default();
        record.button_state.set(Weekday::Wed, 14, ScheduleState::Paused);
        service.set_config(record).await.unwrap();

        let eval = service.evaluate_at(wednesday_afternoon()).await.unwrap();
        assert_eq!(eval.state, ScheduleState::Paused);
        assert!(eval.actions.contains(&ItemAction::Pause(b)));
        assert!(eval.actions.contains(&ItemAction::Resume(a)));
    }

    #[tokio::test]
    async fn individual_handling_can_be_disabled() {
        let dir = TempDir::new().unwrap();
        let service = open(&dir).await;
        service.set_forced(&[ItemId::from("a")], false).await.unwrap();

        let mut record = SchedulerConfig {
            force_use_individual: false,
            ..Default::default()
        };
        record.button_state.set(Weekday::Wed, 14, ScheduleState::Paused);
        service.set_config(record).await.unwrap();

        let eval = service.evaluate_at(wednesday_afternoon()).await.unwrap();
        assert!(eval.actions.is_empty());
    }

    #[tokio::test]
    async fn finished_items_lose_their_forced_flag() {
        let dir = TempDir::new().unwrap();
        let service = open(&dir).await;
        let a = ItemId::from("a");
        service.set_forced(&[a.clone()], true).await.unwrap();

        assert!(service.item_finished(&a).await.unwrap());
        assert_eq!(service.get_forced(&[a.clone()]).await.unwrap(), vec![false]);

        service
            .set_config(SchedulerConfig {
                force_unforce_finished: false,
                ..Default::default()
            })
            .await
            .unwrap();
        service.set_forced(&[a.clone()], true).await.unwrap();
        assert!(!service.item_finished(&a).await.unwrap());
    }

    #[tokio::test]
    async fn prune_forgets_stale_items() {
        let dir = TempDir::new().unwrap();
        let service = open(&dir).await;
        let (a, b) = (ItemId::from("a"), ItemId::from("b"));
        service.set_forced(&[a.clone(), b.clone()], true).await.unwrap();

        assert_eq!(service.prune(&[a.clone()]).await.unwrap(), 1);
        assert_eq!(service.remove_items(&[a.clone()]).await.unwrap(), 1);
        assert_eq!(
            service.get_forced(&[a, b]).await.unwrap(),
            vec![false, false]
        );
    }

    #[tokio::test]
    async fn schedule_loop_evaluates_at_startup() {
        let dir = TempDir::new().unwrap();
        let service = Arc::new(open(&dir).await);
        assert_eq!(service.active_state().await, None);

        let task = tokio::spawn(Arc::clone(&service).run_schedule());
        let started = tokio::time::timeout(std::time::Duration::from_secs(5), async {
            while service.active_state().await.is_none() {
                tokio::time::sleep(std::time::Duration::from_millis(10)).await;
            }
        })
        .await;
        task.abort();

        assert!(started.is_ok());
        assert_eq!(service.active_state().await, Some(ScheduleState::Normal));
    }

    #[tokio::test]
    async fn item_actions_are_queued_for_the_host() {
        let dir = TempDir::new().unwrap();
        let service = open(&dir).await;
        let b = ItemId::from("b");
        service.set_forced(&[b.clone()], false).await.unwrap();

        let mut record = SchedulerConfig::default();
        record.button_state.set(Weekday::Wed, 14, ScheduleState::Paused);
        service.set_config(record).await.unwrap();
        let _ = service.take_actions().await;

        let eval = service.evaluate_at(wednesday_afternoon()).await.unwrap();
        assert_eq!(eval.actions, vec![ItemAction::Pause(b.clone())]);
        assert_eq!(service.take_actions().await, eval.actions);
        assert!(service.take_actions().await.is_empty());

        // forcing an item while paused resumes it
        service.set_forced(&[b.clone()], true).await.unwrap();
        assert_eq!(service.take_actions().await, vec![ItemAction::Resume(b)]);
    }
}
