//! File-backed storage for service state.
//!
//! The scheduler record and the item flags are kept as pretty JSON files in
//! a single state directory:
//!
//! ```text
//! <state_dir>/
//! ├── scheduler.json   # SchedulerConfig
//! └── forced.json      # { "<item id>": { "forced": bool, "paused": bool } }
//! ```
//!
//! A missing file is not an error: loading reports `None` and the caller
//! falls back to defaults.

use std::path::{Path, PathBuf};

use hourglass_protocol::SchedulerConfig;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, instrument, warn};

use crate::error::{Result, ServiceError};
use crate::tracker::ItemTracker;

/// File name of the scheduler record.
pub const RECORD_FILE: &str = "scheduler.json";

/// File name of the item flags.
pub const ITEMS_FILE: &str = "forced.json";

/// Reads and writes the service state files.
#[derive(Debug, Clone)]
pub struct StateStore {
    base_path: PathBuf,
}

impl StateStore {
    /// Opens a store rooted at `base_path`, creating the directory if needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created.
    #[instrument]
    pub async fn open(base_path: PathBuf) -> Result<Self> {
        if !tokio::fs::try_exists(&base_path).await.unwrap_or(false) {
            debug!(?base_path, "creating state directory");
            tokio::fs::create_dir_all(&base_path)
                .await
                .map_err(|source| ServiceError::Io {
                    path: base_path.clone(),
                    source,
                })?;
        }
        Ok(Self { base_path })
    }

    /// Returns the state directory.
    #[must_use]
    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    /// Loads the scheduler record, if stored.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub async fn load_record(&self) -> Result<Option<SchedulerConfig>> {
        self.load(RECORD_FILE).await
    }

    /// Stores the scheduler record.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub async fn save_record(&self, record: &SchedulerConfig) -> Result<()> {
        self.save(RECORD_FILE, record).await
    }

    /// Loads the item flags, if stored.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub async fn load_items(&self) -> Result<Option<ItemTracker>> {
        self.load(ITEMS_FILE).await
    }

    /// Stores the item flags.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    #[instrument(skip(self, items), fields(items = items.len()))]
    pub async fn save_items(&self, items: &ItemTracker) -> Result<()> {
        self.save(ITEMS_FILE, items).await
    }

    async fn load<T: DeserializeOwned>(&self, name: &str) -> Result<Option<T>> {
        let path = self.base_path.join(name);
        debug!(?path, "loading state file");

        match tokio::fs::read_to_string(&path).await {
            Ok(content) => {
                let value = serde_json::from_str(&content).map_err(|source| {
                    warn!(?path, error = %source, "failed to parse state file");
                    ServiceError::Parse {
                        path: path.clone(),
                        source,
                    }
                })?;
                Ok(Some(value))
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(?path, "state file not found");
                Ok(None)
            }
            Err(source) => {
                warn!(?path, error = %source, "failed to read state file");
                Err(ServiceError::Io { path, source })
            }
        }
    }

    async fn save<T: Serialize>(&self, name: &str, value: &T) -> Result<()> {
        let path = self.base_path.join(name);
        let content = serde_json::to_string_pretty(value)?;
        tokio::fs::write(&path, content)
            .await
            .map_err(|source| ServiceError::Io {
                path: path.clone(),
                source,
            })?;
        debug!(?path, "state file saved");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use hourglass_protocol::{ItemId, ScheduleState, Weekday};
    use tempfile::TempDir;

    use super::*;

    #[tokio::test]
    async fn open_creates_directory() {
        let dir = TempDir::new().unwrap();
        let base = dir.path().join("nested").join("state");
        let store = StateStore::open(base.clone()).await.unwrap();
        assert!(base.is_dir());
        assert_eq!(store.base_path(), base.as_path());
    }

    #[tokio::test]
    async fn missing_files_load_as_none() {
        let dir = TempDir::new().unwrap();
        let store = StateStore::open(dir.path().to_path_buf()).await.unwrap();
        assert!(store.load_record().await.unwrap().is_none());
        assert!(store.load_items().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn record_survives_a_save() {
        let dir = TempDir::new().unwrap();
        let store = StateStore::open(dir.path().to_path_buf()).await.unwrap();

        let mut record = SchedulerConfig {
            low_up: 12,
            ..Default::default()
        };
        record
            .button_state
            .set(Weekday::Fri, 22, ScheduleState::Paused);
        store.save_record(&record).await.unwrap();

        assert_eq!(store.load_record().await.unwrap(), Some(record));
    }

    #[tokio::test]
    async fn items_survive_a_save() {
        let dir = TempDir::new().unwrap();
        let store = StateStore::open(dir.path().to_path_buf()).await.unwrap();

        let mut items = ItemTracker::default();
        items.set_forced([&ItemId::from("beef")], true);
        store.save_items(&items).await.unwrap();

        let loaded = store.load_items().await.unwrap().unwrap();
        assert!(loaded.is_forced(&ItemId::from("beef")));
    }

    #[tokio::test]
    async fn corrupt_record_is_reported_with_its_path() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join(RECORD_FILE), "{ not json").unwrap();
        let store = StateStore::open(dir.path().to_path_buf()).await.unwrap();

        let err = store.load_record().await.unwrap_err();
        assert!(matches!(err, ServiceError::Parse { .. }));
        assert!(err.to_string().contains(RECORD_FILE));
    }

    #[tokio::test]
    async fn invalid_matrix_is_rejected() {
        let dir = TempDir::new().unwrap();
        std::fs::write(
            dir.path().join(RECORD_FILE),
            r#"{"button_state": [[0, 1, 2]]}"#,
        )
        .unwrap();
        let store = StateStore::open(dir.path().to_path_buf()).await.unwrap();
        assert!(store.load_record().await.is_err());
    }
}
