//! Backup settings storage.
//!
//! A single record holding the auto-backup flag, the interval and the time
//! of the last automatic backup. Defaults are written on first read.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use redb::{Database, ReadableDatabase, ReadableTable};
use std::sync::Arc;

use super::types::{BackupSettings, SETTINGS_KEY, SETTINGS_TABLE, StoredSettings};

/// Persisted backup settings.
///
/// `interval_hours` is stored as given. A zero or negative interval makes
/// every scheduler poll due.
#[derive(Clone)]
pub struct BackupSettingsStore {
    db: Arc<Database>,
    default_interval_hours: i64,
}

impl BackupSettingsStore {
    pub fn new(db: Arc<Database>, default_interval_hours: i64) -> Self {
        Self {
            db,
            default_interval_hours,
        }
    }

    fn load(&self) -> Result<Option<StoredSettings>> {
        let read_txn = self
            .db
            .begin_read()
            .context("Failed to begin read transaction")?;

        let table = read_txn
            .open_table(SETTINGS_TABLE)
            .context("Failed to open settings table")?;

        let result = table
            .get(SETTINGS_KEY)
            .context("Failed to read backup settings")?;

        match result {
            Some(guard) => {
                let stored = serde_json::from_slice(guard.value())
                    .context("Failed to deserialize backup settings")?;
                Ok(Some(stored))
            },
            None => Ok(None),
        }
    }

    /// Reads, changes and writes the record in one write transaction, so
    /// concurrent updates never overwrite each other. A missing record is
    /// created from the defaults first.
    fn modify<F>(&self, change: F) -> Result<StoredSettings>
    where
        F: FnOnce(&mut StoredSettings),
    {
        let write_txn = self
            .db
            .begin_write()
            .context("Failed to begin write transaction")?;

        let stored = {
            let mut table = write_txn
                .open_table(SETTINGS_TABLE)
                .context("Failed to open settings table")?;

            let existing: Option<StoredSettings> = match table
                .get(SETTINGS_KEY)
                .context("Failed to read backup settings")?
            {
                Some(guard) => Some(
                    serde_json::from_slice(guard.value())
                        .context("Failed to deserialize backup settings")?,
                ),
                None => None,
            };

            let mut stored = match existing {
                Some(stored) => stored,
                None => {
                    tracing::debug!(
                        interval_hours = self.default_interval_hours,
                        "Initialized default backup settings"
                    );
                    StoredSettings::with_interval(self.default_interval_hours)
                },
            };
            change(&mut stored);

            let json =
                serde_json::to_vec(&stored).context("Failed to serialize backup settings")?;
            table
                .insert(SETTINGS_KEY, json.as_slice())
                .context("Failed to insert backup settings")?;
            stored
        };

        write_txn
            .commit()
            .context("Failed to commit backup settings transaction")?;

        Ok(stored)
    }

    fn load_or_default(&self) -> Result<StoredSettings> {
        match self.load()? {
            Some(stored) => Ok(stored),
            None => self.modify(|_| {}),
        }
    }

    /// Returns the current settings, persisting defaults on first call.
    ///
    /// # Errors
    ///
    /// Returns an error if the settings record cannot be read or written.
    pub fn get(&self) -> Result<BackupSettings> {
        Ok(self.load_or_default()?.into())
    }

    /// Sets the auto-backup flag and interval, keeping `last_backup`.
    ///
    /// # Errors
    ///
    /// Returns an error if the settings record cannot be read or written.
    pub fn update(&self, enabled: bool, interval_hours: i64) -> Result<BackupSettings> {
        let stored = self.modify(|stored| {
            stored.auto_backup_enabled = enabled;
            stored.interval_hours = interval_hours;
        })?;
        Ok(stored.into())
    }

    /// Records the completion time of an automatic backup.
    ///
    /// # Errors
    ///
    /// Returns an error if the settings record cannot be read or written.
    pub fn record_backup(&self, at: DateTime<Utc>) -> Result<BackupSettings> {
        let stored = self.modify(|stored| stored.last_backup = Some(at))?;
        Ok(stored.into())
    }

    /// Returns the current settings asynchronously.
    pub async fn get_async(&self) -> Result<BackupSettings> {
        let store = self.clone();
        tokio::task::spawn_blocking(move || store.get())
            .await
            .context("Task join error")?
    }

    /// Updates the settings asynchronously.
    pub async fn update_async(&self, enabled: bool, interval_hours: i64) -> Result<BackupSettings> {
        let store = self.clone();
        tokio::task::spawn_blocking(move || store.update(enabled, interval_hours))
            .await
            .context("Task join error")?
    }

    /// Records an automatic backup asynchronously.
    pub async fn record_backup_async(&self, at: DateTime<Utc>) -> Result<BackupSettings> {
        let store = self.clone();
        tokio::task::spawn_blocking(move || store.record_backup(at))
            .await
            .context("Task join error")?
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backup::db::open_metadata_db;
    use chrono::TimeDelta;
    use tempfile::TempDir;

    fn store(tmp: &TempDir) -> BackupSettingsStore {
        BackupSettingsStore::new(open_metadata_db(tmp.path()).unwrap(), 6)
    }

    #[test]
    fn test_defaults_are_persisted_on_first_read() {
        let tmp = TempDir::new().unwrap();
        let settings = store(&tmp);

        assert!(settings.load().unwrap().is_none());
        let current = settings.get().unwrap();
        assert!(current.auto_backup_enabled);
        assert_eq!(current.interval_hours, 6);
        assert!(current.last_backup.is_none());
        assert!(current.next_backup.is_none());
        assert!(settings.load().unwrap().is_some());
    }

    #[test]
    fn test_next_backup_is_derived() {
        let tmp = TempDir::new().unwrap();
        let settings = store(&tmp);
        let at = Utc::now();

        settings.update(true, 12).unwrap();
        let current = settings.record_backup(at).unwrap();
        assert_eq!(current.last_backup, Some(at));
        assert_eq!(current.next_backup, Some(at + TimeDelta::hours(12)));

        // Changing the interval moves next_backup with it
        let current = settings.update(true, 1).unwrap();
        assert_eq!(current.next_backup, Some(at + TimeDelta::hours(1)));
    }

    #[test]
    fn test_update_accepts_non_positive_interval() {
        let tmp = TempDir::new().unwrap();
        let settings = store(&tmp);

        let current = settings.update(true, 0).unwrap();
        assert_eq!(current.interval_hours, 0);
        let current = settings.update(false, -3).unwrap();
        assert_eq!(current.interval_hours, -3);
        assert!(!current.auto_backup_enabled);
    }

    #[test]
    fn test_concurrent_update_and_record_keep_both_changes() {
        use std::sync::Barrier;

        let tmp = TempDir::new().unwrap();
        let settings = store(&tmp);

        for _ in 0..200 {
            settings.update(true, 6).unwrap();
            let at = Utc::now();
            let barrier = Arc::new(Barrier::new(2));

            let recorder = {
                let settings = settings.clone();
                let barrier = Arc::clone(&barrier);
                std::thread::spawn(move || {
                    barrier.wait();
                    settings.record_backup(at).unwrap();
                })
            };
            let updater = {
                let settings = settings.clone();
                let barrier = Arc::clone(&barrier);
                std::thread::spawn(move || {
                    barrier.wait();
                    settings.update(false, 1).unwrap();
                })
            };
            recorder.join().unwrap();
            updater.join().unwrap();

            let current = settings.get().unwrap();
            assert!(!current.auto_backup_enabled);
            assert_eq!(current.interval_hours, 1);
            assert_eq!(current.last_backup, Some(at));
        }
    }

    #[test]
    fn test_huge_interval_leaves_next_backup_unknown() {
        let tmp = TempDir::new().unwrap();
        let settings = store(&tmp);

        settings.update(true, i64::MAX).unwrap();
        let current = settings.record_backup(Utc::now()).unwrap();
        assert!(current.last_backup.is_some());
        assert!(current.next_backup.is_none());
    }
}
