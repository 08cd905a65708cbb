//! `BackupService`: the entry point the API, CLI and scheduler share.

use anyhow::Result as AnyResult;
use chrono::{DateTime, Utc};
use std::path::Path;
use tracing::warn;

use super::catalog::{BackupCatalog, CatalogBackend, RedbCatalog};
use super::db::open_metadata_db;
use super::restore::RestoreEngine;
use super::settings::BackupSettingsStore;
use super::types::{BackupKind, BackupRecord, BackupSettings, RestoreOutcome};
use super::writer::{BackupMarker, SnapshotWriter};
use crate::error::Result;
use crate::metrics;
use crate::store::DocumentStore;

/// Backup, catalog, settings and restore operations over one data store.
///
/// # Thread Safety
///
/// `BackupService` is `Clone` and can be shared across tasks. No lock is
/// held between backups and restores; a restore racing a snapshot may be
/// captured half-applied.
#[derive(Clone)]
pub struct BackupService {
    writer: SnapshotWriter,
    catalog: BackupCatalog,
    settings: BackupSettingsStore,
    restore: RestoreEngine,
}

impl BackupService {
    /// Opens the backup directory, creating it and its metadata database
    /// if absent.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory or metadata database cannot be
    /// created or opened.
    pub fn open<P: AsRef<Path>>(
        backup_dir: P,
        store: DocumentStore,
        default_interval_hours: i64,
    ) -> AnyResult<Self> {
        let backup_dir = backup_dir.as_ref();
        let db = open_metadata_db(backup_dir)?;
        let catalog = BackupCatalog::new(RedbCatalog::new(db.clone()), backup_dir);
        let settings = BackupSettingsStore::new(db, default_interval_hours);
        Ok(Self::from_parts(store, catalog, settings))
    }

    /// Opens a service with a custom catalog backend.
    ///
    /// Settings still live in the metadata database of `backup_dir`.
    ///
    /// # Errors
    ///
    /// Returns an error if the metadata database cannot be opened.
    pub fn with_catalog<P: AsRef<Path>, C: CatalogBackend>(
        backup_dir: P,
        store: DocumentStore,
        catalog: C,
        default_interval_hours: i64,
    ) -> AnyResult<Self> {
        let backup_dir = backup_dir.as_ref();
        let db = open_metadata_db(backup_dir)?;
        let catalog = BackupCatalog::new(catalog, backup_dir);
        let settings = BackupSettingsStore::new(db, default_interval_hours);
        Ok(Self::from_parts(store, catalog, settings))
    }

    pub fn from_parts(
        store: DocumentStore,
        catalog: BackupCatalog,
        settings: BackupSettingsStore,
    ) -> Self {
        let writer = SnapshotWriter::new(store.clone(), catalog.clone(), BackupMarker::new());
        let restore = RestoreEngine::new(store, catalog.clone());
        Self {
            writer,
            catalog,
            settings,
            restore,
        }
    }

    /// Process-local marker of the last completed backup.
    pub fn marker(&self) -> &BackupMarker {
        self.writer.marker()
    }

    /// Takes a snapshot of every managed collection.
    ///
    /// # Errors
    ///
    /// See [`SnapshotWriter::create_snapshot`].
    pub async fn create_backup(&self, kind: BackupKind) -> Result<BackupRecord> {
        match self.writer.create_snapshot(kind).await {
            Ok(record) => {
                metrics::record_backup_created(kind);
                Ok(record)
            },
            Err(e) => {
                metrics::record_backup_failed(kind, e.kind());
                Err(e)
            },
        }
    }

    #[cfg(test)]
    pub(crate) async fn create_backup_at(
        &self,
        kind: BackupKind,
        at: DateTime<Utc>,
    ) -> Result<BackupRecord> {
        self.writer.create_snapshot_at(kind, at).await
    }

    /// Lists backups, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the catalog cannot be read.
    pub async fn list_backups(&self) -> Result<Vec<BackupRecord>> {
        self.catalog.list().await
    }

    /// Retrieves a catalog entry.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::NotFound`] for unknown ids.
    pub async fn get_backup(&self, id: &str) -> Result<BackupRecord> {
        self.catalog.get(id).await
    }

    /// Deletes a backup's catalog entry and artifact file.
    ///
    /// # Errors
    ///
    /// See [`BackupCatalog::delete`].
    pub async fn delete_backup(&self, id: &str) -> Result<()> {
        self.catalog.delete(id).await
    }

    /// Replaces live collections with a backup's contents.
    ///
    /// # Errors
    ///
    /// See [`RestoreEngine::restore`].
    pub async fn restore_backup(&self, id: &str) -> Result<RestoreOutcome> {
        let result = self.restore.restore(id).await;
        match &result {
            Ok(_) => metrics::record_restore("success"),
            Err(e) => {
                warn!(backup_id = %id, error = %e, "Restore failed");
                metrics::record_restore(e.kind());
            },
        }
        result
    }

    /// Current auto-backup settings with derived `next_backup`.
    ///
    /// # Errors
    ///
    /// Returns an error if the settings record cannot be read or created.
    pub async fn settings(&self) -> Result<BackupSettings> {
        Ok(self.settings.get_async().await?)
    }

    /// Updates the auto-backup flag and interval. The interval is not
    /// validated; zero or negative values make every poll due.
    ///
    /// # Errors
    ///
    /// Returns an error if the settings record cannot be written.
    pub async fn update_settings(
        &self,
        enabled: bool,
        interval_hours: i64,
    ) -> Result<BackupSettings> {
        Ok(self.settings.update_async(enabled, interval_hours).await?)
    }

    /// Persists the completion time of an automatic backup.
    ///
    /// # Errors
    ///
    /// Returns an error if the settings record cannot be written.
    pub async fn record_auto_backup(&self, at: DateTime<Utc>) -> Result<BackupSettings> {
        Ok(self.settings.record_backup_async(at).await?)
    }
}
