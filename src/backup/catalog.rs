//! Backup catalog: the queryable index of artifact metadata.
//!
//! Entries live in the metadata database, separate from the artifact files.
//! Deleting an entry also removes its file; a file that is already gone does
//! not prevent the entry from being deleted.

use anyhow::{Context, Result};
use redb::{Database, ReadableDatabase, ReadableTable};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info, warn};

use super::types::{BACKUPS_TABLE, BackupRecord};
use crate::error::Error;

/// Storage for catalog entries.
///
/// Methods are blocking; [`BackupCatalog`] moves them off the async runtime.
pub trait CatalogBackend: Send + Sync + 'static {
    /// Persists an entry, overwriting one with the same id.
    ///
    /// # Errors
    ///
    /// Returns an error if the entry cannot be written.
    fn insert(&self, record: &BackupRecord) -> Result<()>;

    /// Retrieves an entry by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying read fails.
    fn get(&self, id: &str) -> Result<Option<BackupRecord>>;

    /// Lists every entry in storage order.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying read fails.
    fn list(&self) -> Result<Vec<BackupRecord>>;

    /// Removes an entry. Returns `Ok(true)` if it existed.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying write fails.
    fn remove(&self, id: &str) -> Result<bool>;
}

/// Redb-backed catalog storage.
#[derive(Clone)]
pub struct RedbCatalog {
    db: Arc<Database>,
}

impl RedbCatalog {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }
}

impl CatalogBackend for RedbCatalog {
    fn insert(&self, record: &BackupRecord) -> Result<()> {
        let write_txn = self
            .db
            .begin_write()
            .context("Failed to begin write transaction")?;

        {
            let mut table = write_txn
                .open_table(BACKUPS_TABLE)
                .context("Failed to open backups table")?;

            let json =
                serde_json::to_vec(record).context("Failed to serialize backup record to JSON")?;

            table
                .insert(record.id.as_str(), json.as_slice())
                .with_context(|| format!("Failed to insert backup record '{}'", record.id))?;
        }

        write_txn
            .commit()
            .context("Failed to commit backup record save transaction")?;

        Ok(())
    }

    fn get(&self, id: &str) -> Result<Option<BackupRecord>> {
        let read_txn = self
            .db
            .begin_read()
            .context("Failed to begin read transaction")?;

        let table = read_txn
            .open_table(BACKUPS_TABLE)
            .context("Failed to open backups table")?;

        let result = table
            .get(id)
            .with_context(|| format!("Failed to read backup record '{id}'"))?;

        match result {
            Some(guard) => {
                let record = serde_json::from_slice(guard.value())
                    .with_context(|| format!("Failed to deserialize backup record '{id}'"))?;
                Ok(Some(record))
            },
            None => Ok(None),
        }
    }

    fn list(&self) -> Result<Vec<BackupRecord>> {
        let read_txn = self
            .db
            .begin_read()
            .context("Failed to begin read transaction")?;

        let table = read_txn
            .open_table(BACKUPS_TABLE)
            .context("Failed to open backups table")?;

        let mut records = Vec::new();

        for item in table.iter().context("Failed to iterate backups table")? {
            let (key, value) = item.context("Failed to read backup record entry")?;

            // Skip corrupted entries instead of failing the entire list operation
            match serde_json::from_slice::<BackupRecord>(value.value()) {
                Ok(record) => records.push(record),
                Err(e) => warn!(
                    backup_id = %key.value(),
                    error = %e,
                    "Skipping corrupted catalog entry"
                ),
            }
        }

        Ok(records)
    }

    fn remove(&self, id: &str) -> Result<bool> {
        let write_txn = self
            .db
            .begin_write()
            .context("Failed to begin write transaction")?;

        let removed = {
            let mut table = write_txn
                .open_table(BACKUPS_TABLE)
                .context("Failed to open backups table")?;

            table
                .remove(id)
                .with_context(|| format!("Failed to remove backup record '{id}'"))?
                .is_some()
        };

        write_txn
            .commit()
            .context("Failed to commit backup record removal transaction")?;

        Ok(removed)
    }
}

/// Backup catalog bound to the directory holding the artifacts.
///
/// `BackupCatalog` is `Clone` and can be shared across tasks.
#[derive(Clone)]
pub struct BackupCatalog {
    backend: Arc<dyn CatalogBackend>,
    backup_dir: PathBuf,
}

impl BackupCatalog {
    pub fn new<B: CatalogBackend>(backend: B, backup_dir: impl Into<PathBuf>) -> Self {
        Self {
            backend: Arc::new(backend),
            backup_dir: backup_dir.into(),
        }
    }

    /// Directory where artifact files are written.
    pub fn backup_dir(&self) -> &Path {
        &self.backup_dir
    }

    /// Absolute path of the artifact behind a catalog entry.
    pub fn artifact_path(&self, record: &BackupRecord) -> PathBuf {
        self.backup_dir.join(&record.filename)
    }

    /// Adds an entry.
    ///
    /// # Errors
    ///
    /// Returns an error if the entry cannot be persisted.
    pub async fn insert(&self, record: BackupRecord) -> Result<()> {
        let backend = Arc::clone(&self.backend);
        tokio::task::spawn_blocking(move || backend.insert(&record))
            .await
            .context("Task join error")?
    }

    /// Lists entries newest first.
    ///
    /// Ties on `created_at` are broken by id so repeated reads of an
    /// unchanged catalog return the same order.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Database`] if the catalog cannot be read.
    pub async fn list(&self) -> crate::error::Result<Vec<BackupRecord>> {
        let backend = Arc::clone(&self.backend);
        let mut records = tokio::task::spawn_blocking(move || backend.list())
            .await
            .context("Task join error")??;

        records.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| b.id.cmp(&a.id))
        });

        Ok(records)
    }

    /// Retrieves an entry by id.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] if no entry has that id.
    pub async fn get(&self, id: &str) -> crate::error::Result<BackupRecord> {
        let backend = Arc::clone(&self.backend);
        let key = id.to_string();
        tokio::task::spawn_blocking(move || backend.get(&key))
            .await
            .context("Task join error")??
            .ok_or_else(|| Error::not_found("backup", id))
    }

    /// Deletes an entry and its artifact file.
    ///
    /// A missing artifact file is ignored. A second delete of the same id
    /// fails with [`Error::NotFound`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] for unknown ids and [`Error::Io`] if the
    /// file exists but cannot be removed (the entry is kept in that case).
    pub async fn delete(&self, id: &str) -> crate::error::Result<()> {
        let record = self.get(id).await?;
        let path = self.artifact_path(&record);

        match tokio::fs::remove_file(&path).await {
            Ok(()) => debug!(path = %path.display(), "Removed backup artifact"),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "Backup artifact already absent");
            },
            Err(e) => {
                return Err(Error::io(
                    format!("removing artifact {}", path.display()),
                    e,
                ));
            },
        }

        let backend = Arc::clone(&self.backend);
        let key = id.to_string();
        let removed = tokio::task::spawn_blocking(move || backend.remove(&key))
            .await
            .context("Task join error")??;

        if !removed {
            // Raced with another delete of the same id
            return Err(Error::not_found("backup", id));
        }

        info!(backup_id = %id, filename = %record.filename, "Backup deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backup::db::open_metadata_db;
    use crate::backup::types::BackupKind;
    use chrono::Utc;
    use tempfile::TempDir;

    fn record(id: &str) -> BackupRecord {
        BackupRecord {
            id: id.to_string(),
            filename: format!("{id}.json"),
            created_at: Utc::now(),
            size_bytes: 2,
            kind: BackupKind::Manual,
            collections: ["users".to_string()].into_iter().collect(),
        }
    }

    #[test]
    fn test_list_skips_corrupted_entries() {
        let tmp = TempDir::new().unwrap();
        let db = open_metadata_db(tmp.path()).unwrap();
        let catalog = RedbCatalog::new(Arc::clone(&db));

        catalog.insert(&record("bk_good")).unwrap();

        let write_txn = db.begin_write().unwrap();
        {
            let mut table = write_txn.open_table(BACKUPS_TABLE).unwrap();
            table.insert("bk_bad", b"not json".as_slice()).unwrap();
        }
        write_txn.commit().unwrap();

        let records = catalog.list().unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].id, "bk_good");
        assert!(catalog.get("bk_bad").is_err());
    }
}
