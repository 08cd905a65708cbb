//! Snapshot writer: serializes every managed collection into one artifact.
//!
//! The artifact is written and synced before its catalog entry is inserted.
//! If the insert fails the file stays on disk and the caller receives
//! [`Error::CatalogWrite`], which is distinct from [`Error::StorageWrite`].

use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use std::collections::{BTreeMap, BTreeSet};
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info};

use super::catalog::BackupCatalog;
use super::types::{ArtifactMetadata, BackupArtifact, BackupKind, BackupRecord};
use crate::constants::{BACKUP_FORMAT_VERSION, SNAPSHOT_READ_LIMIT};
use crate::error::{Error, Result};
use crate::store::{Collection, DocumentStore};

/// Time of the last completed backup in this process.
///
/// Shared by the writer, which advances it, and the scheduler, which reads
/// it to decide due-ness. Starts empty on every process start.
#[derive(Clone, Default)]
pub struct BackupMarker {
    inner: Arc<RwLock<Option<DateTime<Utc>>>>,
}

impl BackupMarker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mark(&self, at: DateTime<Utc>) {
        *self.inner.write() = Some(at);
    }

    pub fn last(&self) -> Option<DateTime<Utc>> {
        *self.inner.read()
    }
}

/// Artifact file name for a snapshot of `kind` started at `at`.
///
/// Second resolution: two snapshots of the same kind in the same second
/// share a name and the later one overwrites the earlier file.
pub fn artifact_filename(kind: BackupKind, at: DateTime<Utc>) -> String {
    format!("backup_{}_{}.json", kind, at.format("%Y%m%d_%H%M%S"))
}

fn record_id(at: DateTime<Utc>) -> String {
    let suffix = uuid::Uuid::new_v4().simple().to_string();
    format!("bk_{}_{}", at.format("%Y%m%d%H%M%S%6f"), &suffix[..8])
}

/// Writes snapshots and indexes them in the catalog.
#[derive(Clone)]
pub struct SnapshotWriter {
    store: DocumentStore,
    catalog: BackupCatalog,
    marker: BackupMarker,
}

impl SnapshotWriter {
    pub fn new(store: DocumentStore, catalog: BackupCatalog, marker: BackupMarker) -> Self {
        Self {
            store,
            catalog,
            marker,
        }
    }

    pub fn marker(&self) -> &BackupMarker {
        &self.marker
    }

    /// Snapshots every managed collection and records the artifact.
    ///
    /// # Errors
    ///
    /// - [`Error::Database`] if a collection cannot be read
    /// - [`Error::StorageWrite`] if the artifact cannot be written (nothing is indexed)
    /// - [`Error::CatalogWrite`] if the artifact was written but not indexed
    pub async fn create_snapshot(&self, kind: BackupKind) -> Result<BackupRecord> {
        self.create_snapshot_at(kind, Utc::now()).await
    }

    pub(crate) async fn create_snapshot_at(
        &self,
        kind: BackupKind,
        now: DateTime<Utc>,
    ) -> Result<BackupRecord> {
        let data = self.read_collections().await?;
        let collections: BTreeSet<String> = data.keys().cloned().collect();

        let artifact = BackupArtifact {
            metadata: ArtifactMetadata {
                created_at: now,
                kind,
                version: BACKUP_FORMAT_VERSION.to_string(),
            },
            data,
        };

        let filename = artifact_filename(kind, now);
        let path = self.catalog.backup_dir().join(&filename);
        let size_bytes = write_artifact(path, artifact).await?;
        debug!(filename = %filename, size_bytes, "Backup artifact written");

        let record = BackupRecord {
            id: record_id(now),
            filename,
            created_at: now,
            size_bytes,
            kind,
            collections,
        };

        self.catalog
            .insert(record.clone())
            .await
            .map_err(|e| Error::catalog_write(&record.filename, e))?;

        self.marker.mark(now);
        info!(
            backup_id = %record.id,
            filename = %record.filename,
            kind = %kind,
            size_bytes,
            "Backup created"
        );

        Ok(record)
    }

    async fn read_collections(&self) -> Result<BTreeMap<String, Vec<crate::store::Document>>> {
        let mut data = BTreeMap::new();
        for collection in Collection::ALL {
            // Empty collections are kept as empty arrays, never omitted
            let docs = self.store.find_all(collection, SNAPSHOT_READ_LIMIT).await?;
            data.insert(collection.name().to_string(), docs);
        }
        Ok(data)
    }
}

/// Serializes and durably writes an artifact, returning its byte length.
async fn write_artifact(path: PathBuf, artifact: BackupArtifact) -> Result<u64> {
    let target = path.clone();
    tokio::task::spawn_blocking(move || write_artifact_sync(&target, &artifact))
        .await
        .map_err(|e| Error::storage_write(&path, std::io::Error::other(e)))?
        .map_err(|e| Error::storage_write(&path, e))
}

fn write_artifact_sync(path: &Path, artifact: &BackupArtifact) -> std::io::Result<u64> {
    let bytes = serde_json::to_vec_pretty(artifact)?;

    // Staged beside the target and renamed into place. A failed write leaves
    // any existing artifact untouched
    let tmp_path = temp_path(path);
    let result = write_synced(&tmp_path, &bytes).and_then(|len| {
        std::fs::rename(&tmp_path, path)?;
        Ok(len)
    });
    if result.is_err() {
        let _ = std::fs::remove_file(&tmp_path);
    }
    result
}

fn write_synced(path: &Path, bytes: &[u8]) -> std::io::Result<u64> {
    let mut file = File::create(path)?;
    file.write_all(bytes)?;
    file.sync_all()?;
    Ok(file.metadata()?.len())
}

/// `<artifact>.tmp`, in the same directory as the artifact.
fn temp_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(ToOwned::to_owned).unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}
