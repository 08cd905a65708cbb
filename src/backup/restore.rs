//! Restore engine: replaces live collections with an artifact's contents.
//!
//! Each collection is replaced in its own write. A failure partway leaves
//! earlier collections restored and later ones untouched, reported as
//! [`Error::PartialRestore`].

use tracing::{info, warn};

use super::catalog::BackupCatalog;
use super::types::{BackupArtifact, RestoreOutcome};
use crate::error::{Error, Result};
use crate::store::{Collection, DocumentStore};

#[derive(Clone)]
pub struct RestoreEngine {
    store: DocumentStore,
    catalog: BackupCatalog,
}

impl RestoreEngine {
    pub fn new(store: DocumentStore, catalog: BackupCatalog) -> Self {
        Self { store, catalog }
    }

    /// Restores the backup with the given id.
    ///
    /// # Errors
    ///
    /// - [`Error::NotFound`] if the id is not cataloged
    /// - [`Error::ArtifactMissing`] if the entry exists but its file does not
    /// - [`Error::ArtifactCorrupt`] if the file cannot be decoded
    /// - [`Error::PartialRestore`] if a collection fails after others were replaced
    pub async fn restore(&self, id: &str) -> Result<RestoreOutcome> {
        let record = self.catalog.get(id).await?;
        let path = self.catalog.artifact_path(&record);

        let bytes = match tokio::fs::read(&path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(Error::ArtifactMissing {
                    id: record.id,
                    filename: record.filename,
                });
            },
            Err(e) => return Err(Error::io(format!("reading artifact {}", path.display()), e)),
        };

        let artifact: BackupArtifact =
            serde_json::from_slice(&bytes).map_err(|e| Error::ArtifactCorrupt {
                filename: record.filename.clone(),
                reason: e.to_string(),
            })?;

        let mut completed = Vec::new();
        for (name, docs) in artifact.data {
            let Some(collection) = Collection::from_name(&name) else {
                warn!(backup_id = %id, collection = %name, "Skipping unknown collection in artifact");
                continue;
            };

            let count = docs.len();
            if let Err(e) = self.store.replace_all(collection, docs).await {
                return Err(Error::PartialRestore {
                    completed,
                    failed: name,
                    reason: format!("{e:#}"),
                });
            }

            info!(backup_id = %id, collection = %name, documents = count, "Collection restored");
            completed.push(name);
        }

        Ok(RestoreOutcome {
            backup_id: record.id,
            collections: completed,
        })
    }
}
