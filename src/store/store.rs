//! High-level `DocumentStore` wrapper over backend implementations.

use super::backend::DocumentBackend;
use super::collection::{Collection, Document};
use super::memory::MemoryBackend;
use super::redb::RedbBackend;
use anyhow::{Context, Result};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::path::Path;
use std::sync::Arc;

/// High-level document store interface.
///
/// Wraps a `DocumentBackend` implementation and adds typed helpers used by
/// the API handlers. Backup and restore work on raw [`Document`]s.
///
/// # Thread Safety
///
/// `DocumentStore` is `Clone` and can be shared across threads.
#[derive(Clone)]
pub struct DocumentStore {
    backend: Arc<dyn DocumentBackend>,
}

impl DocumentStore {
    /// Creates a store backed by a file-based redb database.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or created.
    pub fn file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let backend = RedbBackend::open(path)?;
        Ok(Self {
            backend: Arc::new(backend),
        })
    }

    /// Creates a store backed by memory. All data is lost on exit.
    pub fn memory() -> Self {
        Self {
            backend: Arc::new(MemoryBackend::new()),
        }
    }

    /// Creates a store with a custom backend.
    pub fn custom<B: DocumentBackend>(backend: B) -> Self {
        Self {
            backend: Arc::new(backend),
        }
    }

    /// Returns up to `limit` documents, ordered by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying storage operation fails.
    pub async fn find_all(&self, collection: Collection, limit: usize) -> Result<Vec<Document>> {
        self.backend.find_all(collection, limit).await
    }

    /// Retrieves a document by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying storage operation fails.
    pub async fn find_one(&self, collection: Collection, id: &str) -> Result<Option<Document>> {
        self.backend.find_one(collection, id).await
    }

    /// Finds the first document whose `field` equals `value` as a string.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying storage operation fails.
    pub async fn find_by_field(
        &self,
        collection: Collection,
        field: &str,
        value: &str,
    ) -> Result<Option<Document>> {
        let docs = self.backend.find_all(collection, usize::MAX).await?;
        Ok(docs
            .into_iter()
            .find(|doc| doc.get(field).and_then(|v| v.as_str()) == Some(value)))
    }

    /// Stores a single document.
    ///
    /// # Errors
    ///
    /// Returns an error if the document has no id or the write fails.
    pub async fn insert_one(&self, collection: Collection, doc: Document) -> Result<()> {
        self.backend.insert_one(collection, doc).await
    }

    /// Merges `fields` into a document and returns the updated document.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying storage operation fails.
    pub async fn update_one(
        &self,
        collection: Collection,
        id: &str,
        fields: Document,
    ) -> Result<Option<Document>> {
        self.backend.update_one(collection, id, fields).await
    }

    /// Deletes a document. Returns `Ok(true)` if it existed.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying storage operation fails.
    pub async fn delete_one(&self, collection: Collection, id: &str) -> Result<bool> {
        self.backend.delete_one(collection, id).await
    }

    /// Replaces the entire contents of a collection.
    ///
    /// # Errors
    ///
    /// Returns an error if any document has no id or the write fails.
    pub async fn replace_all(&self, collection: Collection, docs: Vec<Document>) -> Result<()> {
        self.backend.replace_all(collection, docs).await
    }

    /// Counts documents in a collection.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying storage operation fails.
    pub async fn count(&self, collection: Collection) -> Result<usize> {
        self.backend.count(collection).await
    }

    /// Returns up to `limit` documents deserialized as `T`.
    ///
    /// # Errors
    ///
    /// Returns an error if reading fails or a document does not match `T`.
    pub async fn find_all_as<T: DeserializeOwned>(
        &self,
        collection: Collection,
        limit: usize,
    ) -> Result<Vec<T>> {
        self.find_all(collection, limit)
            .await?
            .into_iter()
            .map(|doc| {
                serde_json::from_value(doc.into())
                    .with_context(|| format!("Malformed document in '{collection}'"))
            })
            .collect()
    }

    /// Serializes `value` and stores it.
    ///
    /// # Errors
    ///
    /// Returns an error if `value` does not serialize to an object with an id.
    pub async fn insert_as<T: Serialize>(&self, collection: Collection, value: &T) -> Result<()> {
        self.insert_one(collection, to_document(value)?).await
    }
}

/// Serializes a value into a [`Document`].
///
/// # Errors
///
/// Returns an error if `value` does not serialize to a JSON object.
pub fn to_document<T: Serialize>(value: &T) -> Result<Document> {
    match serde_json::to_value(value).context("Failed to serialize document")? {
        serde_json::Value::Object(map) => Ok(map),
        other => anyhow::bail!("Expected a JSON object, got {other}"),
    }
}
