//! Backend trait for the document store.
//!
//! Defines the interface that all storage backends must implement,
//! enabling pluggable storage (redb, memory, etc.).

use super::collection::{Collection, Document};
use anyhow::Result;
use async_trait::async_trait;

/// Backend trait for document storage.
///
/// All backends must be thread-safe (`Send + Sync`) for use with tokio.
/// Documents are keyed by their `id` field; inserting a document whose id
/// already exists replaces it.
#[async_trait]
pub trait DocumentBackend: Send + Sync + 'static {
    /// Returns up to `limit` documents of a collection, ordered by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying storage operation fails.
    async fn find_all(&self, collection: Collection, limit: usize) -> Result<Vec<Document>>;

    /// Retrieves a document by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying storage operation fails.
    async fn find_one(&self, collection: Collection, id: &str) -> Result<Option<Document>>;

    /// Stores a single document.
    ///
    /// # Errors
    ///
    /// Returns an error if the document has no id or the write fails.
    async fn insert_one(&self, collection: Collection, doc: Document) -> Result<()>;

    /// Stores several documents in one write.
    ///
    /// # Errors
    ///
    /// Returns an error if any document has no id or the write fails.
    async fn insert_many(&self, collection: Collection, docs: Vec<Document>) -> Result<()>;

    /// Merges `fields` into an existing document and returns the result.
    ///
    /// Returns `Ok(None)` if no document has that id.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying storage operation fails.
    async fn update_one(
        &self,
        collection: Collection,
        id: &str,
        fields: Document,
    ) -> Result<Option<Document>>;

    /// Deletes a document. Returns `Ok(true)` if it existed.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying storage operation fails.
    async fn delete_one(&self, collection: Collection, id: &str) -> Result<bool>;

    /// Removes every document of a collection, then inserts `docs`.
    ///
    /// Both steps happen in one write, so readers see either the old or the
    /// new contents of the collection. An empty `docs` clears the collection.
    ///
    /// # Errors
    ///
    /// Returns an error if any document has no id or the write fails.
    async fn replace_all(&self, collection: Collection, docs: Vec<Document>) -> Result<()>;

    /// Counts documents in a collection.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying storage operation fails.
    async fn count(&self, collection: Collection) -> Result<usize> {
        Ok(self.find_all(collection, usize::MAX).await?.len())
    }
}
