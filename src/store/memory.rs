//! In-memory document storage backend.
//!
//! Non-persistent storage for tests and embedding. Each collection is an
//! ordered map so listing order matches the redb backend.

use super::backend::DocumentBackend;
use super::collection::{Collection, Document, document_id};
use anyhow::Result;
use async_trait::async_trait;
use parking_lot::RwLock;
use std::collections::{BTreeMap, HashMap};

/// In-memory document storage backend.
///
/// All data is lost when the process exits.
#[derive(Default)]
pub struct MemoryBackend {
    collections: RwLock<HashMap<Collection, BTreeMap<String, Document>>>,
}

impl MemoryBackend {
    /// Creates a new empty in-memory backend.
    pub fn new() -> Self {
        Self::default()
    }

    fn keyed(docs: Vec<Document>) -> Result<Vec<(String, Document)>> {
        docs.into_iter()
            .map(|doc| Ok((document_id(&doc)?, doc)))
            .collect()
    }
}

#[async_trait]
impl DocumentBackend for MemoryBackend {
    async fn find_all(&self, collection: Collection, limit: usize) -> Result<Vec<Document>> {
        let collections = self.collections.read();
        Ok(collections
            .get(&collection)
            .map(|docs| docs.values().take(limit).cloned().collect())
            .unwrap_or_default())
    }

    async fn find_one(&self, collection: Collection, id: &str) -> Result<Option<Document>> {
        let collections = self.collections.read();
        Ok(collections
            .get(&collection)
            .and_then(|docs| docs.get(id))
            .cloned())
    }

    async fn insert_one(&self, collection: Collection, doc: Document) -> Result<()> {
        self.insert_many(collection, vec![doc]).await
    }

    async fn insert_many(&self, collection: Collection, docs: Vec<Document>) -> Result<()> {
        // Validate every id before touching the map so a bad batch writes nothing
        let keyed = Self::keyed(docs)?;
        let mut collections = self.collections.write();
        collections.entry(collection).or_default().extend(keyed);
        Ok(())
    }

    async fn update_one(
        &self,
        collection: Collection,
        id: &str,
        fields: Document,
    ) -> Result<Option<Document>> {
        let mut collections = self.collections.write();
        Ok(collections
            .get_mut(&collection)
            .and_then(|docs| docs.get_mut(id))
            .map(|doc| {
                doc.extend(fields);
                doc.clone()
            }))
    }

    async fn delete_one(&self, collection: Collection, id: &str) -> Result<bool> {
        let mut collections = self.collections.write();
        Ok(collections
            .get_mut(&collection)
            .is_some_and(|docs| docs.remove(id).is_some()))
    }

    async fn replace_all(&self, collection: Collection, docs: Vec<Document>) -> Result<()> {
        let keyed = Self::keyed(docs)?;
        let mut collections = self.collections.write();
        collections.insert(collection, keyed.into_iter().collect());
        Ok(())
    }

    async fn count(&self, collection: Collection) -> Result<usize> {
        let collections = self.collections.read();
        Ok(collections.get(&collection).map_or(0, BTreeMap::len))
    }
}
