//! Redb-backed document storage backend.
//!
//! Provides persistent document storage using redb with ACID guarantees.
//! Each managed collection lives in its own table, keyed by document id,
//! with the document serialized as JSON.

use super::backend::DocumentBackend;
use super::collection::{Collection, Document, document_id};
use anyhow::{Context, Result};
use async_trait::async_trait;
use redb::{Database, ReadableDatabase, ReadableTable, WriteTransaction};
use std::path::Path;
use std::sync::Arc;

/// Redb-backed document storage backend.
///
/// # Thread Safety
///
/// `RedbBackend` is `Clone` and can be shared across threads. The underlying
/// database handles concurrent access safely.
#[derive(Clone)]
pub struct RedbBackend {
    db: Arc<Database>,
}

impl RedbBackend {
    /// Opens or creates a redb database at the given path.
    ///
    /// Creates parent directories if needed and initializes one table per
    /// managed collection so that reads never hit a missing table.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Parent directory cannot be created
    /// - Database file cannot be opened or created (permissions, disk full, etc.)
    /// - Initialization transaction fails to begin or commit
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create database directory: {}", parent.display())
            })?;
        }

        let db = Database::create(path)
            .with_context(|| format!("Failed to open database: {}", path.display()))?;

        let write_txn = db
            .begin_write()
            .context("Failed to begin initialization transaction")?;
        for collection in Collection::ALL {
            let _table = write_txn
                .open_table(collection.table())
                .with_context(|| format!("Failed to initialize '{collection}' table"))?;
        }
        write_txn
            .commit()
            .context("Failed to commit initialization transaction")?;

        Ok(Self { db: Arc::new(db) })
    }

    fn find_all_sync(&self, collection: Collection, limit: usize) -> Result<Vec<Document>> {
        let read_txn = self
            .db
            .begin_read()
            .context("Failed to begin read transaction")?;

        let table = read_txn
            .open_table(collection.table())
            .with_context(|| format!("Failed to open '{collection}' table"))?;

        let mut docs = Vec::new();
        for item in table
            .iter()
            .with_context(|| format!("Failed to iterate '{collection}' table"))?
            .take(limit)
        {
            let (key, value) = item.context("Failed to read document entry")?;
            let doc: Document = serde_json::from_slice(value.value()).with_context(|| {
                format!("Failed to deserialize {collection} document '{}'", key.value())
            })?;
            docs.push(doc);
        }

        Ok(docs)
    }

    fn find_one_sync(&self, collection: Collection, id: &str) -> Result<Option<Document>> {
        let read_txn = self
            .db
            .begin_read()
            .context("Failed to begin read transaction")?;

        let table = read_txn
            .open_table(collection.table())
            .with_context(|| format!("Failed to open '{collection}' table"))?;

        let result = table
            .get(id)
            .with_context(|| format!("Failed to read {collection} document '{id}'"))?;

        match result {
            Some(guard) => {
                let doc = serde_json::from_slice(guard.value()).with_context(|| {
                    format!("Failed to deserialize {collection} document '{id}'")
                })?;
                Ok(Some(doc))
            },
            None => Ok(None),
        }
    }

    /// Writes documents into an open transaction.
    fn put_docs(txn: &WriteTransaction, collection: Collection, docs: &[Document]) -> Result<()> {
        let mut table = txn
            .open_table(collection.table())
            .with_context(|| format!("Failed to open '{collection}' table"))?;

        for doc in docs {
            let id = document_id(doc)?;
            let json = serde_json::to_vec(doc).context("Failed to serialize document to JSON")?;
            table
                .insert(id.as_str(), json.as_slice())
                .with_context(|| format!("Failed to insert {collection} document '{id}'"))?;
        }

        Ok(())
    }

    fn insert_many_sync(&self, collection: Collection, docs: &[Document]) -> Result<()> {
        let write_txn = self
            .db
            .begin_write()
            .context("Failed to begin write transaction")?;

        Self::put_docs(&write_txn, collection, docs)?;

        write_txn
            .commit()
            .context("Failed to commit insert transaction")?;

        Ok(())
    }

    fn update_one_sync(
        &self,
        collection: Collection,
        id: &str,
        fields: Document,
    ) -> Result<Option<Document>> {
        let write_txn = self
            .db
            .begin_write()
            .context("Failed to begin write transaction")?;

        let updated = {
            let mut table = write_txn
                .open_table(collection.table())
                .with_context(|| format!("Failed to open '{collection}' table"))?;

            let existing: Option<Document> = match table
                .get(id)
                .with_context(|| format!("Failed to read {collection} document '{id}'"))?
            {
                Some(guard) => Some(serde_json::from_slice(guard.value()).with_context(|| {
                    format!("Failed to deserialize {collection} document '{id}'")
                })?),
                None => None,
            };

            match existing {
                Some(mut doc) => {
                    doc.extend(fields);
                    let json =
                        serde_json::to_vec(&doc).context("Failed to serialize document to JSON")?;
                    table
                        .insert(id, json.as_slice())
                        .with_context(|| format!("Failed to update {collection} document '{id}'"))?;
                    Some(doc)
                },
                None => None,
            }
        };

        write_txn
            .commit()
            .context("Failed to commit update transaction")?;

        Ok(updated)
    }

    fn delete_one_sync(&self, collection: Collection, id: &str) -> Result<bool> {
        let write_txn = self
            .db
            .begin_write()
            .context("Failed to begin write transaction")?;

        let removed = {
            let mut table = write_txn
                .open_table(collection.table())
                .with_context(|| format!("Failed to open '{collection}' table"))?;

            table
                .remove(id)
                .with_context(|| format!("Failed to remove {collection} document '{id}'"))?
                .is_some()
        };

        write_txn
            .commit()
            .context("Failed to commit delete transaction")?;

        Ok(removed)
    }

    fn replace_all_sync(&self, collection: Collection, docs: &[Document]) -> Result<()> {
        let write_txn = self
            .db
            .begin_write()
            .context("Failed to begin write transaction")?;

        {
            let mut table = write_txn
                .open_table(collection.table())
                .with_context(|| format!("Failed to open '{collection}' table"))?;

            let mut keys = Vec::new();
            for item in table
                .iter()
                .with_context(|| format!("Failed to iterate '{collection}' table"))?
            {
                let (key, _) = item.context("Failed to read document entry")?;
                keys.push(key.value().to_string());
            }

            for key in &keys {
                table
                    .remove(key.as_str())
                    .with_context(|| format!("Failed to clear {collection} document '{key}'"))?;
            }
        }

        Self::put_docs(&write_txn, collection, docs)?;

        write_txn
            .commit()
            .context("Failed to commit replace transaction")?;

        Ok(())
    }
}

#[async_trait]
impl DocumentBackend for RedbBackend {
    async fn find_all(&self, collection: Collection, limit: usize) -> Result<Vec<Document>> {
        let backend = self.clone();
        tokio::task::spawn_blocking(move || backend.find_all_sync(collection, limit))
            .await
            .context("Task join error")?
    }

    async fn find_one(&self, collection: Collection, id: &str) -> Result<Option<Document>> {
        let backend = self.clone();
        let id = id.to_string();
        tokio::task::spawn_blocking(move || backend.find_one_sync(collection, &id))
            .await
            .context("Task join error")?
    }

    async fn insert_one(&self, collection: Collection, doc: Document) -> Result<()> {
        self.insert_many(collection, vec![doc]).await
    }

    async fn insert_many(&self, collection: Collection, docs: Vec<Document>) -> Result<()> {
        let backend = self.clone();
        tokio::task::spawn_blocking(move || backend.insert_many_sync(collection, &docs))
            .await
            .context("Task join error")?
    }

    async fn update_one(
        &self,
        collection: Collection,
        id: &str,
        fields: Document,
    ) -> Result<Option<Document>> {
        let backend = self.clone();
        let id = id.to_string();
        tokio::task::spawn_blocking(move || backend.update_one_sync(collection, &id, fields))
            .await
            .context("Task join error")?
    }

    async fn delete_one(&self, collection: Collection, id: &str) -> Result<bool> {
        let backend = self.clone();
        let id = id.to_string();
        tokio::task::spawn_blocking(move || backend.delete_one_sync(collection, &id))
            .await
            .context("Task join error")?
    }

    async fn replace_all(&self, collection: Collection, docs: Vec<Document>) -> Result<()> {
        let backend = self.clone();
        tokio::task::spawn_blocking(move || backend.replace_all_sync(collection, &docs))
            .await
            .context("Task join error")?
    }
}
