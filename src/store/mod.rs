//! Document store for the managed collections.
//!
//! Holds users, drivers, restaurants, rides, orders, promotions and admin
//! accounts as JSON documents keyed by id. Supports multiple backends:
//!
//! - **RedbBackend**: Persistent storage with ACID guarantees (default for `serve`)
//! - **MemoryBackend**: Fast, non-persistent storage (testing/embedding)
//!
//! # Example
//!
//! ```ignore
//! use transfers_admin::store::{Collection, DocumentStore};
//!
//! let store = DocumentStore::file("~/.transfers-admin/transfers.redb")?;
//! let users = store.find_all(Collection::Users, 1000).await?;
//! ```

mod backend;
mod collection;
mod memory;
mod redb;
#[allow(clippy::module_inception)]
mod store;

#[cfg(test)]
mod tests;

pub use backend::DocumentBackend;
pub use collection::{Collection, Document};
pub use memory::MemoryBackend;
pub use redb::RedbBackend;
pub use store::{DocumentStore, to_document};
