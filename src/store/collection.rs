//! The closed set of managed collections and the document type they hold.

use anyhow::Result;
use redb::TableDefinition;
use serde_json::{Map, Value};

/// A stored record: a JSON object keyed by its `id` field.
///
/// Collections are kept as generic field maps so that fields the API does
/// not know about still survive a backup/restore round trip.
pub type Document = Map<String, Value>;

/// Managed collections. The set is fixed at compile time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Collection {
    Users,
    Drivers,
    Restaurants,
    Rides,
    Orders,
    Promotions,
    Admins,
}

impl Collection {
    /// Every managed collection, in snapshot order.
    pub const ALL: [Self; 7] = [
        Self::Users,
        Self::Drivers,
        Self::Restaurants,
        Self::Rides,
        Self::Orders,
        Self::Promotions,
        Self::Admins,
    ];

    /// Stable collection name, used as table name and artifact key.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Users => "users",
            Self::Drivers => "drivers",
            Self::Restaurants => "restaurants",
            Self::Rides => "rides",
            Self::Orders => "orders",
            Self::Promotions => "promotions",
            Self::Admins => "admins",
        }
    }

    /// Resolves a collection by name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.name() == name)
    }

    /// redb table holding this collection's documents as JSON.
    pub(crate) const fn table(self) -> TableDefinition<'static, &'static str, &'static [u8]> {
        TableDefinition::new(self.name())
    }

    /// Names of every managed collection.
    pub fn names() -> Vec<String> {
        Self::ALL.iter().map(|c| c.name().to_string()).collect()
    }
}

impl std::fmt::Display for Collection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Extracts the storage key of a document.
///
/// String ids are used as-is; numeric ids are rendered in decimal.
pub(crate) fn document_id(doc: &Document) -> Result<String> {
    match doc.get("id") {
        Some(Value::String(id)) if !id.is_empty() => Ok(id.clone()),
        Some(Value::Number(n)) => Ok(n.to_string()),
        _ => anyhow::bail!("Document has no usable 'id' field"),
    }
}
