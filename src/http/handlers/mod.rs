//! HTTP API handlers organized by resource.

pub mod auth;
pub mod backups;
pub mod drivers;
pub mod orders;
pub mod promotions;
pub mod restaurants;
pub mod rides;
pub mod stats;
pub mod system;
pub mod users;

// Re-export all handlers for use in routing
pub(crate) use auth::{login, me};
pub(crate) use backups::{
    backup_create, backup_delete, backup_list, backup_restore, backup_settings_get,
    backup_settings_update,
};
pub(crate) use drivers::{driver_create, driver_delete, driver_list, driver_update, driver_verify};
pub(crate) use orders::{order_create, order_list, order_status};
pub(crate) use promotions::{promotion_create, promotion_delete, promotion_list, promotion_update};
pub(crate) use restaurants::{
    restaurant_create, restaurant_delete, restaurant_list, restaurant_update,
};
pub(crate) use rides::{ride_create, ride_list, ride_status};
pub(crate) use stats::{stats, stats_monthly, stats_weekly};
pub(crate) use system::{health, root, seed};
#[cfg(feature = "metrics")]
pub(crate) use system::metrics_render;
pub(crate) use users::{user_create, user_delete, user_list, user_update};

use serde::Serialize;

use super::types::MessageResponse;
use super::{AppError, SharedState};
use crate::constants::MAX_LIST_LIMIT;
use crate::error::Error;
use crate::models::update_fields;
use crate::store::{Collection, Document};

/// Lists a collection, capped at [`MAX_LIST_LIMIT`].
async fn list_documents(
    state: &SharedState,
    collection: Collection,
) -> Result<Vec<Document>, AppError> {
    Ok(state.store.find_all(collection, MAX_LIST_LIMIT).await?)
}

/// Merges a partial update into a document, returning the updated document.
///
/// Empty updates are rejected with 400 before the store is touched.
async fn update_document<T: Serialize>(
    state: &SharedState,
    collection: Collection,
    entity: &str,
    id: &str,
    update: &T,
) -> Result<Document, AppError> {
    let fields = update_fields(update)?;
    state
        .store
        .update_one(collection, id, fields)
        .await?
        .ok_or_else(|| Error::not_found(entity, id).into())
}

async fn delete_document(
    state: &SharedState,
    collection: Collection,
    entity: &str,
    id: &str,
) -> Result<MessageResponse, AppError> {
    if !state.store.delete_one(collection, id).await? {
        return Err(Error::not_found(entity, id).into());
    }
    Ok(MessageResponse::new(format!("{entity} deleted")))
}
