//! Restaurant handlers.

use axum::{
    Json,
    extract::{Path, State},
};

use super::super::auth::AuthAdmin;
use super::super::types::MessageResponse;
use super::super::{AppError, SharedState};
use super::{delete_document, list_documents, update_document};
use crate::metrics;
use crate::models::{Restaurant, RestaurantCreate, RestaurantUpdate};
use crate::store::{Collection, Document};

pub(crate) async fn restaurant_list(
    State(state): State<SharedState>,
    _admin: AuthAdmin,
) -> Result<Json<Vec<Document>>, AppError> {
    metrics::record_api_operation("restaurant", "list");
    Ok(Json(list_documents(&state, Collection::Restaurants).await?))
}

pub(crate) async fn restaurant_create(
    State(state): State<SharedState>,
    _admin: AuthAdmin,
    Json(req): Json<RestaurantCreate>,
) -> Result<Json<Restaurant>, AppError> {
    metrics::record_api_operation("restaurant", "create");
    let restaurant = Restaurant::from(req);
    state
        .store
        .insert_as(Collection::Restaurants, &restaurant)
        .await?;
    Ok(Json(restaurant))
}

pub(crate) async fn restaurant_update(
    State(state): State<SharedState>,
    _admin: AuthAdmin,
    Path(id): Path<String>,
    Json(update): Json<RestaurantUpdate>,
) -> Result<Json<Document>, AppError> {
    metrics::record_api_operation("restaurant", "update");
    let doc =
        update_document(&state, Collection::Restaurants, "Restaurant", &id, &update).await?;
    Ok(Json(doc))
}

pub(crate) async fn restaurant_delete(
    State(state): State<SharedState>,
    _admin: AuthAdmin,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, AppError> {
    metrics::record_api_operation("restaurant", "delete");
    let message = delete_document(&state, Collection::Restaurants, "Restaurant", &id).await?;
    Ok(Json(message))
}
