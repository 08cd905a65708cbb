//! Promotion handlers. Codes are unique across promotions.

use axum::{
    Json,
    extract::{Path, State},
};

use super::super::auth::AuthAdmin;
use super::super::types::MessageResponse;
use super::super::{AppError, SharedState};
use super::{delete_document, list_documents, update_document};
use crate::error::Error;
use crate::metrics;
use crate::models::{Promotion, PromotionCreate, PromotionUpdate};
use crate::store::{Collection, Document};

pub(crate) async fn promotion_list(
    State(state): State<SharedState>,
    _admin: AuthAdmin,
) -> Result<Json<Vec<Document>>, AppError> {
    metrics::record_api_operation("promotion", "list");
    Ok(Json(list_documents(&state, Collection::Promotions).await?))
}

/// POST /api/promotions - Create an active promotion; 400 if the code exists.
pub(crate) async fn promotion_create(
    State(state): State<SharedState>,
    _admin: AuthAdmin,
    Json(req): Json<PromotionCreate>,
) -> Result<Json<Promotion>, AppError> {
    metrics::record_api_operation("promotion", "create");

    let existing = state
        .store
        .find_by_field(Collection::Promotions, "code", &req.code)
        .await?;
    if existing.is_some() {
        return Err(Error::Conflict("Promotion code already exists".to_string()).into());
    }

    let promotion = Promotion::from(req);
    state
        .store
        .insert_as(Collection::Promotions, &promotion)
        .await?;
    Ok(Json(promotion))
}

pub(crate) async fn promotion_update(
    State(state): State<SharedState>,
    _admin: AuthAdmin,
    Path(id): Path<String>,
    Json(update): Json<PromotionUpdate>,
) -> Result<Json<Document>, AppError> {
    metrics::record_api_operation("promotion", "update");
    let doc = update_document(&state, Collection::Promotions, "Promotion", &id, &update).await?;
    Ok(Json(doc))
}

pub(crate) async fn promotion_delete(
    State(state): State<SharedState>,
    _admin: AuthAdmin,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, AppError> {
    metrics::record_api_operation("promotion", "delete");
    let message = delete_document(&state, Collection::Promotions, "Promotion", &id).await?;
    Ok(Json(message))
}
