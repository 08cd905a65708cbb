//! User handlers.

use axum::{
    Json,
    extract::{Path, State},
};

use super::super::auth::AuthAdmin;
use super::super::types::MessageResponse;
use super::super::{AppError, SharedState};
use super::{delete_document, list_documents, update_document};
use crate::metrics;
use crate::models::{User, UserCreate, UserUpdate};
use crate::store::{Collection, Document};

/// GET /api/users - List users.
pub(crate) async fn user_list(
    State(state): State<SharedState>,
    _admin: AuthAdmin,
) -> Result<Json<Vec<Document>>, AppError> {
    metrics::record_api_operation("user", "list");
    Ok(Json(list_documents(&state, Collection::Users).await?))
}

/// POST /api/users - Create an active user joined today.
pub(crate) async fn user_create(
    State(state): State<SharedState>,
    _admin: AuthAdmin,
    Json(req): Json<UserCreate>,
) -> Result<Json<User>, AppError> {
    metrics::record_api_operation("user", "create");
    let user = User::from(req);
    state.store.insert_as(Collection::Users, &user).await?;
    Ok(Json(user))
}

/// PUT /api/users/{id} - Merge the provided fields.
pub(crate) async fn user_update(
    State(state): State<SharedState>,
    _admin: AuthAdmin,
    Path(id): Path<String>,
    Json(update): Json<UserUpdate>,
) -> Result<Json<Document>, AppError> {
    metrics::record_api_operation("user", "update");
    let doc = update_document(&state, Collection::Users, "User", &id, &update).await?;
    Ok(Json(doc))
}

/// DELETE /api/users/{id}
pub(crate) async fn user_delete(
    State(state): State<SharedState>,
    _admin: AuthAdmin,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, AppError> {
    metrics::record_api_operation("user", "delete");
    Ok(Json(delete_document(&state, Collection::Users, "User", &id).await?))
}
