//! Driver handlers, including verification.

use axum::{
    Json,
    extract::{Path, State},
};
use serde_json::json;

use super::super::auth::AuthAdmin;
use super::super::types::MessageResponse;
use super::super::{AppError, SharedState};
use super::{delete_document, list_documents, update_document};
use crate::error::Error;
use crate::metrics;
use crate::models::{Driver, DriverCreate, DriverUpdate};
use crate::store::{Collection, Document};

/// GET /api/drivers - List drivers.
pub(crate) async fn driver_list(
    State(state): State<SharedState>,
    _admin: AuthAdmin,
) -> Result<Json<Vec<Document>>, AppError> {
    metrics::record_api_operation("driver", "list");
    Ok(Json(list_documents(&state, Collection::Drivers).await?))
}

/// POST /api/drivers - Register an offline, unverified driver.
pub(crate) async fn driver_create(
    State(state): State<SharedState>,
    _admin: AuthAdmin,
    Json(req): Json<DriverCreate>,
) -> Result<Json<Driver>, AppError> {
    metrics::record_api_operation("driver", "create");
    let driver = Driver::from(req);
    state.store.insert_as(Collection::Drivers, &driver).await?;
    Ok(Json(driver))
}

/// PUT /api/drivers/{id}
pub(crate) async fn driver_update(
    State(state): State<SharedState>,
    _admin: AuthAdmin,
    Path(id): Path<String>,
    Json(update): Json<DriverUpdate>,
) -> Result<Json<Document>, AppError> {
    metrics::record_api_operation("driver", "update");
    let doc = update_document(&state, Collection::Drivers, "Driver", &id, &update).await?;
    Ok(Json(doc))
}

/// PUT /api/drivers/{id}/verify - Mark a driver as verified.
pub(crate) async fn driver_verify(
    State(state): State<SharedState>,
    _admin: AuthAdmin,
    Path(id): Path<String>,
) -> Result<Json<Document>, AppError> {
    metrics::record_api_operation("driver", "verify");
    let mut fields = Document::new();
    fields.insert("verified".to_string(), json!(true));
    let doc = state
        .store
        .update_one(Collection::Drivers, &id, fields)
        .await?
        .ok_or_else(|| Error::not_found("Driver", &id))?;
    Ok(Json(doc))
}

/// DELETE /api/drivers/{id}
pub(crate) async fn driver_delete(
    State(state): State<SharedState>,
    _admin: AuthAdmin,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, AppError> {
    metrics::record_api_operation("driver", "delete");
    Ok(Json(delete_document(&state, Collection::Drivers, "Driver", &id).await?))
}
