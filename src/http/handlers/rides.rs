//! Ride handlers.
//!
//! Rides store `from_location` / `to_location`; every response renames
//! them to `from` / `to`.

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde_json::json;

use super::super::auth::AuthAdmin;
use super::super::{AppError, SharedState};
use super::list_documents;
use crate::error::Error;
use crate::metrics;
use crate::models::{Ride, RideCreate, RideStatusQuery, expose_ride};
use crate::store::{Collection, Document, to_document};

pub(crate) async fn ride_list(
    State(state): State<SharedState>,
    _admin: AuthAdmin,
) -> Result<Json<Vec<Document>>, AppError> {
    metrics::record_api_operation("ride", "list");
    let rides = list_documents(&state, Collection::Rides).await?;
    Ok(Json(rides.into_iter().map(expose_ride).collect()))
}

/// POST /api/rides - Create a pending ride.
pub(crate) async fn ride_create(
    State(state): State<SharedState>,
    _admin: AuthAdmin,
    Json(req): Json<RideCreate>,
) -> Result<Json<Document>, AppError> {
    metrics::record_api_operation("ride", "create");
    let doc = to_document(&Ride::from(req))?;
    state.store.insert_one(Collection::Rides, doc.clone()).await?;
    Ok(Json(expose_ride(doc)))
}

/// PUT /api/rides/{id}/status?status=
pub(crate) async fn ride_status(
    State(state): State<SharedState>,
    _admin: AuthAdmin,
    Path(id): Path<String>,
    Query(query): Query<RideStatusQuery>,
) -> Result<Json<Document>, AppError> {
    metrics::record_api_operation("ride", "status");
    let mut fields = Document::new();
    fields.insert("status".to_string(), json!(query.status));
    let doc = state
        .store
        .update_one(Collection::Rides, &id, fields)
        .await?
        .ok_or_else(|| Error::not_found("Ride", &id))?;
    Ok(Json(expose_ride(doc)))
}
