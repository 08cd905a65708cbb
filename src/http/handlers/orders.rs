//! Order handlers.

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
use crate::models::{Order, OrderCreate, OrderStatusQuery};
use crate::store::{Collection, Document};

pub(crate) async fn order_list(
    State(state): State<SharedState>,
    _admin: AuthAdmin,
) -> Result<Json<Vec<Document>>, AppError> {
    metrics::record_api_operation("order", "list");
    Ok(Json(list_documents(&state, Collection::Orders).await?))
}

/// POST /api/orders - Create a preparing order with no driver assigned.
pub(crate) async fn order_create(
    State(state): State<SharedState>,
    _admin: AuthAdmin,
    Json(req): Json<OrderCreate>,
) -> Result<Json<Order>, AppError> {
    metrics::record_api_operation("order", "create");
    let order = Order::from(req);
    state.store.insert_as(Collection::Orders, &order).await?;
    Ok(Json(order))
}

/// PUT /api/orders/{id}/status?status=&driver=
///
/// An empty `driver` leaves the assigned driver unchanged.
pub(crate) async fn order_status(
    State(state): State<SharedState>,
    _admin: AuthAdmin,
    Path(id): Path<String>,
    Query(query): Query<OrderStatusQuery>,
) -> Result<Json<Document>, AppError> {
    metrics::record_api_operation("order", "status");
    let mut fields = Document::new();
    fields.insert("status".to_string(), json!(query.status));
    if let Some(driver) = query.driver.filter(|d| !d.is_empty()) {
        fields.insert("driver".to_string(), json!(driver));
    }

    let doc = state
        .store
        .update_one(Collection::Orders, &id, fields)
        .await?
        .ok_or_else(|| Error::not_found("Order", &id))?;
    Ok(Json(doc))
}
