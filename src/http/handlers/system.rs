//! Root, health, seed and metrics handlers.

use axum::{Json, extract::State};

use super::super::audit::{AuditEvent, log_audit_event};
use super::super::auth::AuthAdmin;
use super::super::types::{HealthResponse, MessageResponse, RootResponse};
use super::super::{AppError, SharedState};
use crate::constants::API_VERSION;
use crate::metrics;
use crate::models::seed as demo;

/// GET /api/ - API name and version.
pub(crate) async fn root() -> Json<RootResponse> {
    Json(RootResponse {
        message: "Transfers Admin API".to_string(),
        version: API_VERSION.to_string(),
    })
}

/// GET /health - Liveness probe.
pub(crate) async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// POST /api/seed - Replace operational collections with the demo dataset.
///
/// Admin accounts are left untouched.
pub(crate) async fn seed(
    State(state): State<SharedState>,
    AuthAdmin(claims): AuthAdmin,
) -> Result<Json<MessageResponse>, AppError> {
    metrics::record_api_operation("seed", "load");
    demo::seed(&state.store).await?;
    log_audit_event(AuditEvent::DatabaseSeeded { admin: claims.email });
    Ok(Json(MessageResponse::new("Database seeded successfully")))
}

/// GET /metrics - Prometheus text exposition.
#[cfg(feature = "metrics")]
pub(crate) async fn metrics_render(State(state): State<SharedState>) -> String {
    state
        .metrics
        .as_ref()
        .map(|handle| handle.render())
        .unwrap_or_default()
}
