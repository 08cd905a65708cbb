//! Dashboard statistics handlers.

use axum::{Json, extract::State};

use super::super::auth::AuthAdmin;
use super::super::{AppError, SharedState};
use crate::metrics;
use crate::models::stats::{self as dashboard, MonthlyPoint, Stats, WeeklyPoint};
use crate::models::today;

/// GET /api/stats - Totals and today's activity.
pub(crate) async fn stats(
    State(state): State<SharedState>,
    _admin: AuthAdmin,
) -> Result<Json<Stats>, AppError> {
    metrics::record_api_operation("stats", "summary");
    Ok(Json(dashboard::compute(&state.store, &today()).await?))
}

pub(crate) async fn stats_weekly(
    State(state): State<SharedState>,
    _admin: AuthAdmin,
) -> Result<Json<Vec<WeeklyPoint>>, AppError> {
    metrics::record_api_operation("stats", "weekly");
    Ok(Json(dashboard::weekly(&state.store).await?))
}

pub(crate) async fn stats_monthly(_admin: AuthAdmin) -> Json<Vec<MonthlyPoint>> {
    metrics::record_api_operation("stats", "monthly");
    Json(dashboard::monthly())
}
