//! HTTP API for the admin backend.
//!
//! # Routes
//!
//! ## Public
//! - `GET /api/` - API name and version
//! - `GET /health` - Health check
//! - `POST /api/auth/login` - Exchange credentials for a bearer token
//! - `GET /metrics` - Prometheus metrics (with the `metrics` feature)
//!
//! ## Authenticated (`Authorization: Bearer <token>`)
//! - `GET /api/auth/me`
//! - `GET|POST /api/{users,drivers,restaurants,promotions}`,
//!   `PUT|DELETE /api/{users,drivers,restaurants,promotions}/{id}`
//! - `PUT /api/drivers/{id}/verify`
//! - `GET|POST /api/rides`, `PUT /api/rides/{id}/status?status=`
//! - `GET|POST /api/orders`, `PUT /api/orders/{id}/status?status=&driver=`
//! - `GET /api/stats`, `GET /api/stats/weekly`, `GET /api/stats/monthly`
//! - `POST /api/seed`
//! - `GET|POST /api/backups`, `DELETE /api/backups/{id}`,
//!   `POST /api/backups/{id}/restore`, `GET|PUT /api/backups/settings`

pub mod audit;
pub mod auth;
mod error;
mod handlers;
pub mod types;

pub use error::AppError;

use anyhow::{Context, Result};
use axum::{
    Router,
    http::HeaderValue,
    routing::{get, post, put},
};
use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use crate::auth::TokenKeys;
use crate::backup::BackupService;
use crate::store::DocumentStore;

/// Shared state handed to every handler.
pub struct AppState {
    pub store: DocumentStore,
    pub backups: BackupService,
    pub tokens: TokenKeys,
    /// Render handle for `/metrics`; `None` serves an empty body
    #[cfg(feature = "metrics")]
    pub metrics: Option<metrics_exporter_prometheus::PrometheusHandle>,
}

impl AppState {
    pub fn new(store: DocumentStore, backups: BackupService, tokens: TokenKeys) -> Self {
        Self {
            store,
            backups,
            tokens,
            #[cfg(feature = "metrics")]
            metrics: None,
        }
    }

    #[cfg(feature = "metrics")]
    #[must_use]
    pub fn with_metrics(mut self, handle: metrics_exporter_prometheus::PrometheusHandle) -> Self {
        self.metrics = Some(handle);
        self
    }
}

pub type SharedState = Arc<AppState>;

/// CORS layer for the configured origins. `*` allows any origin.
fn cors_layer(origins: &[String]) -> CorsLayer {
    let layer = CorsLayer::new().allow_methods(Any).allow_headers(Any);

    if origins.iter().any(|o| o == "*") {
        return layer.allow_origin(Any);
    }

    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(%origin, "Ignoring invalid CORS origin");
                None
            },
        })
        .collect();
    layer.allow_origin(AllowOrigin::list(allowed))
}

/// Builds the API router.
pub fn router(state: SharedState, cors_origins: &[String]) -> Router {
    let router = Router::new()
        .route("/health", get(handlers::health))
        .route("/api", get(handlers::root))
        .route("/api/", get(handlers::root))
        // Auth
        .route("/api/auth/login", post(handlers::login))
        .route("/api/auth/me", get(handlers::me))
        // Users
        .route("/api/users", get(handlers::user_list).post(handlers::user_create))
        .route(
            "/api/users/{id}",
            put(handlers::user_update).delete(handlers::user_delete),
        )
        // Drivers
        .route(
            "/api/drivers",
            get(handlers::driver_list).post(handlers::driver_create),
        )
        .route(
            "/api/drivers/{id}",
            put(handlers::driver_update).delete(handlers::driver_delete),
        )
        .route("/api/drivers/{id}/verify", put(handlers::driver_verify))
        // Restaurants
        .route(
            "/api/restaurants",
            get(handlers::restaurant_list).post(handlers::restaurant_create),
        )
        .route(
            "/api/restaurants/{id}",
            put(handlers::restaurant_update).delete(handlers::restaurant_delete),
        )
        // Rides and orders
        .route("/api/rides", get(handlers::ride_list).post(handlers::ride_create))
        .route("/api/rides/{id}/status", put(handlers::ride_status))
        .route("/api/orders", get(handlers::order_list).post(handlers::order_create))
        .route("/api/orders/{id}/status", put(handlers::order_status))
        // Promotions
        .route(
            "/api/promotions",
            get(handlers::promotion_list).post(handlers::promotion_create),
        )
        .route(
            "/api/promotions/{id}",
            put(handlers::promotion_update).delete(handlers::promotion_delete),
        )
        // Stats and demo data
        .route("/api/stats", get(handlers::stats))
        .route("/api/stats/weekly", get(handlers::stats_weekly))
        .route("/api/stats/monthly", get(handlers::stats_monthly))
        .route("/api/seed", post(handlers::seed))
        // Backups
        .route(
            "/api/backups",
            get(handlers::backup_list).post(handlers::backup_create),
        )
        .route(
            "/api/backups/settings",
            get(handlers::backup_settings_get).put(handlers::backup_settings_update),
        )
        .route("/api/backups/{id}", axum::routing::delete(handlers::backup_delete))
        .route("/api/backups/{id}/restore", post(handlers::backup_restore));

    #[cfg(feature = "metrics")]
    let router = router.route("/metrics", get(handlers::metrics_render));

    router
        .with_state(state)
        .layer(cors_layer(cors_origins))
        .layer(TraceLayer::new_for_http())
}

/// Serves the router until `shutdown` resolves.
///
/// # Errors
///
/// Returns an error if the address cannot be bound or the server fails.
pub async fn serve<F>(addr: SocketAddr, app: Router, shutdown: F) -> Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    info!(%addr, "Admin API listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await
        .context("HTTP server error")?;

    info!("Admin API stopped");
    Ok(())
}
