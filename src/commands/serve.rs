//! `transfers-admin serve`: the admin API and the backup scheduler.

use anyhow::{Context, Result};
use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;
use tracing::{info, warn};

use transfers_admin::auth::TokenKeys;
use transfers_admin::backup::Scheduler;
use transfers_admin::config::{Config, LogFormat};
use transfers_admin::http::{self, AppState};

/// Initialize stdout logging. `RUST_LOG` takes precedence over the configured level.
fn init_logging(config: &Config) {
    use tracing_subscriber::{EnvFilter, fmt, prelude::*};

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format {
        LogFormat::Text => tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer())
            .init(),
        LogFormat::Json => tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json())
            .init(),
    }
}

#[cfg(feature = "metrics")]
fn attach_metrics(state: AppState, enabled: bool) -> AppState {
    if !enabled {
        return state;
    }
    match transfers_admin::metrics::install() {
        Ok(handle) => state.with_metrics(handle),
        Err(e) => {
            warn!(error = %e, "Metrics disabled");
            state
        },
    }
}

#[cfg(not(feature = "metrics"))]
fn attach_metrics(state: AppState, _enabled: bool) -> AppState {
    state
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "Failed to listen for Ctrl-C");
        return;
    }
    info!("Shutdown signal received");
}

/// Execute the serve command.
pub async fn execute(config_path: Option<&Path>, port: Option<u16>) -> Result<()> {
    let config = super::load_config(config_path, port)?;

    init_logging(&config);

    let (store, backups) = super::open_services(&config)?;
    info!(
        database = %config.database_path()?.display(),
        backups = %config.backup_dir()?.display(),
        "Storage opened"
    );

    let scheduler = Scheduler::spawn(backups.clone(), config.scheduler_config());

    let tokens = TokenKeys::new(&config.auth.jwt_secret, config.auth.token_ttl_hours);
    let state = attach_metrics(AppState::new(store, backups, tokens), config.server.metrics);

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port)
        .parse()
        .with_context(|| {
            format!(
                "Invalid listen address: {}:{}",
                config.server.host, config.server.port
            )
        })?;

    let app = http::router(Arc::new(state), &config.server.cors_origins);
    let served = http::serve(addr, app, shutdown_signal()).await;

    // Stop the scheduler even if the server failed
    scheduler.shutdown().await;
    info!("Scheduler stopped");

    served
}
