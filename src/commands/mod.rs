//! CLI command implementations.
//!
//! - [`serve`] - Admin API plus the automatic backup scheduler
//! - [`backup`] - Offline backup management against the data directory
//! - [`seed`] - Load the demo dataset

pub mod backup;
pub mod seed;
pub mod serve;

use anyhow::{Context, Result};
use std::path::Path;

use transfers_admin::backup::BackupService;
use transfers_admin::config::Config;
use transfers_admin::store::DocumentStore;

/// Opens the document store and backup service named by the config.
///
/// The backup directory is created if absent.
pub fn open_services(config: &Config) -> Result<(DocumentStore, BackupService)> {
    let db_path = config.database_path()?;
    if let Some(parent) = db_path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create data directory: {}", parent.display()))?;
    }
    let store = DocumentStore::file(&db_path)?;

    let backup_dir = config.backup_dir()?;
    let backups = BackupService::open(
        &backup_dir,
        store.clone(),
        config.backup.default_interval_hours,
    )?;

    Ok((store, backups))
}

/// Loads and validates configuration, printing warnings to stderr.
///
/// `port` overrides the configured port before validation.
pub fn load_config(path: Option<&Path>, port: Option<u16>) -> Result<Config> {
    finalize_config(Config::load(path)?, port)
}

fn finalize_config(mut config: Config, port: Option<u16>) -> Result<Config> {
    if let Some(port) = port {
        config.server.port = port;
    }
    let validation = config.validate()?;
    for warning in &validation.warnings {
        eprintln!("Warning: {warning}");
    }
    Ok(config)
}
