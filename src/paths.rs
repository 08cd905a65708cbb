//! Path utilities for the admin backend's data directory.
//!
//! # Base Directory
//! - [`get_home_dir`] - `~/.transfers-admin/` (base directory for all data)
//!
//! # Files
//! - [`get_database_path`] - `~/.transfers-admin/<db_name>.redb` (managed collections)
//! - [`get_backup_dir`] - `~/.transfers-admin/backups/` (artifacts + catalog)
//! - [`get_config_path`] - `~/.transfers-admin/config.toml` (settings)

use anyhow::{Context, Result};
use std::path::PathBuf;

use crate::constants::BACKUP_DIR_NAME;

/// Get the base data directory.
///
/// Resolution order:
/// 1. `TRANSFERS_HOME` environment variable (if set)
/// 2. `~/.transfers-admin/` (default)
pub fn get_home_dir() -> Result<PathBuf> {
    if let Ok(home) = std::env::var("TRANSFERS_HOME")
        && !home.is_empty()
    {
        return Ok(PathBuf::from(home));
    }

    let home = dirs::home_dir().context("Failed to get home directory")?;
    Ok(home.join(".transfers-admin"))
}

/// Get the document database path: `~/.transfers-admin/<db_name>.redb`
pub fn get_database_path(db_name: &str) -> Result<PathBuf> {
    Ok(get_home_dir()?.join(format!("{db_name}.redb")))
}

/// Get the backup directory: `~/.transfers-admin/backups/`
pub fn get_backup_dir() -> Result<PathBuf> {
    Ok(get_home_dir()?.join(BACKUP_DIR_NAME))
}

/// Get the config path: `~/.transfers-admin/config.toml`
pub fn get_config_path() -> Result<PathBuf> {
    Ok(get_home_dir()?.join("config.toml"))
}

#[cfg(test)]
mod tests {
    use super::*;

    // TRANSFERS_HOME overrides are not exercised here: setting env vars is
    // unsafe in edition 2024 and the crate denies unsafe code.

    #[test]
    fn test_derived_paths_share_base() {
        let base = get_home_dir().unwrap();
        assert!(get_database_path("transfers").unwrap().starts_with(&base));
        assert!(get_backup_dir().unwrap().starts_with(&base));
        assert!(get_config_path().unwrap().starts_with(&base));
    }

    #[test]
    fn test_path_names() {
        let db = get_database_path("transfers").unwrap();
        assert_eq!(db.file_name().and_then(|n| n.to_str()), Some("transfers.redb"));

        let backups = get_backup_dir().unwrap();
        assert!(backups.ends_with("backups"));

        let config = get_config_path().unwrap();
        assert_eq!(config.extension().and_then(|e| e.to_str()), Some("toml"));
    }
}
