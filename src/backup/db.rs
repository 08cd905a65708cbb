//! Metadata database shared by the backup catalog and settings store.

use anyhow::{Context, Result};
use redb::Database;
use std::fs;
use std::path::Path;
use std::sync::Arc;

use super::types::{BACKUPS_TABLE, SETTINGS_TABLE};

/// File name of the metadata database inside the backup directory.
pub const METADATA_DB_NAME: &str = "catalog.redb";

/// Creates the backup directory if needed and opens its metadata database.
///
/// # Errors
///
/// Returns an error if:
/// - Backup directory cannot be created
/// - Metadata database cannot be opened or initialized
pub fn open_metadata_db<P: AsRef<Path>>(backup_dir: P) -> Result<Arc<Database>> {
    let backup_dir = backup_dir.as_ref();

    fs::create_dir_all(backup_dir).with_context(|| {
        format!("Failed to create backup directory: {}", backup_dir.display())
    })?;

    let db_path = backup_dir.join(METADATA_DB_NAME);
    let db = Database::create(&db_path).with_context(|| {
        format!("Failed to open backup catalog database: {}", db_path.display())
    })?;

    let write_txn = db
        .begin_write()
        .context("Failed to begin initialization transaction")?;
    {
        let _backups = write_txn
            .open_table(BACKUPS_TABLE)
            .context("Failed to initialize backups table")?;
        let _settings = write_txn
            .open_table(SETTINGS_TABLE)
            .context("Failed to initialize settings table")?;
    }
    write_txn
        .commit()
        .context("Failed to commit initialization transaction")?;

    Ok(Arc::new(db))
}
