//! Backup and restore of the managed collections.
//!
//! Snapshots are written as pretty-printed UTF-8 JSON files in the backup
//! directory and indexed in a redb catalog next to them:
//!
//! ```text
//! backups/
//! ├── catalog.redb                          # catalog entries + settings
//! ├── backup_manual_20250101_120000.json    # artifact
//! └── backup_auto_20250101_180000.json
//! ```
//!
//! # Components
//!
//! - [`SnapshotWriter`] reads every collection and writes one artifact
//! - [`BackupCatalog`] lists, fetches and deletes catalog entries
//! - [`BackupSettingsStore`] persists the auto-backup flag and interval
//! - [`Scheduler`] polls the settings and triggers automatic snapshots
//! - [`RestoreEngine`] replaces live collections from an artifact
//!
//! [`BackupService`] ties them together for the API and the CLI.
//!
//! # Example
//!
//! ```no_run
//! use transfers_admin::backup::{BackupKind, BackupService};
//! use transfers_admin::store::DocumentStore;
//!
//! # async fn example() -> anyhow::Result<()> {
//! let store = DocumentStore::file("/tmp/transfers.redb")?;
//! let backups = BackupService::open("/tmp/backups", store, 6)?;
//!
//! let record = backups.create_backup(BackupKind::Manual).await?;
//! let restored = backups.restore_backup(&record.id).await?;
//! println!("restored {:?}", restored.collections);
//! # Ok(())
//! # }
//! ```

mod catalog;
mod db;
mod restore;
mod scheduler;
mod service;
mod settings;
mod types;
mod writer;


pub use catalog::{BackupCatalog, CatalogBackend, RedbCatalog};
pub use db::{METADATA_DB_NAME, open_metadata_db};
pub use restore::RestoreEngine;
pub use scheduler::{
    PollOutcome, Scheduler, SchedulerConfig, SchedulerHandle, SchedulerState, SchedulerStatus,
    is_due,
};
pub use service::BackupService;
pub use settings::BackupSettingsStore;
pub use types::{
    ArtifactMetadata, BackupArtifact, BackupKind, BackupRecord, BackupSettings, RestoreOutcome,
};
pub use writer::{BackupMarker, SnapshotWriter, artifact_filename};
