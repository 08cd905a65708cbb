//! Types and constants for the backup subsystem.

use chrono::{DateTime, TimeDelta, Utc};
use redb::TableDefinition;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

use crate::store::Document;

/// Catalog entries keyed by backup id.
pub(crate) const BACKUPS_TABLE: TableDefinition<'static, &'static str, &'static [u8]> =
    TableDefinition::new("backups");

/// Singleton settings record.
pub(crate) const SETTINGS_TABLE: TableDefinition<'static, &'static str, &'static [u8]> =
    TableDefinition::new("settings");

/// Key of the settings record in [`SETTINGS_TABLE`].
pub(crate) const SETTINGS_KEY: &str = "backup";

/// What triggered a snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackupKind {
    Manual,
    Auto,
}

impl BackupKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Manual => "manual",
            Self::Auto => "auto",
        }
    }
}

impl std::fmt::Display for BackupKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Catalog entry describing one artifact on disk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackupRecord {
    pub id: String,
    /// Artifact file name, relative to the backup directory
    pub filename: String,
    pub created_at: DateTime<Utc>,
    /// Exact artifact length when the entry was written
    pub size_bytes: u64,
    #[serde(rename = "type")]
    pub kind: BackupKind,
    pub collections: BTreeSet<String>,
}

/// Header of a serialized snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtifactMetadata {
    pub created_at: DateTime<Utc>,
    #[serde(rename = "type")]
    pub kind: BackupKind,
    pub version: String,
}

/// The on-disk snapshot: metadata plus every managed collection's records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BackupArtifact {
    pub metadata: ArtifactMetadata,
    pub data: BTreeMap<String, Vec<Document>>,
}

/// Persisted form of the settings record. `next_backup` is never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub(crate) struct StoredSettings {
    pub auto_backup_enabled: bool,
    pub interval_hours: i64,
    #[serde(default)]
    pub last_backup: Option<DateTime<Utc>>,
}

impl StoredSettings {
    pub(crate) fn with_interval(interval_hours: i64) -> Self {
        Self {
            auto_backup_enabled: true,
            interval_hours,
            last_backup: None,
        }
    }
}

/// Automatic backup configuration as reported to callers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackupSettings {
    pub auto_backup_enabled: bool,
    pub interval_hours: i64,
    pub last_backup: Option<DateTime<Utc>>,
    /// `last_backup + interval_hours`, absent when no backup has run
    pub next_backup: Option<DateTime<Utc>>,
}

impl From<StoredSettings> for BackupSettings {
    fn from(stored: StoredSettings) -> Self {
        // Out-of-range intervals leave next_backup unknown instead of panicking
        let next_backup = stored.last_backup.and_then(|last| {
            TimeDelta::try_hours(stored.interval_hours)
                .and_then(|delta| last.checked_add_signed(delta))
        });

        Self {
            auto_backup_enabled: stored.auto_backup_enabled,
            interval_hours: stored.interval_hours,
            last_backup: stored.last_backup,
            next_backup,
        }
    }
}

/// Result of a completed restore.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RestoreOutcome {
    pub backup_id: String,
    /// Collections whose live contents were replaced, in restore order
    pub collections: Vec<String>,
}
