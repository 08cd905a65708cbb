//! Compiled-in defaults shared across the crate.

use std::time::Duration;

/// Default HTTP port for `transfers-admin serve`.
pub const DEFAULT_PORT: u16 = 8001;

/// Default bind address.
pub const DEFAULT_HOST: &str = "0.0.0.0";

/// Default database name, used as the redb file stem.
pub const DEFAULT_DB_NAME: &str = "transfers";

// =============================================================================
// Backup
// =============================================================================

/// Interval between automatic backups when settings are first created.
pub const DEFAULT_BACKUP_INTERVAL_HOURS: i64 = 6;

/// How often the scheduler wakes up to check whether a backup is due.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(5 * 60);

/// Wait after a failed automatic backup before polling resumes.
pub const DEFAULT_RECOVERY_INTERVAL: Duration = Duration::from_secs(60);

/// Version string written into every artifact's metadata.
pub const BACKUP_FORMAT_VERSION: &str = "1.0";

/// Upper bound on records read per collection when snapshotting.
pub const SNAPSHOT_READ_LIMIT: usize = 100_000;

/// Directory name for backup artifacts under the data directory.
pub const BACKUP_DIR_NAME: &str = "backups";

// =============================================================================
// API
// =============================================================================

/// Upper bound on records returned by list endpoints.
pub const MAX_LIST_LIMIT: usize = 1000;

/// Lifetime of issued bearer tokens.
pub const DEFAULT_TOKEN_TTL_HOURS: i64 = 24;

/// Signing secret used when none is configured.
pub const DEFAULT_JWT_SECRET: &str = "transfers-admin-secret-key-2024";

/// Credentials that bootstrap the first super admin on login.
pub const BOOTSTRAP_ADMIN_EMAIL: &str = "admin@transfers.com";
pub const BOOTSTRAP_ADMIN_PASSWORD: &str = "admin123";
pub const BOOTSTRAP_ADMIN_NAME: &str = "مدير النظام";

/// API version reported by the root endpoint.
pub const API_VERSION: &str = "1.0.0";
