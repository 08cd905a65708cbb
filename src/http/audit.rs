//! Audit logging for security-relevant admin events.
//!
//! Events go to the `audit` tracing target with an `event_type` field so
//! they can be filtered (`RUST_LOG=audit=info`) or shipped separately.

use tracing::{info, warn};

/// Security audit events that should be logged for monitoring and alerting.
#[derive(Debug, Clone)]
pub enum AuditEvent {
    /// Request rejected for a missing or invalid bearer token
    AuthFailure { path: String, reason: String },
    /// Login with wrong or unknown credentials
    LoginFailure { email: String },
    LoginSuccess { admin_id: String, email: String },
    /// Super admin created from the bootstrap credentials
    AdminBootstrapped { admin_id: String },
    BackupCreated { admin: String, backup_id: String },
    BackupDeleted { admin: String, backup_id: String },
    /// Restore started; live collections are about to be replaced
    RestoreRequested { admin: String, backup_id: String },
    SettingsUpdated {
        admin: String,
        enabled: bool,
        interval_hours: i64,
    },
    DatabaseSeeded { admin: String },
}

/// Log a security audit event with structured fields.
pub fn log_audit_event(event: AuditEvent) {
    match event {
        AuditEvent::AuthFailure { path, reason } => {
            warn!(
                target: "audit",
                event_type = "auth_failure",
                %path,
                %reason,
                "Authentication failed"
            );
        },
        AuditEvent::LoginFailure { email } => {
            warn!(
                target: "audit",
                event_type = "login_failure",
                %email,
                "Login rejected"
            );
        },
        AuditEvent::LoginSuccess { admin_id, email } => {
            info!(
                target: "audit",
                event_type = "login_success",
                %admin_id,
                %email,
                "Admin logged in"
            );
        },
        AuditEvent::AdminBootstrapped { admin_id } => {
            warn!(
                target: "audit",
                event_type = "admin_bootstrapped",
                %admin_id,
                "Bootstrap super admin created"
            );
        },
        AuditEvent::BackupCreated { admin, backup_id } => {
            info!(
                target: "audit",
                event_type = "backup_created",
                %admin,
                %backup_id,
                "Manual backup created"
            );
        },
        AuditEvent::BackupDeleted { admin, backup_id } => {
            info!(
                target: "audit",
                event_type = "backup_deleted",
                %admin,
                %backup_id,
                "Backup deleted"
            );
        },
        AuditEvent::RestoreRequested { admin, backup_id } => {
            warn!(
                target: "audit",
                event_type = "restore_requested",
                %admin,
                %backup_id,
                "Restore requested"
            );
        },
        AuditEvent::SettingsUpdated {
            admin,
            enabled,
            interval_hours,
        } => {
            info!(
                target: "audit",
                event_type = "backup_settings_updated",
                %admin,
                enabled,
                interval_hours,
                "Backup settings updated"
            );
        },
        AuditEvent::DatabaseSeeded { admin } => {
            warn!(
                target: "audit",
                event_type = "database_seeded",
                %admin,
                "Demo data loaded"
            );
        },
    }
}
