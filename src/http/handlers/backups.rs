//! Backup, restore and auto-backup settings handlers.

use axum::{
    Json,
    extract::{Path, State},
};

use super::super::audit::{AuditEvent, log_audit_event};
use super::super::auth::AuthAdmin;
use super::super::types::{BackupSettingsRequest, MessageResponse, RestoreResponse};
use super::super::{AppError, SharedState};
use crate::backup::{BackupKind, BackupRecord, BackupSettings};
use crate::metrics;

/// POST /api/backups - Take a manual snapshot.
pub(crate) async fn backup_create(
    State(state): State<SharedState>,
    AuthAdmin(claims): AuthAdmin,
) -> Result<Json<BackupRecord>, AppError> {
    metrics::record_api_operation("backup", "create");
    let record = state.backups.create_backup(BackupKind::Manual).await?;
    log_audit_event(AuditEvent::BackupCreated {
        admin: claims.email,
        backup_id: record.id.clone(),
    });
    Ok(Json(record))
}

/// GET /api/backups - Catalog entries, newest first.
pub(crate) async fn backup_list(
    State(state): State<SharedState>,
    _admin: AuthAdmin,
) -> Result<Json<Vec<BackupRecord>>, AppError> {
    metrics::record_api_operation("backup", "list");
    Ok(Json(state.backups.list_backups().await?))
}

/// DELETE /api/backups/{id} - Remove the artifact and its catalog entry.
pub(crate) async fn backup_delete(
    State(state): State<SharedState>,
    AuthAdmin(claims): AuthAdmin,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, AppError> {
    metrics::record_api_operation("backup", "delete");
    state.backups.delete_backup(&id).await?;
    log_audit_event(AuditEvent::BackupDeleted {
        admin: claims.email,
        backup_id: id,
    });
    Ok(Json(MessageResponse::new("Backup deleted")))
}

/// POST /api/backups/{id}/restore - Replace live collections with a snapshot.
pub(crate) async fn backup_restore(
    State(state): State<SharedState>,
    AuthAdmin(claims): AuthAdmin,
    Path(id): Path<String>,
) -> Result<Json<RestoreResponse>, AppError> {
    metrics::record_api_operation("backup", "restore");
    log_audit_event(AuditEvent::RestoreRequested {
        admin: claims.email,
        backup_id: id.clone(),
    });

    let outcome = state.backups.restore_backup(&id).await?;
    Ok(Json(RestoreResponse {
        message: "Backup restored successfully".to_string(),
        collections: outcome.collections,
    }))
}

/// GET /api/backups/settings
pub(crate) async fn backup_settings_get(
    State(state): State<SharedState>,
    _admin: AuthAdmin,
) -> Result<Json<BackupSettings>, AppError> {
    metrics::record_api_operation("backup_settings", "get");
    Ok(Json(state.backups.settings().await?))
}

/// PUT /api/backups/settings - Interval is stored as given, without validation.
pub(crate) async fn backup_settings_update(
    State(state): State<SharedState>,
    AuthAdmin(claims): AuthAdmin,
    Json(req): Json<BackupSettingsRequest>,
) -> Result<Json<BackupSettings>, AppError> {
    metrics::record_api_operation("backup_settings", "update");
    let settings = state
        .backups
        .update_settings(req.auto_backup_enabled, req.interval_hours)
        .await?;
    log_audit_event(AuditEvent::SettingsUpdated {
        admin: claims.email,
        enabled: settings.auto_backup_enabled,
        interval_hours: settings.interval_hours,
    });
    Ok(Json(settings))
}
