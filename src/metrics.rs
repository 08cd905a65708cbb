//! Prometheus metrics for the admin backend.
//!
//! Recording is a no-op until a recorder is installed, so library users and
//! tests can call these helpers freely.

use crate::backup::BackupKind;

/// Counts a completed backup.
pub fn record_backup_created(kind: BackupKind) {
    metrics::counter!("transfers_backups_created_total", "kind" => kind.as_str()).increment(1);
}

/// Counts a failed backup by error kind.
pub fn record_backup_failed(kind: BackupKind, reason: &'static str) {
    metrics::counter!(
        "transfers_backups_failed_total",
        "kind" => kind.as_str(),
        "reason" => reason
    )
    .increment(1);
}

/// Counts a restore attempt by outcome.
pub fn record_restore(outcome: &'static str) {
    metrics::counter!("transfers_restores_total", "outcome" => outcome).increment(1);
}

/// Counts an admin API operation on an entity.
pub fn record_api_operation(entity: &'static str, operation: &'static str) {
    metrics::counter!(
        "transfers_api_operations_total",
        "entity" => entity,
        "operation" => operation
    )
    .increment(1);
}

/// Installs the global Prometheus recorder and returns its render handle.
///
/// # Errors
///
/// Returns an error if a recorder is already installed.
#[cfg(feature = "metrics")]
pub fn install() -> anyhow::Result<metrics_exporter_prometheus::PrometheusHandle> {
    metrics_exporter_prometheus::PrometheusBuilder::new()
        .install_recorder()
        .map_err(|e| anyhow::anyhow!("Failed to install metrics recorder: {e}"))
}
