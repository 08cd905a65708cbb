//! Offline backup management commands.
//!
//! - `transfers-admin backup create` - Take a manual snapshot
//! - `transfers-admin backup list` - Show catalog entries, newest first
//! - `transfers-admin backup delete <id>` - Remove an artifact and its entry
//! - `transfers-admin backup restore <id>` - Replace live collections
//! - `transfers-admin backup settings` - Show or change auto-backup settings
//!
//! These operate on the same data directory as `serve`. redb holds an
//! exclusive lock, so stop the server first.

use anyhow::Result;
use std::path::Path;

use crate::BackupAction;
use transfers_admin::backup::{BackupKind, BackupRecord, BackupService, BackupSettings};

#[allow(clippy::cast_precision_loss)]
fn format_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = 1024 * KB;

    if bytes >= MB {
        format!("{:.1} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.1} KB", bytes as f64 / KB as f64)
    } else {
        format!("{bytes} bytes")
    }
}

fn print_record(record: &BackupRecord) {
    println!(
        "{:<40} {:<6} {:<20} {:>10}  {}",
        record.id,
        record.kind.as_str(),
        record.created_at.format("%Y-%m-%d %H:%M:%S"),
        format_size(record.size_bytes),
        record.filename
    );
}

fn print_settings(settings: &BackupSettings) {
    let fmt_time = |t: Option<chrono::DateTime<chrono::Utc>>| {
        t.map_or_else(|| "-".to_string(), |t| t.format("%Y-%m-%d %H:%M:%S").to_string())
    };

    println!("Auto backup:  {}", if settings.auto_backup_enabled { "enabled" } else { "disabled" });
    println!("Interval:     {}h", settings.interval_hours);
    println!("Last backup:  {}", fmt_time(settings.last_backup));
    println!("Next backup:  {}", fmt_time(settings.next_backup));
}

async fn update_settings(
    backups: &BackupService,
    enabled: Option<bool>,
    interval_hours: Option<i64>,
) -> Result<BackupSettings> {
    let current = backups.settings().await?;
    if enabled.is_none() && interval_hours.is_none() {
        return Ok(current);
    }
    let updated = backups
        .update_settings(
            enabled.unwrap_or(current.auto_backup_enabled),
            interval_hours.unwrap_or(current.interval_hours),
        )
        .await?;
    Ok(updated)
}

/// Execute a backup subcommand.
pub async fn execute(config_path: Option<&Path>, action: BackupAction) -> Result<()> {
    let config = super::load_config(config_path, None)?;
    let (_, backups) = super::open_services(&config)?;

    match action {
        BackupAction::Create => {
            let record = backups.create_backup(BackupKind::Manual).await?;
            println!("Created backup {}", record.id);
            print_record(&record);
        },
        BackupAction::List => {
            let records = backups.list_backups().await?;
            if records.is_empty() {
                println!("No backups");
                return Ok(());
            }
            for record in &records {
                print_record(record);
            }
            println!("\n{} backup(s)", records.len());
        },
        BackupAction::Delete { id } => {
            backups.delete_backup(&id).await?;
            println!("Deleted backup {id}");
        },
        BackupAction::Restore { id } => {
            let outcome = backups.restore_backup(&id).await?;
            println!(
                "Restored backup {} ({})",
                outcome.backup_id,
                outcome.collections.join(", ")
            );
        },
        BackupAction::Settings {
            enabled,
            interval_hours,
        } => {
            let settings = update_settings(&backups, enabled, interval_hours).await?;
            print_settings(&settings);
        },
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_size() {
        assert_eq!(format_size(0), "0 bytes");
        assert_eq!(format_size(512), "512 bytes");
        assert_eq!(format_size(1536), "1.5 KB");
        assert_eq!(format_size(3 * 1024 * 1024), "3.0 MB");
    }
}
