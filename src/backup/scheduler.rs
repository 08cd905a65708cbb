//! Automatic backup scheduler.
//!
//! A single background task polls the backup settings and takes an `auto`
//! snapshot when one is due. Failed snapshots are logged and counted, then
//! the loop waits a shorter recovery interval; the task never exits because
//! of a failed run.
//!
//! Due-ness uses the process-local [`BackupMarker`](super::BackupMarker),
//! so a freshly started process backs up on its first poll.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

use super::service::BackupService;
use super::types::{BackupKind, BackupRecord, BackupSettings};
use crate::constants::{DEFAULT_POLL_INTERVAL, DEFAULT_RECOVERY_INTERVAL};

/// Timing of the scheduler loop.
#[derive(Debug, Clone)]
pub struct SchedulerConfig {
    /// Wait between polls. This is the check frequency, not the backup interval
    pub poll_interval: Duration,
    /// Wait after a failed run before polling again
    pub recovery_interval: Duration,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            poll_interval: DEFAULT_POLL_INTERVAL,
            recovery_interval: DEFAULT_RECOVERY_INTERVAL,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SchedulerState {
    #[default]
    Idle,
    Running,
    Stopped,
}

/// Observable state of the scheduler loop.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SchedulerStatus {
    pub state: SchedulerState,
    /// Successful automatic backups
    pub runs: u64,
    /// Failed polls, including settings read failures
    pub failures: u64,
    pub last_error: Option<String>,
    pub last_run_at: Option<DateTime<Utc>>,
}

/// Result of a single poll.
#[derive(Debug)]
pub enum PollOutcome {
    /// Disabled, or not due yet
    Skipped,
    Completed(BackupRecord),
    Failed(String),
}

/// Returns true when an automatic backup should run at `now`.
///
/// Requires auto-backup to be enabled and either no backup in this process
/// yet or at least `interval_hours` elapsed since `last`. A zero or negative
/// interval is always due.
pub fn is_due(settings: &BackupSettings, last: Option<DateTime<Utc>>, now: DateTime<Utc>) -> bool {
    if !settings.auto_backup_enabled {
        return false;
    }

    match last {
        None => true,
        Some(last) => {
            let elapsed = now.signed_duration_since(last).num_seconds();
            elapsed >= settings.interval_hours.saturating_mul(3600)
        },
    }
}

/// The scheduler loop. Use [`Scheduler::spawn`] to run it in the background.
pub struct Scheduler {
    service: BackupService,
    config: SchedulerConfig,
    status: watch::Sender<SchedulerStatus>,
}

impl Scheduler {
    pub fn new(service: BackupService, config: SchedulerConfig) -> Self {
        let (status, _) = watch::channel(SchedulerStatus::default());
        Self {
            service,
            config,
            status,
        }
    }

    pub fn status(&self) -> watch::Receiver<SchedulerStatus> {
        self.status.subscribe()
    }

    /// Spawns the loop on the current runtime.
    ///
    /// The first poll happens immediately.
    pub fn spawn(service: BackupService, config: SchedulerConfig) -> SchedulerHandle {
        let scheduler = Self::new(service, config);
        let status = scheduler.status();
        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        let task = tokio::spawn(scheduler.run(shutdown_rx));

        SchedulerHandle {
            status,
            shutdown: shutdown_tx,
            task,
        }
    }

    /// Checks settings once and takes an automatic backup if due.
    pub async fn poll_once(&self) -> PollOutcome {
        let settings = match self.service.settings().await {
            Ok(settings) => settings,
            Err(e) => {
                warn!(error = %e, "Failed to read backup settings");
                self.record_failure(e.to_string());
                return PollOutcome::Failed(e.to_string());
            },
        };

        let now = Utc::now();
        if !is_due(&settings, self.service.marker().last(), now) {
            debug!(
                enabled = settings.auto_backup_enabled,
                interval_hours = settings.interval_hours,
                "Automatic backup not due"
            );
            return PollOutcome::Skipped;
        }

        self.status.send_modify(|s| s.state = SchedulerState::Running);

        match self.service.create_backup(BackupKind::Auto).await {
            Ok(record) => {
                if let Err(e) = self.service.record_auto_backup(record.created_at).await {
                    warn!(backup_id = %record.id, error = %e, "Failed to persist last backup time");
                }
                self.status.send_modify(|s| {
                    s.state = SchedulerState::Idle;
                    s.runs += 1;
                    s.last_run_at = Some(record.created_at);
                });
                PollOutcome::Completed(record)
            },
            Err(e) => {
                error!(error = %e, kind = e.kind(), "Automatic backup failed");
                self.record_failure(e.to_string());
                PollOutcome::Failed(e.to_string())
            },
        }
    }

    fn record_failure(&self, message: String) {
        self.status.send_modify(|s| {
            s.state = SchedulerState::Idle;
            s.failures += 1;
            s.last_error = Some(message);
        });
    }

    async fn run(self, mut shutdown: watch::Receiver<bool>) {
        info!(
            poll_interval = ?self.config.poll_interval,
            recovery_interval = ?self.config.recovery_interval,
            "Backup scheduler started"
        );

        loop {
            let wait = match self.poll_once().await {
                PollOutcome::Failed(_) => self.config.recovery_interval,
                PollOutcome::Skipped | PollOutcome::Completed(_) => self.config.poll_interval,
            };

            // Only suspend points are cancellable; a running snapshot finishes
            tokio::select! {
                () = tokio::time::sleep(wait) => {},
                _ = shutdown.changed() => break,
            }
        }

        self.status.send_modify(|s| s.state = SchedulerState::Stopped);
        info!("Backup scheduler stopped");
    }
}

/// Handle to a running scheduler.
///
/// Dropping the handle also stops the loop at its next suspend point.
pub struct SchedulerHandle {
    status: watch::Receiver<SchedulerStatus>,
    shutdown: watch::Sender<bool>,
    task: JoinHandle<()>,
}

impl SchedulerHandle {
    pub fn status(&self) -> watch::Receiver<SchedulerStatus> {
        self.status.clone()
    }

    /// Signals the loop to stop and waits for it to finish.
    pub async fn shutdown(self) {
        let _ = self.shutdown.send(true);
        if let Err(e) = self.task.await {
            error!(error = %e, "Backup scheduler task failed");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeDelta;

    fn settings(enabled: bool, interval_hours: i64) -> BackupSettings {
        BackupSettings {
            auto_backup_enabled: enabled,
            interval_hours,
            last_backup: None,
            next_backup: None,
        }
    }

    #[test]
    fn test_disabled_is_never_due() {
        let now = Utc::now();
        assert!(!is_due(&settings(false, 6), None, now));
        assert!(!is_due(&settings(false, 0), Some(now), now));
    }

    #[test]
    fn test_first_poll_is_due() {
        assert!(is_due(&settings(true, 6), None, Utc::now()));
    }

    #[test]
    fn test_due_after_interval() {
        let now = Utc::now();
        let s = settings(true, 6);
        assert!(!is_due(&s, Some(now - TimeDelta::hours(5)), now));
        assert!(is_due(&s, Some(now - TimeDelta::hours(6)), now));
        assert!(is_due(&s, Some(now - TimeDelta::hours(7)), now));
    }

    #[test]
    fn test_non_positive_interval_is_always_due() {
        let now = Utc::now();
        assert!(is_due(&settings(true, 0), Some(now), now));
        assert!(is_due(&settings(true, -1), Some(now), now));
    }

    #[test]
    fn test_huge_interval_does_not_overflow() {
        let now = Utc::now();
        assert!(!is_due(&settings(true, i64::MAX), Some(now), now));
    }
}
