//! Request and response bodies that are not stored records.

use serde::{Deserialize, Serialize};

/// `{"message": ...}` confirmation body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RootResponse {
    pub message: String,
    pub version: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BackupSettingsRequest {
    pub auto_backup_enabled: bool,
    pub interval_hours: i64,
}

/// Body of a successful restore.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RestoreResponse {
    pub message: String,
    /// Collections replaced, in restore order
    pub collections: Vec<String>,
}
