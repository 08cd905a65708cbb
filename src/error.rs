//! Error types for typed error handling.
//!
//! The backup subsystem and the admin API report failures through [`Error`],
//! which keeps "no artifact produced" apart from "artifact produced but not
//! indexed" and carries enough detail for a partial restore to be diagnosed.

use std::path::PathBuf;

/// Result type for admin and backup operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Admin backend errors with structured context.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// Catalog id or named entity absent.
    #[error("{entity} not found: {id}")]
    NotFound { entity: String, id: String },

    /// The artifact file could not be written; nothing was indexed.
    #[error("failed to write backup artifact {path:?}: {source}")]
    StorageWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The artifact was written but the catalog entry could not be saved.
    #[error("backup artifact '{filename}' was written but could not be cataloged: {reason}")]
    CatalogWrite { filename: String, reason: String },

    /// A catalog entry points at a file that no longer exists.
    #[error("artifact '{filename}' for backup '{id}' is missing from storage")]
    ArtifactMissing { id: String, filename: String },

    /// The artifact exists but cannot be decoded.
    #[error("artifact '{filename}' is unreadable: {reason}")]
    ArtifactCorrupt { filename: String, reason: String },

    /// Restore stopped partway; `completed` collections were already replaced.
    #[error("restore failed on collection '{failed}' after restoring {completed:?}: {reason}")]
    PartialRestore {
        completed: Vec<String>,
        failed: String,
        reason: String,
    },

    /// Malformed or semantically invalid request.
    #[error("{0}")]
    InvalidRequest(String),

    /// Request conflicts with existing data.
    #[error("{0}")]
    Conflict(String),

    /// Missing, expired or invalid credentials.
    #[error("{0}")]
    Unauthorized(String),

    /// A bearer token could not be signed.
    #[error("failed to issue token: {0}")]
    TokenIssue(String),

    /// Document store failure.
    #[error("database error: {0}")]
    Database(String),

    /// IO error with context.
    #[error("IO error in {context}: {source}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    /// Create a not found error for the given entity kind.
    pub fn not_found(entity: impl Into<String>, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity: entity.into(),
            id: id.into(),
        }
    }

    /// Create an IO error with context.
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }

    /// Create an artifact write error.
    pub fn storage_write(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::StorageWrite {
            path: path.into(),
            source,
        }
    }

    /// Create a catalog write error for an artifact left on disk.
    pub fn catalog_write(filename: impl Into<String>, reason: impl std::fmt::Display) -> Self {
        Self::CatalogWrite {
            filename: filename.into(),
            reason: format!("{reason:#}"),
        }
    }

    /// Create an unauthorized error.
    pub fn unauthorized(reason: impl Into<String>) -> Self {
        Self::Unauthorized(reason.into())
    }

    /// Get the appropriate HTTP status code for this error.
    pub fn status_code(&self) -> u16 {
        match self {
            Self::NotFound { .. } => 404,
            Self::InvalidRequest(_) | Self::Conflict(_) => 400,
            Self::Unauthorized(_) => 401,
            Self::StorageWrite { .. }
            | Self::CatalogWrite { .. }
            | Self::ArtifactMissing { .. }
            | Self::ArtifactCorrupt { .. }
            | Self::PartialRestore { .. }
            | Self::TokenIssue(_)
            | Self::Database(_)
            | Self::Io { .. } => 500,
        }
    }

    /// Short machine-readable error kind for API responses.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::NotFound { .. } => "not_found",
            Self::StorageWrite { .. } => "storage_write_failure",
            Self::CatalogWrite { .. } => "catalog_write_failure",
            Self::ArtifactMissing { .. } => "artifact_missing",
            Self::ArtifactCorrupt { .. } => "artifact_corrupt",
            Self::PartialRestore { .. } => "partial_restore_failure",
            Self::InvalidRequest(_) => "invalid_request",
            Self::Conflict(_) => "conflict",
            Self::Unauthorized(_) => "unauthorized",
            Self::TokenIssue(_) => "token_issue_failure",
            Self::Database(_) => "database_error",
            Self::Io { .. } => "io_error",
        }
    }
}

impl From<anyhow::Error> for Error {
    fn from(err: anyhow::Error) -> Self {
        Self::Database(format!("{err:#}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_maps_to_404() {
        let err = Error::not_found("backup", "bk_1");
        assert_eq!(err.status_code(), 404);
        assert_eq!(err.to_string(), "backup not found: bk_1");
    }

    #[test]
    fn test_write_and_catalog_failures_are_distinct() {
        let write = Error::storage_write(
            "/tmp/backup.json",
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        );
        let catalog = Error::catalog_write("backup.json", "table locked");

        assert_eq!(write.kind(), "storage_write_failure");
        assert_eq!(catalog.kind(), "catalog_write_failure");
        assert_eq!(write.status_code(), 500);
        assert_eq!(catalog.status_code(), 500);
        assert!(catalog.to_string().contains("table locked"));
    }

    #[test]
    fn test_partial_restore_lists_completed() {
        let err = Error::PartialRestore {
            completed: vec!["admins".to_string(), "drivers".to_string()],
            failed: "orders".to_string(),
            reason: "disk full".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("orders"));
        assert!(msg.contains("drivers"));
    }

    #[test]
    fn test_anyhow_converts_to_database_error() {
        let err: Error = anyhow::anyhow!("commit failed").into();
        assert!(matches!(err, Error::Database(_)));
        assert_eq!(err.status_code(), 500);
    }
}
