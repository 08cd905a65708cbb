//! HTTP error responses.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use crate::error::Error;

/// Error returned by every handler.
///
/// Rendered as `{"error": <kind>, "detail": <message>}` with the status
/// from [`Error::status_code`]. Partial restores also carry `completed`.
#[derive(Debug)]
pub struct AppError(pub Error);

impl From<Error> for AppError {
    fn from(err: Error) -> Self {
        Self(err)
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        Self(err.into())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.0.status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        if status.is_server_error() {
            tracing::error!(kind = self.0.kind(), error = %self.0, "Request failed");
        }

        let mut body = json!({
            "error": self.0.kind(),
            "detail": self.0.to_string(),
        });
        if let Error::PartialRestore { completed, .. } = &self.0 {
            body["completed"] = json!(completed);
        }

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;

    async fn render(err: Error) -> (StatusCode, serde_json::Value) {
        let response = AppError(err).into_response();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_not_found_body() {
        let (status, body) = render(Error::not_found("User", "42")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "not_found");
        assert_eq!(body["detail"], "User not found: 42");
    }

    #[tokio::test]
    async fn test_partial_restore_body_lists_completed() {
        let (status, body) = render(Error::PartialRestore {
            completed: vec!["admins".to_string()],
            failed: "drivers".to_string(),
            reason: "disk full".to_string(),
        })
        .await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "partial_restore_failure");
        assert_eq!(body["completed"], json!(["admins"]));
    }
}
