//! Bearer token extractor.

use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;

use super::audit::{AuditEvent, log_audit_event};
use super::{AppError, SharedState};
use crate::auth::Claims;
use crate::error::Error;

/// An authenticated admin, taken from `Authorization: Bearer <token>`.
///
/// Rejects with 401 when the header is missing or the token does not verify.
#[derive(Debug, Clone)]
pub struct AuthAdmin(pub Claims);

impl FromRequestParts<SharedState> for AuthAdmin {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &SharedState,
    ) -> Result<Self, Self::Rejection> {
        let token = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.strip_prefix("Bearer "))
            .map(str::trim)
            .filter(|token| !token.is_empty());

        let result = match token {
            Some(token) => state.tokens.verify(token),
            None => Err(Error::unauthorized("Not authenticated")),
        };

        result.map(AuthAdmin).map_err(|err| {
            log_audit_event(AuditEvent::AuthFailure {
                path: parts.uri.path().to_string(),
                reason: err.to_string(),
            });
            err.into()
        })
    }
}
