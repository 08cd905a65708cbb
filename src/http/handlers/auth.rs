//! Login and current-admin handlers.

use anyhow::Context;
use axum::{Json, extract::State};

use super::super::audit::{AuditEvent, log_audit_event};
use super::super::auth::AuthAdmin;
use super::super::{AppError, SharedState};
use crate::auth::verify_password;
use crate::error::Error;
use crate::metrics;
use crate::models::{Admin, AdminProfile, LoginRequest, LoginResponse};
use crate::store::{Collection, DocumentStore};

async fn find_admin(store: &DocumentStore, email: &str) -> Result<Option<Admin>, AppError> {
    let Some(doc) = store.find_by_field(Collection::Admins, "email", email).await? else {
        return Ok(None);
    };
    let admin = serde_json::from_value(serde_json::Value::Object(doc))
        .context("Malformed admin record")?;
    Ok(Some(admin))
}

fn rejected(email: &str) -> AppError {
    log_audit_event(AuditEvent::LoginFailure {
        email: email.to_string(),
    });
    Error::unauthorized("Invalid credentials").into()
}

/// POST /api/auth/login - Exchange credentials for a bearer token.
///
/// The first login with the bootstrap credentials creates the super admin.
pub(crate) async fn login(
    State(state): State<SharedState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    metrics::record_api_operation("auth", "login");

    let admin = match find_admin(&state.store, &req.email).await? {
        Some(admin) if verify_password(&req.password, &admin.password) => admin,
        Some(_) => return Err(rejected(&req.email)),
        None if Admin::is_bootstrap_login(&req.email, &req.password) => {
            let admin = Admin::bootstrap();
            state.store.insert_as(Collection::Admins, &admin).await?;
            log_audit_event(AuditEvent::AdminBootstrapped {
                admin_id: admin.id.clone(),
            });
            admin
        },
        None => return Err(rejected(&req.email)),
    };

    let token = state.tokens.issue(&admin.id, &admin.email)?;
    log_audit_event(AuditEvent::LoginSuccess {
        admin_id: admin.id.clone(),
        email: admin.email.clone(),
    });

    Ok(Json(LoginResponse {
        id: admin.id,
        name: admin.name,
        email: admin.email,
        role: admin.role,
        token,
    }))
}

/// GET /api/auth/me - Profile of the authenticated admin.
pub(crate) async fn me(
    State(state): State<SharedState>,
    AuthAdmin(claims): AuthAdmin,
) -> Result<Json<AdminProfile>, AppError> {
    metrics::record_api_operation("auth", "me");
    let admin = find_admin(&state.store, &claims.email)
        .await?
        .ok_or_else(|| Error::not_found("Admin", &claims.email))?;
    Ok(Json(admin.into()))
}

