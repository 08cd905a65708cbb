//! Shared harness for API integration tests.
//!
//! Builds the full router over an in-memory document store and a backup
//! directory in a temporary folder, and drives it with `oneshot`.

#![allow(dead_code)]

use axum::Router;
use axum::body::Body;
use axum::http::{Method, Request, StatusCode, header};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use std::sync::Arc;
use tempfile::TempDir;
use tower::ServiceExt;

use transfers_admin::auth::TokenKeys;
use transfers_admin::backup::BackupService;
use transfers_admin::http::{AppState, router};
use transfers_admin::store::DocumentStore;

pub const TEST_SECRET: &str = "integration-test-secret";

pub struct TestApp {
    pub router: Router,
    pub store: DocumentStore,
    pub backups: BackupService,
    pub backup_dir: std::path::PathBuf,
    _tmp: TempDir,
}

impl TestApp {
    pub fn new() -> Self {
        let tmp = TempDir::new().expect("Failed to create temp dir");
        let backup_dir = tmp.path().join("backups");
        let store = DocumentStore::memory();
        let backups = BackupService::open(&backup_dir, store.clone(), 6)
            .expect("Failed to open backup service");

        let state = AppState::new(
            store.clone(),
            backups.clone(),
            TokenKeys::new(TEST_SECRET, 24),
        );
        let router = router(Arc::new(state), &["*".to_string()]);

        Self {
            router,
            store,
            backups,
            backup_dir,
            _tmp: tmp,
        }
    }

    /// Sends a request and returns the status and JSON body (`Null` if empty).
    pub async fn request(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string())),
            None => builder.body(Body::empty()),
        }
        .expect("Failed to build request");

        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Router failed");
        let status = response.status();
        let bytes = response
            .into_body()
            .collect()
            .await
            .expect("Failed to read body")
            .to_bytes();

        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).expect("Response is not JSON")
        };
        (status, value)
    }

    pub async fn get(&self, uri: &str, token: &str) -> (StatusCode, Value) {
        self.request(Method::GET, uri, Some(token), None).await
    }

    pub async fn post(&self, uri: &str, token: &str, body: Value) -> (StatusCode, Value) {
        self.request(Method::POST, uri, Some(token), Some(body)).await
    }

    pub async fn put(&self, uri: &str, token: &str, body: Value) -> (StatusCode, Value) {
        self.request(Method::PUT, uri, Some(token), Some(body)).await
    }

    pub async fn delete(&self, uri: &str, token: &str) -> (StatusCode, Value) {
        self.request(Method::DELETE, uri, Some(token), None).await
    }

    /// Logs in with the bootstrap credentials and returns the token.
    pub async fn login(&self) -> String {
        let (status, body) = self
            .request(
                Method::POST,
                "/api/auth/login",
                None,
                Some(json!({"email": "admin@transfers.com", "password": "admin123"})),
            )
            .await;
        assert_eq!(status, StatusCode::OK, "login failed: {body}");
        body["token"].as_str().expect("No token").to_string()
    }
}
