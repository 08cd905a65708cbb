//! Admin API integration tests.
//!
//! Drive the full router in-process:
//! - root, health and authentication
//! - CRUD endpoints for every entity
//! - stats and demo data
//! - backup, restore and auto-backup settings

#[path = "common.rs"]
mod common;

use axum::http::{Method, StatusCode};
use common::TestApp;
use serde_json::json;
use transfers_admin::store::Collection;

// =============================================================================
// Root, Health, Auth
// =============================================================================

#[tokio::test]
async fn test_root_and_health_are_public() {
    let app = TestApp::new();

    let (status, body) = app.request(Method::GET, "/api/", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Transfers Admin API");
    assert_eq!(body["version"], "1.0.0");

    let (status, body) = app.request(Method::GET, "/health", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
async fn test_requests_without_token_are_rejected() {
    let app = TestApp::new();

    for uri in ["/api/users", "/api/backups", "/api/backups/settings", "/api/stats"] {
        let (status, body) = app.request(Method::GET, uri, None, None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED, "{uri}");
        assert_eq!(body["error"], "unauthorized");
        assert_eq!(body["detail"], "Not authenticated");
    }

    let (status, _) = app
        .request(Method::POST, "/api/backups", None, None)
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert!(app.backups.list_backups().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_invalid_token_is_rejected() {
    let app = TestApp::new();
    let (status, body) = app.get("/api/users", "not-a-token").await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["detail"], "Invalid token");
}

#[tokio::test]
async fn test_bootstrap_login_creates_super_admin_once() {
    let app = TestApp::new();

    let token = app.login().await;
    assert_eq!(app.store.count(Collection::Admins).await.unwrap(), 1);

    // Second login authenticates against the stored record
    app.login().await;
    assert_eq!(app.store.count(Collection::Admins).await.unwrap(), 1);

    let (status, me) = app.get("/api/auth/me", &token).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(me["email"], "admin@transfers.com");
    assert_eq!(me["role"], "super_admin");
    assert!(me.get("password").is_none());
}

#[tokio::test]
async fn test_login_rejects_bad_credentials() {
    let app = TestApp::new();

    let (status, body) = app
        .request(
            Method::POST,
            "/api/auth/login",
            None,
            Some(json!({"email": "nobody@transfers.com", "password": "admin123"})),
        )
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["detail"], "Invalid credentials");

    app.login().await;
    let (status, _) = app
        .request(
            Method::POST,
            "/api/auth/login",
            None,
            Some(json!({"email": "admin@transfers.com", "password": "wrong"})),
        )
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_me_returns_404_when_admin_deleted() {
    let app = TestApp::new();
    let token = app.login().await;

    app.store
        .replace_all(Collection::Admins, Vec::new())
        .await
        .unwrap();

    let (status, body) = app.get("/api/auth/me", &token).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "not_found");
}

// =============================================================================
// CRUD
// =============================================================================

#[tokio::test]
async fn test_user_lifecycle() {
    let app = TestApp::new();
    let token = app.login().await;

    let (status, user) = app
        .post(
            "/api/users",
            &token,
            json!({"name": "سارة أحمد", "email": "sara@example.com", "phone": "+966500000000"}),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(user["status"], "active");
    let id = user["id"].as_str().unwrap().to_string();

    let (_, users) = app.get("/api/users", &token).await;
    assert_eq!(users.as_array().unwrap().len(), 1);
    assert_eq!(users[0]["name"], "سارة أحمد");

    let (status, body) = app.put(&format!("/api/users/{id}"), &token, json!({})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["detail"], "No data to update");

    let (status, updated) = app
        .put(&format!("/api/users/{id}"), &token, json!({"status": "blocked"}))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["status"], "blocked");
    assert_eq!(updated["email"], "sara@example.com");

    let (status, _) = app
        .put("/api/users/missing", &token, json!({"status": "blocked"}))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = app.delete(&format!("/api/users/{id}"), &token).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "User deleted");

    let (status, _) = app.delete(&format!("/api/users/{id}"), &token).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_driver_verify() {
    let app = TestApp::new();
    let token = app.login().await;

    let (_, driver) = app
        .post(
            "/api/drivers",
            &token,
            json!({"name": "خالد", "phone": "+966511111111", "vehicle": "Camry", "plate": "ABC 123"}),
        )
        .await;
    assert_eq!(driver["verified"], false);
    assert_eq!(driver["status"], "offline");
    let id = driver["id"].as_str().unwrap();

    let (status, verified) = app
        .request(Method::PUT, &format!("/api/drivers/{id}/verify"), Some(&token), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(verified["verified"], true);

    let (status, _) = app
        .request(Method::PUT, "/api/drivers/missing/verify", Some(&token), None)
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_rides_expose_short_location_names() {
    let app = TestApp::new();
    let token = app.login().await;

    let (status, ride) = app
        .post(
            "/api/rides",
            &token,
            json!({"user": "أحمد", "driver": "خالد", "from": "حي الملز", "to": "المطار", "fare": 45.5}),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(ride["from"], "حي الملز");
    assert_eq!(ride["status"], "pending");
    let id = ride["id"].as_str().unwrap().to_string();

    let stored = app.store.find_one(Collection::Rides, &id).await.unwrap().unwrap();
    assert_eq!(stored["from_location"], "حي الملز");

    let (_, rides) = app.get("/api/rides", &token).await;
    assert_eq!(rides[0]["to"], "المطار");
    assert!(rides[0].get("to_location").is_none());

    let (status, updated) = app
        .request(
            Method::PUT,
            &format!("/api/rides/{id}/status?status=completed"),
            Some(&token),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["status"], "completed");
}

#[tokio::test]
async fn test_order_status_assigns_driver() {
    let app = TestApp::new();
    let token = app.login().await;

    let (_, order) = app
        .post(
            "/api/orders",
            &token,
            json!({"user": "أحمد", "restaurant": "مطعم البيك", "items": 3, "total": 85}),
        )
        .await;
    assert_eq!(order["status"], "preparing");
    assert_eq!(order["driver"], "-");
    let id = order["id"].as_str().unwrap().to_string();

    let (_, updated) = app
        .request(
            Method::PUT,
            &format!("/api/orders/{id}/status?status=on_way&driver=Khalid"),
            Some(&token),
            None,
        )
        .await;
    assert_eq!(updated["status"], "on_way");
    assert_eq!(updated["driver"], "Khalid");

    let (_, updated) = app
        .request(
            Method::PUT,
            &format!("/api/orders/{id}/status?status=delivered"),
            Some(&token),
            None,
        )
        .await;
    assert_eq!(updated["status"], "delivered");
    assert_eq!(updated["driver"], "Khalid");
}

#[tokio::test]
async fn test_duplicate_promotion_code_is_rejected() {
    let app = TestApp::new();
    let token = app.login().await;
    let promo = json!({
        "code": "WELCOME50",
        "discount": 50,
        "type": "percentage",
        "maxUses": 100,
        "expires": "2025-12-31",
        "service": "all"
    });

    let (status, created) = app.post("/api/promotions", &token, promo.clone()).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(created["maxUses"], 100);

    let (status, body) = app.post("/api/promotions", &token, promo).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["detail"], "Promotion code already exists");
    assert_eq!(app.store.count(Collection::Promotions).await.unwrap(), 1);
}

#[tokio::test]
async fn test_restaurant_update_and_delete() {
    let app = TestApp::new();
    let token = app.login().await;

    let (_, restaurant) = app
        .post("/api/restaurants", &token, json!({"name": "مطعم", "category": "برجر"}))
        .await;
    assert_eq!(restaurant["commission"], 15.0);
    let id = restaurant["id"].as_str().unwrap().to_string();

    let (_, updated) = app
        .put(&format!("/api/restaurants/{id}"), &token, json!({"commission": 20}))
        .await;
    assert_eq!(updated["commission"], 20.0);

    let (_, body) = app.delete(&format!("/api/restaurants/{id}"), &token).await;
    assert_eq!(body["message"], "Restaurant deleted");
}

// =============================================================================
// Stats and Seed
// =============================================================================

#[tokio::test]
async fn test_seed_then_stats() {
    let app = TestApp::new();
    let token = app.login().await;

    let (status, _) = app
        .request(Method::POST, "/api/seed", Some(&token), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    // Seeding leaves admin accounts alone
    assert_eq!(app.store.count(Collection::Admins).await.unwrap(), 1);

    let (status, stats) = app.get("/api/stats", &token).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(stats["totalUsers"], 5);
    assert_eq!(stats["totalRevenue"], 200.0);
    assert_eq!(stats["activeDrivers"], 3);
    assert_eq!(stats["pendingOrders"], 2);
    assert_eq!(stats["averageRating"], 4.7);
    assert_eq!(stats["monthlyGrowth"], 12.5);

    let (_, weekly) = app.get("/api/stats/weekly", &token).await;
    assert_eq!(weekly.as_array().unwrap().len(), 7);

    let (_, monthly) = app.get("/api/stats/monthly", &token).await;
    assert_eq!(monthly[0]["revenue"], 85_000);
}

// =============================================================================
// Backups
// =============================================================================

#[tokio::test]
async fn test_backup_restore_round_trip() {
    let app = TestApp::new();
    let token = app.login().await;
    app.request(Method::POST, "/api/seed", Some(&token), None).await;

    let (status, record) = app
        .request(Method::POST, "/api/backups", Some(&token), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(record["type"], "manual");
    let id = record["id"].as_str().unwrap().to_string();
    let filename = record["filename"].as_str().unwrap();
    assert!(app.backup_dir.join(filename).exists());

    let (_, list) = app.get("/api/backups", &token).await;
    assert_eq!(list.as_array().unwrap().len(), 1);
    assert_eq!(list[0]["id"], id.as_str());

    // Diverge from the snapshot
    app.store
        .replace_all(Collection::Users, Vec::new())
        .await
        .unwrap();

    let (status, body) = app
        .request(Method::POST, &format!("/api/backups/{id}/restore"), Some(&token), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["collections"].as_array().unwrap().len(), 7);
    assert_eq!(app.store.count(Collection::Users).await.unwrap(), 5);

    // The admin that took the backup still exists after restore
    let (status, _) = app.get("/api/auth/me", &token).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = app.delete(&format!("/api/backups/{id}"), &token).await;
    assert_eq!(status, StatusCode::OK);
    assert!(!app.backup_dir.join(record["filename"].as_str().unwrap()).exists());

    let (status, body) = app.delete(&format!("/api/backups/{id}"), &token).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "not_found");
}

#[tokio::test]
async fn test_restore_unknown_backup_is_404() {
    let app = TestApp::new();
    let token = app.login().await;

    let (status, _) = app
        .request(Method::POST, "/api/backups/bk_missing/restore", Some(&token), None)
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_restore_missing_artifact_is_500() {
    let app = TestApp::new();
    let token = app.login().await;

    let (_, record) = app
        .request(Method::POST, "/api/backups", Some(&token), None)
        .await;
    std::fs::remove_file(app.backup_dir.join(record["filename"].as_str().unwrap())).unwrap();

    let id = record["id"].as_str().unwrap();
    let (status, body) = app
        .request(Method::POST, &format!("/api/backups/{id}/restore"), Some(&token), None)
        .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "artifact_missing");
}

#[tokio::test]
async fn test_backup_settings() {
    let app = TestApp::new();
    let token = app.login().await;

    let (status, settings) = app.get("/api/backups/settings", &token).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(settings["auto_backup_enabled"], true);
    assert_eq!(settings["interval_hours"], 6);
    assert!(settings["last_backup"].is_null());
    assert!(settings["next_backup"].is_null());

    // Intervals are stored as given, even non-positive ones
    let (status, settings) = app
        .put(
            "/api/backups/settings",
            &token,
            json!({"auto_backup_enabled": false, "interval_hours": 0}),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(settings["auto_backup_enabled"], false);
    assert_eq!(settings["interval_hours"], 0);

    let (_, settings) = app.get("/api/backups/settings", &token).await;
    assert_eq!(settings["auto_backup_enabled"], false);
}
