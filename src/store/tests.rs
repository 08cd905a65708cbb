//! Tests for the document store module.
//!
//! Every behavior is checked against both backends so the in-memory store
//! stays a faithful stand-in for redb.

use super::*;
use serde_json::json;
use tempfile::TempDir;

fn doc(value: serde_json::Value) -> Document {
    value.as_object().cloned().unwrap()
}

fn backends(tmp: &TempDir) -> Vec<DocumentStore> {
    vec![
        DocumentStore::memory(),
        DocumentStore::file(tmp.path().join("test.redb")).unwrap(),
    ]
}

#[tokio::test]
async fn test_insert_and_find_one() {
    let tmp = TempDir::new().unwrap();
    for store in backends(&tmp) {
        store
            .insert_one(Collection::Users, doc(json!({"id": "1", "name": "أحمد محمد"})))
            .await
            .unwrap();

        let found = store.find_one(Collection::Users, "1").await.unwrap().unwrap();
        assert_eq!(found["name"], "أحمد محمد");
        assert!(store.find_one(Collection::Users, "2").await.unwrap().is_none());
        assert!(store.find_one(Collection::Drivers, "1").await.unwrap().is_none());
    }
}

#[tokio::test]
async fn test_find_all_is_ordered_and_limited() {
    let tmp = TempDir::new().unwrap();
    for store in backends(&tmp) {
        for id in ["c", "a", "b"] {
            store
                .insert_one(Collection::Orders, doc(json!({"id": id})))
                .await
                .unwrap();
        }

        let all = store.find_all(Collection::Orders, 10).await.unwrap();
        let ids: Vec<_> = all.iter().map(|d| d["id"].as_str().unwrap()).collect();
        assert_eq!(ids, vec!["a", "b", "c"]);

        let limited = store.find_all(Collection::Orders, 2).await.unwrap();
        assert_eq!(limited.len(), 2);
        assert_eq!(store.count(Collection::Orders).await.unwrap(), 3);
    }
}

#[tokio::test]
async fn test_insert_without_id_fails() {
    let tmp = TempDir::new().unwrap();
    for store in backends(&tmp) {
        let result = store
            .insert_one(Collection::Users, doc(json!({"name": "nobody"})))
            .await;
        assert!(result.is_err());
        assert_eq!(store.count(Collection::Users).await.unwrap(), 0);
    }
}

#[tokio::test]
async fn test_update_merges_fields() {
    let tmp = TempDir::new().unwrap();
    for store in backends(&tmp) {
        store
            .insert_one(
                Collection::Drivers,
                doc(json!({"id": "1", "name": "فهد", "verified": false})),
            )
            .await
            .unwrap();

        let updated = store
            .update_one(Collection::Drivers, "1", doc(json!({"verified": true})))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated["verified"], true);
        assert_eq!(updated["name"], "فهد");

        let missing = store
            .update_one(Collection::Drivers, "404", doc(json!({"verified": true})))
            .await
            .unwrap();
        assert!(missing.is_none());
    }
}

#[tokio::test]
async fn test_delete_one() {
    let tmp = TempDir::new().unwrap();
    for store in backends(&tmp) {
        store
            .insert_one(Collection::Promotions, doc(json!({"id": "P001"})))
            .await
            .unwrap();

        assert!(store.delete_one(Collection::Promotions, "P001").await.unwrap());
        assert!(!store.delete_one(Collection::Promotions, "P001").await.unwrap());
    }
}

#[tokio::test]
async fn test_replace_all_clears_and_inserts() {
    let tmp = TempDir::new().unwrap();
    for store in backends(&tmp) {
        store
            .insert_one(Collection::Rides, doc(json!({"id": "R001"})))
            .await
            .unwrap();

        store
            .replace_all(
                Collection::Rides,
                vec![doc(json!({"id": "R002"})), doc(json!({"id": "R003"}))],
            )
            .await
            .unwrap();
        let ids: Vec<_> = store
            .find_all(Collection::Rides, 10)
            .await
            .unwrap()
            .iter()
            .map(|d| d["id"].as_str().unwrap().to_string())
            .collect();
        assert_eq!(ids, vec!["R002", "R003"]);

        store.replace_all(Collection::Rides, Vec::new()).await.unwrap();
        assert_eq!(store.count(Collection::Rides).await.unwrap(), 0);
    }
}

#[tokio::test]
async fn test_find_by_field() {
    let tmp = TempDir::new().unwrap();
    for store in backends(&tmp) {
        store
            .insert_one(
                Collection::Admins,
                doc(json!({"id": "a1", "email": "ops@transfers.com"})),
            )
            .await
            .unwrap();

        let found = store
            .find_by_field(Collection::Admins, "email", "ops@transfers.com")
            .await
            .unwrap();
        assert_eq!(found.unwrap()["id"], "a1");

        let missing = store
            .find_by_field(Collection::Admins, "email", "nobody@transfers.com")
            .await
            .unwrap();
        assert!(missing.is_none());
    }
}

#[tokio::test]
async fn test_redb_persists_across_reopen() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("persist.redb");

    {
        let store = DocumentStore::file(&path).unwrap();
        store
            .insert_one(Collection::Restaurants, doc(json!({"id": "1", "name": "مطعم البيت"})))
            .await
            .unwrap();
    }

    let store = DocumentStore::file(&path).unwrap();
    let found = store
        .find_one(Collection::Restaurants, "1")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(found["name"], "مطعم البيت");
}

#[test]
fn test_to_document_rejects_non_objects() {
    assert!(to_document(&json!({"id": "1"})).is_ok());
    assert!(to_document(&json!([1, 2, 3])).is_err());
}
