//! Integration tests for creating and resolving links.

mod helpers;

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;
use serde_json::json;

use linkbox_core::error::ErrorKind;

#[derive(Debug, Serialize)]
struct CheckoutItem {
    name: String,
    price: f64,
}

#[derive(Debug, Serialize)]
struct Checkout {
    email: String,
    items: Vec<CheckoutItem>,
    coupon: Option<String>,
}

#[tokio::test]
async fn test_round_trip_json_values() {
    let app = helpers::TestStore::new(600).await;

    let payloads = vec![
        json!({"items": [{"name": "Mango", "price": 2.5}, {"name": "Banana", "price": 1.25}]}),
        json!([1, "two", 3.5, null, true, {"nested": {"deeper": []}}]),
        json!("plain string with ünïcödé and \"quotes\""),
        json!(null),
        json!(-9007199254740993i64),
        json!({}),
    ];

    for payload in payloads {
        let id = app.store.create(&payload).await.unwrap();
        assert_eq!(app.store.retrieve(&id).await.unwrap(), payload);
    }
}

#[tokio::test]
async fn test_round_trip_typed_payload() {
    let app = helpers::TestStore::new(600).await;
    let checkout = Checkout {
        email: "buyer@example.com".to_string(),
        items: vec![
            CheckoutItem {
                name: "Pineapple".to_string(),
                price: 4.5,
            },
            CheckoutItem {
                name: "Grapes".to_string(),
                price: 0.125,
            },
        ],
        coupon: None,
    };

    let id = app.store.create(&checkout).await.unwrap();

    assert_eq!(
        app.store.retrieve(&id).await.unwrap(),
        serde_json::to_value(&checkout).unwrap()
    );
}

#[tokio::test]
async fn test_generated_ids_are_short_alphanumeric() {
    let app = helpers::TestStore::new(600).await;

    let id = app.store.create(&json!({"k": "v"})).await.unwrap();

    assert_eq!(id.len(), 6);
    assert!(id.chars().all(|c| c.is_ascii_alphanumeric()));
}

#[tokio::test]
async fn test_expiry_boundary_with_real_clock() {
    let app = helpers::TestStore::new(1).await;

    let id = app.store.create(&json!({"cart": [1, 2]})).await.unwrap();
    assert_eq!(
        app.store.retrieve(&id).await.unwrap(),
        json!({"cart": [1, 2]})
    );

    tokio::time::sleep(Duration::from_millis(2100)).await;

    let err = app.store.retrieve(&id).await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::Expired);
    assert!(!err.is_retryable());

    // The read that discovered the expiry removed the row.
    assert_eq!(app.row_count().await, 0);
    let err = app.store.retrieve(&id).await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::NotFound);
}

// Links remain readable until they expire. Whether a successful read should
// consume a link (one-time token) is an open product question; this pins the
// reusable behavior so a change to single-use is a deliberate one.
#[tokio::test]
async fn test_retrieve_is_not_single_use() {
    let app = helpers::TestStore::new(600).await;
    let id = app.store.create(&json!({"total": 9.75})).await.unwrap();

    let first = app.store.retrieve(&id).await.unwrap();
    let second = app.store.retrieve(&id).await.unwrap();

    assert_eq!(first, second);
    assert_eq!(app.row_count().await, 1);
}

#[tokio::test]
async fn test_unknown_id_is_not_found() {
    let app = helpers::TestStore::new(600).await;

    let err = app.store.retrieve("doesnotexist").await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::NotFound);

    let err = app.store.retrieve("").await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::NotFound);

    let err = app.store.retrieve("'; DROP TABLE links; --").await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::NotFound);
    assert_eq!(app.row_count().await, 0);
}

#[tokio::test]
async fn test_expiry_is_creation_time_plus_duration() {
    let app = helpers::TestStore::new(600).await;

    let before = helpers::now();
    let link = app.store.create_link(&json!(1)).await.unwrap();
    let after = helpers::now();

    assert!(link.expires_at >= before + 600);
    assert!(link.expires_at <= after + 600);
    assert!(link.url.ends_with(&format!("/access_data/{}", link.id)));
}

#[tokio::test]
async fn test_schema_bootstrap_keeps_existing_data() {
    let app = helpers::TestStore::new(600).await;
    let id = app.store.create(&json!({"survives": "restart"})).await.unwrap();

    let reopened = app.reopen().await;
    let reopened_again = app.reopen().await;

    assert_eq!(
        reopened.retrieve(&id).await.unwrap(),
        json!({"survives": "restart"})
    );
    assert_eq!(
        reopened_again.retrieve(&id).await.unwrap(),
        json!({"survives": "restart"})
    );
    assert_eq!(app.row_count().await, 1);
}

#[tokio::test]
async fn test_concurrent_creates_get_distinct_ids() {
    let app = helpers::TestStore::new(600).await;
    let store = Arc::new(app.store.clone());

    let handles: Vec<_> = (0..32)
        .map(|n| {
            let store = Arc::clone(&store);
            tokio::spawn(async move { (n, store.create(&json!({"n": n})).await.unwrap()) })
        })
        .collect();

    let mut ids = HashSet::new();
    for handle in handles {
        let (n, id) = handle.await.unwrap();
        assert_eq!(store.retrieve(&id).await.unwrap(), json!({"n": n}));
        ids.insert(id);
    }

    assert_eq!(ids.len(), 32);
    assert_eq!(app.row_count().await, 32);
}

#[tokio::test]
async fn test_expired_read_reports_expired_when_delete_fails() {
    let app = helpers::TestStore::new(600).await;
    app.insert_raw("stuck1", &json!({"cart": 1}), helpers::now() - 5)
        .await;
    app.execute_raw(
        "CREATE TRIGGER block_delete BEFORE DELETE ON links \
         BEGIN SELECT RAISE(FAIL, 'deletes disabled'); END",
    )
    .await;

    let err = app.store.retrieve("stuck1").await.unwrap_err();

    assert_eq!(err.kind, ErrorKind::Expired);
    assert_eq!(app.row_count().await, 1);
}

#[tokio::test]
async fn test_create_reports_storage_when_insert_fails() {
    let app = helpers::TestStore::new(600).await;
    app.execute_raw(
        "CREATE TRIGGER block_insert BEFORE INSERT ON links \
         BEGIN SELECT RAISE(FAIL, 'inserts disabled'); END",
    )
    .await;

    let err = app.store.create(&json!({"cart": 2})).await.unwrap_err();

    assert_eq!(err.kind, ErrorKind::Storage);
    assert!(err.is_retryable());
    assert_eq!(app.row_count().await, 0);
}
