//! Upload API integration tests.
//!
//! Run with: `cargo test -p conveyor-api --test uploads_test`
//! Backed by the in-memory storage backend; no external provider required.

mod helpers;

use helpers::setup_test_app;
use serde_json::{json, Value};

#[tokio::test]
async fn test_liveness_marker() {
    let app = setup_test_app();

    let response = app.client().get("/").await;

    assert_eq!(response.status_code(), 200);
    assert_eq!(response.json::<Value>(), json!({ "status": "alive" }));
}

#[tokio::test]
async fn test_start_without_file_name_is_rejected_before_the_provider() {
    let app = setup_test_app();

    // Missing fileName fails query deserialization; the handler (and with it
    // the storage call) is never entered.
    let response = app.client().get("/uploads/start").await;

    assert_eq!(response.status_code(), 400);
    let body: Value = response.json();
    assert_eq!(body["code"], "INVALID_INPUT");
}

#[tokio::test]
async fn test_start_rejects_empty_file_name() {
    let app = setup_test_app();

    let response = app
        .client()
        .get("/uploads/start")
        .add_query_param("fileName", "")
        .await;

    assert_eq!(response.status_code(), 400);
    let body: Value = response.json();
    assert_eq!(body["code"], "INVALID_INPUT");
}

#[tokio::test]
async fn test_start_returns_distinct_upload_ids() {
    let app = setup_test_app();

    let first: Value = app
        .client()
        .get("/uploads/start")
        .add_query_param("fileName", "images/a.png")
        .await
        .json();
    let second: Value = app
        .client()
        .get("/uploads/start")
        .add_query_param("fileName", "images/a.png")
        .await
        .json();

    let first_id = first["uploadId"].as_str().unwrap();
    let second_id = second["uploadId"].as_str().unwrap();
    assert!(!first_id.is_empty());
    assert_ne!(first_id, second_id);
}

#[tokio::test]
async fn test_sign_part_urls_differ_by_part_number() {
    let app = setup_test_app();

    let start: Value = app
        .client()
        .get("/uploads/start")
        .add_query_param("fileName", "images/a.png")
        .await
        .json();
    let upload_id = start["uploadId"].as_str().unwrap();

    let mut urls = Vec::new();
    for part in [1, 1, 2] {
        let response = app
            .client()
            .get("/uploads/sign/part")
            .add_query_param("fileName", "images/a.png")
            .add_query_param("uploadId", upload_id)
            .add_query_param("partNumber", part)
            .await;
        assert_eq!(response.status_code(), 200);
        let body: Value = response.json();
        assert_eq!(body["partNumber"], part);
        urls.push(body["url"].as_str().unwrap().to_string());
    }

    // Same inputs sign to the same URL; a different part number signs differently.
    assert_eq!(urls[0], urls[1]);
    assert_ne!(urls[0], urls[2]);
}

#[tokio::test]
async fn test_sign_part_rejects_non_positive_part_number() {
    let app = setup_test_app();

    let response = app
        .client()
        .get("/uploads/sign/part")
        .add_query_param("fileName", "images/a.png")
        .add_query_param("uploadId", "u-1")
        .add_query_param("partNumber", 0)
        .await;

    assert_eq!(response.status_code(), 400);
    let body: Value = response.json();
    assert_eq!(body["code"], "INVALID_INPUT");
}

#[tokio::test]
async fn test_round_trip_upload() {
    let app = setup_test_app();
    let client = app.client();

    let start: Value = client
        .get("/uploads/start")
        .add_query_param("fileName", "images/a.png")
        .await
        .json();
    let upload_id = start["uploadId"].as_str().unwrap();

    let url1: Value = client
        .get("/uploads/sign/part")
        .add_query_param("fileName", "images/a.png")
        .add_query_param("uploadId", upload_id)
        .add_query_param("partNumber", 1)
        .await
        .json();
    let url2: Value = client
        .get("/uploads/sign/part")
        .add_query_param("fileName", "images/a.png")
        .add_query_param("uploadId", upload_id)
        .add_query_param("partNumber", 2)
        .await
        .json();
    assert_ne!(url1["url"], url2["url"]);

    let response = client
        .post("/uploads/complete")
        .add_query_param("fileName", "images/a.png")
        .add_query_param("uploadId", upload_id)
        .json(&json!([
            { "partNumber": 1, "eTag": "etag1" },
            { "partNumber": 2, "eTag": "etag2" }
        ]))
        .await;

    assert_eq!(response.status_code(), 200);
    let body: Value = response.json();
    assert!(body["location"].as_str().unwrap().contains("images/a.png"));
}

#[tokio::test]
async fn test_complete_with_missing_parts_is_an_upstream_error() {
    let app = setup_test_app();
    let client = app.client();

    let start: Value = client
        .get("/uploads/start")
        .add_query_param("fileName", "big.bin")
        .await
        .json();
    let upload_id = start["uploadId"].as_str().unwrap();

    // Part 2 was never acknowledged; the provider rejects the gap.
    let response = client
        .post("/uploads/complete")
        .add_query_param("fileName", "big.bin")
        .add_query_param("uploadId", upload_id)
        .json(&json!([
            { "partNumber": 1, "eTag": "etag1" },
            { "partNumber": 3, "eTag": "etag3" }
        ]))
        .await;

    assert_eq!(response.status_code(), 502);
    let body: Value = response.json();
    assert_eq!(body["code"], "UPSTREAM_ERROR");
}

#[tokio::test]
async fn test_complete_unknown_session_is_an_upstream_error() {
    let app = setup_test_app();

    let response = app
        .client()
        .post("/uploads/complete")
        .add_query_param("fileName", "big.bin")
        .add_query_param("uploadId", "never-started")
        .json(&json!([{ "partNumber": 1, "eTag": "etag1" }]))
        .await;

    assert_eq!(response.status_code(), 502);
    let body: Value = response.json();
    assert_eq!(body["code"], "UPSTREAM_ERROR");
}

#[tokio::test]
async fn test_complete_rejects_malformed_receipts() {
    let app = setup_test_app();
    let client = app.client();

    let start: Value = client
        .get("/uploads/start")
        .add_query_param("fileName", "big.bin")
        .await
        .json();
    let upload_id = start["uploadId"].as_str().unwrap();

    let response = client
        .post("/uploads/complete")
        .add_query_param("fileName", "big.bin")
        .add_query_param("uploadId", upload_id)
        .json(&json!([{ "partNumber": 0, "eTag": "etag1" }]))
        .await;

    assert_eq!(response.status_code(), 400);
    let body: Value = response.json();
    assert_eq!(body["code"], "INVALID_INPUT");
}

#[tokio::test]
async fn test_abort_returns_fixed_acknowledgment() {
    let app = setup_test_app();
    let client = app.client();

    let start: Value = client
        .get("/uploads/start")
        .add_query_param("fileName", "big.bin")
        .await
        .json();
    let upload_id = start["uploadId"].as_str().unwrap();

    let response = client
        .post("/uploads/abort")
        .add_query_param("fileName", "big.bin")
        .add_query_param("uploadId", upload_id)
        .await;

    assert_eq!(response.status_code(), 200);
    assert_eq!(response.json::<Value>(), json!({ "status": "OK" }));
}

#[tokio::test]
async fn test_abort_unknown_session_is_an_upstream_error() {
    let app = setup_test_app();

    let response = app
        .client()
        .post("/uploads/abort")
        .add_query_param("fileName", "big.bin")
        .add_query_param("uploadId", "never-started")
        .await;

    assert_eq!(response.status_code(), 502);
    let body: Value = response.json();
    assert_eq!(body["code"], "UPSTREAM_ERROR");
}

#[tokio::test]
async fn test_completed_session_cannot_be_reused() {
    let app = setup_test_app();
    let client = app.client();

    let start: Value = client
        .get("/uploads/start")
        .add_query_param("fileName", "images/b.png")
        .await
        .json();
    let upload_id = start["uploadId"].as_str().unwrap();

    let receipts = json!([{ "partNumber": 1, "eTag": "etag1" }]);

    let response = client
        .post("/uploads/complete")
        .add_query_param("fileName", "images/b.png")
        .add_query_param("uploadId", upload_id)
        .json(&receipts)
        .await;
    assert_eq!(response.status_code(), 200);

    // The session is terminal; aborting it afterwards surfaces the provider error.
    let response = client
        .post("/uploads/abort")
        .add_query_param("fileName", "images/b.png")
        .add_query_param("uploadId", upload_id)
        .await;
    assert_eq!(response.status_code(), 502);
}
