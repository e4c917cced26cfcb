//! Dispatch boundary tests: payload gate, unknown names, passthrough.

use serde_json::json;
use tebooka_backend::callable::CallableError;

use crate::support::test_service;

#[tokio::test]
async fn result_passes_through_unmodified() {
    let service = test_service();

    let result = service
        .dispatch("echo", json!({ "hello": "world", "n": 3 }), None)
        .await
        .unwrap();
    assert_eq!(result, json!({ "hello": "world", "n": 3 }));
}

#[tokio::test]
async fn every_non_object_payload_is_rejected() {
    let service = test_service();

    for data in [
        json!(null),
        json!(true),
        json!(7),
        json!("a string"),
        json!([1, 2, 3]),
    ] {
        let err = service.dispatch("ping", data, None).await.unwrap_err();
        assert_eq!(err.code(), "invalid-argument");
        assert_eq!(err.message(), "Request data must be an object.");
    }
}

#[tokio::test]
async fn non_object_gate_fires_before_name_lookup() {
    let service = test_service();

    // Even an unknown name fails on the payload shape first.
    let err = service
        .dispatch("nonexistent", json!("text"), None)
        .await
        .unwrap_err();
    assert_eq!(err.code(), "invalid-argument");
}

#[tokio::test]
async fn unknown_name_is_not_found() {
    let service = test_service();

    let err = service
        .dispatch("nonexistent", json!({}), None)
        .await
        .unwrap_err();
    assert!(matches!(err, CallableError::NotFound(ref name) if name == "nonexistent"));
    assert_eq!(err.code(), "not-found");
}

#[tokio::test]
async fn empty_object_is_a_valid_payload() {
    let service = test_service();

    let result = service.dispatch("ping", json!({}), None).await.unwrap();
    assert_eq!(result, json!({ "pong": true }));
}
