//! Integration tests for the contact submission pipeline and health probe.

use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use serde_json::json;
use time::{OffsetDateTime, format_description::well_known::Rfc3339};
use tower::ServiceExt;

mod helpers;

use helpers::{body_json, failing_app, post_contact, test_app};

fn valid_payload() -> serde_json::Value {
    json!({
        "name": "Max",
        "email": "max@example.com",
        "message": "Hallo"
    })
}

#[tokio::test]
async fn missing_required_fields_return_400_without_touching_the_relay() {
    let cases = vec![
        json!({ "email": "max@example.com", "message": "Hallo" }),
        json!({ "name": "Max", "message": "Hallo" }),
        json!({ "name": "Max", "email": "max@example.com" }),
        json!({ "name": "", "email": "max@example.com", "message": "Hallo" }),
        json!({ "name": "   ", "email": "max@example.com", "message": "Hallo" }),
        json!({ "name": "Max", "email": "max@example.com", "message": " \n " }),
    ];

    for payload in cases {
        let (app, email) = test_app();
        let response = post_contact(app, payload.clone()).await;

        assert_eq!(
            response.status(),
            StatusCode::BAD_REQUEST,
            "payload: {payload}"
        );

        let body = body_json(response).await;
        assert_eq!(body["success"], json!(false));
        assert_eq!(
            body["error"],
            json!("Name, Email und Nachricht sind Pflichtfelder")
        );
        assert_eq!(email.mock_delivery_count(), 0);
    }
}

#[tokio::test]
async fn malformed_email_returns_400_without_touching_the_relay() {
    for email_value in ["abc", "a@b", "a@.com"] {
        let (app, email) = test_app();
        let mut payload = valid_payload();
        payload["email"] = json!(email_value);

        let response = post_contact(app, payload).await;

        assert_eq!(
            response.status(),
            StatusCode::BAD_REQUEST,
            "email: {email_value}"
        );
        assert_eq!(email.mock_delivery_count(), 0);
    }
}

#[tokio::test]
async fn valid_request_is_relayed_and_returns_message_id() {
    let (app, email) = test_app();

    let response = post_contact(app, valid_payload()).await;

    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["success"], json!(true));
    assert!(!body["message"].as_str().unwrap().is_empty());
    assert!(!body["messageId"].as_str().unwrap().is_empty());
    assert_eq!(email.mock_delivery_count(), 1);
}

#[tokio::test]
async fn permissive_address_shapes_pass_validation() {
    // `+` before the `@` is fine under the simple shape check
    let (app, email) = test_app();
    let mut payload = valid_payload();
    payload["email"] = json!("max+newsletter@example.com");

    let response = post_contact(app, payload).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(email.mock_delivery_count(), 1);
}

#[tokio::test]
async fn relay_failure_maps_to_opaque_500() {
    let app = failing_app();

    let response = post_contact(app, valid_payload()).await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let body = body_json(response).await;
    assert_eq!(body["success"], json!(false));
    let error = body["error"].as_str().unwrap();
    assert!(!error.is_empty());
    // the relay-internal reason must never cross the wire
    assert!(!error.contains("mock relay"));
    assert!(!error.contains("SMTP"));
}

#[tokio::test]
async fn identical_submissions_are_delivered_independently() {
    let (app, email) = test_app();

    let first = post_contact(app.clone(), valid_payload()).await;
    let second = post_contact(app, valid_payload()).await;

    assert_eq!(first.status(), StatusCode::OK);
    assert_eq!(second.status(), StatusCode::OK);
    assert_eq!(email.mock_delivery_count(), 2);

    // no deduplication: each delivery gets its own id
    let first_id = body_json(first).await["messageId"].clone();
    let second_id = body_json(second).await["messageId"].clone();
    assert_ne!(first_id, second_id);
}

#[tokio::test]
async fn optional_fields_are_accepted() {
    let (app, email) = test_app();
    let mut payload = valid_payload();
    payload["phone"] = json!("0171 2345678");
    payload["interest"] = json!("Leuchtwerbung");

    let response = post_contact(app, payload).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(email.mock_delivery_count(), 1);
}

#[tokio::test]
async fn whitespace_only_optional_fields_are_accepted_as_absent() {
    let (app, email) = test_app();
    let mut payload = valid_payload();
    payload["phone"] = json!("   ");
    payload["interest"] = json!("");

    let response = post_contact(app, payload).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(email.mock_delivery_count(), 1);
}

#[tokio::test]
async fn health_returns_ok_with_parseable_timestamp() {
    // health does not depend on relay state, so run it against the failing
    // relay on purpose
    let app = failing_app();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["status"], json!("ok"));

    let timestamp = body["timestamp"].as_str().unwrap();
    assert!(OffsetDateTime::parse(timestamp, &Rfc3339).is_ok());
}

#[tokio::test]
async fn landing_page_renders() {
    let (app, _) = test_app();

    let response = app
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}
