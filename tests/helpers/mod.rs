//! Test helpers: router construction against a mock mail relay.

#![allow(dead_code)]

use axum::{
    Router,
    body::Body,
    http::{Request, Response, header},
};
use http_body_util::BodyExt;
use lichtblick::{AppState, config::EmailConfig, email::EmailService};
use tower::ServiceExt;

pub fn test_email_config() -> EmailConfig {
    EmailConfig {
        smtp_host: "localhost".to_string(),
        smtp_port: 1025,
        smtp_username: String::new(),
        smtp_password: String::new(),
        smtp_tls: false,
        from_address: "website@lichtblick.test".to_string(),
        contact_address: "info@lichtblick.test".to_string(),
    }
}

/// App with a relay that accepts everything. Returns the service handle too
/// so tests can observe delivery counts.
pub fn test_app() -> (Router, EmailService) {
    let email = EmailService::new_mock(&test_email_config());
    let app = lichtblick::create_app(AppState {
        email: email.clone(),
    });
    (app, email)
}

/// App with a relay that rejects every delivery.
pub fn failing_app() -> Router {
    let email = EmailService::new_failing_mock(&test_email_config());
    lichtblick::create_app(AppState { email })
}

pub async fn post_contact(app: Router, payload: serde_json::Value) -> Response<Body> {
    app.oneshot(
        Request::builder()
            .method("POST")
            .uri("/api/contact")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(payload.to_string()))
            .unwrap(),
    )
    .await
    .unwrap()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
