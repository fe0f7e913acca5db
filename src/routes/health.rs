use axum::{Json, http::StatusCode, response::IntoResponse};
use serde_json::json;
use time::{OffsetDateTime, format_description::well_known::Rfc3339};

/// GET /api/health - Liveness probe
/// Returns 200 OK if the process is alive, independent of mail relay health
pub async fn health() -> impl IntoResponse {
    // RFC 3339 formatting only fails for years outside 0..=9999
    let timestamp = OffsetDateTime::now_utc()
        .format(&Rfc3339)
        .expect("current time is representable in RFC 3339");

    (
        StatusCode::OK,
        Json(json!({ "status": "ok", "timestamp": timestamp })),
    )
}
