use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

/// Generic retry-later text returned whenever the relay fails. The concrete
/// relay error stays in the logs and never crosses the wire.
pub const MSG_DELIVERY_FAILED: &str =
    "Die Nachricht konnte nicht gesendet werden. Bitte versuchen Sie es später erneut.";

#[derive(Error, Debug)]
pub enum AppError {
    #[error("{0}")]
    Validation(String),

    #[error("delivery failed: {0}")]
    Delivery(#[source] anyhow::Error),
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::Delivery(err)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error) = match self {
            AppError::Validation(message) => (StatusCode::BAD_REQUEST, message),
            AppError::Delivery(err) => {
                tracing::error!(error = %err, "failed to relay contact request");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    MSG_DELIVERY_FAILED.to_owned(),
                )
            }
        };

        (status, Json(json!({ "success": false, "error": error }))).into_response()
    }
}
