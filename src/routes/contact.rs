use axum::{Json, extract::State};
use serde::Serialize;

use crate::contact::{ContactForm, ContactRequest};
use crate::error::AppError;
use crate::routes::AppState;

pub const MSG_SENT: &str = "Ihre Nachricht wurde erfolgreich gesendet!";

#[derive(Serialize)]
pub struct SubmitResponse {
    pub success: bool,
    pub message: &'static str,
    #[serde(rename = "messageId")]
    pub message_id: String,
}

/// POST /api/contact - validate one submission and relay it to the operator.
/// Validation short-circuits before the relay is touched; a relay failure
/// maps to an opaque 500 in [`AppError`].
pub async fn submit(
    State(state): State<AppState>,
    Json(form): Json<ContactForm>,
) -> Result<Json<SubmitResponse>, AppError> {
    let request = ContactRequest::parse(form)?;

    let message_id = state.email.send_contact_notification(&request).await?;

    tracing::info!(message_id = %message_id, "Contact request relayed");

    Ok(Json(SubmitResponse {
        success: true,
        message: MSG_SENT,
        message_id,
    }))
}
