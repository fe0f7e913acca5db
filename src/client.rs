//! Client-side submission handler for the contact form.
//!
//! Mirrors what the browser form does: one request per user action, server
//! validation is authoritative, transport failures collapse into a generic
//! retry-later message.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::contact::MSG_REQUIRED;

/// Shown when the request itself fails (timeout, DNS, connection refused).
pub const MSG_NETWORK_FALLBACK: &str =
    "Verbindung fehlgeschlagen. Bitte versuchen Sie es später erneut.";

/// Raw field values as read from form controls.
#[derive(Debug, Default, Clone, Serialize)]
pub struct SubmitFields {
    pub name: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interest: Option<String>,
    pub message: String,
}

/// Outcome presented to the user after one submit action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiState {
    Sent { confirmation: String },
    Error { message: String },
}

#[derive(Deserialize)]
struct ApiResponse {
    success: bool,
    message: Option<String>,
    error: Option<String>,
}

#[derive(Clone)]
pub struct ContactClient {
    http: reqwest::Client,
    base_url: String,
}

impl ContactClient {
    pub fn new(base_url: impl Into<String>) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()?;

        Ok(Self {
            http,
            base_url: base_url.into(),
        })
    }

    /// Submit the form fields. Sends at most one request; a repeated
    /// submission requires a new explicit call.
    pub async fn submit(&self, fields: SubmitFields) -> UiState {
        // keep obviously incomplete submissions off the network, everything
        // else is validated server-side
        if fields.name.trim().is_empty()
            || fields.email.trim().is_empty()
            || fields.message.trim().is_empty()
        {
            return UiState::Error {
                message: MSG_REQUIRED.to_owned(),
            };
        }

        let response = match self
            .http
            .post(format!("{}/api/contact", self.base_url))
            .json(&fields)
            .send()
            .await
        {
            Ok(response) => response,
            Err(err) => {
                tracing::warn!(error = %err, "contact submission did not reach the server");
                return UiState::Error {
                    message: MSG_NETWORK_FALLBACK.to_owned(),
                };
            }
        };

        match response.json::<ApiResponse>().await {
            Ok(body) if body.success => UiState::Sent {
                confirmation: body.message.unwrap_or_default(),
            },
            Ok(body) => UiState::Error {
                message: body
                    .error
                    .unwrap_or_else(|| MSG_NETWORK_FALLBACK.to_owned()),
            },
            Err(err) => {
                tracing::warn!(error = %err, "unreadable response from submission service");
                UiState::Error {
                    message: MSG_NETWORK_FALLBACK.to_owned(),
                }
            }
        }
    }
}
