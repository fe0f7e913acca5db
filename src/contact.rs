//! Contact request validation

use std::sync::LazyLock;

use regex::Regex;
use serde::Deserialize;

use crate::error::AppError;

pub const MSG_REQUIRED: &str = "Name, Email und Nachricht sind Pflichtfelder";
pub const MSG_INVALID_EMAIL: &str = "Bitte geben Sie eine gültige Email-Adresse an";

/// Deliberately simple shape check: `local@domain.tld` with no spaces or
/// extra `@`. Stricter RFC validation would reject addresses this form has
/// always accepted, so the pattern stays as-is.
static EMAIL_SHAPE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap());

/// Raw field values as posted by the contact form. Fields default so that an
/// absent key validates like an empty one instead of failing deserialization.
#[derive(Debug, Default, Deserialize)]
pub struct ContactForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub interest: Option<String>,
    #[serde(default)]
    pub message: String,
}

/// One validated submission. Lives for a single request/response cycle and is
/// never persisted.
#[derive(Debug, Clone)]
pub struct ContactRequest {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub interest: Option<String>,
    pub message: String,
}

impl ContactRequest {
    /// Validate a raw form. Required fields first, then the email shape;
    /// both short-circuit before any relay call happens.
    pub fn parse(form: ContactForm) -> Result<Self, AppError> {
        let name = form.name.trim().to_owned();
        let email = form.email.trim().to_owned();
        let message = form.message.trim().to_owned();

        if name.is_empty() || email.is_empty() || message.is_empty() {
            return Err(AppError::Validation(MSG_REQUIRED.to_owned()));
        }

        if !is_valid_email(&email) {
            return Err(AppError::Validation(MSG_INVALID_EMAIL.to_owned()));
        }

        Ok(Self {
            name,
            email,
            phone: non_empty(form.phone),
            interest: non_empty(form.interest),
            message,
        })
    }
}

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_SHAPE.is_match(email)
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_owned())
        .filter(|v| !v.is_empty())
}
