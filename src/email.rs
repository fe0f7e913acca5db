//! Email notification service using lettre

use std::sync::{
    Arc,
    atomic::{AtomicUsize, Ordering},
};

use anyhow::Context;
use askama::Template;
use lettre::{
    Message, SmtpTransport, Transport,
    message::{Mailbox, MultiPart},
    transport::smtp::authentication::Credentials,
};
use time::OffsetDateTime;
use time_tz::{ToTimezone, timezones};
use ulid::Ulid;

use crate::config::EmailConfig;
use crate::contact::ContactRequest;

#[derive(Template)]
#[template(path = "emails/contact-notification.html")]
struct ContactNotificationHtml<'a> {
    name: &'a str,
    email: &'a str,
    phone: Option<&'a str>,
    interest: Option<&'a str>,
    message: &'a str,
    sent_at: &'a str,
}

#[derive(Template)]
#[template(path = "emails/contact-notification.txt")]
struct ContactNotificationText<'a> {
    name: &'a str,
    email: &'a str,
    phone: Option<&'a str>,
    interest: Option<&'a str>,
    message: &'a str,
    sent_at: &'a str,
}

#[derive(Clone)]
enum Relay {
    Smtp(SmtpTransport),
    Mock {
        fail: bool,
        deliveries: Arc<AtomicUsize>,
    },
}

/// Email service relaying contact requests to the operator mailbox. The
/// transport is built once at startup and shared across requests.
#[derive(Clone)]
pub struct EmailService {
    relay: Relay,
    from: String,
    to: String,
}

impl EmailService {
    /// Create a new email service from configuration
    pub fn new(config: &EmailConfig) -> anyhow::Result<Self> {
        let mailer = if config.smtp_username.is_empty() || config.smtp_password.is_empty() {
            tracing::info!(
                smtp_host = %config.smtp_host,
                smtp_port = config.smtp_port,
                "SMTP credentials not configured, using unauthenticated connection (e.g., MailDev)"
            );
            // builder_dangerous for unauthenticated SMTP (e.g., MailDev)
            SmtpTransport::builder_dangerous(&config.smtp_host)
                .port(config.smtp_port)
                .build()
        } else {
            tracing::info!(
                smtp_host = %config.smtp_host,
                smtp_port = config.smtp_port,
                from = %config.from_address,
                "Email service initialized with authentication"
            );
            let creds =
                Credentials::new(config.smtp_username.clone(), config.smtp_password.clone());
            if config.smtp_tls {
                // relay() uses STARTTLS, appropriate for most servers on 587
                SmtpTransport::relay(&config.smtp_host)?
                    .port(config.smtp_port)
                    .credentials(creds)
                    .build()
            } else {
                SmtpTransport::builder_dangerous(&config.smtp_host)
                    .port(config.smtp_port)
                    .credentials(creds)
                    .build()
            }
        };

        Ok(Self {
            relay: Relay::Smtp(mailer),
            from: config.from_address.clone(),
            to: config.contact_address.clone(),
        })
    }

    /// Create a mock email service for testing: accepts every message
    /// without touching SMTP and counts handed-off deliveries.
    pub fn new_mock(config: &EmailConfig) -> Self {
        Self {
            relay: Relay::Mock {
                fail: false,
                deliveries: Arc::new(AtomicUsize::new(0)),
            },
            from: config.from_address.clone(),
            to: config.contact_address.clone(),
        }
    }

    /// Mock service whose relay rejects every delivery (for testing the
    /// failure path).
    pub fn new_failing_mock(config: &EmailConfig) -> Self {
        Self {
            relay: Relay::Mock {
                fail: true,
                deliveries: Arc::new(AtomicUsize::new(0)),
            },
            from: config.from_address.clone(),
            to: config.contact_address.clone(),
        }
    }

    /// Number of messages the mock relay accepted. Always 0 on the real
    /// transport.
    pub fn mock_delivery_count(&self) -> usize {
        match &self.relay {
            Relay::Mock { deliveries, .. } => deliveries.load(Ordering::SeqCst),
            Relay::Smtp(_) => 0,
        }
    }

    /// Relay one contact request to the operator mailbox. Exactly one
    /// delivery attempt; the returned id identifies the outgoing message.
    pub async fn send_contact_notification(
        &self,
        request: &ContactRequest,
    ) -> anyhow::Result<String> {
        let sent_at = business_timestamp()?;
        let (html, plain) = render_notification(request, &sent_at)?;

        // lettre's SMTP response carries no id of its own, so the service
        // assigns one and stamps it on the message
        let message_id = Ulid::new().to_string();

        let message = Message::builder()
            .from(
                self.from
                    .parse::<Mailbox>()
                    .context("Failed to parse from address")?,
            )
            .to(self
                .to
                .parse::<Mailbox>()
                .context("Failed to parse contact address")?)
            // operator replies go straight back to the submitter
            .reply_to(
                request
                    .email
                    .parse::<Mailbox>()
                    .context("Failed to parse submitter address")?,
            )
            .subject(format!("Neue Kontaktanfrage von {}", request.name))
            .message_id(Some(format!("<{message_id}@lichtblick-werbetechnik.de>")))
            .multipart(MultiPart::alternative_plain_html(plain, html))
            .context("Failed to build notification message")?;

        tracing::info!(
            to = %self.to,
            reply_to = %request.email,
            message_id = %message_id,
            "Sending contact notification"
        );

        match &self.relay {
            Relay::Smtp(mailer) => {
                mailer
                    .send(&message)
                    .context("SMTP relay rejected the message")?;
            }
            Relay::Mock { fail: true, .. } => {
                anyhow::bail!("mock relay configured to fail");
            }
            Relay::Mock { deliveries, .. } => {
                deliveries.fetch_add(1, Ordering::SeqCst);
                tracing::debug!("Mock relay accepted message");
            }
        }

        Ok(message_id)
    }
}

/// Submission time in the operator's business timezone.
fn business_timestamp() -> anyhow::Result<String> {
    let mut now = OffsetDateTime::now_utc();
    if let Some(tz) = timezones::get_by_name("Europe/Berlin") {
        now = now.to_timezone(tz);
    }
    let format = time::format_description::parse("[day].[month].[year], [hour]:[minute] Uhr")
        .context("Invalid timestamp format")?;
    now.format(&format).context("Failed to format timestamp")
}

fn render_notification(
    request: &ContactRequest,
    sent_at: &str,
) -> anyhow::Result<(String, String)> {
    let html = ContactNotificationHtml {
        name: &request.name,
        email: &request.email,
        phone: request.phone.as_deref(),
        interest: request.interest.as_deref(),
        message: &request.message,
        sent_at,
    }
    .render()
    .context("Failed to render HTML notification")?;

    let plain = ContactNotificationText {
        name: &request.name,
        email: &request.email,
        phone: request.phone.as_deref(),
        interest: request.interest.as_deref(),
        message: &request.message,
        sent_at,
    }
    .render()
    .context("Failed to render plain text notification")?;

    Ok((html, plain))
}
