//! Contact-form email relay via SMTP.
//!
//! [`Mailer`] wraps the `lettre` async SMTP transport to relay contact-form
//! submissions: one notification to the portfolio owner and one confirmation
//! back to the sender. Configuration is loaded from environment variables;
//! if `SMTP_HOST` is not set, [`EmailConfig::from_env`] returns `None` and
//! no mailer should be constructed.

use lettre::message::header::ContentType;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};

// ---------------------------------------------------------------------------
// Error
// ---------------------------------------------------------------------------

/// Error type for email relay failures.
#[derive(Debug, thiserror::Error)]
pub enum EmailError {
    /// SMTP transport-level failure (authentication, connection, etc.).
    #[error("SMTP transport error: {0}")]
    Transport(#[from] lettre::transport::smtp::Error),

    /// The recipient or sender address could not be parsed.
    #[error("Email address parse error: {0}")]
    Address(#[from] lettre::address::AddressError),

    /// The MIME message could not be assembled.
    #[error("Email build error: {0}")]
    Build(String),
}

// ---------------------------------------------------------------------------
// EmailConfig
// ---------------------------------------------------------------------------

/// Default SMTP port (STARTTLS).
const DEFAULT_SMTP_PORT: u16 = 587;

/// Default sender address when `SMTP_FROM` is not set.
const DEFAULT_FROM_ADDRESS: &str = "noreply@folio.local";

/// Configuration for the SMTP relay.
#[derive(Debug, Clone)]
pub struct EmailConfig {
    /// SMTP server hostname.
    pub smtp_host: String,
    /// SMTP server port (defaults to 587).
    pub smtp_port: u16,
    /// RFC 5322 "From" address.
    pub from_address: String,
    /// Portfolio owner address that receives contact notifications.
    pub contact_address: String,
    /// Optional SMTP username.
    pub smtp_user: Option<String>,
    /// Optional SMTP password.
    pub smtp_password: Option<String>,
}

impl EmailConfig {
    /// Load configuration from environment variables.
    ///
    /// Returns `None` if `SMTP_HOST` is not set, signalling that the contact
    /// relay is not configured and should be reported as unavailable.
    ///
    /// | Variable        | Required | Default               |
    /// |-----------------|----------|-----------------------|
    /// | `SMTP_HOST`     | yes      | --                    |
    /// | `SMTP_PORT`     | no       | `587`                 |
    /// | `SMTP_FROM`     | no       | `noreply@folio.local` |
    /// | `CONTACT_EMAIL` | no       | value of `SMTP_FROM`  |
    /// | `SMTP_USER`     | no       | --                    |
    /// | `SMTP_PASSWORD` | no       | --                    |
    pub fn from_env() -> Option<Self> {
        let smtp_host = std::env::var("SMTP_HOST").ok()?;
        let from_address =
            std::env::var("SMTP_FROM").unwrap_or_else(|_| DEFAULT_FROM_ADDRESS.to_string());
        Some(Self {
            smtp_host,
            smtp_port: std::env::var("SMTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(DEFAULT_SMTP_PORT),
            contact_address: std::env::var("CONTACT_EMAIL")
                .unwrap_or_else(|_| from_address.clone()),
            from_address,
            smtp_user: std::env::var("SMTP_USER").ok(),
            smtp_password: std::env::var("SMTP_PASSWORD").ok(),
        })
    }
}

// ---------------------------------------------------------------------------
// Mailer
// ---------------------------------------------------------------------------

/// A contact-form submission to relay.
#[derive(Debug, Clone)]
pub struct ContactMessage {
    pub name: String,
    pub email: String,
    pub message: String,
}

/// Relays contact-form submissions over SMTP.
pub struct Mailer {
    config: EmailConfig,
}

impl Mailer {
    /// Create a new mailer with the given configuration.
    pub fn new(config: EmailConfig) -> Self {
        Self { config }
    }

    /// Relay one contact-form submission.
    ///
    /// Sends the owner notification first, then the confirmation to the
    /// sender. A failure in either stops the relay and surfaces to the
    /// caller; nothing is queued for retry.
    pub async fn relay_contact(&self, contact: &ContactMessage) -> Result<(), EmailError> {
        let owner_mail = Message::builder()
            .from(self.config.from_address.parse()?)
            .to(self.config.contact_address.parse()?)
            .subject(format!("New Portfolio Message - {}", contact.name))
            .header(ContentType::TEXT_PLAIN)
            .body(format!(
                "New contact form submission\n\nName: {}\nEmail: {}\n\n{}",
                contact.name, contact.email, contact.message
            ))
            .map_err(|e| EmailError::Build(e.to_string()))?;

        let confirmation_mail = Message::builder()
            .from(self.config.from_address.parse()?)
            .to(contact.email.parse()?)
            .subject("Message Received - Portfolio")
            .header(ContentType::TEXT_PLAIN)
            .body(format!(
                "Hello {},\n\nThank you for reaching out. Your message has been \
                 received and you will get a reply within 24 hours.\n",
                contact.name
            ))
            .map_err(|e| EmailError::Build(e.to_string()))?;

        let mailer = self.transport()?;
        mailer.send(owner_mail).await?;
        tracing::info!(from = %contact.email, "Contact notification sent to owner");

        mailer.send(confirmation_mail).await?;
        tracing::info!(to = %contact.email, "Contact confirmation sent to sender");
        Ok(())
    }

    fn transport(&self) -> Result<AsyncSmtpTransport<Tokio1Executor>, EmailError> {
        let mut builder =
            AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&self.config.smtp_host)?
                .port(self.config.smtp_port);

        if let (Some(user), Some(pass)) = (&self.config.smtp_user, &self.config.smtp_password) {
            builder = builder.credentials(Credentials::new(user.clone(), pass.clone()));
        }

        Ok(builder.build())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
