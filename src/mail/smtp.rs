//! SMTP delivery via lettre.

use lettre::message::header::ContentType;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};

use crate::config::SmtpConfig;
use crate::error::{FeedmailError, Result};
use crate::mail::types::{Mailer, OutboundMessage};

/// Mailer backed by an SMTP submission session (STARTTLS).
///
/// The transport pools its connection, so sequential sends within a run reuse
/// one authenticated session.
pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
}

impl SmtpMailer {
    /// Create a mailer from the `[smtp]` configuration.
    pub fn new(config: &SmtpConfig) -> Result<Self> {
        let credentials = Credentials::new(config.username.clone(), config.password.clone());

        let transport = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.host)
            .map_err(|e| FeedmailError::Send(format!("invalid SMTP relay {}: {e}", config.host)))?
            .port(config.port)
            .credentials(credentials)
            .build();

        Ok(Self { transport })
    }
}

impl Mailer for SmtpMailer {
    async fn send(&self, message: &OutboundMessage) -> Result<()> {
        let from: Mailbox = message
            .from
            .parse()
            .map_err(|e| FeedmailError::Send(format!("invalid sender {}: {e}", message.from)))?;
        let to: Mailbox = message
            .to
            .parse()
            .map_err(|e| FeedmailError::Send(format!("invalid recipient {}: {e}", message.to)))?;

        // Feed content is typically HTML fragments.
        let email = Message::builder()
            .from(from)
            .to(to)
            .subject(message.subject.clone())
            .header(ContentType::TEXT_HTML)
            .body(message.body.clone())
            .map_err(|e| FeedmailError::Send(format!("failed to build message: {e}")))?;

        self.transport
            .send(email)
            .await
            .map_err(|e| FeedmailError::Send(format!("delivery to {} failed: {e}", message.to)))?;

        Ok(())
    }
}
