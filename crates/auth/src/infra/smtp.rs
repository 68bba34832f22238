//! SMTP Mailer
//!
//! lettre-backed implementation of the verification-mailer port. When no
//! SMTP credentials are configured (local development), delivery is
//! disabled and the dispatch is logged instead.

use lettre::message::Mailbox;
use lettre::message::header::ContentType;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};

use crate::domain::mailer::{MailerError, VerificationMailer};

/// SMTP transport configuration
#[derive(Debug, Clone)]
pub struct SmtpConfig {
    /// SMTP server hostname (e.g. smtp.gmail.com)
    pub host: String,
    /// SMTP server port (465 for implicit TLS)
    pub port: u16,
    /// Username for SMTP authentication
    pub username: String,
    /// Password or app-specific password
    pub password: String,
    /// From address for outgoing mail
    pub sender: String,
    /// Public base URL of this service, used to build redemption links
    pub public_base_url: String,
}

/// Verification mailer backed by an async SMTP transport
pub struct SmtpMailer {
    transport: Option<AsyncSmtpTransport<Tokio1Executor>>,
    sender: Option<Mailbox>,
    public_base_url: String,
}

impl SmtpMailer {
    /// Create a mailer from SMTP configuration
    pub fn new(config: &SmtpConfig) -> Result<Self, MailerError> {
        let sender: Mailbox = config
            .sender
            .parse()
            .map_err(|e| MailerError(format!("Invalid sender address: {e}")))?;

        let transport = AsyncSmtpTransport::<Tokio1Executor>::relay(&config.host)
            .map_err(|e| MailerError(format!("Failed to create SMTP transport: {e}")))?
            .credentials(Credentials::new(
                config.username.clone(),
                config.password.clone(),
            ))
            .port(config.port)
            .build();

        Ok(Self {
            transport: Some(transport),
            sender: Some(sender),
            public_base_url: config.public_base_url.clone(),
        })
    }

    /// Create a disabled mailer (no SMTP configured)
    pub fn disabled(public_base_url: impl Into<String>) -> Self {
        Self {
            transport: None,
            sender: None,
            public_base_url: public_base_url.into(),
        }
    }

    fn redemption_link(&self, token: &str) -> String {
        format!(
            "{}/auth/email_verification/{}",
            self.public_base_url.trim_end_matches('/'),
            token
        )
    }
}

impl VerificationMailer for SmtpMailer {
    async fn send_verification(&self, recipient: &str, token: &str) -> Result<(), MailerError> {
        let link = self.redemption_link(token);

        let (Some(transport), Some(sender)) = (&self.transport, &self.sender) else {
            tracing::info!(
                recipient = %recipient,
                link = %link,
                "SMTP not configured; verification email not sent"
            );
            return Ok(());
        };

        let body = format!(
            "Welcome!\n\
            \n\
            Please verify your email address by opening the link below:\n\
            \n\
            {}\n\
            \n\
            The link expires in 30 minutes.\n",
            link
        );

        let email = Message::builder()
            .from(sender.clone())
            .to(recipient
                .parse()
                .map_err(|e| MailerError(format!("Invalid recipient address: {e}")))?)
            .subject("Verify your email address")
            .header(ContentType::TEXT_PLAIN)
            .body(body)
            .map_err(|e| MailerError(format!("Failed to build email: {e}")))?;

        transport
            .send(email)
            .await
            .map_err(|e| MailerError(format!("Failed to send email: {e}")))?;

        tracing::debug!(recipient = %recipient, "Verification email sent");

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_redemption_link_format() {
        let mailer = SmtpMailer::disabled("http://localhost:8000/");
        assert_eq!(
            mailer.redemption_link("abc.def.ghi"),
            "http://localhost:8000/auth/email_verification/abc.def.ghi"
        );
    }

    #[tokio::test]
    async fn test_disabled_mailer_is_a_noop() {
        let mailer = SmtpMailer::disabled("http://localhost:8000");
        let result = mailer
            .send_verification("alice@example.com", "token")
            .await;
        assert!(result.is_ok());
    }
}
