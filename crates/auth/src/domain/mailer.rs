//! Mailer Port
//!
//! Outbound email delivery as seen by the domain: a best-effort
//! capability taking (recipient, token). Delivery failures are logged by
//! the caller and never affect registration.

use thiserror::Error;

/// Email delivery error
#[derive(Debug, Error)]
#[error("Email delivery failed: {0}")]
pub struct MailerError(pub String);

/// Verification email dispatch capability
#[trait_variant::make(VerificationMailer: Send)]
pub trait LocalVerificationMailer {
    /// Deliver the verification token to the recipient address
    async fn send_verification(&self, recipient: &str, token: &str) -> Result<(), MailerError>;
}
