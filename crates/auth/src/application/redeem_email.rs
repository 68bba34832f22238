//! Redeem Email Token Use Case
//!
//! Accepts a verification token and flips the owning account to
//! verified.

use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::domain::repository::{AccountRepository, EmailVerificationRepository};
use crate::error::{AuthError, AuthResult};

/// Redeem email token use case
pub struct RedeemEmailUseCase<A, E>
where
    A: AccountRepository,
    E: EmailVerificationRepository,
{
    accounts: Arc<A>,
    verifications: Arc<E>,
    config: Arc<AuthConfig>,
}

impl<A, E> RedeemEmailUseCase<A, E>
where
    A: AccountRepository,
    E: EmailVerificationRepository,
{
    pub fn new(accounts: Arc<A>, verifications: Arc<E>, config: Arc<AuthConfig>) -> Self {
        Self {
            accounts,
            verifications,
            config,
        }
    }

    /// Validate the token and mark the account verified
    ///
    /// Returns `Ok(false)` when the subject has an outstanding record but
    /// the presented token is not the stored one: a soft negative, no
    /// state changes and no error detail is exposed. Everything else that
    /// goes wrong is `AuthError::InvalidToken`.
    pub async fn execute(&self, token: &str) -> AuthResult<bool> {
        let subject = self.config.email_tokens.validate(token)?;

        let record = self
            .verifications
            .find_by_username(&subject)
            .await?
            .ok_or(AuthError::InvalidToken)?;

        // The stored token must match verbatim, not just carry a valid
        // signature for the same subject
        if !record.matches(token) {
            tracing::debug!(
                username = %record.username,
                "Presented verification token does not match the stored record"
            );
            return Ok(false);
        }

        let updated = self.accounts.mark_verified(record.username.as_str()).await?;
        if !updated {
            // Record exists but the account does not
            return Err(AuthError::InvalidToken);
        }

        tracing::info!(username = %record.username, "Email address verified");

        Ok(true)
    }
}
