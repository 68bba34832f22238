//! Resolve Session Use Case
//!
//! Turns a bearer token into the authenticated account. This is the only
//! place token-to-account resolution happens; every protected endpoint
//! goes through it.

use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::domain::entity::account::Account;
use crate::domain::repository::AccountRepository;
use crate::error::{AuthError, AuthResult};

/// Resolve session use case
pub struct ResolveSessionUseCase<A>
where
    A: AccountRepository,
{
    accounts: Arc<A>,
    config: Arc<AuthConfig>,
}

impl<A> ResolveSessionUseCase<A>
where
    A: AccountRepository,
{
    pub fn new(accounts: Arc<A>, config: Arc<AuthConfig>) -> Self {
        Self { accounts, config }
    }

    /// Resolve a bearer token to its account
    ///
    /// Rejects when the token is invalid or expired, the subject is
    /// missing or unknown, or the account is not verified.
    pub async fn execute(&self, bearer_token: &str) -> AuthResult<Account> {
        let subject = self.config.session_tokens.validate(bearer_token)?;

        let account = self
            .accounts
            .find_by_username(&subject)
            .await?
            .ok_or(AuthError::InvalidToken)?;

        if !account.verified {
            return Err(AuthError::EmailNotVerified);
        }

        Ok(account)
    }
}
