//! Login Use Case
//!
//! Verifies credentials and issues a session token.
//!
//! The checks run in a fixed order: account existence, then password,
//! then the verified flag. An unverified account with a correct password
//! must be told to verify its email, not that the password was wrong.

use std::sync::Arc;

use platform::password::ClearTextPassword;

use crate::application::config::AuthConfig;
use crate::domain::repository::AccountRepository;
use crate::error::{AuthError, AuthResult};

/// Login input
pub struct LoginInput {
    pub username: String,
    pub password: String,
}

/// Login output
pub struct LoginOutput {
    /// Bearer session token, expires 30 minutes after issuance
    pub access_token: String,
}

/// Login use case
pub struct LoginUseCase<A>
where
    A: AccountRepository,
{
    accounts: Arc<A>,
    config: Arc<AuthConfig>,
}

impl<A> LoginUseCase<A>
where
    A: AccountRepository,
{
    pub fn new(accounts: Arc<A>, config: Arc<AuthConfig>) -> Self {
        Self { accounts, config }
    }

    pub async fn execute(&self, input: LoginInput) -> AuthResult<LoginOutput> {
        // Lookup uses the submitted string verbatim (usernames are
        // case-sensitive)
        let account = self
            .accounts
            .find_by_username(&input.username)
            .await?
            .ok_or(AuthError::NotRegistered)?;

        // A password that fails policy checks can never match a stored hash
        let password =
            ClearTextPassword::new(input.password).map_err(|_| AuthError::InvalidPassword)?;

        let stored_hash = account.password_hash.clone();
        let password_valid = tokio::task::spawn_blocking(move || stored_hash.verify(&password))
            .await
            .map_err(|e| AuthError::Internal(format!("Verification task failed: {e}")))??;

        if !password_valid {
            return Err(AuthError::InvalidPassword);
        }

        // Checked only after the password succeeded
        if !account.verified {
            return Err(AuthError::EmailNotVerified);
        }

        let access_token = self.config.session_tokens.issue(account.username.as_str())?;

        tracing::info!(username = %account.username, "User logged in");

        Ok(LoginOutput { access_token })
    }
}
