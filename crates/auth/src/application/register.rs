//! Register Use Case
//!
//! Creates a new, unverified account and dispatches the verification
//! email.

use std::sync::Arc;

use platform::password::ClearTextPassword;

use crate::application::config::AuthConfig;
use crate::domain::entity::{account::Account, email_verification::EmailVerification};
use crate::domain::mailer::VerificationMailer;
use crate::domain::repository::{AccountRepository, EmailVerificationRepository};
use crate::domain::value_object::username::Username;
use crate::error::{AuthError, AuthResult};

/// Register input
pub struct RegisterInput {
    pub username: String,
    pub password: String,
}

/// Register use case
pub struct RegisterUseCase<A, E, M>
where
    A: AccountRepository,
    E: EmailVerificationRepository,
    M: VerificationMailer + Send + Sync + 'static,
{
    accounts: Arc<A>,
    verifications: Arc<E>,
    mailer: Arc<M>,
    config: Arc<AuthConfig>,
}

impl<A, E, M> RegisterUseCase<A, E, M>
where
    A: AccountRepository,
    E: EmailVerificationRepository,
    M: VerificationMailer + Send + Sync + 'static,
{
    pub fn new(
        accounts: Arc<A>,
        verifications: Arc<E>,
        mailer: Arc<M>,
        config: Arc<AuthConfig>,
    ) -> Self {
        Self {
            accounts,
            verifications,
            mailer,
            config,
        }
    }

    pub async fn execute(&self, input: RegisterInput) -> AuthResult<()> {
        let username = Username::new(&input.username)?;

        // Pre-check; the unique constraint on the store settles any
        // concurrent race and also surfaces UserAlreadyExists
        if self.accounts.exists_by_username(username.as_str()).await? {
            return Err(AuthError::UserAlreadyExists);
        }

        let password = ClearTextPassword::new(input.password)?;

        // Argon2 is CPU-bound; run it off the async runtime
        let password_hash = tokio::task::spawn_blocking(move || password.hash())
            .await
            .map_err(|e| AuthError::Internal(format!("Hashing task failed: {e}")))??;

        let account = Account::new(username.clone(), password_hash);
        self.accounts.create(&account).await?;

        // The verification record is persisted before the response so a
        // prompt redemption cannot race the mail dispatch
        let token = self.config.email_tokens.issue(username.as_str())?;
        let record = EmailVerification::new(username.clone(), token.clone());
        self.verifications.append(&record).await?;

        // Delivery is best-effort and must not delay or fail registration
        let mailer = self.mailer.clone();
        let recipient = username.as_str().to_string();
        tokio::spawn(async move {
            if let Err(e) = mailer.send_verification(&recipient, &token).await {
                tracing::warn!(
                    recipient = %recipient,
                    error = %e,
                    "Verification email delivery failed"
                );
            }
        });

        tracing::info!(username = %username, "Account registered");

        Ok(())
    }
}
