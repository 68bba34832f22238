//! Repository Traits
//!
//! Interfaces for data persistence. Implementation is in infrastructure layer.

use crate::domain::entity::{account::Account, email_verification::EmailVerification};
use crate::error::AuthResult;

/// Account repository trait
#[trait_variant::make(AccountRepository: Send)]
pub trait LocalAccountRepository {
    /// Create a new account
    ///
    /// Concurrent registrations race on the store's unique username
    /// constraint; the loser surfaces `AuthError::UserAlreadyExists`.
    async fn create(&self, account: &Account) -> AuthResult<()>;

    /// Find account by exact username
    async fn find_by_username(&self, username: &str) -> AuthResult<Option<Account>>;

    /// Check if a username exists
    async fn exists_by_username(&self, username: &str) -> AuthResult<bool>;

    /// Set the account's verified flag to true
    ///
    /// Returns false when no account matched the username.
    async fn mark_verified(&self, username: &str) -> AuthResult<bool>;
}

/// Email verification record repository trait
#[trait_variant::make(EmailVerificationRepository: Send)]
pub trait LocalEmailVerificationRepository {
    /// Append a verification record
    ///
    /// Records are append-only; redeemed and stale rows are retained.
    async fn append(&self, record: &EmailVerification) -> AuthResult<()>;

    /// Fetch the verification record consulted for a username
    async fn find_by_username(&self, username: &str) -> AuthResult<Option<EmailVerification>>;
}
