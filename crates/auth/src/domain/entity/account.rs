//! Account Entity
//!
//! A registered user of the service. Created unverified; the only
//! permitted state transition of the `verified` flag is false → true,
//! performed exactly once by a successful email-token redemption.

use chrono::{DateTime, Utc};
use kernel::id::AccountId;
use platform::password::HashedPassword;

use crate::domain::value_object::username::Username;

/// Account entity
#[derive(Debug, Clone)]
pub struct Account {
    /// Internal UUID identifier
    pub account_id: AccountId,
    /// Unique login identifier, also the verification-email recipient.
    /// Immutable after creation.
    pub username: Username,
    /// Argon2id password hash (PHC string); plaintext is never stored
    pub password_hash: HashedPassword,
    /// Whether the email address has been verified
    pub verified: bool,
    /// Created timestamp
    pub created_at: DateTime<Utc>,
    /// Updated timestamp
    pub updated_at: DateTime<Utc>,
}

impl Account {
    /// Create a new, unverified account
    pub fn new(username: Username, password_hash: HashedPassword) -> Self {
        let now = Utc::now();
        Self {
            account_id: AccountId::new(),
            username,
            password_hash,
            verified: false,
            created_at: now,
            updated_at: now,
        }
    }

    /// Flip the account to verified
    ///
    /// One-way: a verified account never becomes unverified again.
    pub fn mark_verified(&mut self) {
        if !self.verified {
            self.verified = true;
            self.updated_at = Utc::now();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use platform::password::ClearTextPassword;

    fn account(name: &str) -> Account {
        let password = ClearTextPassword::new("test-password".to_string()).unwrap();
        Account::new(
            Username::new(name).unwrap(),
            password.hash().unwrap(),
        )
    }

    #[test]
    fn test_new_account_is_unverified() {
        let account = account("alice@example.com");
        assert!(!account.verified);
    }

    #[test]
    fn test_mark_verified_is_one_way() {
        let mut account = account("alice@example.com");
        account.mark_verified();
        assert!(account.verified);

        // A second call changes nothing
        let updated_at = account.updated_at;
        account.mark_verified();
        assert!(account.verified);
        assert_eq!(account.updated_at, updated_at);
    }
}
