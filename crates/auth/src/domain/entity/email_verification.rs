//! Email Verification Record
//!
//! Stores the exact token string mailed to a user. Redemption succeeds
//! only when the presented token equals the stored one verbatim, which
//! guards against an older or foreign token being accepted for a user
//! that does have an outstanding record. Records are never purged;
//! a redeemed record simply stops mattering.

use chrono::{DateTime, Utc};

use crate::domain::value_object::username::Username;

/// Outstanding email-verification token for one user
#[derive(Debug, Clone)]
pub struct EmailVerification {
    /// Owner of the record (the registered username)
    pub username: Username,
    /// The exact signed token string that was mailed out
    pub token: String,
    /// Created timestamp
    pub created_at: DateTime<Utc>,
}

impl EmailVerification {
    /// Create a record for a freshly issued token
    pub fn new(username: Username, token: String) -> Self {
        Self {
            username,
            token,
            created_at: Utc::now(),
        }
    }

    /// Whole-string comparison against a presented token
    pub fn matches(&self, presented: &str) -> bool {
        self.token == presented
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matches_exact_token_only() {
        let record = EmailVerification::new(
            Username::new("alice@example.com").unwrap(),
            "token-a".to_string(),
        );
        assert!(record.matches("token-a"));
        assert!(!record.matches("token-b"));
        assert!(!record.matches("token-a "));
    }
}
