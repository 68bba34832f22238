//! Application Configuration
//!
//! Configuration for the Auth application layer. Constructed once at
//! startup and passed by reference into the use cases; nothing reads the
//! environment after boot.

use platform::token::TokenKey;

/// Auth application configuration
///
/// Carries the two independent signing keys. Purpose separation between
/// session and email-verification tokens rests entirely on these secrets
/// being disjoint; the payload carries no audience claim.
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// Key for bearer session tokens
    pub session_tokens: TokenKey,
    /// Key for email-verification tokens
    pub email_tokens: TokenKey,
}

impl AuthConfig {
    /// Create config from the two signing secrets
    pub fn from_secrets(session_secret: &str, email_secret: &str) -> Self {
        Self {
            session_tokens: TokenKey::new(session_secret),
            email_tokens: TokenKey::new(email_secret),
        }
    }

    /// Create config with random secrets (for development)
    ///
    /// Tokens from a previous process are invalidated on restart.
    pub fn with_random_secrets() -> Self {
        Self::from_secrets(&random_secret(), &random_secret())
    }
}

fn random_secret() -> String {
    use rand::Rng;
    use rand::distributions::Alphanumeric;

    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(48)
        .map(char::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_random_secrets_differ() {
        let a = random_secret();
        let b = random_secret();
        assert_eq!(a.len(), 48);
        assert_ne!(a, b);
    }

    #[test]
    fn test_keys_are_independent() {
        let config = AuthConfig::with_random_secrets();
        let session_token = config.session_tokens.issue("alice").unwrap();
        assert!(config.email_tokens.validate(&session_token).is_err());
    }
}
