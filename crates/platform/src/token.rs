//! Signed Claim Tokens
//!
//! HS256-signed, expiring bearer tokens carrying a `{sub, exp}` payload.
//! Tokens are stateless: the only states are *valid* (signature ok, not
//! expired, subject present) and *invalid*. There is no revocation.
//!
//! Purpose separation (session vs. email verification) is achieved by
//! constructing one [`TokenKey`] per secret; a token signed under one key
//! never validates under another.

use chrono::Utc;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Lifetime of every issued token: 30 minutes
///
/// Shared by session and email-verification tokens; not configurable
/// per call.
pub const TOKEN_TTL_SECS: i64 = 30 * 60;

// ============================================================================
// Error Types
// ============================================================================

/// Token validation/issuance errors
#[derive(Debug, Error)]
pub enum TokenError {
    /// Signature mismatch, malformed token, or expired
    #[error("Invalid token")]
    Invalid,

    /// Structurally valid token whose payload carries no subject
    #[error("Token payload has no subject")]
    MissingSubject,

    /// Token encoding failed
    #[error("Token encoding failed: {0}")]
    Encoding(String),
}

// ============================================================================
// Claims
// ============================================================================

/// Token payload
///
/// `sub` is optional at the wire level so that a missing subject can be
/// distinguished from an unparseable token during validation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sub: Option<String>,
    pub exp: i64,
}

// ============================================================================
// Token Key
// ============================================================================

/// One signing secret, usable for issuing and validating tokens
#[derive(Clone)]
pub struct TokenKey {
    encoding: EncodingKey,
    decoding: DecodingKey,
}

impl TokenKey {
    /// Create a key from a shared secret
    pub fn new(secret: &str) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
        }
    }

    /// Issue a token for `subject`, expiring [`TOKEN_TTL_SECS`] from now
    pub fn issue(&self, subject: &str) -> Result<String, TokenError> {
        let claims = Claims {
            sub: Some(subject.to_string()),
            exp: Utc::now().timestamp() + TOKEN_TTL_SECS,
        };
        self.sign(&claims)
    }

    /// Sign arbitrary claims (exposed so tests can craft expired payloads)
    pub fn sign(&self, claims: &Claims) -> Result<String, TokenError> {
        // Explicit algorithm prevents algorithm confusion attacks
        encode(&Header::new(Algorithm::HS256), claims, &self.encoding)
            .map_err(|e| TokenError::Encoding(e.to_string()))
    }

    /// Validate a token and return its subject
    ///
    /// Fails with [`TokenError::Invalid`] when the signature does not
    /// verify, the token is malformed, or `exp` has passed (no leeway);
    /// [`TokenError::MissingSubject`] when the payload lacks `sub`.
    pub fn validate(&self, token: &str) -> Result<String, TokenError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;

        let data = decode::<Claims>(token, &self.decoding, &validation)
            .map_err(|_| TokenError::Invalid)?;

        data.claims.sub.ok_or(TokenError::MissingSubject)
    }
}

impl std::fmt::Debug for TokenKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenKey").finish_non_exhaustive()
    }
}

// ============================================================================
// Tests
// ============================================================================
