//! Username Value Object
//!
//! The username is the account's unique login identifier and, in this
//! service, also the address the verification email is sent to. It is
//! case-sensitive and immutable after registration: `Alice` and `alice`
//! are two different accounts, and uniqueness is checked on the exact
//! string.
//!
//! Validation is deliberately light: trim, NFKC-normalize, bound the
//! length, and reject whitespace and control characters. `@` and `.` are
//! allowed so that an email address is a valid username.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;
use unicode_normalization::UnicodeNormalization;

/// Minimum length for a username (in characters)
pub const USERNAME_MIN_LENGTH: usize = 3;

/// Maximum length for a username (in characters, RFC 5321 address bound)
pub const USERNAME_MAX_LENGTH: usize = 254;

/// Error returned when username validation fails
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UsernameError {
    /// Username is empty after normalization
    #[error("Username cannot be empty")]
    Empty,

    /// Username is too short
    #[error("Username is too short ({length} chars, minimum {min})")]
    TooShort { length: usize, min: usize },

    /// Username is too long
    #[error("Username is too long ({length} chars, maximum {max})")]
    TooLong { length: usize, max: usize },

    /// Username contains whitespace
    #[error("Username cannot contain whitespace")]
    ContainsWhitespace,

    /// Username contains a control character
    #[error("Username contains invalid control characters")]
    InvalidCharacter,
}

/// Validated, normalized username
///
/// # Invariants
/// - Non-empty after trim + NFKC normalization
/// - Length between [`USERNAME_MIN_LENGTH`] and [`USERNAME_MAX_LENGTH`]
/// - No whitespace or control characters
/// - Case is preserved; comparisons are exact
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Username(String);

impl Username {
    /// Create a new Username from raw input
    pub fn new(input: impl AsRef<str>) -> Result<Self, UsernameError> {
        let normalized: String = input.as_ref().nfkc().collect::<String>().trim().to_string();

        if normalized.is_empty() {
            return Err(UsernameError::Empty);
        }

        let length = normalized.chars().count();
        if length < USERNAME_MIN_LENGTH {
            return Err(UsernameError::TooShort {
                length,
                min: USERNAME_MIN_LENGTH,
            });
        }
        if length > USERNAME_MAX_LENGTH {
            return Err(UsernameError::TooLong {
                length,
                max: USERNAME_MAX_LENGTH,
            });
        }

        if normalized.chars().any(|c| c.is_whitespace()) {
            return Err(UsernameError::ContainsWhitespace);
        }

        if normalized.chars().any(|c| c.is_control()) {
            return Err(UsernameError::InvalidCharacter);
        }

        Ok(Self(normalized))
    }

    /// Create from database values (assumes already validated)
    pub fn from_db(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Get the username as a string slice
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Convert to owned String
    #[inline]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Debug for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Username").field(&self.0).finish()
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Username {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Username {
    type Error = UsernameError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<&str> for Username {
    type Error = UsernameError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Username> for String {
    fn from(name: Username) -> Self {
        name.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trim_whitespace() {
        let name = Username::new("  alice@example.com  ").unwrap();
        assert_eq!(name.as_str(), "alice@example.com");
    }

    #[test]
    fn test_case_preserved() {
        let name = Username::new("Alice").unwrap();
        assert_eq!(name.as_str(), "Alice");
        assert_ne!(
            Username::new("Alice").unwrap(),
            Username::new("alice").unwrap()
        );
    }

    #[test]
    fn test_email_shaped_username_ok() {
        assert!(Username::new("bob.smith+contacts@example.com").is_ok());
    }

    #[test]
    fn test_empty_fails() {
        assert!(matches!(Username::new(""), Err(UsernameError::Empty)));
        assert!(matches!(Username::new("   "), Err(UsernameError::Empty)));
    }

    #[test]
    fn test_too_short() {
        assert!(matches!(
            Username::new("ab"),
            Err(UsernameError::TooShort { length: 2, min: 3 })
        ));
    }

    #[test]
    fn test_too_long() {
        let input = "a".repeat(USERNAME_MAX_LENGTH + 1);
        assert!(matches!(
            Username::new(&input),
            Err(UsernameError::TooLong { .. })
        ));
    }

    #[test]
    fn test_internal_whitespace_fails() {
        assert!(matches!(
            Username::new("alice bob"),
            Err(UsernameError::ContainsWhitespace)
        ));
    }

    #[test]
    fn test_control_character_fails() {
        assert!(matches!(
            Username::new("alice\u{0000}"),
            Err(UsernameError::InvalidCharacter)
        ));
    }

    #[test]
    fn test_nfkc_normalization() {
        // Full-width characters become ASCII after NFKC
        let name = Username::new("ａｌｉｃｅ").unwrap();
        assert_eq!(name.as_str(), "alice");
    }

    #[test]
    fn test_serde_roundtrip() {
        let name = Username::new("alice@example.com").unwrap();
        let json = serde_json::to_string(&name).unwrap();
        assert_eq!(json, "\"alice@example.com\"");

        let back: Username = serde_json::from_str(&json).unwrap();
        assert_eq!(back, name);
    }

    #[test]
    fn test_deserialize_invalid() {
        let result: Result<Username, _> = serde_json::from_str("\"ab\"");
        assert!(result.is_err());
    }
}
