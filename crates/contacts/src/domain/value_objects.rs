//! Contact Value Objects
//!
//! Basic shape validation for contact email addresses and phone numbers.
//! Both fields are unique across the address book.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Maximum email length (per RFC 5321)
const EMAIL_MAX_LENGTH: usize = 254;

/// Phone digit bounds after stripping formatting
const PHONE_MIN_DIGITS: usize = 7;
const PHONE_MAX_DIGITS: usize = 15;

// ============================================================================
// Contact Email
// ============================================================================

/// Error returned when email validation fails
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ContactEmailError {
    #[error("Email cannot be empty")]
    Empty,

    #[error("Email must be at most {max} characters")]
    TooLong { max: usize },

    #[error("Invalid email format")]
    InvalidFormat,
}

/// Contact email address value object
///
/// Basic validation only; stored lowercase so uniqueness is
/// case-insensitive.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ContactEmail(String);

impl ContactEmail {
    /// Create a new email with validation
    pub fn new(email: impl Into<String>) -> Result<Self, ContactEmailError> {
        let email = email.into().trim().to_lowercase();

        if email.is_empty() {
            return Err(ContactEmailError::Empty);
        }

        if email.len() > EMAIL_MAX_LENGTH {
            return Err(ContactEmailError::TooLong {
                max: EMAIL_MAX_LENGTH,
            });
        }

        if !Self::is_valid_format(&email) {
            return Err(ContactEmailError::InvalidFormat);
        }

        Ok(Self(email))
    }

    /// Create from database values (assumes already validated)
    pub fn from_db(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Basic email format validation
    fn is_valid_format(email: &str) -> bool {
        // Must contain exactly one @
        let Some((local, domain)) = email.split_once('@') else {
            return false;
        };
        if domain.contains('@') {
            return false;
        }

        // Local part checks
        if local.is_empty() || local.len() > 64 {
            return false;
        }

        // Domain checks
        if domain.is_empty() || !domain.contains('.') {
            return false;
        }
        if !domain
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '.' || c == '-')
        {
            return false;
        }
        if domain.starts_with('.') || domain.ends_with('.') {
            return false;
        }
        if domain.starts_with('-') || domain.ends_with('-') {
            return false;
        }

        true
    }
}

impl fmt::Display for ContactEmail {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for ContactEmail {
    type Error = ContactEmailError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ContactEmail> for String {
    fn from(email: ContactEmail) -> Self {
        email.0
    }
}

// ============================================================================
// Phone Number
// ============================================================================

/// Error returned when phone validation fails
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PhoneNumberError {
    #[error("Phone number cannot be empty")]
    Empty,

    #[error("Phone number must contain {min} to {max} digits")]
    DigitCount { min: usize, max: usize },

    #[error("Phone number contains invalid characters")]
    InvalidCharacter,
}

/// Phone number value object
///
/// Accepts common formatting (`+`, spaces, hyphens, dots, parentheses)
/// and bounds the digit count; the formatted input is kept as entered.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PhoneNumber(String);

impl PhoneNumber {
    /// Create a new phone number with validation
    pub fn new(phone: impl Into<String>) -> Result<Self, PhoneNumberError> {
        let phone = phone.into().trim().to_string();

        if phone.is_empty() {
            return Err(PhoneNumberError::Empty);
        }

        if !phone
            .chars()
            .all(|c| c.is_ascii_digit() || matches!(c, '+' | '-' | '.' | ' ' | '(' | ')'))
        {
            return Err(PhoneNumberError::InvalidCharacter);
        }

        let digits = phone.chars().filter(char::is_ascii_digit).count();
        if !(PHONE_MIN_DIGITS..=PHONE_MAX_DIGITS).contains(&digits) {
            return Err(PhoneNumberError::DigitCount {
                min: PHONE_MIN_DIGITS,
                max: PHONE_MAX_DIGITS,
            });
        }

        Ok(Self(phone))
    }

    /// Create from database values (assumes already validated)
    pub fn from_db(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PhoneNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for PhoneNumber {
    type Error = PhoneNumberError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<PhoneNumber> for String {
    fn from(phone: PhoneNumber) -> Self {
        phone.0
    }
}

// ============================================================================
// Tests
// ============================================================================
