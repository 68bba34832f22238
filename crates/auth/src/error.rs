//! Auth Error Types
//!
//! This module provides auth-specific error variants that integrate
//! with the unified `kernel::error::AppError` system.

use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

use crate::domain::value_object::username::UsernameError;

/// Auth-specific result type alias
pub type AuthResult<T> = Result<T, AuthError>;

/// Auth-specific error variants
#[derive(Debug, Error)]
pub enum AuthError {
    /// Username already exists
    #[error("User already exists")]
    UserAlreadyExists,

    /// Login attempt for an unknown username
    #[error("User is not registered")]
    NotRegistered,

    /// Password did not match the stored hash
    #[error("Invalid password")]
    InvalidPassword,

    /// Account exists but its email address has not been verified
    #[error("Verify your email address")]
    EmailNotVerified,

    /// Bearer or verification token failed validation (signature, expiry,
    /// structure, or missing/unknown subject)
    #[error("Could not validate credentials")]
    InvalidToken,

    /// Username validation error
    #[error("Invalid username: {0}")]
    InvalidUsername(#[from] UsernameError),

    /// Password validation error
    #[error("Invalid password: {0}")]
    PasswordValidation(String),

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AuthError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            AuthError::UserAlreadyExists => StatusCode::CONFLICT,
            AuthError::NotRegistered
            | AuthError::InvalidPassword
            | AuthError::EmailNotVerified
            | AuthError::InvalidToken => StatusCode::UNAUTHORIZED,
            AuthError::InvalidUsername(_) | AuthError::PasswordValidation(_) => {
                StatusCode::BAD_REQUEST
            }
            AuthError::Database(_) | AuthError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            AuthError::UserAlreadyExists => ErrorKind::Conflict,
            AuthError::NotRegistered
            | AuthError::InvalidPassword
            | AuthError::EmailNotVerified
            | AuthError::InvalidToken => ErrorKind::Unauthorized,
            AuthError::InvalidUsername(_) | AuthError::PasswordValidation(_) => {
                ErrorKind::BadRequest
            }
            AuthError::Database(_) | AuthError::Internal(_) => ErrorKind::InternalServerError,
        }
    }

    /// Convert to AppError
    pub fn to_app_error(&self) -> AppError {
        AppError::new(self.kind(), self.to_string())
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            AuthError::Database(e) => {
                tracing::error!(error = %e, "Auth database error");
            }
            AuthError::Internal(msg) => {
                tracing::error!(message = %msg, "Auth internal error");
            }
            AuthError::NotRegistered | AuthError::InvalidPassword => {
                tracing::warn!("Invalid login attempt");
            }
            AuthError::InvalidToken => {
                tracing::warn!("Token validation failed");
            }
            _ => {
                tracing::debug!(error = %self, "Auth error");
            }
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        self.log();

        // Bearer-token failures advertise the expected auth scheme
        let wants_bearer_challenge = matches!(self, AuthError::InvalidToken);
        let mut response = self.to_app_error().into_response();
        if wants_bearer_challenge {
            response.headers_mut().insert(
                header::WWW_AUTHENTICATE,
                header::HeaderValue::from_static("Bearer"),
            );
        }
        response
    }
}

impl From<platform::token::TokenError> for AuthError {
    fn from(err: platform::token::TokenError) -> Self {
        match err {
            platform::token::TokenError::Invalid
            | platform::token::TokenError::MissingSubject => AuthError::InvalidToken,
            platform::token::TokenError::Encoding(msg) => AuthError::Internal(msg),
        }
    }
}

impl From<platform::password::PasswordHashError> for AuthError {
    fn from(err: platform::password::PasswordHashError) -> Self {
        // Only reachable with a corrupt stored hash or a failed hashing
        // operation, never on a plain mismatch
        AuthError::Internal(err.to_string())
    }
}

impl From<platform::password::PasswordPolicyError> for AuthError {
    fn from(err: platform::password::PasswordPolicyError) -> Self {
        AuthError::PasswordValidation(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(AuthError::UserAlreadyExists.status_code(), StatusCode::CONFLICT);
        assert_eq!(AuthError::NotRegistered.status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(AuthError::InvalidPassword.status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(AuthError::EmailNotVerified.status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(AuthError::InvalidToken.status_code(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn test_login_failures_share_status_but_not_detail() {
        // All three login failures collapse to 401; only the message differs
        let errors = [
            AuthError::NotRegistered,
            AuthError::InvalidPassword,
            AuthError::EmailNotVerified,
        ];
        let details: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
        for e in &errors {
            assert_eq!(e.status_code(), StatusCode::UNAUTHORIZED);
        }
        assert_eq!(details.len(), 3);
        assert!(details.iter().all(|d| !d.is_empty()));
        assert_ne!(details[0], details[1]);
        assert_ne!(details[1], details[2]);
    }

    #[test]
    fn test_token_error_conversion() {
        let err: AuthError = platform::token::TokenError::Invalid.into();
        assert!(matches!(err, AuthError::InvalidToken));

        let err: AuthError = platform::token::TokenError::MissingSubject.into();
        assert!(matches!(err, AuthError::InvalidToken));
    }

    #[test]
    fn test_bearer_challenge_header() {
        let response = AuthError::InvalidToken.into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            response
                .headers()
                .get(header::WWW_AUTHENTICATE)
                .and_then(|v| v.to_str().ok()),
            Some("Bearer")
        );
    }
}
