//! Contacts Error Types

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

use crate::domain::value_objects::{ContactEmailError, PhoneNumberError};

/// Contacts-specific result type alias
pub type ContactsResult<T> = Result<T, ContactsError>;

/// Contacts-specific error variants
#[derive(Debug, Error)]
pub enum ContactsError {
    /// No contact with the requested id
    #[error("Contact not found")]
    ContactNotFound,

    /// Email or phone collides with an existing contact
    #[error("Contact with this email or phone already exists")]
    DuplicateContact,

    /// Request payload failed validation
    #[error("Validation failed: {0}")]
    Validation(String),

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ContactsError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            ContactsError::ContactNotFound => StatusCode::NOT_FOUND,
            ContactsError::DuplicateContact => StatusCode::CONFLICT,
            ContactsError::Validation(_) => StatusCode::BAD_REQUEST,
            ContactsError::Database(_) | ContactsError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            ContactsError::ContactNotFound => ErrorKind::NotFound,
            ContactsError::DuplicateContact => ErrorKind::Conflict,
            ContactsError::Validation(_) => ErrorKind::BadRequest,
            ContactsError::Database(_) | ContactsError::Internal(_) => {
                ErrorKind::InternalServerError
            }
        }
    }

    /// Convert to AppError
    pub fn to_app_error(&self) -> AppError {
        AppError::new(self.kind(), self.to_string())
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            ContactsError::Database(e) => {
                tracing::error!(error = %e, "Contacts database error");
            }
            ContactsError::Internal(msg) => {
                tracing::error!(message = %msg, "Contacts internal error");
            }
            _ => {
                tracing::debug!(error = %self, "Contacts error");
            }
        }
    }
}

impl IntoResponse for ContactsError {
    fn into_response(self) -> Response {
        self.log();
        self.to_app_error().into_response()
    }
}

impl From<ContactEmailError> for ContactsError {
    fn from(err: ContactEmailError) -> Self {
        ContactsError::Validation(err.to_string())
    }
}

impl From<PhoneNumberError> for ContactsError {
    fn from(err: PhoneNumberError) -> Self {
        ContactsError::Validation(err.to_string())
    }
}
