//! Infrastructure Layer
//!
//! Database implementations and external service integrations.

pub mod postgres;
pub mod smtp;

pub use postgres::PgAuthRepository;
pub use smtp::{SmtpConfig, SmtpMailer};
