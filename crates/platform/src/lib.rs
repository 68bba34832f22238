//! Platform Crate - Technical Infrastructure
//!
//! This crate provides shared technical foundations:
//! - Password hashing (Argon2id, PHC string format)
//! - Signed, expiring claim tokens (HS256)

pub mod password;
pub mod token;
