//! Infrastructure Layer
//!
//! Database implementation and development seeding.

pub mod postgres;
pub mod seed;

pub use postgres::PgContactRepository;
