//! Domain Layer
//!
//! Contact entity, value objects, and the repository trait.

pub mod entities;
pub mod repository;
pub mod value_objects;

// Re-exports
pub use entities::{BIRTHDAY_WINDOW_DAYS, Contact};
pub use repository::ContactRepository;
pub use value_objects::{ContactEmail, PhoneNumber};
