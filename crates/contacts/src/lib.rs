//! Contacts Backend Module
//!
//! Address-book records behind the authenticated API surface.
//!
//! Clean Architecture structure:
//! - `domain/` - Contact entity, value objects, repository trait
//! - `infra/` - PostgreSQL implementation, sample-data seeding
//! - `presentation/` - HTTP handlers, DTOs, router
//!
//! There is no application layer: contact operations are single
//! repository calls with no orchestration, so handlers talk to the
//! repository directly.

pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

// Re-exports for convenience
pub use error::{ContactsError, ContactsResult};
pub use infra::postgres::PgContactRepository;
pub use presentation::router::{contacts_router, contacts_router_generic};
