//! Application Layer
//!
//! Use cases and application services.

pub mod config;
pub mod login;
pub mod redeem_email;
pub mod register;
pub mod resolve_session;

// Re-exports
pub use config::AuthConfig;
pub use login::{LoginInput, LoginOutput, LoginUseCase};
pub use redeem_email::RedeemEmailUseCase;
pub use register::{RegisterInput, RegisterUseCase};
pub use resolve_session::ResolveSessionUseCase;
