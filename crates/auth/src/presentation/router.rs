//! Auth Router

use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::domain::mailer::VerificationMailer;
use crate::domain::repository::{AccountRepository, EmailVerificationRepository};
use crate::infra::postgres::PgAuthRepository;
use crate::infra::smtp::SmtpMailer;
use crate::presentation::handlers::{self, AuthAppState};

/// Create the Auth router with PostgreSQL repository and SMTP mailer
///
/// Nest under `/auth`: the routes become `POST /auth`,
/// `POST /auth/token`, and `GET /auth/email_verification/{token}`.
pub fn auth_router(repo: PgAuthRepository, mailer: SmtpMailer, config: AuthConfig) -> Router {
    auth_router_generic(repo, mailer, config)
}

/// Create a generic Auth router for any repository/mailer implementation
pub fn auth_router_generic<R, M>(repo: R, mailer: M, config: AuthConfig) -> Router
where
    R: AccountRepository + EmailVerificationRepository + Clone + Send + Sync + 'static,
    M: VerificationMailer + Send + Sync + 'static,
{
    let state = AuthAppState {
        repo: Arc::new(repo),
        mailer: Arc::new(mailer),
        config: Arc::new(config),
    };

    Router::new()
        .route("/", post(handlers::register::<R, M>))
        .route("/token", post(handlers::issue_token::<R, M>))
        .route(
            "/email_verification/{token}",
            get(handlers::redeem_email::<R, M>),
        )
        .with_state(state)
}
