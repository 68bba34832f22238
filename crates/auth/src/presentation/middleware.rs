//! Auth Middleware
//!
//! Middleware for requiring a bearer session token on protected routes.

use axum::body::Body;
use axum::extract::State;
use axum::http::{HeaderMap, Request, header};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use std::sync::Arc;

use crate::application::ResolveSessionUseCase;
use crate::application::config::AuthConfig;
use crate::domain::entity::account::Account;
use crate::domain::repository::AccountRepository;
use crate::error::AuthError;

/// Middleware state
#[derive(Clone)]
pub struct SessionMiddlewareState<A>
where
    A: AccountRepository + Clone + Send + Sync + 'static,
{
    pub accounts: Arc<A>,
    pub config: Arc<AuthConfig>,
}

/// Authenticated account, inserted into request extensions by
/// [`require_session`]
#[derive(Clone)]
pub struct CurrentAccount(pub Account);

/// Middleware that requires a valid bearer session token
///
/// On success the resolved [`CurrentAccount`] is made available to
/// downstream handlers; on failure the response is a 401 with a
/// `WWW-Authenticate: Bearer` challenge.
pub async fn require_session<A>(
    State(state): State<SessionMiddlewareState<A>>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, Response>
where
    A: AccountRepository + Clone + Send + Sync + 'static,
{
    let token = extract_bearer_token(req.headers())
        .ok_or_else(|| AuthError::InvalidToken.into_response())?;

    let use_case = ResolveSessionUseCase::new(state.accounts.clone(), state.config.clone());

    match use_case.execute(&token).await {
        Ok(account) => {
            req.extensions_mut().insert(CurrentAccount(account));
            Ok(next.run(req).await)
        }
        Err(e) => Err(e.into_response()),
    }
}

/// Pull the token out of an `Authorization: Bearer <token>` header
fn extract_bearer_token(headers: &HeaderMap) -> Option<String> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    value
        .strip_prefix("Bearer ")
        .map(|token| token.trim().to_string())
        .filter(|token| !token.is_empty())
}
