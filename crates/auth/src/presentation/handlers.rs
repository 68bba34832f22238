//! HTTP Handlers

use axum::extract::{Form, Path, State};
use axum::http::StatusCode;
use axum::Json;
use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::application::{
    LoginInput, LoginUseCase, RedeemEmailUseCase, RegisterInput, RegisterUseCase,
};
use crate::domain::mailer::VerificationMailer;
use crate::domain::repository::{AccountRepository, EmailVerificationRepository};
use crate::error::{AuthError, AuthResult};
use crate::presentation::dto::{RedeemResponse, RegisterRequest, TokenRequest, TokenResponse};

/// Shared state for auth handlers
pub struct AuthAppState<R, M>
where
    R: AccountRepository + EmailVerificationRepository + Clone + Send + Sync + 'static,
    M: VerificationMailer + Send + Sync + 'static,
{
    pub repo: Arc<R>,
    pub mailer: Arc<M>,
    pub config: Arc<AuthConfig>,
}

// Manual impl: the mailer itself does not need to be Clone behind the Arc
impl<R, M> Clone for AuthAppState<R, M>
where
    R: AccountRepository + EmailVerificationRepository + Clone + Send + Sync + 'static,
    M: VerificationMailer + Send + Sync + 'static,
{
    fn clone(&self) -> Self {
        Self {
            repo: self.repo.clone(),
            mailer: self.mailer.clone(),
            config: self.config.clone(),
        }
    }
}

// ============================================================================
// Register
// ============================================================================

/// POST /auth
pub async fn register<R, M>(
    State(state): State<AuthAppState<R, M>>,
    Json(req): Json<RegisterRequest>,
) -> AuthResult<StatusCode>
where
    R: AccountRepository + EmailVerificationRepository + Clone + Send + Sync + 'static,
    M: VerificationMailer + Send + Sync + 'static,
{
    let use_case = RegisterUseCase::new(
        state.repo.clone(),
        state.repo.clone(),
        state.mailer.clone(),
        state.config.clone(),
    );

    use_case
        .execute(RegisterInput {
            username: req.username,
            password: req.password,
        })
        .await?;

    Ok(StatusCode::CREATED)
}

// ============================================================================
// Token (login)
// ============================================================================

/// POST /auth/token
pub async fn issue_token<R, M>(
    State(state): State<AuthAppState<R, M>>,
    Form(req): Form<TokenRequest>,
) -> AuthResult<Json<TokenResponse>>
where
    R: AccountRepository + EmailVerificationRepository + Clone + Send + Sync + 'static,
    M: VerificationMailer + Send + Sync + 'static,
{
    let use_case = LoginUseCase::new(state.repo.clone(), state.config.clone());

    let output = use_case
        .execute(LoginInput {
            username: req.username,
            password: req.password,
        })
        .await?;

    Ok(Json(TokenResponse::bearer(output.access_token)))
}

// ============================================================================
// Email verification
// ============================================================================

/// GET /auth/email_verification/{token}
pub async fn redeem_email<R, M>(
    State(state): State<AuthAppState<R, M>>,
    Path(token): Path<String>,
) -> AuthResult<Json<RedeemResponse>>
where
    R: AccountRepository + EmailVerificationRepository + Clone + Send + Sync + 'static,
    M: VerificationMailer + Send + Sync + 'static,
{
    let use_case = RedeemEmailUseCase::new(
        state.repo.clone(),
        state.repo.clone(),
        state.config.clone(),
    );

    // The soft-negative (stored record exists but holds a different
    // token) carries no extra detail outward; it is a plain 401
    if use_case.execute(&token).await? {
        Ok(Json(RedeemResponse::access()))
    } else {
        Err(AuthError::InvalidToken)
    }
}
