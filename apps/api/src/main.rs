//! API Server Entry Point
//!
//! Application entry point and server initialization.
//! Uses `anyhow` for startup errors; application-level errors use
//! `kernel::error::AppError`.

use auth::middleware::{SessionMiddlewareState, require_session};
use auth::{AuthConfig, PgAuthRepository, SmtpConfig, SmtpMailer, auth_router};
use axum::{
    Router, http,
    http::{Method, header},
};
use contacts::{PgContactRepository, contacts_router};
use sqlx::postgres::PgPoolOptions;
use std::env;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::{AllowHeaders, AllowMethods, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

// Re-export unified error types for use in handlers
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "api=info,auth=info,contacts=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Database connection
    let database_url = env::var("DATABASE_URL").expect("DATABASE_URL must be set in environment");

    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&database_url)
        .await?;

    tracing::info!("Connected to database");

    // Run migrations
    sqlx::migrate!("../../database/migrations").run(&pool).await?;

    tracing::info!("Migrations completed");

    // Signing secrets: required in production, randomized in development
    let auth_config = match (env::var("SECRET_KEY"), env::var("SECRET_KEY_EMAIL")) {
        (Ok(session_secret), Ok(email_secret)) => {
            AuthConfig::from_secrets(&session_secret, &email_secret)
        }
        _ if cfg!(debug_assertions) => {
            tracing::warn!("SECRET_KEY/SECRET_KEY_EMAIL not set; using random secrets");
            AuthConfig::with_random_secrets()
        }
        _ => panic!("SECRET_KEY and SECRET_KEY_EMAIL must be set in production"),
    };

    // Outbound email (optional; disabled locally without SMTP credentials)
    let public_base_url =
        env::var("PUBLIC_BASE_URL").unwrap_or_else(|_| "http://localhost:8000".to_string());

    let mailer = match env::var("SMTP_HOST") {
        Ok(host) => {
            let config = SmtpConfig {
                host,
                port: env::var("SMTP_PORT")
                    .ok()
                    .and_then(|p| p.parse().ok())
                    .unwrap_or(465),
                username: env::var("SMTP_USERNAME")
                    .expect("SMTP_USERNAME must be set when SMTP_HOST is"),
                password: env::var("SMTP_PASSWORD")
                    .expect("SMTP_PASSWORD must be set when SMTP_HOST is"),
                sender: env::var("SMTP_SENDER").expect("SMTP_SENDER must be set when SMTP_HOST is"),
                public_base_url: public_base_url.clone(),
            };
            SmtpMailer::new(&config)?
        }
        Err(_) => {
            tracing::warn!("SMTP_HOST not set; verification emails will not be delivered");
            SmtpMailer::disabled(public_base_url)
        }
    };

    // Repositories
    let auth_repo = PgAuthRepository::new(pool.clone());
    let contact_repo = PgContactRepository::new(pool.clone());

    // Every contact route sits behind the bearer-session gate
    let session_gate = SessionMiddlewareState {
        accounts: Arc::new(auth_repo.clone()),
        config: Arc::new(auth_config.clone()),
    };

    let protected_contacts = contacts_router(contact_repo).layer(
        axum::middleware::from_fn_with_state(session_gate, require_session::<PgAuthRepository>),
    );

    // CORS configuration
    let frontend_origins = env::var("FRONTEND_ORIGINS")
        .unwrap_or_else(|_| "http://localhost:3000,http://127.0.0.1:3000".to_string());

    let allowed_origins: Vec<http::HeaderValue> = frontend_origins
        .split(',')
        .filter_map(|origin| origin.trim().parse().ok())
        .collect();

    let cors = CorsLayer::new()
        .allow_origin(allowed_origins)
        .allow_methods(AllowMethods::list([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ]))
        .allow_headers(AllowHeaders::list([
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
            header::ACCEPT,
        ]))
        .allow_credentials(true);

    // Build router
    let app = Router::new()
        .nest("/auth", auth_router(auth_repo, mailer, auth_config))
        .nest("/contacts", protected_contacts)
        .layer(TraceLayer::new_for_http())
        .layer(cors);

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], 8000));
    tracing::info!("Listening on {}", addr);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
