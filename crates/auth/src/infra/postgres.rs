//! PostgreSQL Repository Implementations

use chrono::{DateTime, Utc};
use kernel::id::AccountId;
use platform::password::HashedPassword;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::entity::{account::Account, email_verification::EmailVerification};
use crate::domain::repository::{AccountRepository, EmailVerificationRepository};
use crate::domain::value_object::username::Username;
use crate::error::{AuthError, AuthResult};

/// PostgreSQL-backed auth repository
#[derive(Clone)]
pub struct PgAuthRepository {
    pool: PgPool,
}

impl PgAuthRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

// ============================================================================
// Account Repository Implementation
// ============================================================================

impl AccountRepository for PgAuthRepository {
    async fn create(&self, account: &Account) -> AuthResult<()> {
        sqlx::query(
            r#"
            INSERT INTO accounts (
                account_id,
                username,
                password_hash,
                verified,
                created_at,
                updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(account.account_id.as_uuid())
        .bind(account.username.as_str())
        .bind(account.password_hash.as_phc_string())
        .bind(account.verified)
        .bind(account.created_at)
        .bind(account.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| match &e {
            // The unique index on username settles concurrent
            // registrations; the loser sees a conflict, not a 500
            sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
                AuthError::UserAlreadyExists
            }
            _ => AuthError::Database(e),
        })?;

        Ok(())
    }

    async fn find_by_username(&self, username: &str) -> AuthResult<Option<Account>> {
        let row = sqlx::query_as::<_, AccountRow>(
            r#"
            SELECT
                account_id,
                username,
                password_hash,
                verified,
                created_at,
                updated_at
            FROM accounts
            WHERE username = $1
            "#,
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;

        row.map(|r| r.into_account()).transpose()
    }

    async fn exists_by_username(&self, username: &str) -> AuthResult<bool> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM accounts WHERE username = $1)",
        )
        .bind(username)
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }

    async fn mark_verified(&self, username: &str) -> AuthResult<bool> {
        let updated = sqlx::query(
            r#"
            UPDATE accounts SET
                verified = TRUE,
                updated_at = $2
            WHERE username = $1
            "#,
        )
        .bind(username)
        .bind(Utc::now())
        .execute(&self.pool)
        .await?
        .rows_affected();

        Ok(updated > 0)
    }
}

// ============================================================================
// Email Verification Repository Implementation
// ============================================================================

impl EmailVerificationRepository for PgAuthRepository {
    async fn append(&self, record: &EmailVerification) -> AuthResult<()> {
        sqlx::query(
            r#"
            INSERT INTO email_verifications (
                username,
                token,
                created_at
            ) VALUES ($1, $2, $3)
            "#,
        )
        .bind(record.username.as_str())
        .bind(&record.token)
        .bind(record.created_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find_by_username(&self, username: &str) -> AuthResult<Option<EmailVerification>> {
        let row = sqlx::query_as::<_, EmailVerificationRow>(
            r#"
            SELECT
                username,
                token,
                created_at
            FROM email_verifications
            WHERE username = $1
            ORDER BY id
            LIMIT 1
            "#,
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|r| r.into_record()))
    }
}

// ============================================================================
// Row Types for sqlx mapping
// ============================================================================

#[derive(sqlx::FromRow)]
struct AccountRow {
    account_id: Uuid,
    username: String,
    password_hash: String,
    verified: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl AccountRow {
    fn into_account(self) -> AuthResult<Account> {
        let password_hash = HashedPassword::from_phc_string(self.password_hash)
            .map_err(|_| AuthError::Internal("Invalid password hash in database".to_string()))?;

        Ok(Account {
            account_id: AccountId::from_uuid(self.account_id),
            username: Username::from_db(self.username),
            password_hash,
            verified: self.verified,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

#[derive(sqlx::FromRow)]
struct EmailVerificationRow {
    username: String,
    token: String,
    created_at: DateTime<Utc>,
}

impl EmailVerificationRow {
    fn into_record(self) -> EmailVerification {
        EmailVerification {
            username: Username::from_db(self.username),
            token: self.token,
            created_at: self.created_at,
        }
    }
}
