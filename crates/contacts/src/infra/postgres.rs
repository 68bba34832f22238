//! PostgreSQL Repository Implementation

use chrono::{DateTime, NaiveDate, Utc};
use kernel::id::ContactId;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::entities::Contact;
use crate::domain::repository::ContactRepository;
use crate::domain::value_objects::{ContactEmail, PhoneNumber};
use crate::error::{ContactsError, ContactsResult};

/// PostgreSQL-backed contact repository
#[derive(Clone)]
pub struct PgContactRepository {
    pool: PgPool,
}

impl PgContactRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl ContactRepository for PgContactRepository {
    async fn create(&self, contact: &Contact) -> ContactsResult<()> {
        sqlx::query(
            r#"
            INSERT INTO contacts (
                contact_id,
                firstname,
                lastname,
                email,
                phone,
                birthday,
                created_at,
                updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(contact.contact_id.as_uuid())
        .bind(&contact.firstname)
        .bind(&contact.lastname)
        .bind(contact.email.as_str())
        .bind(contact.phone.as_str())
        .bind(contact.birthday)
        .bind(contact.created_at)
        .bind(contact.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| match &e {
            sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
                ContactsError::DuplicateContact
            }
            _ => ContactsError::Database(e),
        })?;

        Ok(())
    }

    async fn find_by_id(&self, contact_id: Uuid) -> ContactsResult<Option<Contact>> {
        let row = sqlx::query_as::<_, ContactRow>(
            r#"
            SELECT
                contact_id,
                firstname,
                lastname,
                email,
                phone,
                birthday,
                created_at,
                updated_at
            FROM contacts
            WHERE contact_id = $1
            "#,
        )
        .bind(contact_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|r| r.into_contact()))
    }

    async fn list_all(&self) -> ContactsResult<Vec<Contact>> {
        let rows = sqlx::query_as::<_, ContactRow>(
            r#"
            SELECT
                contact_id,
                firstname,
                lastname,
                email,
                phone,
                birthday,
                created_at,
                updated_at
            FROM contacts
            ORDER BY created_at
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(|r| r.into_contact()).collect())
    }

    async fn update(&self, contact: &Contact) -> ContactsResult<bool> {
        let updated = sqlx::query(
            r#"
            UPDATE contacts SET
                firstname = $2,
                lastname = $3,
                email = $4,
                phone = $5,
                birthday = $6,
                updated_at = $7
            WHERE contact_id = $1
            "#,
        )
        .bind(contact.contact_id.as_uuid())
        .bind(&contact.firstname)
        .bind(&contact.lastname)
        .bind(contact.email.as_str())
        .bind(contact.phone.as_str())
        .bind(contact.birthday)
        .bind(contact.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| match &e {
            sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
                ContactsError::DuplicateContact
            }
            _ => ContactsError::Database(e),
        })?
        .rows_affected();

        Ok(updated > 0)
    }

    async fn delete(&self, contact_id: Uuid) -> ContactsResult<bool> {
        let deleted = sqlx::query("DELETE FROM contacts WHERE contact_id = $1")
            .bind(contact_id)
            .execute(&self.pool)
            .await?
            .rows_affected();

        Ok(deleted > 0)
    }

    async fn search_exact(&self, query: &str) -> ContactsResult<Vec<Contact>> {
        // Whole-value match against every field, pushed down into SQL
        let rows = sqlx::query_as::<_, ContactRow>(
            r#"
            SELECT
                contact_id,
                firstname,
                lastname,
                email,
                phone,
                birthday,
                created_at,
                updated_at
            FROM contacts
            WHERE firstname = $1
               OR lastname = $1
               OR email = $1
               OR phone = $1
               OR to_char(birthday, 'YYYY-MM-DD') = $1
            ORDER BY created_at
            "#,
        )
        .bind(query)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(|r| r.into_contact()).collect())
    }

    async fn delete_all(&self) -> ContactsResult<u64> {
        let deleted = sqlx::query("DELETE FROM contacts")
            .execute(&self.pool)
            .await?
            .rows_affected();

        tracing::info!(contacts_deleted = deleted, "Cleared contacts table");

        Ok(deleted)
    }
}

// ============================================================================
// Row Type for sqlx mapping
// ============================================================================

#[derive(sqlx::FromRow)]
struct ContactRow {
    contact_id: Uuid,
    firstname: String,
    lastname: String,
    email: String,
    phone: String,
    birthday: NaiveDate,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl ContactRow {
    fn into_contact(self) -> Contact {
        Contact {
            contact_id: ContactId::from_uuid(self.contact_id),
            firstname: self.firstname,
            lastname: self.lastname,
            email: ContactEmail::from_db(self.email),
            phone: PhoneNumber::from_db(self.phone),
            birthday: self.birthday,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}
