//! HTTP Handlers
//!
//! Handlers call the repository directly; contact operations are plain
//! data access with no orchestration worth a use-case layer.

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use chrono::Utc;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::entities::Contact;
use crate::domain::repository::ContactRepository;
use crate::error::{ContactsError, ContactsResult};
use crate::infra::seed;
use crate::presentation::dto::{ContactBody, ContactResponse, SeedParams};

/// Shared state for contacts handlers
#[derive(Clone)]
pub struct ContactsAppState<R>
where
    R: ContactRepository + Clone + Send + Sync + 'static,
{
    pub repo: Arc<R>,
}

// ============================================================================
// CRUD
// ============================================================================

/// POST /contacts
pub async fn create_contact<R>(
    State(state): State<ContactsAppState<R>>,
    Json(body): Json<ContactBody>,
) -> ContactsResult<(StatusCode, Json<ContactResponse>)>
where
    R: ContactRepository + Clone + Send + Sync + 'static,
{
    let (firstname, lastname, email, phone, birthday) = body.into_parts()?;
    let contact = Contact::new(firstname, lastname, email, phone, birthday);

    state.repo.create(&contact).await?;

    tracing::info!(contact_id = %contact.contact_id, "Contact created");

    Ok((StatusCode::CREATED, Json(contact.into())))
}

/// GET /contacts
pub async fn list_contacts<R>(
    State(state): State<ContactsAppState<R>>,
) -> ContactsResult<Json<Vec<ContactResponse>>>
where
    R: ContactRepository + Clone + Send + Sync + 'static,
{
    let contacts = state.repo.list_all().await?;
    Ok(Json(contacts.into_iter().map(Into::into).collect()))
}

/// GET /contacts/{id}
pub async fn get_contact<R>(
    State(state): State<ContactsAppState<R>>,
    Path(contact_id): Path<Uuid>,
) -> ContactsResult<Json<ContactResponse>>
where
    R: ContactRepository + Clone + Send + Sync + 'static,
{
    let contact = state
        .repo
        .find_by_id(contact_id)
        .await?
        .ok_or(ContactsError::ContactNotFound)?;

    Ok(Json(contact.into()))
}

/// PUT /contacts/{id}
pub async fn update_contact<R>(
    State(state): State<ContactsAppState<R>>,
    Path(contact_id): Path<Uuid>,
    Json(body): Json<ContactBody>,
) -> ContactsResult<Json<ContactResponse>>
where
    R: ContactRepository + Clone + Send + Sync + 'static,
{
    let mut contact = state
        .repo
        .find_by_id(contact_id)
        .await?
        .ok_or(ContactsError::ContactNotFound)?;

    let (firstname, lastname, email, phone, birthday) = body.into_parts()?;
    contact.apply(firstname, lastname, email, phone, birthday);

    if !state.repo.update(&contact).await? {
        return Err(ContactsError::ContactNotFound);
    }

    Ok(Json(contact.into()))
}

/// DELETE /contacts/{id}
pub async fn delete_contact<R>(
    State(state): State<ContactsAppState<R>>,
    Path(contact_id): Path<Uuid>,
) -> ContactsResult<StatusCode>
where
    R: ContactRepository + Clone + Send + Sync + 'static,
{
    if !state.repo.delete(contact_id).await? {
        return Err(ContactsError::ContactNotFound);
    }

    Ok(StatusCode::NO_CONTENT)
}

// ============================================================================
// Birthday window and search
// ============================================================================

/// GET /contacts/birthdays
///
/// Contacts whose next birthday falls within the next seven days.
pub async fn upcoming_birthdays<R>(
    State(state): State<ContactsAppState<R>>,
) -> ContactsResult<Json<Vec<ContactResponse>>>
where
    R: ContactRepository + Clone + Send + Sync + 'static,
{
    let today = Utc::now().date_naive();

    let matched: Vec<ContactResponse> = state
        .repo
        .list_all()
        .await?
        .into_iter()
        .filter(|contact| contact.has_upcoming_birthday(today))
        .map(Into::into)
        .collect();

    Ok(Json(matched))
}

/// GET /contacts/search/{query}
///
/// Whole-value match against any contact field.
pub async fn search_contacts<R>(
    State(state): State<ContactsAppState<R>>,
    Path(query): Path<String>,
) -> ContactsResult<Json<Vec<ContactResponse>>>
where
    R: ContactRepository + Clone + Send + Sync + 'static,
{
    let matched = state.repo.search_exact(&query).await?;
    Ok(Json(matched.into_iter().map(Into::into).collect()))
}

// ============================================================================
// Debug tooling
// ============================================================================

/// POST /contacts/debug?quantity=N
///
/// Seed the table with randomly generated contacts.
pub async fn seed_contacts<R>(
    State(state): State<ContactsAppState<R>>,
    Query(params): Query<SeedParams>,
) -> ContactsResult<(StatusCode, Json<Vec<ContactResponse>>)>
where
    R: ContactRepository + Clone + Send + Sync + 'static,
{
    let mut created = Vec::with_capacity(params.quantity as usize);

    for _ in 0..params.quantity {
        let contact = {
            let mut rng = rand::thread_rng();
            seed::random_contact(&mut rng)?
        };
        state.repo.create(&contact).await?;
        created.push(contact.into());
    }

    tracing::info!(seeded = created.len(), "Seeded contacts");

    Ok((StatusCode::CREATED, Json(created)))
}

/// DELETE /contacts/debug
///
/// Wipe the contacts table.
pub async fn clear_contacts<R>(
    State(state): State<ContactsAppState<R>>,
) -> ContactsResult<StatusCode>
where
    R: ContactRepository + Clone + Send + Sync + 'static,
{
    state.repo.delete_all().await?;
    Ok(StatusCode::NO_CONTENT)
}
