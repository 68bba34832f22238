//! Contacts Router

use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;

use crate::domain::repository::ContactRepository;
use crate::infra::postgres::PgContactRepository;
use crate::presentation::handlers::{self, ContactsAppState};

/// Create the Contacts router with PostgreSQL repository
///
/// Nest under `/contacts`. The caller is expected to wrap the router in
/// the auth session middleware; nothing here is public.
pub fn contacts_router(repo: PgContactRepository) -> Router {
    contacts_router_generic(repo)
}

/// Create a generic Contacts router for any repository implementation
pub fn contacts_router_generic<R>(repo: R) -> Router
where
    R: ContactRepository + Clone + Send + Sync + 'static,
{
    let state = ContactsAppState {
        repo: Arc::new(repo),
    };

    Router::new()
        .route(
            "/",
            get(handlers::list_contacts::<R>).post(handlers::create_contact::<R>),
        )
        .route("/birthdays", get(handlers::upcoming_birthdays::<R>))
        .route("/search/{query}", get(handlers::search_contacts::<R>))
        .route(
            "/debug",
            post(handlers::seed_contacts::<R>).delete(handlers::clear_contacts::<R>),
        )
        .route(
            "/{id}",
            get(handlers::get_contact::<R>)
                .put(handlers::update_contact::<R>)
                .delete(handlers::delete_contact::<R>),
        )
        .with_state(state)
}
