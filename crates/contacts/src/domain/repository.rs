//! Repository Trait
//!
//! Interface for contact persistence. Implementation is in the
//! infrastructure layer.

use uuid::Uuid;

use crate::domain::entities::Contact;
use crate::error::ContactsResult;

/// Contact repository trait
#[trait_variant::make(ContactRepository: Send)]
pub trait LocalContactRepository {
    /// Create a new contact
    ///
    /// Email and phone are unique; a collision surfaces
    /// `ContactsError::DuplicateContact`.
    async fn create(&self, contact: &Contact) -> ContactsResult<()>;

    /// Find contact by ID
    async fn find_by_id(&self, contact_id: Uuid) -> ContactsResult<Option<Contact>>;

    /// List all contacts
    async fn list_all(&self) -> ContactsResult<Vec<Contact>>;

    /// Update an existing contact
    ///
    /// Returns false when no contact matched the id.
    async fn update(&self, contact: &Contact) -> ContactsResult<bool>;

    /// Delete a contact by ID
    ///
    /// Returns false when no contact matched the id.
    async fn delete(&self, contact_id: Uuid) -> ContactsResult<bool>;

    /// Contacts where any field equals `query` verbatim
    async fn search_exact(&self, query: &str) -> ContactsResult<Vec<Contact>>;

    /// Delete every contact (debug tooling)
    async fn delete_all(&self) -> ContactsResult<u64>;
}
