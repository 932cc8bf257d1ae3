use crate::error::ContactResult;
use crate::models::{Address, Contact, Phone};
use async_trait::async_trait;

/// Repository for persisting contacts and their phones and addresses.
///
/// Provides abstraction over contact storage and retrieval, enabling
/// different implementations (SQLite, remote API, mock). "Not found" is
/// `None` and "nothing removed" is `false`; errors are reserved for
/// infrastructure failures.
#[async_trait]
pub trait ContactRepository: Send + Sync {
    /// Retrieve a single contact by ID.
    async fn get(&self, contact_id: i64) -> ContactResult<Option<Contact>>;

    /// Retrieve every contact. Ordering is up to the implementation.
    async fn get_all(&self) -> ContactResult<Vec<Contact>>;

    /// Retrieve contacts whose first and last names both match exactly.
    async fn get_by_name(&self, first_name: &str, last_name: &str)
        -> ContactResult<Vec<Contact>>;

    /// Insert (ID 0) or replace (any other ID) a contact.
    ///
    /// Returns the contact with its identifier populated, or `None` when no
    /// rows were affected.
    async fn save(&self, contact: &Contact) -> ContactResult<Option<Contact>>;

    /// Delete a contact together with its phones and addresses.
    async fn delete(&self, contact_id: i64) -> ContactResult<bool>;

    /// Delete a contact by its identifier.
    async fn delete_contact(&self, contact: &Contact) -> ContactResult<bool> {
        self.delete(contact.contact_id).await
    }

    /// Phones owned by a contact.
    async fn get_phones(&self, contact_id: i64) -> ContactResult<Vec<Phone>>;

    /// A single phone, only if it belongs to the given contact.
    async fn get_phone(&self, contact_id: i64, phone_id: i64) -> ContactResult<Option<Phone>>;

    /// Addresses owned by a contact.
    async fn get_addresses(&self, contact_id: i64) -> ContactResult<Vec<Address>>;

    /// A single address, only if it belongs to the given contact.
    async fn get_address(
        &self,
        contact_id: i64,
        address_id: i64,
    ) -> ContactResult<Option<Address>>;
}
