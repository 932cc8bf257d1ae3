use async_trait::async_trait;
use std::sync::Arc;

use crate::client::AsyncContactsClient;
use crate::error::ContactResult;
use crate::models::{Address, Contact, Phone};
use crate::repositories::traits::ContactRepository;

/// Contact repository backed by a remote Contacts API.
///
/// This repository delegates all operations to the AsyncContactsClient,
/// providing a clean abstraction layer between business logic and
/// the underlying HTTP client. Cascading deletes and ID assignment are
/// the remote side's responsibility.
pub struct ApiContactRepository {
    client: Arc<dyn AsyncContactsClient>,
}

impl ApiContactRepository {
    /// Create a new ApiContactRepository with the given client.
    pub fn new(client: Arc<dyn AsyncContactsClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ContactRepository for ApiContactRepository {
    async fn get(&self, contact_id: i64) -> ContactResult<Option<Contact>> {
        self.client.get_contact(contact_id).await
    }

    async fn get_all(&self) -> ContactResult<Vec<Contact>> {
        self.client.get_contacts().await
    }

    async fn get_by_name(
        &self,
        first_name: &str,
        last_name: &str,
    ) -> ContactResult<Vec<Contact>> {
        self.client.get_contacts_by_name(first_name, last_name).await
    }

    async fn save(&self, contact: &Contact) -> ContactResult<Option<Contact>> {
        // The API either stores the contact or answers with an error status.
        self.client.save_contact(contact).await.map(Some)
    }

    async fn delete(&self, contact_id: i64) -> ContactResult<bool> {
        self.client.delete_contact(contact_id).await
    }

    async fn get_phones(&self, contact_id: i64) -> ContactResult<Vec<Phone>> {
        self.client.get_contact_phones(contact_id).await
    }

    async fn get_phone(&self, contact_id: i64, phone_id: i64) -> ContactResult<Option<Phone>> {
        self.client.get_contact_phone(contact_id, phone_id).await
    }

    async fn get_addresses(&self, contact_id: i64) -> ContactResult<Vec<Address>> {
        self.client.get_contact_addresses(contact_id).await
    }

    async fn get_address(
        &self,
        contact_id: i64,
        address_id: i64,
    ) -> ContactResult<Option<Address>> {
        self.client.get_contact_address(contact_id, address_id).await
    }
}
