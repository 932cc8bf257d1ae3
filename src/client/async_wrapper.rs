//! Async wrapper around the synchronous ContactsApiClient.
//!
//! This module provides an async interface to the synchronous client by using
//! `tokio::task::spawn_blocking` to run HTTP operations on a dedicated thread pool,
//! preventing blocking of the async runtime.

use crate::client::ContactsApiClient;
use crate::error::{ContactError, ContactResult};
use crate::models::{Address, Contact, Phone};
use async_trait::async_trait;
use std::sync::Arc;

/// Async wrapper trait for Contacts API operations.
#[async_trait]
pub trait AsyncContactsClient: Send + Sync {
    async fn get_contacts(&self) -> ContactResult<Vec<Contact>>;
    async fn get_contact(&self, contact_id: i64) -> ContactResult<Option<Contact>>;
    async fn get_contacts_by_name(
        &self,
        first_name: &str,
        last_name: &str,
    ) -> ContactResult<Vec<Contact>>;

    async fn save_contact(&self, contact: &Contact) -> ContactResult<Contact>;
    async fn delete_contact(&self, contact_id: i64) -> ContactResult<bool>;

    async fn get_contact_phones(&self, contact_id: i64) -> ContactResult<Vec<Phone>>;
    async fn get_contact_phone(
        &self,
        contact_id: i64,
        phone_id: i64,
    ) -> ContactResult<Option<Phone>>;
    async fn get_contact_addresses(&self, contact_id: i64) -> ContactResult<Vec<Address>>;
    async fn get_contact_address(
        &self,
        contact_id: i64,
        address_id: i64,
    ) -> ContactResult<Option<Address>>;
}

/// Async wrapper around the synchronous ContactsApiClient.
#[derive(Clone)]
pub struct AsyncContactsClientImpl {
    client: Arc<ContactsApiClient>,
}

impl AsyncContactsClientImpl {
    pub fn new(client: ContactsApiClient) -> Self {
        Self {
            client: Arc::new(client),
        }
    }

    /// Run a blocking client call on tokio's blocking pool.
    async fn blocking<T, F>(&self, call: F) -> ContactResult<T>
    where
        F: FnOnce(&ContactsApiClient) -> ContactResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let client = self.client.clone();

        tokio::task::spawn_blocking(move || call(&client))
            .await
            .map_err(|e| ContactError::HttpError(format!("Task join error: {}", e)))?
    }
}

#[async_trait]
impl AsyncContactsClient for AsyncContactsClientImpl {
    async fn get_contacts(&self) -> ContactResult<Vec<Contact>> {
        self.blocking(|client| client.get_contacts()).await
    }

    async fn get_contact(&self, contact_id: i64) -> ContactResult<Option<Contact>> {
        self.blocking(move |client| client.get_contact(contact_id))
            .await
    }

    async fn get_contacts_by_name(
        &self,
        first_name: &str,
        last_name: &str,
    ) -> ContactResult<Vec<Contact>> {
        let first_name = first_name.to_string();
        let last_name = last_name.to_string();

        self.blocking(move |client| client.get_contacts_by_name(&first_name, &last_name))
            .await
    }

    async fn save_contact(&self, contact: &Contact) -> ContactResult<Contact> {
        let contact = contact.clone();

        self.blocking(move |client| client.save_contact(&contact))
            .await
    }

    async fn delete_contact(&self, contact_id: i64) -> ContactResult<bool> {
        self.blocking(move |client| client.delete_contact(contact_id))
            .await
    }

    async fn get_contact_phones(&self, contact_id: i64) -> ContactResult<Vec<Phone>> {
        self.blocking(move |client| client.get_contact_phones(contact_id))
            .await
    }

    async fn get_contact_phone(
        &self,
        contact_id: i64,
        phone_id: i64,
    ) -> ContactResult<Option<Phone>> {
        self.blocking(move |client| client.get_contact_phone(contact_id, phone_id))
            .await
    }

    async fn get_contact_addresses(&self, contact_id: i64) -> ContactResult<Vec<Address>> {
        self.blocking(move |client| client.get_contact_addresses(contact_id))
            .await
    }

    async fn get_contact_address(
        &self,
        contact_id: i64,
        address_id: i64,
    ) -> ContactResult<Option<Address>> {
        self.blocking(move |client| client.get_contact_address(contact_id, address_id))
            .await
    }
}
