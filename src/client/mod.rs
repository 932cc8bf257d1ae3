//! HTTP client for a remote Contacts API.
//!
//! This module provides a synchronous HTTP client that can be used from async contexts
//! via `tokio::task::spawn_blocking`. It speaks the same routes the server side
//! exposes (`contacts`, `contacts/search`, `contacts/{id}/phones`, ...) and maps
//! 404 responses on single-item lookups to `None`.

mod async_wrapper;
pub use async_wrapper::{AsyncContactsClient, AsyncContactsClientImpl};

use crate::config::Config;
use crate::error::{ContactError, ContactResult};
use crate::metrics::{HttpTimer, Metrics};
use crate::models::{Address, Contact, Phone};
use serde::de::DeserializeOwned;
use std::sync::Arc;
use std::time::Duration;

/// HTTP client for the Contacts API.
///
/// This client uses `ureq` for synchronous HTTP requests and can be called
/// from async contexts using `tokio::task::spawn_blocking`.
#[derive(Clone)]
pub struct ContactsApiClient {
    /// Base URL for the Contacts API
    base_url: String,

    /// HTTP client agent
    agent: Arc<ureq::Agent>,

    /// Metrics collector
    metrics: Metrics,
}

impl ContactsApiClient {
    /// Create a new client from configuration.
    pub fn new(config: &Config) -> Self {
        Self::build(
            config.api_base_url.clone().unwrap_or_default(),
            Duration::from_secs(config.request_timeout),
        )
    }

    /// Create a client with a custom base URL (useful for testing).
    #[doc(hidden)]
    pub fn with_base_url(base_url: String) -> Self {
        Self::build(base_url, Duration::from_secs(10))
    }

    fn build(base_url: String, timeout: Duration) -> Self {
        let agent = ureq::AgentBuilder::new().timeout(timeout).build();

        Self {
            base_url,
            agent: Arc::new(agent),
            metrics: Metrics::new(),
        }
    }

    /// Report into an existing collector instead of a private one.
    pub fn with_metrics(mut self, metrics: Metrics) -> Self {
        self.metrics = metrics;
        self
    }

    /// Get a reference to the metrics collector.
    pub fn metrics(&self) -> &Metrics {
        &self.metrics
    }

    /// Build a full URL from a path.
    fn build_url(&self, path: &str) -> String {
        let base = self.base_url.trim_end_matches('/');
        let path = path.trim_start_matches('/');
        format!("{}/{}", base, path)
    }

    /// Record timing for a finished request and pass the result through.
    fn timed(
        &self,
        method: &str,
        url: &str,
        request: impl FnOnce() -> Result<ureq::Response, ureq::Error>,
    ) -> ContactResult<ureq::Response> {
        let timer = HttpTimer::new(self.metrics.clone());
        tracing::debug!("{} {}", method, url);

        match request() {
            Ok(response) => {
                tracing::debug!("{} {} - status {}", method, url, response.status());
                timer.complete();
                Ok(response)
            }
            Err(e) => {
                let error = Self::map_error(e);
                match &error {
                    // A 404 is an answer, not a failure.
                    ContactError::ApiError { status: 404, .. } => timer.complete(),
                    _ => {
                        tracing::error!("{} {} - Error: {:?}", method, url, error);
                        timer.complete_with_error();
                    }
                }
                Err(error)
            }
        }
    }

    /// Execute a GET request.
    fn get(&self, path: &str) -> ContactResult<ureq::Response> {
        let url = self.build_url(path);
        self.timed("GET", &url, || {
            self.agent
                .get(&url)
                .set("Accept", "application/json")
                .call()
        })
    }

    /// Execute a POST request with a JSON body.
    fn post(&self, path: &str, body: &serde_json::Value) -> ContactResult<ureq::Response> {
        let url = self.build_url(path);
        self.timed("POST", &url, || {
            self.agent
                .post(&url)
                .set("Accept", "application/json")
                .set("Content-Type", "application/json")
                .send_json(body)
        })
    }

    /// Execute a DELETE request.
    fn delete(&self, path: &str) -> ContactResult<ureq::Response> {
        let url = self.build_url(path);
        self.timed("DELETE", &url, || self.agent.delete(&url).call())
    }

    /// Map a ureq error to a ContactError.
    fn map_error(error: ureq::Error) -> ContactError {
        match error {
            ureq::Error::Status(code, response) => {
                let message = response
                    .into_string()
                    .unwrap_or_else(|_| "Unknown error".to_string());
                ContactError::ApiError {
                    status: code,
                    message,
                }
            }
            ureq::Error::Transport(transport) => {
                if transport.kind() == ureq::ErrorKind::ConnectionFailed {
                    ContactError::HttpError("Connection failed".to_string())
                } else {
                    ContactError::HttpError(transport.to_string())
                }
            }
        }
    }

    fn read_json<T: DeserializeOwned>(response: ureq::Response) -> ContactResult<T> {
        let body = response
            .into_string()
            .map_err(|e| ContactError::HttpError(e.to_string()))?;
        Ok(serde_json::from_str(&body)?)
    }

    /// GET a JSON body, treating 404 as absent.
    fn get_optional<T: DeserializeOwned>(&self, path: &str) -> ContactResult<Option<T>> {
        match self.get(path) {
            Ok(response) => Self::read_json(response).map(Some),
            Err(ContactError::ApiError { status: 404, .. }) => Ok(None),
            Err(e) => Err(e),
        }
    }

    // ========================= Contact Operations =========================

    /// Get every contact.
    pub fn get_contacts(&self) -> ContactResult<Vec<Contact>> {
        let contacts: Vec<Contact> = Self::read_json(self.get("contacts")?)?;
        self.metrics.record_contacts_fetched(contacts.len());
        Ok(contacts)
    }

    /// Get a single contact by ID.
    pub fn get_contact(&self, contact_id: i64) -> ContactResult<Option<Contact>> {
        let contact: Option<Contact> = self.get_optional(&format!("contacts/{}", contact_id))?;
        if contact.is_some() {
            self.metrics.record_contacts_fetched(1);
        }
        Ok(contact)
    }

    /// Search contacts by exact first and last name.
    pub fn get_contacts_by_name(
        &self,
        first_name: &str,
        last_name: &str,
    ) -> ContactResult<Vec<Contact>> {
        let path = format!(
            "contacts/search?firstname={}&lastname={}",
            urlencoding::encode(first_name),
            urlencoding::encode(last_name)
        );
        let contacts: Vec<Contact> = Self::read_json(self.get(&path)?)?;
        self.metrics.record_contacts_fetched(contacts.len());
        Ok(contacts)
    }

    /// Create or update a contact.
    ///
    /// The API answers `201 Created` with the stored contact; any other
    /// success status is treated as a failure.
    pub fn save_contact(&self, contact: &Contact) -> ContactResult<Contact> {
        let body = serde_json::to_value(contact)?;
        let response = self.post("contacts/", &body)?;

        if response.status() != 201 {
            return Err(ContactError::ApiError {
                status: response.status(),
                message: format!(
                    "Invalid status code in the response: {}",
                    response.status()
                ),
            });
        }

        Self::read_json(response)
    }

    /// Delete a contact. `false` when the API reports it does not exist.
    pub fn delete_contact(&self, contact_id: i64) -> ContactResult<bool> {
        match self.delete(&format!("contacts/{}", contact_id)) {
            Ok(response) => Ok(response.status() == 204),
            Err(ContactError::ApiError { status: 404, .. }) => Ok(false),
            Err(e) => Err(e),
        }
    }

    // ===================== Phone and Address Operations ====================

    /// Get the phones of a contact.
    pub fn get_contact_phones(&self, contact_id: i64) -> ContactResult<Vec<Phone>> {
        Self::read_json(self.get(&format!("contacts/{}/phones", contact_id))?)
    }

    /// Get one phone of a contact.
    pub fn get_contact_phone(&self, contact_id: i64, phone_id: i64) -> ContactResult<Option<Phone>> {
        self.get_optional(&format!("contacts/{}/phones/{}", contact_id, phone_id))
    }

    /// Get the addresses of a contact.
    pub fn get_contact_addresses(&self, contact_id: i64) -> ContactResult<Vec<Address>> {
        Self::read_json(self.get(&format!("contacts/{}/addresses", contact_id))?)
    }

    /// Get one address of a contact.
    pub fn get_contact_address(
        &self,
        contact_id: i64,
        address_id: i64,
    ) -> ContactResult<Option<Address>> {
        self.get_optional(&format!(
            "contacts/{}/addresses/{}",
            contact_id, address_id
        ))
    }
}
