//! Contact manager.
//!
//! The gatekeeper between untrusted input and storage: every business rule is
//! enforced here before the repository is touched, and everything else is a
//! straight pass-through.

use crate::domain::{validate_contact, validate_delete, validate_name_search, ValidationError};
use crate::error::{ContactError, ContactResult};
use crate::metrics::Metrics;
use crate::models::{Address, Contact, Phone};
use crate::repositories::ContactRepository;
use async_trait::async_trait;
use chrono::Utc;
use std::sync::Arc;

/// Contact manager trait for business operations.
#[async_trait]
pub trait ContactManager: Send + Sync {
    /// Get a contact by ID; `None` when it does not exist.
    async fn get_contact(&self, contact_id: i64) -> ContactResult<Option<Contact>>;

    /// Get every contact.
    async fn get_contacts(&self) -> ContactResult<Vec<Contact>>;

    /// Get contacts matching both names.
    ///
    /// Both names are required; `firstName` is checked first.
    async fn get_contacts_by_name(
        &self,
        first_name: Option<&str>,
        last_name: Option<&str>,
    ) -> ContactResult<Vec<Contact>>;

    /// Validate and save a contact (insert when its ID is 0, update otherwise).
    ///
    /// Returns the saved contact with its ID populated, or `None` when the
    /// store wrote nothing.
    async fn save_contact(&self, contact: Option<Contact>) -> ContactResult<Option<Contact>>;

    /// Delete a contact and its phones and addresses by ID.
    async fn delete_contact(&self, contact_id: i64) -> ContactResult<bool>;

    /// Delete the given contact. An absent contact deletes nothing.
    async fn delete_contact_record(&self, contact: Option<&Contact>) -> ContactResult<bool>;

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

/// Default implementation of ContactManager.
pub struct ContactManagerImpl {
    repository: Arc<dyn ContactRepository>,
    metrics: Metrics,
}

impl ContactManagerImpl {
    /// Create a new contact manager over the given repository.
    pub fn new(repository: Arc<dyn ContactRepository>) -> Self {
        Self::with_metrics(repository, Metrics::new())
    }

    /// Create a contact manager that reports into an existing collector.
    pub fn with_metrics(repository: Arc<dyn ContactRepository>, metrics: Metrics) -> Self {
        Self {
            repository,
            metrics,
        }
    }

    pub fn metrics(&self) -> &Metrics {
        &self.metrics
    }

    fn reject(&self, operation: &str, error: ValidationError) -> ContactError {
        tracing::warn!(
            operation,
            param = error.param(),
            "Validation failed: {}",
            error.message()
        );
        self.metrics.record_validation_failure();
        error.into()
    }
}

#[async_trait]
impl ContactManager for ContactManagerImpl {
    async fn get_contact(&self, contact_id: i64) -> ContactResult<Option<Contact>> {
        self.repository.get(contact_id).await
    }

    async fn get_contacts(&self) -> ContactResult<Vec<Contact>> {
        self.repository.get_all().await
    }

    async fn get_contacts_by_name(
        &self,
        first_name: Option<&str>,
        last_name: Option<&str>,
    ) -> ContactResult<Vec<Contact>> {
        validate_name_search(first_name, last_name)
            .map_err(|e| self.reject("get_contacts_by_name", e))?;

        self.repository
            .get_by_name(first_name.unwrap_or_default(), last_name.unwrap_or_default())
            .await
    }

    async fn save_contact(&self, contact: Option<Contact>) -> ContactResult<Option<Contact>> {
        validate_contact(contact.as_ref(), Utc::now())
            .map_err(|e| self.reject("save_contact", e))?;

        let Some(contact) = contact else {
            // validate_contact rejects an absent contact
            return Ok(None);
        };

        let saved = self.repository.save(&contact).await?;
        match &saved {
            Some(saved) => tracing::info!(contact_id = saved.contact_id, "Contact saved"),
            None => tracing::warn!(
                contact_id = contact.contact_id,
                "Store reported no rows affected while saving contact"
            ),
        }
        Ok(saved)
    }

    async fn delete_contact(&self, contact_id: i64) -> ContactResult<bool> {
        let deleted = self.repository.delete(contact_id).await?;
        tracing::info!(contact_id, deleted, "Delete contact");
        Ok(deleted)
    }

    async fn delete_contact_record(&self, contact: Option<&Contact>) -> ContactResult<bool> {
        match contact {
            Some(contact) if validate_delete(Some(contact)) => {
                let deleted = self.repository.delete_contact(contact).await?;
                tracing::info!(contact_id = contact.contact_id, deleted, "Delete contact");
                Ok(deleted)
            }
            _ => Ok(false),
        }
    }

    async fn get_contact_phones(&self, contact_id: i64) -> ContactResult<Vec<Phone>> {
        self.repository.get_phones(contact_id).await
    }

    async fn get_contact_phone(
        &self,
        contact_id: i64,
        phone_id: i64,
    ) -> ContactResult<Option<Phone>> {
        self.repository.get_phone(contact_id, phone_id).await
    }

    async fn get_contact_addresses(&self, contact_id: i64) -> ContactResult<Vec<Address>> {
        self.repository.get_addresses(contact_id).await
    }

    async fn get_contact_address(
        &self,
        contact_id: i64,
        address_id: i64,
    ) -> ContactResult<Option<Address>> {
        self.repository.get_address(contact_id, address_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::SqliteContactRepository;
    use chrono::{Duration, TimeZone};

    fn manager() -> ContactManagerImpl {
        let repo = SqliteContactRepository::open_in_memory().unwrap();
        ContactManagerImpl::new(Arc::new(repo) as Arc<dyn ContactRepository>)
    }

    #[tokio::test]
    async fn test_save_then_get_round_trips() {
        let manager = manager();
        let mut contact = Contact::new("Joseph", "Guadagno", "j@x.com");
        contact.birthday = Some(Utc::now() - Duration::days(10));
        contact.anniversary = Some(Utc::now() - Duration::days(1));

        let saved = manager.save_contact(Some(contact)).await.unwrap().unwrap();
        assert_ne!(saved.contact_id, 0);

        let loaded = manager.get_contact(saved.contact_id).await.unwrap();
        assert_eq!(loaded, Some(saved));
    }

    #[tokio::test]
    async fn test_future_birthday_is_rejected_and_counted() {
        let manager = manager();
        let future = Utc.with_ymd_and_hms(2030, 12, 31, 0, 0, 0).unwrap();
        let mut contact = Contact::new("Joseph", "Guadagno", "j@x.com");
        contact.birthday = Some(future);

        let err = manager.save_contact(Some(contact)).await.unwrap_err();
        let validation = err.as_validation().unwrap();
        assert_eq!(validation.param(), "Birthday");
        assert_eq!(validation.actual_value(), Some(future));
        assert_eq!(manager.metrics().validation_failures_total(), 1);
        assert!(manager.get_contacts().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_delete_record_without_contact_is_false() {
        let manager = manager();
        assert!(!manager.delete_contact_record(None).await.unwrap());
    }
}
