use async_trait::async_trait;
use contacts_server::error::ContactResult;
use contacts_server::models::{Address, Contact, Phone};
use contacts_server::repositories::ContactRepository;
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

/// Mock contact repository for testing.
///
/// Provides an in-memory implementation of ContactRepository that can be
/// easily configured with test data and tracks method calls for verification.
#[allow(dead_code)]
#[derive(Clone)]
pub struct MockContactRepository {
    contacts: Arc<Mutex<BTreeMap<i64, Contact>>>,
    next_id: Arc<Mutex<i64>>,
    call_counts: Arc<Mutex<BTreeMap<String, usize>>>,
}

#[allow(dead_code)]
impl MockContactRepository {
    /// Create a new empty MockContactRepository.
    pub fn new() -> Self {
        Self {
            contacts: Arc::new(Mutex::new(BTreeMap::new())),
            next_id: Arc::new(Mutex::new(1)),
            call_counts: Arc::new(Mutex::new(BTreeMap::new())),
        }
    }

    /// Add a contact to the mock repository, keeping its ID.
    pub fn add_contact(&self, contact: Contact) {
        let mut contacts = self.contacts.lock().unwrap();
        let mut next_id = self.next_id.lock().unwrap();
        *next_id = (*next_id).max(contact.contact_id + 1);
        contacts.insert(contact.contact_id, contact);
    }

    /// Get the number of times a method was called.
    pub fn get_call_count(&self, method: &str) -> usize {
        let counts = self.call_counts.lock().unwrap();
        *counts.get(method).unwrap_or(&0)
    }

    /// Total number of calls across every method.
    pub fn total_calls(&self) -> usize {
        self.call_counts.lock().unwrap().values().sum()
    }

    /// Reset all call counts.
    pub fn reset_call_counts(&self) {
        self.call_counts.lock().unwrap().clear();
    }

    pub fn len(&self) -> usize {
        self.contacts.lock().unwrap().len()
    }

    fn track_call(&self, method: &str) {
        let mut counts = self.call_counts.lock().unwrap();
        *counts.entry(method.to_string()).or_insert(0) += 1;
    }
}

impl Default for MockContactRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ContactRepository for MockContactRepository {
    async fn get(&self, contact_id: i64) -> ContactResult<Option<Contact>> {
        self.track_call("get");
        Ok(self.contacts.lock().unwrap().get(&contact_id).cloned())
    }

    async fn get_all(&self) -> ContactResult<Vec<Contact>> {
        self.track_call("get_all");
        Ok(self.contacts.lock().unwrap().values().cloned().collect())
    }

    async fn get_by_name(&self, first_name: &str, last_name: &str) -> ContactResult<Vec<Contact>> {
        self.track_call("get_by_name");
        Ok(self
            .contacts
            .lock()
            .unwrap()
            .values()
            .filter(|c| {
                c.first_name.as_deref() == Some(first_name)
                    && c.last_name.as_deref() == Some(last_name)
            })
            .cloned()
            .collect())
    }

    async fn save(&self, contact: &Contact) -> ContactResult<Option<Contact>> {
        self.track_call("save");

        let mut contacts = self.contacts.lock().unwrap();
        let mut saved = contact.clone();

        if saved.is_new() {
            let mut next_id = self.next_id.lock().unwrap();
            saved.contact_id = *next_id;
            *next_id += 1;
        } else if !contacts.contains_key(&saved.contact_id) {
            return Ok(None);
        }

        for phone in &mut saved.phones {
            phone.contact_id = saved.contact_id;
        }
        for address in &mut saved.addresses {
            address.contact_id = saved.contact_id;
        }

        contacts.insert(saved.contact_id, saved.clone());
        Ok(Some(saved))
    }

    async fn delete(&self, contact_id: i64) -> ContactResult<bool> {
        self.track_call("delete");
        Ok(self.contacts.lock().unwrap().remove(&contact_id).is_some())
    }

    async fn get_phones(&self, contact_id: i64) -> ContactResult<Vec<Phone>> {
        self.track_call("get_phones");
        Ok(self
            .contacts
            .lock()
            .unwrap()
            .get(&contact_id)
            .map(|c| c.phones.clone())
            .unwrap_or_default())
    }

    async fn get_phone(&self, contact_id: i64, phone_id: i64) -> ContactResult<Option<Phone>> {
        self.track_call("get_phone");
        Ok(self
            .contacts
            .lock()
            .unwrap()
            .get(&contact_id)
            .and_then(|c| c.phones.iter().find(|p| p.phone_id == phone_id).cloned()))
    }

    async fn get_addresses(&self, contact_id: i64) -> ContactResult<Vec<Address>> {
        self.track_call("get_addresses");
        Ok(self
            .contacts
            .lock()
            .unwrap()
            .get(&contact_id)
            .map(|c| c.addresses.clone())
            .unwrap_or_default())
    }

    async fn get_address(
        &self,
        contact_id: i64,
        address_id: i64,
    ) -> ContactResult<Option<Address>> {
        self.track_call("get_address");
        Ok(self
            .contacts
            .lock()
            .unwrap()
            .get(&contact_id)
            .and_then(|c| c.addresses.iter().find(|a| a.address_id == address_id).cloned()))
    }
}
