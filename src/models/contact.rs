//! Contact model representing a person and the records they own.

use super::{Address, Phone};
use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A person in the contact book.
///
/// `contact_id` of `0` marks a contact that has not been persisted yet; saving
/// it takes the insert path and the store assigns the identifier. Any other
/// value takes the update path and replaces the stored record wholesale,
/// phones and addresses included.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default, JsonSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct Contact {
    /// Unique identifier, 0 when unsaved
    pub contact_id: i64,

    /// First name (required)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,

    /// Middle name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub middle_name: Option<String>,

    /// Last name (required)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,

    /// Primary email address (required)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email_address: Option<String>,

    /// Must not be in the future
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schemars(with = "Option<String>")]
    pub birthday: Option<DateTime<Utc>>,

    /// Must not be in the future nor before the birthday
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schemars(with = "Option<String>")]
    pub anniversary: Option<DateTime<Utc>>,

    /// Profile image URL
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,

    /// Free-form notes
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,

    /// Phone numbers owned by this contact
    pub phones: Vec<Phone>,

    /// Addresses owned by this contact
    pub addresses: Vec<Address>,
}

impl Contact {
    /// Create a new, unsaved contact with the required fields.
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        email_address: impl Into<String>,
    ) -> Self {
        Self {
            first_name: Some(first_name.into()),
            last_name: Some(last_name.into()),
            email_address: Some(email_address.into()),
            ..Default::default()
        }
    }

    /// Whether this contact still needs an identifier from the store.
    pub fn is_new(&self) -> bool {
        self.contact_id == 0
    }

    /// "First Last", skipping whichever part is missing.
    pub fn full_name(&self) -> String {
        [self.first_name.as_deref(), self.last_name.as_deref()]
            .into_iter()
            .flatten()
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
    }
}
