//! Postal addresses and their classification.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Lookup entry classifying an address (Home, Work, ...).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default, JsonSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct AddressType {
    pub address_type_id: i64,
    pub name: String,
}

impl AddressType {
    pub fn new(address_type_id: i64, name: impl Into<String>) -> Self {
        Self {
            address_type_id,
            name: name.into(),
        }
    }
}

/// A postal address owned by exactly one contact.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default, JsonSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct Address {
    /// Unique identifier, 0 when unsaved
    pub address_id: i64,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub street_address: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub secondary_address: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub postal_code: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub address_type: Option<AddressType>,

    /// Owning contact
    pub contact_id: i64,
}
