//! Phone numbers and their classification.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Lookup entry classifying a phone number (Home, Work, Mobile, ...).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default, JsonSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct PhoneType {
    pub phone_type_id: i64,
    pub name: String,
}

impl PhoneType {
    pub fn new(phone_type_id: i64, name: impl Into<String>) -> Self {
        Self {
            phone_type_id,
            name: name.into(),
        }
    }
}

/// A phone number owned by exactly one contact.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default, JsonSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct Phone {
    /// Unique identifier, 0 when unsaved
    pub phone_id: i64,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub extension: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone_type: Option<PhoneType>,

    /// Owning contact
    pub contact_id: i64,
}

impl Phone {
    pub fn new(phone_number: impl Into<String>, phone_type: Option<PhoneType>) -> Self {
        Self {
            phone_number: Some(phone_number.into()),
            phone_type,
            ..Default::default()
        }
    }
}
