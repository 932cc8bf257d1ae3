//! Domain validation errors.

use chrono::{DateTime, Utc};
use std::fmt;

/// Errors raised when a contact or a search request fails validation.
///
/// Both variants carry the name of the offending parameter so the transport
/// layer can point the caller at the field to fix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// A required value was empty or absent.
    MissingRequiredField { param: String, message: String },

    /// A date was outside its permitted range.
    OutOfRange {
        param: String,
        actual_value: DateTime<Utc>,
        message: String,
    },
}

impl ValidationError {
    pub fn missing(param: impl Into<String>, message: impl Into<String>) -> Self {
        Self::MissingRequiredField {
            param: param.into(),
            message: message.into(),
        }
    }

    pub fn out_of_range(
        param: impl Into<String>,
        actual_value: DateTime<Utc>,
        message: impl Into<String>,
    ) -> Self {
        Self::OutOfRange {
            param: param.into(),
            actual_value,
            message: message.into(),
        }
    }

    /// Name of the parameter that failed validation.
    pub fn param(&self) -> &str {
        match self {
            Self::MissingRequiredField { param, .. } | Self::OutOfRange { param, .. } => param,
        }
    }

    /// The fixed human-readable message, without the parameter suffix.
    pub fn message(&self) -> &str {
        match self {
            Self::MissingRequiredField { message, .. } | Self::OutOfRange { message, .. } => {
                message
            }
        }
    }

    /// The offending value for range failures.
    pub fn actual_value(&self) -> Option<DateTime<Utc>> {
        match self {
            Self::OutOfRange { actual_value, .. } => Some(*actual_value),
            Self::MissingRequiredField { .. } => None,
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingRequiredField { param, message } => {
                write!(f, "{} (Parameter '{}')", message, param)
            }
            Self::OutOfRange {
                param,
                actual_value,
                message,
            } => write!(
                f,
                "{} (Parameter '{}')\nActual value was {}.",
                message,
                param,
                actual_value.to_rfc3339()
            ),
        }
    }
}

impl std::error::Error for ValidationError {}
