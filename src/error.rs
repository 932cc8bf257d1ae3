//! Error types for the Contacts server.
//!
//! This module defines custom error types using `thiserror` for precise error handling.
//! Validation failures are wrapped from [`ValidationError`]; "not found" and
//! "nothing was written" are never errors and surface as `None`/`false` instead.

use crate::domain::ValidationError;
use thiserror::Error;

/// Errors that can occur while managing contacts.
#[derive(Error, Debug)]
pub enum ContactError {
    /// Input was rejected before reaching storage
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// SQLite storage failed
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    HttpError(String),

    /// API returned an error status code
    #[error("API error (status {status}): {message}")]
    ApiError { status: u16, message: String },

    /// Failed to parse JSON
    #[error("JSON parse error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Generic error with context
    #[error("Contact error: {0}")]
    Other(String),
}

impl ContactError {
    /// The validation failure behind this error, if any.
    pub fn as_validation(&self) -> Option<&ValidationError> {
        match self {
            ContactError::Validation(e) => Some(e),
            _ => None,
        }
    }

    /// HTTP status a transport layer should answer with for this error.
    ///
    /// Validation failures are the caller's fault (400); everything else is
    /// an infrastructure failure (500), except API errors which keep the
    /// upstream status.
    pub fn status_code(&self) -> u16 {
        match self {
            ContactError::Validation(_) => 400,
            ContactError::ApiError { status, .. } => *status,
            _ => 500,
        }
    }
}

/// Errors that can occur during configuration loading.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Required environment variable is missing
    #[error("Missing required environment variable: {0}")]
    MissingVar(String),

    /// Environment variable has invalid value
    #[error("Invalid value for {var}: {reason}")]
    InvalidValue { var: String, reason: String },
}

/// Convenience type alias for Results with ContactError
pub type ContactResult<T> = Result<T, ContactError>;

/// Convenience type alias for Results with ConfigError
pub type ConfigResult<T> = Result<T, ConfigError>;
