//! Configuration management for the Contacts server.
//!
//! This module handles loading and validating configuration from environment variables.
//! A `.env` file is honoured if present; it is read with `dotenvy`, which never
//! writes to stdout (stdout belongs to the MCP transport).

use crate::error::{ConfigError, ConfigResult};
use std::env;
use std::str::FromStr;

/// Which repository backs the contact manager.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreKind {
    /// Local SQLite database
    Sqlite,
    /// Remote Contacts API over HTTP
    Api,
}

impl FromStr for StoreKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sqlite" => Ok(StoreKind::Sqlite),
            "api" => Ok(StoreKind::Api),
            other => Err(format!("Must be 'sqlite' or 'api', got: {}", other)),
        }
    }
}

/// Configuration for the Contacts server.
#[derive(Debug, Clone)]
pub struct Config {
    /// Repository backend (default: sqlite)
    pub store: StoreKind,

    /// SQLite database path (default: "contacts.db")
    pub database_path: String,

    /// Remote Contacts API base URL (required for the api backend)
    pub api_base_url: Option<String>,

    /// HTTP request timeout in seconds (default: 10)
    pub request_timeout: u64,

    /// Log level (default: "error")
    pub log_level: String,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Optional environment variables:
    /// - `CONTACTS_STORE`: `sqlite` or `api` (default: sqlite)
    /// - `CONTACTS_DATABASE_PATH`: SQLite file, `:memory:` allowed (default: contacts.db)
    /// - `CONTACTS_API_BASE_URL`: API base URL, required when the store is `api`
    /// - `REQUEST_TIMEOUT`: HTTP timeout in seconds (default: 10)
    /// - `LOG_LEVEL`: Logging level (default: "error")
    pub fn from_env() -> ConfigResult<Self> {
        // Try to load .env file if it exists (but don't fail if it doesn't)
        let _ = dotenvy::dotenv();

        let store = match env::var("CONTACTS_STORE") {
            Ok(val) => val.parse::<StoreKind>().map_err(|reason| ConfigError::InvalidValue {
                var: "CONTACTS_STORE".to_string(),
                reason,
            })?,
            Err(_) => StoreKind::Sqlite,
        };

        let database_path =
            env::var("CONTACTS_DATABASE_PATH").unwrap_or_else(|_| "contacts.db".to_string());
        if database_path.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                var: "CONTACTS_DATABASE_PATH".to_string(),
                reason: "Cannot be empty".to_string(),
            });
        }

        let api_base_url = env::var("CONTACTS_API_BASE_URL").ok();

        if let Some(url) = &api_base_url {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err(ConfigError::InvalidValue {
                    var: "CONTACTS_API_BASE_URL".to_string(),
                    reason: "Must start with http:// or https://".to_string(),
                });
            }
        }

        if store == StoreKind::Api && api_base_url.is_none() {
            return Err(ConfigError::MissingVar("CONTACTS_API_BASE_URL".to_string()));
        }

        let request_timeout = Self::parse_env_u64("REQUEST_TIMEOUT", 10)?;
        let log_level = env::var("LOG_LEVEL").unwrap_or_else(|_| "error".to_string());

        Ok(Config {
            store,
            database_path,
            api_base_url,
            request_timeout,
            log_level,
        })
    }

    /// Parse an environment variable as u64 with a default value.
    fn parse_env_u64(var_name: &str, default: u64) -> ConfigResult<u64> {
        match env::var(var_name) {
            Ok(val) => val.parse::<u64>().map_err(|_| ConfigError::InvalidValue {
                var: var_name.to_string(),
                reason: format!("Must be a positive number, got: {}", val),
            }),
            Err(_) => Ok(default),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            store: StoreKind::Sqlite,
            database_path: "contacts.db".to_string(),
            api_base_url: None,
            request_timeout: 10,
            log_level: "error".to_string(),
        }
    }
}
