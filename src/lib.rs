//! Contacts Server - contact management with a validating core and pluggable storage.
//!
//! The [`services::ContactManager`] enforces the business rules (required names
//! and email, sane birthday/anniversary dates) and delegates persistence to a
//! [`repositories::ContactRepository`]. The crate ships a SQLite repository and
//! a repository backed by a remote Contacts API, and exposes the manager to AI
//! assistants as an MCP server.
//!
//! # Architecture
//!
//! - **models**: Contacts, phones, addresses and their lookup types
//! - **domain**: Validation rules and the validation error type
//! - **error**: Custom error types for precise error handling
//! - **config**: Configuration management from environment variables
//! - **repositories**: Storage trait with SQLite and HTTP API implementations
//! - **client**: HTTP client for a remote Contacts API
//! - **services**: The contact manager
//! - **metrics**: Request and validation counters
//! - **server**: MCP protocol server

pub mod client;
pub mod config;
pub mod domain;
pub mod error;
pub mod metrics;
pub mod models;
pub mod repositories;
pub mod server;
pub mod services;

// Re-export commonly used types
pub use client::ContactsApiClient;
pub use config::{Config, StoreKind};
pub use domain::ValidationError;
pub use error::{ConfigError, ContactError, ContactResult};
pub use metrics::{HttpTimer, Metrics, MetricsSummary};
pub use models::{Address, AddressType, Contact, Phone, PhoneType};
pub use repositories::{ApiContactRepository, ContactRepository, SqliteContactRepository};
pub use server::ContactsMcpServer;
pub use services::{ContactManager, ContactManagerImpl};
