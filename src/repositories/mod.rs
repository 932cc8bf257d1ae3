//! Storage behind the contact manager.
//!
//! [`ContactRepository`] is the persistence contract; the SQLite and remote
//! API implementations are interchangeable behind it.

mod api_contact_repository;
pub mod schema;
mod sqlite_contact_repository;
mod traits;

pub use api_contact_repository::ApiContactRepository;
pub use sqlite_contact_repository::SqliteContactRepository;
pub use traits::ContactRepository;
