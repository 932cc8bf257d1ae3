//! Domain rules and their errors.
//!
//! Validation is kept free of any storage or transport concerns so that the
//! same rules apply whichever repository backs the [`ContactManager`].
//!
//! [`ContactManager`]: crate::services::ContactManager

pub mod errors;
pub mod validation;

pub use errors::ValidationError;
pub use validation::{validate_contact, validate_delete, validate_name_search};
