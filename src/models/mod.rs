//! Data models for contacts and the records they own.
//!
//! One shape per entity serves storage, the API client and the MCP surface
//! alike. Children refer to their owner by `contact_id` rather than holding a
//! back-reference.

pub mod address;
pub mod contact;
pub mod phone;

pub use address::{Address, AddressType};
pub use contact::Contact;
pub use phone::{Phone, PhoneType};
