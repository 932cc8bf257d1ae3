//! Application service layer.
//!
//! Services contain business logic and orchestrate interactions with the
//! repositories. They provide a clean boundary between the MCP handlers and
//! the data access layer.

mod contact_manager;

pub use contact_manager::{ContactManager, ContactManagerImpl};
