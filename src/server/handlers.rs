//! MCP tool handlers for the Contacts server.
//!
//! This module implements all the MCP tools using the rmcp SDK's tool_router pattern.
//! Every tool goes through the ContactManager so validation applies uniformly.

use crate::error::ContactError;
use crate::models::Contact;
use crate::services::ContactManager;
use rmcp::handler::server::tool::ToolRouter;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::*;
use rmcp::{tool, tool_handler, tool_router, ErrorData as McpError, ServerHandler};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::sync::Arc;

/// The MCP server that exposes contact management tools.
#[derive(Clone)]
pub struct ContactsMcpServer {
    manager: Arc<dyn ContactManager>,
    tool_router: ToolRouter<Self>,
}

// Implement ServerHandler using the tool_handler macro
#[tool_handler]
impl ServerHandler for ContactsMcpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities: ServerCapabilities {
                tools: Some(Default::default()),
                ..Default::default()
            },
            server_info: Implementation {
                name: "contacts-server".into(),
                version: env!("CARGO_PKG_VERSION").into(),
                icons: None,
                title: None,
                website_url: None,
            },
            instructions: Some("MCP server for contact management - list, search, save and delete contacts along with their phones and addresses.".into()),
        }
    }
}

// Helper structs for tool parameters
#[derive(Debug, Deserialize, JsonSchema)]
struct ContactIdParams {
    contact_id: i64,
}

#[derive(Debug, Deserialize, JsonSchema)]
struct SearchContactsParams {
    #[serde(default)]
    first_name: Option<String>,
    #[serde(default)]
    last_name: Option<String>,
}

#[derive(Debug, Deserialize, JsonSchema)]
struct SaveContactParams {
    /// The contact to save. A contactId of 0 creates a new contact.
    #[serde(default)]
    contact: Option<Contact>,
}

#[derive(Debug, Deserialize, JsonSchema)]
struct ContactPhoneParams {
    contact_id: i64,
    phone_id: i64,
}

#[derive(Debug, Deserialize, JsonSchema)]
struct ContactAddressParams {
    contact_id: i64,
    address_id: i64,
}

/// Structured payload attached to INVALID_PARAMS errors.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ValidationErrorData<'a> {
    param: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    actual_value: Option<String>,
}

// Helper function to convert errors to MCP errors
fn to_mcp_error(e: impl std::fmt::Display) -> McpError {
    McpError {
        code: ErrorCode::INTERNAL_ERROR,
        message: Cow::from(e.to_string()),
        data: None,
    }
}

fn contact_error_to_mcp(e: ContactError) -> McpError {
    match e.as_validation() {
        Some(validation) => {
            let data = ValidationErrorData {
                param: validation.param(),
                actual_value: validation.actual_value().map(|v| v.to_rfc3339()),
            };
            McpError {
                code: ErrorCode::INVALID_PARAMS,
                message: Cow::from(validation.message().to_string()),
                data: serde_json::to_value(&data).ok(),
            }
        }
        None => {
            tracing::error!("Tool call failed: {:?}", e);
            McpError {
                code: ErrorCode::INTERNAL_ERROR,
                message: Cow::from(e.to_string()),
                data: Some(serde_json::json!({ "status": e.status_code() })),
            }
        }
    }
}

fn not_found(what: &str) -> McpError {
    McpError {
        code: ErrorCode::RESOURCE_NOT_FOUND,
        message: Cow::from(format!("{} not found", what)),
        data: None,
    }
}

fn json_result<T: Serialize>(value: &T) -> Result<CallToolResult, McpError> {
    let json_response = serde_json::to_string_pretty(value).map_err(to_mcp_error)?;
    Ok(CallToolResult::success(vec![Content::text(json_response)]))
}

// Tool router implementation
#[tool_router]
impl ContactsMcpServer {
    /// Create a new Contacts MCP server over a contact manager.
    pub fn new(manager: Arc<dyn ContactManager>) -> Self {
        Self {
            manager,
            tool_router: Self::tool_router(),
        }
    }

    /// List every contact.
    #[tool(description = "List every contact with its phones and addresses")]
    async fn list_contacts(&self) -> Result<CallToolResult, McpError> {
        let contacts = self
            .manager
            .get_contacts()
            .await
            .map_err(contact_error_to_mcp)?;

        json_result(&contacts)
    }

    /// Retrieve a contact by ID.
    #[tool(description = "Retrieve complete information for a specific contact by ID")]
    async fn get_contact(
        &self,
        params: Parameters<ContactIdParams>,
    ) -> Result<CallToolResult, McpError> {
        let params = params.0;

        let contact = self
            .manager
            .get_contact(params.contact_id)
            .await
            .map_err(contact_error_to_mcp)?
            .ok_or_else(|| not_found(&format!("Contact {}", params.contact_id)))?;

        json_result(&contact)
    }

    /// Find contacts by exact first and last name.
    #[tool(
        description = "Find contacts whose first and last name both match exactly. Both names are required."
    )]
    async fn search_contacts(
        &self,
        params: Parameters<SearchContactsParams>,
    ) -> Result<CallToolResult, McpError> {
        let params = params.0;

        let contacts = self
            .manager
            .get_contacts_by_name(params.first_name.as_deref(), params.last_name.as_deref())
            .await
            .map_err(contact_error_to_mcp)?;

        json_result(&contacts)
    }

    /// Create or update a contact.
    #[tool(
        description = "Create a contact (contactId 0) or update an existing one. First name, last name and email address are required; birthday and anniversary can not be in the future and the anniversary can not precede the birthday."
    )]
    async fn save_contact(
        &self,
        params: Parameters<SaveContactParams>,
    ) -> Result<CallToolResult, McpError> {
        let params = params.0;

        tracing::info!("MCP Handler: save_contact called");

        let saved = self
            .manager
            .save_contact(params.contact)
            .await
            .map_err(contact_error_to_mcp)?
            .ok_or_else(|| McpError {
                code: ErrorCode::INTERNAL_ERROR,
                message: Cow::from("Failed to save the contact"),
                data: Some(serde_json::json!({ "status": 500 })),
            })?;

        json_result(&saved)
    }

    /// Delete a contact with its phones and addresses.
    #[tool(description = "Delete a contact together with its phones and addresses")]
    async fn delete_contact(
        &self,
        params: Parameters<ContactIdParams>,
    ) -> Result<CallToolResult, McpError> {
        let params = params.0;

        let deleted = self
            .manager
            .delete_contact(params.contact_id)
            .await
            .map_err(contact_error_to_mcp)?;

        if !deleted {
            return Err(not_found(&format!("Contact {}", params.contact_id)));
        }

        json_result(&serde_json::json!({
            "contactId": params.contact_id,
            "deleted": true,
        }))
    }

    /// List the phones of a contact.
    #[tool(description = "List the phone numbers of a contact")]
    async fn list_contact_phones(
        &self,
        params: Parameters<ContactIdParams>,
    ) -> Result<CallToolResult, McpError> {
        let phones = self
            .manager
            .get_contact_phones(params.0.contact_id)
            .await
            .map_err(contact_error_to_mcp)?;

        json_result(&phones)
    }

    /// Get one phone of a contact.
    #[tool(description = "Get a single phone number of a contact")]
    async fn get_contact_phone(
        &self,
        params: Parameters<ContactPhoneParams>,
    ) -> Result<CallToolResult, McpError> {
        let params = params.0;

        let phone = self
            .manager
            .get_contact_phone(params.contact_id, params.phone_id)
            .await
            .map_err(contact_error_to_mcp)?
            .ok_or_else(|| {
                not_found(&format!(
                    "Phone {} of contact {}",
                    params.phone_id, params.contact_id
                ))
            })?;

        json_result(&phone)
    }

    /// List the addresses of a contact.
    #[tool(description = "List the addresses of a contact")]
    async fn list_contact_addresses(
        &self,
        params: Parameters<ContactIdParams>,
    ) -> Result<CallToolResult, McpError> {
        let addresses = self
            .manager
            .get_contact_addresses(params.0.contact_id)
            .await
            .map_err(contact_error_to_mcp)?;

        json_result(&addresses)
    }

    /// Get one address of a contact.
    #[tool(description = "Get a single address of a contact")]
    async fn get_contact_address(
        &self,
        params: Parameters<ContactAddressParams>,
    ) -> Result<CallToolResult, McpError> {
        let params = params.0;

        let address = self
            .manager
            .get_contact_address(params.contact_id, params.address_id)
            .await
            .map_err(contact_error_to_mcp)?
            .ok_or_else(|| {
                not_found(&format!(
                    "Address {} of contact {}",
                    params.address_id, params.contact_id
                ))
            })?;

        json_result(&address)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::{ContactRepository, SqliteContactRepository};
    use crate::services::ContactManagerImpl;
    use chrono::{TimeZone, Utc};

    fn server() -> ContactsMcpServer {
        let repo = SqliteContactRepository::open_in_memory().unwrap();
        let manager = ContactManagerImpl::new(Arc::new(repo) as Arc<dyn ContactRepository>);
        ContactsMcpServer::new(Arc::new(manager))
    }

    fn text_of(result: &CallToolResult) -> String {
        result.content[0].as_text().unwrap().text.clone()
    }

    #[test]
    fn test_server_info() {
        let info = server().get_info();
        assert_eq!(info.server_info.name, "contacts-server");
        assert!(info.capabilities.tools.is_some());
    }

    #[test]
    fn test_validation_error_maps_to_invalid_params() {
        let when = Utc.with_ymd_and_hms(2030, 1, 1, 0, 0, 0).unwrap();
        let error = ContactError::from(crate::domain::ValidationError::out_of_range(
            "Birthday",
            when,
            "The birthday can not be in the future",
        ));

        let mcp = contact_error_to_mcp(error);
        assert_eq!(mcp.code, ErrorCode::INVALID_PARAMS);
        assert_eq!(mcp.message, "The birthday can not be in the future");
        let data = mcp.data.unwrap();
        assert_eq!(data["param"], "Birthday");
        assert_eq!(data["actualValue"], "2030-01-01T00:00:00+00:00");
    }

    #[test]
    fn test_other_errors_map_to_internal_error() {
        let mcp = contact_error_to_mcp(ContactError::ApiError {
            status: 502,
            message: "bad gateway".to_string(),
        });
        assert_eq!(mcp.code, ErrorCode::INTERNAL_ERROR);
        assert_eq!(mcp.data.unwrap()["status"], 502);
    }

    #[tokio::test]
    async fn test_save_then_get_through_tools() {
        let server = server();
        let contact = Contact::new("Joseph", "Guadagno", "jguadagno@example.com");

        let result = server
            .save_contact(Parameters(SaveContactParams {
                contact: Some(contact),
            }))
            .await
            .unwrap();
        let saved: Contact = serde_json::from_str(&text_of(&result)).unwrap();
        assert_ne!(saved.contact_id, 0);

        let result = server
            .get_contact(Parameters(ContactIdParams {
                contact_id: saved.contact_id,
            }))
            .await
            .unwrap();
        let loaded: Contact = serde_json::from_str(&text_of(&result)).unwrap();
        assert_eq!(loaded.email_address.as_deref(), Some("jguadagno@example.com"));
    }

    #[tokio::test]
    async fn test_save_without_contact_is_invalid_params() {
        let err = server()
            .save_contact(Parameters(SaveContactParams { contact: None }))
            .await
            .unwrap_err();

        assert_eq!(err.code, ErrorCode::INVALID_PARAMS);
        assert_eq!(err.data.unwrap()["param"], "contact");
    }

    #[tokio::test]
    async fn test_search_requires_first_name() {
        let err = server()
            .search_contacts(Parameters(SearchContactsParams {
                first_name: None,
                last_name: Some("Guadagno".to_string()),
            }))
            .await
            .unwrap_err();

        assert_eq!(err.code, ErrorCode::INVALID_PARAMS);
        assert_eq!(err.message, "FirstName is a required field");
    }

    #[tokio::test]
    async fn test_missing_contact_is_resource_not_found() {
        let err = server()
            .get_contact(Parameters(ContactIdParams { contact_id: 42 }))
            .await
            .unwrap_err();

        assert_eq!(err.code, ErrorCode::RESOURCE_NOT_FOUND);
    }

    #[tokio::test]
    async fn test_delete_missing_contact_is_resource_not_found() {
        let err = server()
            .delete_contact(Parameters(ContactIdParams { contact_id: 42 }))
            .await
            .unwrap_err();

        assert_eq!(err.code, ErrorCode::RESOURCE_NOT_FOUND);
    }

    #[tokio::test]
    async fn test_save_that_writes_nothing_is_a_failed_save() {
        let mut contact = Contact::new("Joseph", "Guadagno", "j@x.com");
        contact.contact_id = 404;

        let err = server()
            .save_contact(Parameters(SaveContactParams {
                contact: Some(contact),
            }))
            .await
            .unwrap_err();

        assert_eq!(err.code, ErrorCode::INTERNAL_ERROR);
        assert_eq!(err.message, "Failed to save the contact");
    }
}
