//! MCP server for contact management.
//!
//! This module exposes the ContactManager operations to AI assistants
//! through the Model Context Protocol.

pub mod handlers;

pub use handlers::ContactsMcpServer;

use anyhow::Result;
use rmcp::transport::io::stdio;
use rmcp::ServiceExt;

/// Run the Contacts MCP server with stdio transport.
///
/// Communicates via stdin/stdout and returns when the client disconnects.
pub async fn run_server(server: ContactsMcpServer) -> Result<()> {
    let service = server.serve(stdio()).await?;

    service.waiting().await?;

    Ok(())
}
