//! Contacts Server - Main entry point
//!
//! Serves the contact manager over the Model Context Protocol on stdio,
//! backed by either a local SQLite database or a remote Contacts API.

use anyhow::Result;
use contacts_server::client::{AsyncContactsClient, AsyncContactsClientImpl};
use contacts_server::repositories::{
    ApiContactRepository, ContactRepository, SqliteContactRepository,
};
use contacts_server::{
    Config, ContactManager, ContactManagerImpl, ContactsApiClient, ContactsMcpServer, Metrics,
    StoreKind,
};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // Configuration comes first so LOG_LEVEL can seed the log filter.
    // Failures here surface through anyhow on stderr.
    let config = Config::from_env()?;

    // Logging goes to stderr only; stdout carries the MCP protocol.
    // RUST_LOG wins over LOG_LEVEL when both are set.
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log_level.as_str()));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    info!("Configuration loaded successfully");

    let metrics = Metrics::new();

    let repository: Arc<dyn ContactRepository> = match config.store {
        StoreKind::Sqlite => {
            info!("Using SQLite store at {}", config.database_path);
            Arc::new(SqliteContactRepository::open(&config.database_path)?)
        }
        StoreKind::Api => {
            info!(
                "Using Contacts API at {}",
                config.api_base_url.as_deref().unwrap_or_default()
            );
            let client = Arc::new(AsyncContactsClientImpl::new(
                ContactsApiClient::new(&config).with_metrics(metrics.clone()),
            ))
                as Arc<dyn AsyncContactsClient>;
            Arc::new(ApiContactRepository::new(client))
        }
    };

    let manager = Arc::new(ContactManagerImpl::with_metrics(repository, metrics.clone()))
        as Arc<dyn ContactManager>;
    let server = ContactsMcpServer::new(manager);

    info!("Starting MCP server with stdio transport");
    contacts_server::server::run_server(server).await?;

    info!("Contacts Server shutdown complete: {}", metrics.summary());
    Ok(())
}
