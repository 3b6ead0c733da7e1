//! Portal MCP Server - Main entry point
//!
//! Wires the portal REST client, repositories and services into an MCP
//! server and serves it over stdio.

use anyhow::Result;
use portal_mcp_server::client::{AsyncPortalClient, AsyncPortalClientImpl};
use portal_mcp_server::repositories::{
    AdminRepository, ApplicationRepository, AuthRepository, NotificationRepository,
    PortalAdminRepository, PortalApplicationRepository, PortalAuthRepository,
    PortalNotificationRepository,
};
use portal_mcp_server::{Config, PortalClient, PortalMcpServer, SessionStore};
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let config = Config::from_env();

    // Logging goes to stderr only; stdout carries the MCP protocol.
    let default_level = config
        .as_ref()
        .map(|cfg| cfg.log_level.clone())
        .unwrap_or_else(|_| "error".to_string());
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let config = match config {
        Ok(cfg) => {
            info!("Configuration loaded successfully");
            cfg
        }
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            return Err(e.into());
        }
    };

    info!(
        "Starting Portal MCP Server with API URL: {}",
        config.portal_api_url
    );

    let session = Arc::new(SessionStore::new(config.session_file.clone()));

    let sync_client = PortalClient::new(&config, session.clone());
    let client = Arc::new(AsyncPortalClientImpl::new(sync_client)) as Arc<dyn AsyncPortalClient>;

    let auth_repo = Arc::new(PortalAuthRepository::new(client.clone())) as Arc<dyn AuthRepository>;
    let application_repo =
        Arc::new(PortalApplicationRepository::new(client.clone())) as Arc<dyn ApplicationRepository>;
    let admin_repo = Arc::new(PortalAdminRepository::new(client.clone())) as Arc<dyn AdminRepository>;
    let notification_repo =
        Arc::new(PortalNotificationRepository::new(client)) as Arc<dyn NotificationRepository>;

    let server = PortalMcpServer::new(
        auth_repo,
        application_repo,
        admin_repo,
        notification_repo,
        session,
        Duration::from_secs(config.toast_ttl_secs),
    );

    match server.restore_session().await {
        Some(user) => info!("Restored session for {} ({})", user.email, user.role),
        None => info!("No active session"),
    }

    info!("Starting MCP server with stdio transport");
    portal_mcp_server::server::run_server(server).await?;

    info!("Portal MCP Server shutdown complete");
    Ok(())
}
