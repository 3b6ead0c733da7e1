//! MCP server for the customer portal.
//!
//! Exposes the portal's account, application and admin flows to AI
//! assistants through the Model Context Protocol.

pub mod handlers;

pub use handlers::PortalMcpServer;

use anyhow::Result;
use rmcp::transport::io::stdio;
use rmcp::ServiceExt;

/// Run the portal MCP server over stdio until the client disconnects.
///
/// stdout carries the MCP protocol, so nothing else may write to it.
pub async fn run_server(server: PortalMcpServer) -> Result<()> {
    let service = server.serve(stdio()).await?;

    service.waiting().await?;

    Ok(())
}
