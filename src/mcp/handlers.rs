//! MCP server handlers.
//!
//! This module contains only the MCP server startup logic.
//! Session resolution happens in main.rs.

use anyhow::Result;
use tracing::{error, info, warn};

use super::server::{SharedTemplateService, ThemedupMcpServer};

/// Run the MCP server over stdio.
///
/// # Arguments
/// * `service` - Template service bound to the configured shop (None for degraded startup)
/// * `cache_dir` - Session directory the service was built from
pub async fn run_mcp_server(
    service: Option<SharedTemplateService>,
    cache_dir: Option<String>,
) -> Result<()> {
    info!("🔧 Starting Themedup MCP Tool Server...");
    info!("📝 Stdio mode (using rmcp)");

    if service.is_none() {
        warn!("No shop session configured; template tools will report an error");
    }

    run_server(ThemedupMcpServer::new(service, cache_dir)).await
}

/// Run the MCP server with the given server instance.
async fn run_server(server: ThemedupMcpServer) -> Result<()> {
    use rmcp::{transport::stdio, ServiceExt};

    info!("✅ MCP tool server started");
    info!("🔗 Ready for MCP client connections");

    let service = server.serve(stdio()).await.map_err(|e| {
        error!("Failed to start MCP service: {:?}", e);
        anyhow::anyhow!("Failed to start MCP service: {:?}", e)
    })?;

    service.waiting().await.map_err(|e| {
        error!("MCP service error: {:?}", e);
        anyhow::anyhow!("MCP service error: {:?}", e)
    })?;

    info!("MCP server shutting down");
    Ok(())
}
