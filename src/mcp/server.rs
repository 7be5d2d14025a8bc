//! MCP server implementation.
//!
//! This module contains the ThemedupMcpServer struct and its tool routing.

use std::sync::Arc;

use rmcp::{
    handler::server::router::tool::ToolRouter, handler::server::wrapper::Parameters, model::*,
    tool, tool_handler, tool_router, ErrorData as McpError, ServerHandler,
};

use crate::api::ShopClient;
use crate::template::TemplateService;

use super::tools;
use super::types::*;

/// Template service shared by all tool calls
pub type SharedTemplateService = Arc<TemplateService<ShopClient>>;

/// Themedup MCP Server
#[derive(Clone)]
pub struct ThemedupMcpServer {
    /// `None` when no shop session is configured; tools then report an error.
    service: Option<SharedTemplateService>,
    cache_dir: Option<String>,
    tool_router: ToolRouter<Self>,
}

#[tool_router]
impl ThemedupMcpServer {
    /// Create a new Themedup MCP server
    ///
    /// # Arguments
    /// * `service` - Template service bound to the configured shop
    /// * `cache_dir` - Session directory, for reporting session info
    pub fn new(service: Option<SharedTemplateService>, cache_dir: Option<String>) -> Self {
        Self {
            service,
            cache_dir,
            tool_router: Self::tool_router(),
        }
    }

    /// Get current shop session information
    #[tool(
        name = "get_session_info",
        description = "Get the shop and API version of the configured session"
    )]
    fn get_session_info(
        &self,
        Parameters(args): Parameters<GetSessionInfoArgs>,
    ) -> Result<CallToolResult, McpError> {
        tools::get_session_info(self.cache_dir.clone(), args)
    }

    /// List the shop's themes
    #[tool(
        name = "list_themes",
        description = "List the themes of the shop. Exactly one theme has role 'main' (the published theme)."
    )]
    async fn list_themes(
        &self,
        Parameters(args): Parameters<ListThemesArgs>,
    ) -> Result<CallToolResult, McpError> {
        tools::list_themes(self.service.as_deref(), args).await
    }

    /// List template assets by category
    #[tool(
        name = "list_category_assets",
        description = "List template assets of a theme for one category: home (templates/index*), collection (templates/collection*), product (templates/product*), or all three. Defaults to the main theme and all categories."
    )]
    async fn list_category_assets(
        &self,
        Parameters(args): Parameters<ListCategoryAssetsArgs>,
    ) -> Result<CallToolResult, McpError> {
        tools::list_category_assets(self.service.as_deref(), args).await
    }

    /// Duplicate a template asset
    #[tool(
        name = "duplicate_asset",
        description = "Duplicate a template asset within its theme. The copy is named templates/<category>.<10 random alphanumerics>.liquid and never reuses a key that already exists in that category."
    )]
    async fn duplicate_asset(
        &self,
        Parameters(args): Parameters<DuplicateAssetArgs>,
    ) -> Result<CallToolResult, McpError> {
        tools::duplicate_asset(self.service.as_deref(), args).await
    }
}

#[tool_handler]
impl ServerHandler for ThemedupMcpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "themedup".to_string(),
                title: None,
                version: env!("CARGO_PKG_VERSION").to_string(),
                icons: None,
                website_url: None,
            },
            instructions: Some(
                "Themedup MCP Server lists theme templates by category and duplicates them under fresh keys."
                    .to_string(),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mcp_server_without_session() {
        let server = ThemedupMcpServer::new(None, Some("/tmp/themedup".to_string()));
        assert!(server.service.is_none());
        assert_eq!(server.cache_dir.as_deref(), Some("/tmp/themedup"));
    }

    #[test]
    fn test_server_info() {
        let info = ThemedupMcpServer::new(None, None).get_info();
        assert_eq!(info.server_info.name, "themedup");
    }
}
