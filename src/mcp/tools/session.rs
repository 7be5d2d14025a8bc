//! Session info tool implementation.

use rmcp::{model::*, ErrorData as McpError};

use crate::mcp::types::GetSessionInfoArgs;
use crate::session::ShopSessionStore;

use super::common::{tool_error, tool_success};

/// Get current shop session information. The access token is never returned.
pub fn get_session_info(
    cache_dir: Option<String>,
    _args: GetSessionInfoArgs,
) -> Result<CallToolResult, McpError> {
    let session_store = match ShopSessionStore::new(cache_dir) {
        Ok(store) => store,
        Err(e) => return Ok(tool_error(format!("Error accessing session: {}", e))),
    };

    let payload = match session_store.get_session() {
        Ok(Some(session)) => serde_json::json!({
            "loggedIn": true,
            "shop": session.shop,
            "apiVersion": session.api_version,
        }),
        Ok(None) => serde_json::json!({ "loggedIn": false }),
        Err(_) => return Ok(tool_error("Session exists but could not be read")),
    };

    Ok(tool_success(payload))
}
