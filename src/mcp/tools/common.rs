//! Common utilities for MCP tools.
//!
//! Tools answer with one of two payload shapes: a JSON success payload, or
//! an error result carrying `{"error": "<message>"}`.

use rmcp::model::{CallToolResult, Content};
use serde_json::Value;

/// Success result carrying a JSON payload
pub fn tool_success(payload: Value) -> CallToolResult {
    CallToolResult::success(vec![Content::text(payload.to_string())])
}

/// Error result for tool failures
pub fn tool_error(message: impl Into<String>) -> CallToolResult {
    let payload = serde_json::json!({ "error": message.into() });
    CallToolResult::error(vec![Content::text(payload.to_string())])
}

/// Error result returned by tools that need a shop session when none is configured.
pub fn not_logged_in() -> CallToolResult {
    tool_error("Not logged in. Please run 'themedup login' first.")
}
