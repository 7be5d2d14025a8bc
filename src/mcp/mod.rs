//! MCP (Model Context Protocol) server implementation using rmcp.
//!
//! Exposes template browsing and duplication as MCP tools over stdio.

mod handlers;
mod server;
mod tools;
pub mod types;

pub use handlers::run_mcp_server;
