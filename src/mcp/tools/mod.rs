//! MCP tool implementations.
//!
//! Each tool is implemented in its own module for better organization.

mod common;
mod session;
mod templates;

// Re-export tool functions
pub use session::get_session_info;
pub use templates::{duplicate_asset, list_category_assets, list_themes};
