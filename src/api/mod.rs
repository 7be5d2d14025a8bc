//! API client for the store's Admin REST API.
//!
//! This module provides the HTTP transport used to list themes, list theme
//! assets and create copies of assets. `ShopClient` is the entry point for
//! the rest of the application.

mod assets;
mod authenticated;
mod client;
mod http;
mod themes;
mod types;

pub use authenticated::{ShopClient, DEFAULT_API_VERSION};
pub use types::ApiError;
