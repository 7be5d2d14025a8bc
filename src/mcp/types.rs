//! MCP tool parameter types.
//!
//! These types are used with rmcp's `Parameters<T>` wrapper for automatic
//! deserialization and JSON schema generation.

use schemars::JsonSchema;
use serde::Deserialize;

/// Parameters for the get_session_info tool (no arguments needed)
#[derive(Debug, Deserialize, JsonSchema)]
pub struct GetSessionInfoArgs {}

/// Parameters for the list_themes tool (no arguments needed)
#[derive(Debug, Deserialize, JsonSchema)]
pub struct ListThemesArgs {}

/// Parameters for the list_category_assets tool
#[derive(Debug, Default, Deserialize, JsonSchema)]
pub struct ListCategoryAssetsArgs {
    /// Theme to list. Defaults to the published (main) theme.
    #[serde(default)]
    pub theme_id: Option<String>,
    /// One of home, collection, product or all. Defaults to all.
    #[serde(default)]
    pub category: Option<String>,
}

/// Parameters for the duplicate_asset tool
#[derive(Debug, Default, Deserialize, JsonSchema)]
pub struct DuplicateAssetArgs {
    /// Theme containing the template to duplicate
    #[serde(default)]
    pub theme_id: Option<String>,
    /// Key of the template to duplicate, e.g. templates/product.liquid
    #[serde(default)]
    pub source_key: Option<String>,
}
