//! Theme template tools: list themes, list category assets, duplicate an asset.

use rmcp::{model::*, ErrorData as McpError};
use tracing::debug;

use crate::mcp::types::{DuplicateAssetArgs, ListCategoryAssetsArgs, ListThemesArgs};
use crate::template::{Selector, ServiceError, TemplateService, ThemeStore};

use super::common::{not_logged_in, tool_error, tool_success};

fn service_error(err: ServiceError) -> CallToolResult {
    tool_error(err.public_message())
}

/// List the shop's themes, marking the main one.
pub async fn list_themes<S: ThemeStore>(
    service: Option<&TemplateService<S>>,
    _args: ListThemesArgs,
) -> Result<CallToolResult, McpError> {
    let Some(service) = service else {
        return Ok(not_logged_in());
    };

    match service.list_themes().await {
        Ok(themes) => Ok(tool_success(serde_json::json!({ "data": themes }))),
        Err(e) => Ok(service_error(e)),
    }
}

/// List template assets of one category (or all three).
pub async fn list_category_assets<S: ThemeStore>(
    service: Option<&TemplateService<S>>,
    args: ListCategoryAssetsArgs,
) -> Result<CallToolResult, McpError> {
    let Some(service) = service else {
        return Ok(not_logged_in());
    };

    let selector = match Selector::parse_optional(args.category.as_deref()) {
        Ok(selector) => selector,
        Err(e) => return Ok(tool_error(format!("Invalid input: {}", e))),
    };
    debug!("list_category_assets: theme={:?} selector={}", args.theme_id, selector);

    match service
        .list_category_assets(args.theme_id.as_deref(), selector)
        .await
    {
        Ok(assets) => Ok(tool_success(serde_json::json!({ "data": assets }))),
        Err(e) => Ok(service_error(e)),
    }
}

/// Duplicate a template under a freshly generated key.
pub async fn duplicate_asset<S: ThemeStore>(
    service: Option<&TemplateService<S>>,
    args: DuplicateAssetArgs,
) -> Result<CallToolResult, McpError> {
    let Some(service) = service else {
        return Ok(not_logged_in());
    };

    let theme_id = args.theme_id.unwrap_or_default();
    let source_key = args.source_key.unwrap_or_default();

    match service.duplicate_asset(&theme_id, &source_key).await {
        Ok(outcome) => Ok(tool_success(serde_json::json!({
            "status": "success",
            "key": outcome.new_key,
        }))),
        Err(e) => Ok(service_error(e)),
    }
}
