use anyhow::Result;

use crate::api::ShopClient;
use crate::domain::Asset;
use crate::template::{Selector, TemplateService};

use super::context::report;

fn heading(selector: Selector) -> &'static str {
    match selector {
        Selector::All => "Template Pages",
        Selector::Only(category) => category.label(),
    }
}

fn print_asset(asset: &Asset) {
    println!("  Asset Key: {}", asset.key().unwrap_or_default());
    println!("  Theme ID: {}", asset.theme_id);
    if let Some(updated_at) = asset.updated_at {
        println!("  Updated At: {}", updated_at.to_rfc3339());
    }
    println!();
}

pub async fn run_list(
    service: &TemplateService<ShopClient>,
    theme_id: Option<String>,
    selector: Selector,
    json: bool,
) -> Result<()> {
    let assets = service
        .list_category_assets(theme_id.as_deref(), selector)
        .await
        .map_err(report)?;

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&serde_json::json!({ "data": assets }))?
        );
        return Ok(());
    }

    println!("{} ({})\n", heading(selector), assets.len());
    for asset in &assets {
        print_asset(asset);
    }

    Ok(())
}
