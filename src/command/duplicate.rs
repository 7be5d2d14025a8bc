use anyhow::Result;

use crate::api::ShopClient;
use crate::template::{derive_variant, TemplateService};

use super::context::report;

pub async fn run_duplicate(
    service: &TemplateService<ShopClient>,
    source_key: String,
    theme_id: Option<String>,
    json: bool,
) -> Result<()> {
    let theme_id = service
        .duplicate_target(theme_id.as_deref(), &source_key)
        .await
        .map_err(report)?;

    if !json {
        println!(
            "Duplicating {} ({} template) in theme {}...",
            source_key,
            derive_variant(&source_key).token(),
            theme_id
        );
    }

    let outcome = service
        .duplicate_asset(&theme_id, &source_key)
        .await
        .map_err(report)?;

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&serde_json::json!({
                "status": "success",
                "key": outcome.new_key,
            }))?
        );
    } else {
        println!("✅ Created {}", outcome.new_key);
    }

    Ok(())
}
