use anyhow::Result;

use crate::api::ShopClient;
use crate::template::TemplateService;

use super::context::report;

pub async fn run_themes(service: &TemplateService<ShopClient>, json: bool) -> Result<()> {
    let themes = service.list_themes().await.map_err(report)?;

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&serde_json::json!({ "data": themes }))?
        );
        return Ok(());
    }

    for theme in &themes {
        let marker = if theme.is_main() { "*" } else { " " };
        println!(
            "{} {:>14}  {:<12} {}",
            marker,
            theme.id,
            theme.role.as_str(),
            theme.name
        );
    }

    Ok(())
}
