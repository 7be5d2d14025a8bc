use anyhow::Result;

use crate::session::{SessionSource, ShopSessionStore};

pub async fn run_status(cache_dir: Option<String>) -> Result<()> {
    let session_store = ShopSessionStore::new(cache_dir)?;

    match session_store.resolve()? {
        Some((session, source)) => {
            let origin = match source {
                SessionSource::SessionEnv => "THEMEDUP_SESSION environment variable",
                SessionSource::TokenEnv => "SHOPIFY_SHOP / SHOPIFY_ACCESS_TOKEN environment variables",
                SessionSource::File => "session file",
            };
            println!("✅ Logged in");
            println!("   Shop: {}", session.shop);
            println!("   API version: {}", session.api_version);
            println!("   Source: {}", origin);
        }
        None => {
            println!("❌ Not logged in");
            println!("   Run 'themedup login --shop <domain>' to store credentials.");
        }
    }

    Ok(())
}
