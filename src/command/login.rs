use anyhow::Result;
use std::io::{self, Write};

use crate::api::ShopClient;
use crate::session::ShopSessionStore;
use crate::template::{KeyGenerator, TemplateService};

pub async fn run_login(
    cache_dir: Option<String>,
    shop: String,
    token: Option<String>,
    api_version: String,
) -> Result<()> {
    let session_store = ShopSessionStore::new(cache_dir)?;

    if let Some(existing) = session_store.get_session()? {
        println!("⚠️  A session for {} already exists.", existing.shop);
        println!("Logging in again will replace it.\n");
    }

    let token = match token {
        Some(token) => token,
        None => {
            print!("Paste the Admin API access token: ");
            io::stdout().flush()?;

            let mut pasted = String::new();
            io::stdin().read_line(&mut pasted)?;
            pasted.trim().to_string()
        }
    };

    // Check the credentials before persisting them.
    let client = ShopClient::new(&shop, token.clone(), &api_version)?;
    let service = TemplateService::new(client, KeyGenerator::unbounded());
    let main_theme = service
        .main_theme()
        .await
        .map_err(|e| anyhow::anyhow!("Could not verify credentials: {}", e.public_message()))?;

    session_store.save_session(&shop, &token, &api_version)?;

    println!("\n✅ Logged in to {}", shop);
    println!("   Main theme: {} ({})", main_theme.name, main_theme.id);

    Ok(())
}
