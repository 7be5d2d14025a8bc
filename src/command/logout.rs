use anyhow::Result;

use crate::session::ShopSessionStore;

pub async fn run_logout(cache_dir: Option<String>) -> Result<()> {
    let session_store = ShopSessionStore::new(cache_dir)?;

    if !session_store.session_path().exists() {
        println!("You are not logged in.");
        return Ok(());
    }

    session_store.remove_session()?;
    println!("✅ Session removed.");

    Ok(())
}
