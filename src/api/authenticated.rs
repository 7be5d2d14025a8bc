//! Shop-scoped API client with stored credentials.
//!
//! `ShopClient` wraps `ApiClient` together with the shop's Admin API base URL
//! and access token, so callers never pass credentials around. It is the
//! production [`ThemeStore`].

use std::sync::Arc;

use anyhow::{Context, Result};
use async_trait::async_trait;
use url::Url;

use super::client::ApiClient;
use crate::domain::{Asset, CreateAsset, Theme};
use crate::template::ThemeStore;

/// Admin API version used when none is configured.
pub const DEFAULT_API_VERSION: &str = "2024-01";

/// Build `https://<shop>/admin/api/<version>/` from a shop domain or URL.
pub fn admin_base_url(shop: &str, api_version: &str) -> Result<String> {
    let shop = shop.trim().trim_end_matches('/');
    let origin = if shop.starts_with("http://") || shop.starts_with("https://") {
        shop.to_string()
    } else {
        format!("https://{}", shop)
    };

    let url = Url::parse(&origin).with_context(|| format!("Invalid shop domain: {}", shop))?;
    let host = url
        .host_str()
        .with_context(|| format!("Shop URL has no host: {}", shop))?;

    let mut base = format!("{}://{}", url.scheme(), host);
    if let Some(port) = url.port() {
        base.push_str(&format!(":{}", port));
    }
    Ok(format!("{}/admin/api/{}/", base, api_version))
}

/// API client bound to one shop.
///
/// Cloning is cheap; clones share the same connection pool.
#[derive(Clone)]
pub struct ShopClient {
    inner: Arc<ApiClient>,
    base_url: String,
    access_token: String,
}

impl ShopClient {
    /// Create a client for `shop` (e.g. `my-store.myshopify.com`).
    pub fn new(shop: &str, access_token: String, api_version: &str) -> Result<Self> {
        Ok(Self::from_client(
            ApiClient::new(None)?,
            admin_base_url(shop, api_version)?,
            access_token,
        ))
    }

    /// Create from an existing ApiClient (for testing or custom configuration).
    pub fn from_client(client: ApiClient, base_url: String, access_token: String) -> Self {
        Self {
            inner: Arc::new(client),
            base_url,
            access_token,
        }
    }

    #[cfg(test)]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl ThemeStore for ShopClient {
    async fn list_themes(&self) -> Result<Vec<Theme>> {
        self.inner
            .list_themes(&self.base_url, &self.access_token)
            .await
    }

    async fn list_assets(&self, theme_id: &str) -> Result<Vec<Asset>> {
        self.inner
            .list_assets(&self.base_url, &self.access_token, theme_id)
            .await
    }

    async fn create_asset(&self, request: CreateAsset) -> Result<Asset> {
        self.inner
            .create_asset(&self.base_url, &self.access_token, request)
            .await
    }
}

impl std::fmt::Debug for ShopClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ShopClient")
            .field("base_url", &self.base_url)
            .field("access_token", &"[REDACTED]")
            .finish()
    }
}
