//! Themes endpoint.

use anyhow::Result;
use reqwest::Method;
use tracing::debug;

use super::client::ApiClient;
use super::types::ThemesResponse;
use crate::domain::Theme;

impl ApiClient {
    /// List every theme of the shop.
    pub async fn list_themes(&self, base_url: &str, access_token: &str) -> Result<Vec<Theme>> {
        let response: ThemesResponse = self
            .call_api::<(), _>(Method::GET, base_url, "themes.json", access_token, None)
            .await?;

        debug!("Fetched {} theme(s)", response.themes.len());
        Ok(response.themes.into_iter().map(Theme::from).collect())
    }
}
