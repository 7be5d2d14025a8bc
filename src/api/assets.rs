//! Theme assets endpoint: listing and copy-on-create.

use anyhow::Result;
use reqwest::Method;
use tracing::debug;

use super::client::ApiClient;
use super::types::{AssetCopy, AssetCopyRequest, AssetResponse, AssetsResponse};
use crate::domain::{Asset, CreateAsset};

fn assets_endpoint(theme_id: &str) -> String {
    format!("themes/{}/assets.json", theme_id)
}

impl ApiClient {
    /// List the assets of a theme. Only metadata is returned, not content.
    pub async fn list_assets(
        &self,
        base_url: &str,
        access_token: &str,
        theme_id: &str,
    ) -> Result<Vec<Asset>> {
        let response: AssetsResponse = self
            .call_api::<(), _>(
                Method::GET,
                base_url,
                &assets_endpoint(theme_id),
                access_token,
                None,
            )
            .await?;

        debug!(
            "Fetched {} asset(s) for theme {}",
            response.assets.len(),
            theme_id
        );
        Ok(response
            .assets
            .into_iter()
            .map(|record| record.into_asset(theme_id))
            .collect())
    }

    /// Create `request.key` by copying `request.source_key` within the same theme.
    pub async fn create_asset(
        &self,
        base_url: &str,
        access_token: &str,
        request: CreateAsset,
    ) -> Result<Asset> {
        let endpoint = assets_endpoint(&request.theme_id);
        let body = AssetCopyRequest {
            asset: AssetCopy {
                key: request.key,
                source_key: request.source_key,
            },
        };

        debug!(
            "Copying {} to {} in theme {}",
            body.asset.source_key, body.asset.key, request.theme_id
        );
        let response: AssetResponse = self
            .call_api(Method::PUT, base_url, &endpoint, access_token, Some(&body))
            .await?;

        Ok(response.asset.into_asset(&request.theme_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_assets_endpoint() {
        assert_eq!(assets_endpoint("828155753"), "themes/828155753/assets.json");
    }
}
