use anyhow::{Context, Result};
use reqwest::{Client, Method};
use serde::{de::DeserializeOwned, Serialize};
use std::time::Duration;
use tracing::{debug, error};
use url::Url;
use uuid::Uuid;

use super::http::{send_with_retry, RetryPolicy};
use super::types::ApiError;

/// Default request timeout in seconds
pub(super) const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Default CLI version (from Cargo.toml)
const DEFAULT_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Header carrying the Admin API access token
const ACCESS_TOKEN_HEADER: &str = "X-Shopify-Access-Token";

/// Build the User-Agent string
fn build_user_agent() -> String {
    std::env::var("THEMEDUP_USER_AGENT")
        .unwrap_or_else(|_| format!("themedup/{}", DEFAULT_VERSION))
}

/// HTTP client for the store's Admin REST API
pub struct ApiClient {
    pub(super) client: Client,
    pub(super) user_agent: String,
    pub(super) retry: RetryPolicy,
}

impl ApiClient {
    /// Create a new API client
    pub fn new(user_agent: Option<String>) -> Result<Self> {
        let user_agent = user_agent.unwrap_or_else(build_user_agent);

        let client = Client::builder()
            .timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            user_agent,
            retry: RetryPolicy::default(),
        })
    }

    /// Replace the retry schedule.
    #[cfg(test)]
    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    pub(super) fn build_url(base_url: &str, endpoint: &str) -> Result<Url> {
        let base =
            Url::parse(base_url).with_context(|| format!("Invalid base URL: {}", base_url))?;
        base.join(endpoint)
            .with_context(|| format!("Failed to build URL for endpoint: {}", endpoint))
    }

    /// Send a JSON request and decode the JSON response.
    ///
    /// Non-success responses become an [`ApiError`] inside the returned error.
    pub(super) async fn call_api<T, R>(
        &self,
        method: Method,
        base_url: &str,
        endpoint: &str,
        access_token: &str,
        body: Option<&T>,
    ) -> Result<R>
    where
        T: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let url = Self::build_url(base_url, endpoint)?;
        let request_id = Uuid::new_v4().to_string();

        debug!("=== API Request ===");
        debug!("{} {}", method, url);
        debug!("Request ID: {}", request_id);

        let response = send_with_retry(self.retry, || {
            let request = self
                .client
                .request(method.clone(), url.clone())
                .header("Accept", "application/json")
                .header("User-Agent", &self.user_agent)
                .header("x-request-id", &request_id)
                .header(ACCESS_TOKEN_HEADER, access_token);

            match body {
                Some(body) => request.json(body),
                None => request,
            }
        })
        .await
        .with_context(|| format!("Failed to send request to {}", url))?;

        let status = response.status();
        debug!("=== API Response ===");
        debug!("Status: {}", status);

        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            let api_error =
                ApiError::from_http_response(status.as_u16(), &error_text, Some(request_id));

            if api_error.requires_relogin {
                error!("❌ {}", api_error.message);
                error!("   {}", api_error.user_hint());
            } else if api_error.is_fatal() {
                error!("❌ {}", api_error.message);
            } else {
                error!("API request failed: {}", api_error.message);
            }
            if let Some(id) = &api_error.request_id {
                debug!("Failed request ID: {} (HTTP {})", id, api_error.http_status);
            }

            anyhow::bail!(api_error);
        }

        let response_text = response
            .text()
            .await
            .context("Failed to read response body")?;
        serde_json::from_str(&response_text).context("Failed to parse API response")
    }
}
