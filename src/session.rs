//! Credential storage for the Admin API.
//!
//! Session establishment (installing an app, OAuth) happens elsewhere; this
//! module only persists and resolves the shop domain and access token that
//! the commands and the MCP server use.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::{debug, error, info, warn};

use crate::api::DEFAULT_API_VERSION;

/// Environment variable holding a full session as JSON
pub const SESSION_ENV: &str = "THEMEDUP_SESSION";
/// Environment variables holding shop domain and access token separately
pub const SHOP_ENV: &str = "SHOPIFY_SHOP";
pub const ACCESS_TOKEN_ENV: &str = "SHOPIFY_ACCESS_TOKEN";
pub const API_VERSION_ENV: &str = "SHOPIFY_API_VERSION";

fn default_api_version() -> String {
    std::env::var(API_VERSION_ENV).unwrap_or_else(|_| DEFAULT_API_VERSION.to_string())
}

/// Session data structure stored in session.json
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionData {
    pub shop: String,
    pub access_token: String,
    #[serde(default = "default_api_version")]
    pub api_version: String,
}

impl SessionData {
    fn is_valid(&self) -> bool {
        !self.shop.trim().is_empty()
            && !self.access_token.trim().is_empty()
            && !self.api_version.trim().is_empty()
    }
}

/// Where the active session was resolved from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionSource {
    SessionEnv,
    TokenEnv,
    File,
}

/// Shop session store
///
/// Manages session persistence in ~/.themedup/session.json (or a custom cache directory).
pub struct ShopSessionStore {
    session_path: PathBuf,
}

impl ShopSessionStore {
    /// Create a new session store
    ///
    /// # Arguments
    /// * `cache_dir` - Optional custom cache directory. Defaults to ~/.themedup
    pub fn new(cache_dir: Option<String>) -> Result<Self> {
        let base_dir = match cache_dir {
            Some(dir) => PathBuf::from(dir),
            None => dirs::home_dir()
                .context("Could not determine home directory")?
                .join(".themedup"),
        };

        std::fs::create_dir_all(&base_dir)
            .with_context(|| format!("Failed to create cache directory: {:?}", base_dir))?;

        Ok(Self {
            session_path: base_dir.join("session.json"),
        })
    }

    pub fn session_path(&self) -> &PathBuf {
        &self.session_path
    }

    /// Parse session data from JSON string
    fn parse_session_from_string(raw: &str) -> Option<SessionData> {
        match serde_json::from_str::<SessionData>(raw) {
            Ok(session) if session.is_valid() => Some(session),
            Ok(_) => {
                warn!("Session validation failed: missing or invalid required fields");
                None
            }
            Err(e) => {
                warn!("Failed to parse session JSON: {}", e);
                None
            }
        }
    }

    /// Get the current session
    ///
    /// Priority:
    /// 1. THEMEDUP_SESSION environment variable (JSON format)
    /// 2. SHOPIFY_SHOP + SHOPIFY_ACCESS_TOKEN environment variables
    /// 3. session.json file
    pub fn get_session(&self) -> Result<Option<SessionData>> {
        Ok(self.resolve()?.map(|(session, _)| session))
    }

    /// Like [`get_session`](Self::get_session), also reporting where the session came from.
    pub fn resolve(&self) -> Result<Option<(SessionData, SessionSource)>> {
        if let Ok(env_auth) = std::env::var(SESSION_ENV) {
            if let Some(session) = Self::parse_session_from_string(&env_auth) {
                debug!("Using session from {}", SESSION_ENV);
                return Ok(Some((session, SessionSource::SessionEnv)));
            }
        }

        if let (Ok(shop), Ok(token)) = (std::env::var(SHOP_ENV), std::env::var(ACCESS_TOKEN_ENV)) {
            let session = SessionData {
                shop,
                access_token: token,
                api_version: default_api_version(),
            };
            if session.is_valid() {
                debug!("Using session from {} + {}", SHOP_ENV, ACCESS_TOKEN_ENV);
                return Ok(Some((session, SessionSource::TokenEnv)));
            }
        }

        if !self.session_path.exists() {
            return Ok(None);
        }

        let content = match std::fs::read_to_string(&self.session_path) {
            Ok(content) => content,
            Err(e) => {
                error!("Failed to read session file: {}", e);
                return Err(e).with_context(|| {
                    format!("Failed to read session file: {:?}", self.session_path)
                });
            }
        };

        if let Some(session) = Self::parse_session_from_string(&content) {
            return Ok(Some((session, SessionSource::File)));
        }

        warn!("Invalid session data found, removing session file");
        let _ = self.remove_session();
        Ok(None)
    }

    /// Save a new session
    pub fn save_session(&self, shop: &str, access_token: &str, api_version: &str) -> Result<()> {
        let session = SessionData {
            shop: shop.trim().to_string(),
            access_token: access_token.trim().to_string(),
            api_version: api_version.trim().to_string(),
        };
        if !session.is_valid() {
            anyhow::bail!("Shop, access token and API version must not be empty");
        }

        let content =
            serde_json::to_string_pretty(&session).context("Failed to serialize session data")?;

        std::fs::write(&self.session_path, content)
            .with_context(|| format!("Failed to write session file: {:?}", self.session_path))?;

        info!("Session saved successfully");
        debug!("Session saved to {:?}", self.session_path);

        Ok(())
    }

    /// Remove the current session
    pub fn remove_session(&self) -> Result<()> {
        if self.session_path.exists() {
            std::fs::remove_file(&self.session_path).with_context(|| {
                format!("Failed to remove session file: {:?}", self.session_path)
            })?;
        }

        info!("Session removed successfully");

        Ok(())
    }
}
