//! Request and response types for the Admin REST API.
//!
//! Wire records mirror the JSON the store sends; they are converted into the
//! domain types before leaving the `api` module.

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

use crate::domain::{Asset, Theme};

// ============================================================================
// Themes
// ============================================================================

#[derive(Debug, Deserialize)]
pub(super) struct ThemeRecord {
    pub id: u64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub role: String,
}

impl From<ThemeRecord> for Theme {
    fn from(record: ThemeRecord) -> Self {
        Theme {
            id: record.id.to_string(),
            name: record.name,
            role: record.role.into(),
        }
    }
}

/// `GET themes.json`
#[derive(Debug, Deserialize)]
pub(super) struct ThemesResponse {
    pub themes: Vec<ThemeRecord>,
}

// ============================================================================
// Assets
// ============================================================================

#[derive(Debug, Deserialize)]
pub(super) struct AssetRecord {
    #[serde(default)]
    pub key: Option<String>,
    #[serde(default)]
    pub theme_id: Option<u64>,
    #[serde(default)]
    pub updated_at: Option<DateTime<FixedOffset>>,
    #[serde(default)]
    pub content_type: Option<String>,
    #[serde(default)]
    pub size: Option<u64>,
}

impl AssetRecord {
    /// Convert into a domain asset, using `theme_id` when the record omits it.
    pub fn into_asset(self, theme_id: &str) -> Asset {
        Asset {
            key: self.key,
            theme_id: self
                .theme_id
                .map(|id| id.to_string())
                .unwrap_or_else(|| theme_id.to_string()),
            updated_at: self.updated_at,
            content_type: self.content_type,
            size: self.size,
        }
    }
}

/// `GET themes/{id}/assets.json`
#[derive(Debug, Deserialize)]
pub(super) struct AssetsResponse {
    pub assets: Vec<AssetRecord>,
}

/// `PUT themes/{id}/assets.json` response
#[derive(Debug, Deserialize)]
pub(super) struct AssetResponse {
    pub asset: AssetRecord,
}

/// Asset body for copy-on-create.
#[derive(Debug, Serialize)]
pub(super) struct AssetCopy {
    pub key: String,
    pub source_key: String,
}

/// `PUT themes/{id}/assets.json` request
#[derive(Debug, Serialize)]
pub(super) struct AssetCopyRequest {
    pub asset: AssetCopy,
}

// ============================================================================
// Errors
// ============================================================================

/// Classification of non-success HTTP responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiErrorKind {
    /// Access token missing, revoked or invalid
    Unauthorized,
    /// Token lacks the required scope
    Forbidden,
    /// Theme or asset does not exist
    NotFound,
    /// Request rejected by validation (e.g. invalid asset key)
    Unprocessable,
    /// Rate limit exceeded
    RateLimited,
    /// Store-side failure
    Server,
    Other,
}

impl ApiErrorKind {
    pub fn from_http_status(http_status: u16) -> Self {
        match http_status {
            401 => ApiErrorKind::Unauthorized,
            402 | 403 | 423 => ApiErrorKind::Forbidden,
            404 => ApiErrorKind::NotFound,
            406 | 422 => ApiErrorKind::Unprocessable,
            429 => ApiErrorKind::RateLimited,
            500..=599 => ApiErrorKind::Server,
            _ => ApiErrorKind::Other,
        }
    }

    /// Errors that need the operator to act before a retry can succeed.
    pub fn is_fatal(&self) -> bool {
        matches!(self, ApiErrorKind::Unauthorized | ApiErrorKind::Forbidden)
    }
}

/// Structured API error
#[derive(Debug, Clone)]
pub struct ApiError {
    pub kind: ApiErrorKind,
    pub http_status: u16,
    pub message: String,
    /// Request ID (for debugging)
    pub request_id: Option<String>,
    pub requires_relogin: bool,
}

impl ApiError {
    /// Create from HTTP status code and response body
    pub fn from_http_response(http_status: u16, body: &str, request_id: Option<String>) -> Self {
        let kind = ApiErrorKind::from_http_status(http_status);
        let requires_relogin = kind == ApiErrorKind::Unauthorized;

        let message = match kind {
            ApiErrorKind::Unauthorized => format!(
                "Authentication failed (HTTP {}). The access token may have been revoked. \
                 Please run 'themedup login' again.",
                http_status
            ),
            ApiErrorKind::RateLimited => format!(
                "Rate limit exceeded (HTTP {}). Please wait and try again.",
                http_status
            ),
            _ => match extract_errors(body) {
                Some(detail) => format!("API error (HTTP {}): {}", http_status, detail),
                None if body.trim().is_empty() => format!("API error (HTTP {})", http_status),
                None => format!("API error (HTTP {}): {}", http_status, body.trim()),
            },
        };

        Self {
            kind,
            http_status,
            message,
            request_id,
            requires_relogin,
        }
    }

    pub fn is_fatal(&self) -> bool {
        self.kind.is_fatal()
    }

    /// Get a hint message for the user
    pub fn user_hint(&self) -> &'static str {
        match self.kind {
            ApiErrorKind::Unauthorized => {
                "Your access token was rejected. Run 'themedup login' with a valid token."
            }
            ApiErrorKind::Forbidden => {
                "The access token needs the read_themes and write_themes scopes."
            }
            ApiErrorKind::NotFound => "Check the theme id with 'themedup themes'.",
            ApiErrorKind::RateLimited => "Please wait a moment and try again.",
            ApiErrorKind::Server => "The store is temporarily unavailable. Please try again later.",
            _ => "An unexpected error occurred. Please try again.",
        }
    }
}

/// Pull the `errors` field out of an error body, which is either a string or
/// a map of field names to message lists.
fn extract_errors(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    match value.get("errors")? {
        serde_json::Value::String(s) => Some(s.clone()),
        serde_json::Value::Object(fields) => {
            let parts: Vec<String> = fields
                .iter()
                .map(|(field, msgs)| match msgs {
                    serde_json::Value::Array(list) => {
                        let joined: Vec<String> = list
                            .iter()
                            .map(|m| m.as_str().map(str::to_string).unwrap_or_else(|| m.to_string()))
                            .collect();
                        format!("{} {}", field, joined.join(", "))
                    }
                    other => format!("{} {}", field, other),
                })
                .collect();
            Some(parts.join("; "))
        }
        other => Some(other.to_string()),
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for ApiError {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ThemeRole;

    #[test]
    fn test_parse_themes_response() {
        let body = r#"{"themes":[
            {"id":828155753,"name":"Comfort","role":"main","theme_store_id":null},
            {"id":976877075,"name":"Speed","role":"unpublished"}
        ]}"#;
        let parsed: ThemesResponse = serde_json::from_str(body).unwrap();
        let themes: Vec<Theme> = parsed.themes.into_iter().map(Theme::from).collect();

        assert_eq!(themes.len(), 2);
        assert_eq!(themes[0].id, "828155753");
        assert_eq!(themes[0].role, ThemeRole::Main);
        assert_eq!(themes[1].role, ThemeRole::Unpublished);
    }

    #[test]
    fn test_parse_assets_response() {
        let body = r#"{"assets":[
            {"key":"templates/index.liquid","public_url":null,
             "created_at":"2010-07-12T15:31:50-04:00","updated_at":"2010-07-12T15:31:50-04:00",
             "content_type":"text/x-liquid","size":1068,"theme_id":828155753},
            {"key":"assets/bg.gif","theme_id":828155753}
        ]}"#;
        let parsed: AssetsResponse = serde_json::from_str(body).unwrap();
        let assets: Vec<Asset> = parsed
            .assets
            .into_iter()
            .map(|a| a.into_asset("1"))
            .collect();

        assert_eq!(assets[0].key(), Some("templates/index.liquid"));
        assert_eq!(assets[0].theme_id, "828155753");
        assert_eq!(assets[0].size, Some(1068));
        assert!(assets[0].updated_at.is_some());
        assert!(assets[1].updated_at.is_none());
    }

    #[test]
    fn test_asset_record_falls_back_to_request_theme() {
        let record: AssetRecord = serde_json::from_str(r#"{"key":"templates/product.liquid"}"#).unwrap();
        assert_eq!(record.into_asset("42").theme_id, "42");
    }

    #[test]
    fn test_copy_request_shape() {
        let request = AssetCopyRequest {
            asset: AssetCopy {
                key: "templates/index.AbCdEfGhIj.liquid".to_string(),
                source_key: "templates/index.liquid".to_string(),
            },
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"asset": {
                "key": "templates/index.AbCdEfGhIj.liquid",
                "source_key": "templates/index.liquid"
            }})
        );
    }

    #[test]
    fn test_api_error_classification() {
        let err = ApiError::from_http_response(401, "", None);
        assert!(err.requires_relogin);
        assert!(err.is_fatal());
        assert!(err.message.contains("themedup login"));

        let err = ApiError::from_http_response(429, "", None);
        assert_eq!(err.kind, ApiErrorKind::RateLimited);
        assert!(!err.is_fatal());

        let err = ApiError::from_http_response(503, "", None);
        assert_eq!(err.kind, ApiErrorKind::Server);
    }

    #[test]
    fn test_forbidden_is_fatal_without_relogin() {
        let err = ApiError::from_http_response(403, "", Some("req-1".to_string()));
        assert_eq!(err.http_status, 403);
        assert!(err.is_fatal());
        assert!(!err.requires_relogin);
        assert_eq!(err.request_id.as_deref(), Some("req-1"));
    }

    #[test]
    fn test_api_error_extracts_errors_field() {
        let err = ApiError::from_http_response(
            422,
            r#"{"errors":{"asset":["Liquid syntax error"]}}"#,
            None,
        );
        assert_eq!(err.kind, ApiErrorKind::Unprocessable);
        assert_eq!(err.message, "API error (HTTP 422): asset Liquid syntax error");

        let err = ApiError::from_http_response(404, r#"{"errors":"Not Found"}"#, None);
        assert_eq!(err.message, "API error (HTTP 404): Not Found");

        let err = ApiError::from_http_response(400, "bad request", None);
        assert_eq!(err.message, "API error (HTTP 400): bad request");
    }
}
