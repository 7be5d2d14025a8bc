//! Domain types shared across modules.
//!
//! This module contains data structures that are used by multiple
//! parts of the application (API, template logic, MCP tools, commands).
//! Keeping them here avoids circular dependencies between `api` and `template`.

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

/// Role a theme plays in the storefront.
///
/// Exactly one theme of a shop carries [`ThemeRole::Main`] at a time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ThemeRole {
    Main,
    Unpublished,
    Demo,
    Development,
    Other(String),
}

impl ThemeRole {
    pub fn as_str(&self) -> &str {
        match self {
            ThemeRole::Main => "main",
            ThemeRole::Unpublished => "unpublished",
            ThemeRole::Demo => "demo",
            ThemeRole::Development => "development",
            ThemeRole::Other(role) => role,
        }
    }
}

impl From<String> for ThemeRole {
    fn from(role: String) -> Self {
        match role.as_str() {
            "main" => ThemeRole::Main,
            "unpublished" => ThemeRole::Unpublished,
            "demo" => ThemeRole::Demo,
            "development" => ThemeRole::Development,
            _ => ThemeRole::Other(role),
        }
    }
}

impl From<ThemeRole> for String {
    fn from(role: ThemeRole) -> Self {
        role.as_str().to_string()
    }
}

/// A named collection of templated storefront files.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Theme {
    pub id: String,
    pub name: String,
    pub role: ThemeRole,
}

impl Theme {
    pub fn is_main(&self) -> bool {
        self.role == ThemeRole::Main
    }
}

/// A single file entry within a theme, addressed by a path-like key.
///
/// Assets are read-only snapshots of what the remote theme store reported.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Asset {
    /// Path key, conventionally `templates/<category>[.<variant>].liquid`.
    /// The store may omit it, in which case no category matches.
    pub key: Option<String>,
    pub theme_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<FixedOffset>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<u64>,
}

impl Asset {
    pub fn key(&self) -> Option<&str> {
        self.key.as_deref()
    }
}

/// Payload for the store's copy-on-create operation.
///
/// The store copies the content of `source_key` into a new asset named `key`
/// inside the same theme.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CreateAsset {
    pub key: String,
    pub source_key: String,
    pub theme_id: String,
}
