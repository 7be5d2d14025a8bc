//! Browse-then-duplicate operations against a theme store.
//!
//! Every call reads a fresh snapshot from the store and keeps nothing
//! afterwards. Upstream failures are logged here with full detail and
//! surfaced to callers as a [`ServiceError`] whose [`ServiceError::public_message`]
//! carries no diagnostic detail.

use async_trait::async_trait;
use thiserror::Error;
use tracing::{error, info};

use super::category::Selector;
use super::classifier::filter_assets;
use super::duplicator::{validate_inputs, validate_source_key, DuplicateError, Duplicator};
use super::keygen::{KeyGenError, KeyGenerator, RandomSource, RngSource};
use crate::domain::{Asset, CreateAsset, Theme};

/// Remote store holding themes and their assets.
#[async_trait]
pub trait ThemeStore: Send + Sync {
    async fn list_themes(&self) -> anyhow::Result<Vec<Theme>>;

    async fn list_assets(&self, theme_id: &str) -> anyhow::Result<Vec<Asset>>;

    /// Create `request.key` as a copy of `request.source_key` in the same theme.
    async fn create_asset(&self, request: CreateAsset) -> anyhow::Result<Asset>;
}

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("failed to fetch from theme store")]
    UpstreamFetchFailure(#[source] anyhow::Error),

    #[error("failed to create asset in theme store")]
    UpstreamCreateFailure(#[source] anyhow::Error),

    #[error("no free template key found after {attempts} attempt(s)")]
    ExhaustedKeyspace { attempts: u32 },
}

impl ServiceError {
    /// Message safe to hand to callers.
    pub fn public_message(&self) -> String {
        match self {
            ServiceError::InvalidInput(reason) => format!("Invalid input: {}", reason),
            ServiceError::UpstreamFetchFailure(_) => "Failed to fetch".to_string(),
            ServiceError::UpstreamCreateFailure(_) | ServiceError::ExhaustedKeyspace { .. } => {
                "Failed to duplicate".to_string()
            }
        }
    }
}

impl From<DuplicateError> for ServiceError {
    fn from(err: DuplicateError) -> Self {
        match err {
            DuplicateError::InvalidInput(reason) => ServiceError::InvalidInput(reason.to_string()),
            DuplicateError::KeyGen(KeyGenError::ExhaustedKeyspace { attempts }) => {
                ServiceError::ExhaustedKeyspace { attempts }
            }
        }
    }
}

fn fetch_failure(what: &str, err: anyhow::Error) -> ServiceError {
    error!("Error fetching {}: {:#}", what, err);
    ServiceError::UpstreamFetchFailure(err)
}

/// Result of a completed duplication.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DuplicateOutcome {
    /// Key of the new asset as reported by the store.
    pub new_key: String,
    pub asset: Asset,
}

/// Template browsing and duplication over a [`ThemeStore`].
pub struct TemplateService<S> {
    store: S,
    keygen: KeyGenerator,
}

impl<S: ThemeStore> TemplateService<S> {
    pub fn new(store: S, keygen: KeyGenerator) -> Self {
        Self { store, keygen }
    }

    #[cfg(test)]
    pub fn store(&self) -> &S {
        &self.store
    }

    pub async fn list_themes(&self) -> Result<Vec<Theme>, ServiceError> {
        self.store
            .list_themes()
            .await
            .map_err(|e| fetch_failure("themes", e))
    }

    /// The single theme with role `main`.
    pub async fn main_theme(&self) -> Result<Theme, ServiceError> {
        let themes = self.list_themes().await?;
        themes.into_iter().find(Theme::is_main).ok_or_else(|| {
            fetch_failure("themes", anyhow::anyhow!("store reported no theme with role 'main'"))
        })
    }

    /// Assets of `theme_id` whose key matches `selector`.
    ///
    /// An absent or blank `theme_id` targets the main theme.
    pub async fn list_category_assets(
        &self,
        theme_id: Option<&str>,
        selector: Selector,
    ) -> Result<Vec<Asset>, ServiceError> {
        let theme_id = match theme_id.map(str::trim).filter(|id| !id.is_empty()) {
            Some(id) => id.to_string(),
            None => self.main_theme().await?.id,
        };

        let assets = self
            .store
            .list_assets(&theme_id)
            .await
            .map_err(|e| fetch_failure("assets", e))?;

        Ok(filter_assets(&assets, selector))
    }

    /// Theme to duplicate `source_key` in: `theme_id` when given, else the main theme.
    ///
    /// A blank source key fails before the store is consulted.
    pub async fn duplicate_target(
        &self,
        theme_id: Option<&str>,
        source_key: &str,
    ) -> Result<String, ServiceError> {
        validate_source_key(source_key)?;
        match theme_id {
            Some(id) => Ok(id.to_string()),
            None => Ok(self.main_theme().await?.id),
        }
    }

    /// Duplicate `source_key` within `theme_id` under a freshly generated key.
    pub async fn duplicate_asset(
        &self,
        theme_id: &str,
        source_key: &str,
    ) -> Result<DuplicateOutcome, ServiceError> {
        self.duplicate_asset_with(theme_id, source_key, RngSource::from_entropy())
            .await
    }

    /// Same as [`duplicate_asset`](Self::duplicate_asset) with a caller-supplied
    /// randomness source.
    pub async fn duplicate_asset_with<R: RandomSource>(
        &self,
        theme_id: &str,
        source_key: &str,
        rng: R,
    ) -> Result<DuplicateOutcome, ServiceError> {
        validate_inputs(source_key, theme_id)?;

        let existing = self
            .store
            .list_assets(theme_id)
            .await
            .map_err(|e| fetch_failure("assets", e))?;

        let request = Duplicator::new(rng, self.keygen).plan(source_key, theme_id, &existing)?;
        let planned_key = request.new_key.clone();

        let asset = self
            .store
            .create_asset(request.into_create_asset())
            .await
            .map_err(|e| {
                error!("Error creating asset {}: {:#}", planned_key, e);
                ServiceError::UpstreamCreateFailure(e)
            })?;

        let new_key = asset.key.clone().unwrap_or(planned_key);
        info!("Duplicated {} as {} in theme {}", source_key, new_key, theme_id);

        Ok(DuplicateOutcome { new_key, asset })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ThemeRole;
    use crate::template::category::Category;
    use crate::template::keygen::ScriptedSource;
    use regex::Regex;
    use std::sync::Mutex;

    /// Randomness source that must never be consulted.
    struct Untouchable;

    impl RandomSource for Untouchable {
        fn pick(&mut self, _upper: usize) -> usize {
            panic!("no key should be generated");
        }
    }

    #[derive(Default)]
    struct FakeStore {
        themes: Vec<Theme>,
        assets: Vec<Asset>,
        fail_themes: bool,
        fail_assets: bool,
        fail_create: bool,
        asset_calls: Mutex<Vec<String>>,
        created: Mutex<Vec<CreateAsset>>,
    }

    impl FakeStore {
        fn with_keys(keys: &[&str]) -> Self {
            Self {
                themes: vec![
                    theme("7", ThemeRole::Unpublished),
                    theme("42", ThemeRole::Main),
                ],
                assets: keys.iter().map(|k| asset(k)).collect(),
                ..Default::default()
            }
        }

        fn created(&self) -> Vec<CreateAsset> {
            self.created.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl ThemeStore for FakeStore {
        async fn list_themes(&self) -> anyhow::Result<Vec<Theme>> {
            if self.fail_themes {
                anyhow::bail!("themes endpoint unavailable");
            }
            Ok(self.themes.clone())
        }

        async fn list_assets(&self, theme_id: &str) -> anyhow::Result<Vec<Asset>> {
            self.asset_calls.lock().unwrap().push(theme_id.to_string());
            if self.fail_assets {
                anyhow::bail!("assets endpoint returned 500");
            }
            Ok(self.assets.clone())
        }

        async fn create_asset(&self, request: CreateAsset) -> anyhow::Result<Asset> {
            if self.fail_create {
                anyhow::bail!("asset create rejected");
            }
            self.created.lock().unwrap().push(request.clone());
            Ok(Asset {
                key: Some(request.key),
                theme_id: request.theme_id,
                updated_at: None,
                content_type: None,
                size: None,
            })
        }
    }

    fn theme(id: &str, role: ThemeRole) -> Theme {
        Theme {
            id: id.to_string(),
            name: format!("Theme {id}"),
            role,
        }
    }

    fn asset(key: &str) -> Asset {
        Asset {
            key: Some(key.to_string()),
            theme_id: "42".to_string(),
            updated_at: None,
            content_type: None,
            size: None,
        }
    }

    fn service(store: FakeStore) -> TemplateService<FakeStore> {
        TemplateService::new(store, KeyGenerator::unbounded())
    }

    #[tokio::test]
    async fn test_list_home_assets_only() {
        let svc = service(FakeStore::with_keys(&[
            "templates/index.liquid",
            "templates/product.liquid",
        ]));

        let assets = svc
            .list_category_assets(Some("42"), Category::Home.into())
            .await
            .unwrap();

        let keys: Vec<_> = assets.iter().filter_map(Asset::key).collect();
        assert_eq!(keys, vec!["templates/index.liquid"]);
    }

    #[tokio::test]
    async fn test_list_without_theme_uses_main_theme() {
        let svc = service(FakeStore::with_keys(&[
            "templates/index.liquid",
            "config/settings_data.json",
        ]));

        let assets = svc.list_category_assets(None, Selector::All).await.unwrap();
        assert_eq!(assets.len(), 1);
        assert_eq!(*svc.store().asset_calls.lock().unwrap(), vec!["42".to_string()]);
    }

    #[tokio::test]
    async fn test_main_theme_missing_is_fetch_failure() {
        let mut store = FakeStore::with_keys(&[]);
        store.themes = vec![theme("7", ThemeRole::Unpublished)];
        let svc = service(store);

        let err = svc.list_category_assets(None, Selector::All).await.unwrap_err();
        assert!(matches!(err, ServiceError::UpstreamFetchFailure(_)));
        assert_eq!(err.public_message(), "Failed to fetch");
    }

    #[tokio::test]
    async fn test_theme_listing_failure_is_generic() {
        let mut store = FakeStore::with_keys(&[]);
        store.fail_themes = true;
        let svc = service(store);

        let err = svc.main_theme().await.unwrap_err();
        assert_eq!(err.public_message(), "Failed to fetch");
        assert!(!err.public_message().contains("unavailable"));
    }

    #[tokio::test]
    async fn test_duplicate_product_avoids_existing_keys() {
        let svc = service(FakeStore::with_keys(&[
            "templates/product.liquid",
            "templates/product.ABCDEFGHIJ.liquid",
            "templates/index.liquid",
        ]));
        let rng = ScriptedSource::spelling(&["ABCDEFGHIJ", "Zz09Zz09Zz"]);

        let outcome = svc
            .duplicate_asset_with("42", "templates/product.liquid", rng)
            .await
            .unwrap();

        let shape = Regex::new(r"^templates/product\.[A-Za-z0-9]{10}\.liquid$").unwrap();
        assert!(shape.is_match(&outcome.new_key));
        assert_eq!(outcome.new_key, "templates/product.Zz09Zz09Zz.liquid");
        assert_ne!(outcome.new_key, "templates/product.liquid");
        assert_ne!(outcome.new_key, "templates/product.ABCDEFGHIJ.liquid");

        let created = svc.store().created();
        assert_eq!(
            created,
            vec![CreateAsset {
                key: "templates/product.Zz09Zz09Zz.liquid".to_string(),
                source_key: "templates/product.liquid".to_string(),
                theme_id: "42".to_string(),
            }]
        );
    }

    #[tokio::test]
    async fn test_duplicate_with_random_source_is_unique() {
        let svc = service(FakeStore::with_keys(&[
            "templates/collection.liquid",
            "templates/collection.sale.liquid",
        ]));

        let outcome = svc
            .duplicate_asset("42", "templates/collection.sale.liquid")
            .await
            .unwrap();

        assert!(outcome.new_key.starts_with("templates/collection."));
        assert_eq!(outcome.new_key.len(), "templates/collection.".len() + 10 + ".liquid".len());
    }

    #[tokio::test]
    async fn test_duplicate_empty_source_key_is_invalid_input() {
        let svc = service(FakeStore::with_keys(&["templates/index.liquid"]));

        let err = svc
            .duplicate_asset_with("42", "", Untouchable)
            .await
            .unwrap_err();

        assert!(matches!(err, ServiceError::InvalidInput(_)));
        assert!(svc.store().asset_calls.lock().unwrap().is_empty());
        assert!(svc.store().created().is_empty());
    }

    #[tokio::test]
    async fn test_duplicate_target_rejects_blank_key_before_listing_themes() {
        let svc = service(FakeStore {
            fail_themes: true,
            ..FakeStore::with_keys(&[])
        });

        let err = svc.duplicate_target(None, "  ").await.unwrap_err();
        assert!(matches!(err, ServiceError::InvalidInput(_)));
        assert!(svc.store().asset_calls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_duplicate_target_resolves_main_theme() {
        let svc = service(FakeStore::with_keys(&[]));

        let theme_id = svc
            .duplicate_target(None, "templates/product.liquid")
            .await
            .unwrap();
        assert_eq!(theme_id, "42");

        let theme_id = svc
            .duplicate_target(Some("7"), "templates/product.liquid")
            .await
            .unwrap();
        assert_eq!(theme_id, "7");
    }

    #[tokio::test]
    async fn test_duplicate_empty_theme_is_invalid_input() {
        let svc = service(FakeStore::with_keys(&[]));

        let err = svc
            .duplicate_asset_with("", "templates/index.liquid", Untouchable)
            .await
            .unwrap_err();
        assert_eq!(err.public_message(), "Invalid input: theme id is required");
    }

    #[tokio::test]
    async fn test_duplicate_listing_failure_generates_no_key() {
        let mut store = FakeStore::with_keys(&["templates/index.liquid"]);
        store.fail_assets = true;
        let svc = service(store);

        let err = svc
            .duplicate_asset_with("42", "templates/index.liquid", Untouchable)
            .await
            .unwrap_err();

        assert!(matches!(err, ServiceError::UpstreamFetchFailure(_)));
        assert_eq!(err.public_message(), "Failed to fetch");
        assert!(svc.store().created().is_empty());
    }

    #[tokio::test]
    async fn test_duplicate_create_failure() {
        let mut store = FakeStore::with_keys(&["templates/index.liquid"]);
        store.fail_create = true;
        let svc = service(store);

        let err = svc
            .duplicate_asset_with(
                "42",
                "templates/index.liquid",
                ScriptedSource::spelling(&["abcdefghij"]),
            )
            .await
            .unwrap_err();

        assert!(matches!(err, ServiceError::UpstreamCreateFailure(_)));
        assert_eq!(err.public_message(), "Failed to duplicate");
    }

    #[tokio::test]
    async fn test_duplicate_exhaustion_with_capped_generator() {
        let store = FakeStore::with_keys(&["templates/index.AAAAAAAAAA.liquid"]);
        let svc = TemplateService::new(store, KeyGenerator::new(Some(2)));

        let err = svc
            .duplicate_asset_with(
                "42",
                "templates/index.liquid",
                ScriptedSource::spelling(&["AAAAAAAAAA"]),
            )
            .await
            .unwrap_err();

        assert!(matches!(err, ServiceError::ExhaustedKeyspace { attempts: 2 }));
        assert!(svc.store().created().is_empty());
    }
}
