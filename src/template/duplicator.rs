//! Planning of template duplicates.
//!
//! The duplicator derives the variant of a source template, narrows the
//! current asset snapshot to that variant's category and picks a key that no
//! asset in the snapshot uses yet. It performs no I/O; the resulting
//! [`DuplicateRequest`] is handed to the theme store by the caller.

use thiserror::Error;
use tracing::debug;

use super::category::{TemplateVariant, TEMPLATES_DIR};
use super::classifier::filter_assets;
use super::keygen::{KeyGenError, KeyGenerator, RandomSource};
use crate::domain::{Asset, CreateAsset};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DuplicateError {
    #[error("invalid input: {0}")]
    InvalidInput(&'static str),

    #[error(transparent)]
    KeyGen(#[from] KeyGenError),
}

/// A planned duplication: copy `source_key` into `new_key` within `theme_id`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DuplicateRequest {
    pub source_key: String,
    pub theme_id: String,
    pub variant: TemplateVariant,
    pub new_key: String,
}

impl DuplicateRequest {
    pub fn into_create_asset(self) -> CreateAsset {
        CreateAsset {
            key: self.new_key,
            source_key: self.source_key,
            theme_id: self.theme_id,
        }
    }
}

/// Derive the template variant from a key such as `templates/product.custom.liquid`.
///
/// The leading `templates/` is removed and the first dot-delimited token is
/// taken, which also drops any trailing extension.
pub fn derive_variant(source_key: &str) -> TemplateVariant {
    let stem = source_key.strip_prefix(TEMPLATES_DIR).unwrap_or(source_key);
    let token = stem.split('.').next().unwrap_or_default();
    TemplateVariant::from_token(token)
}

/// Reject a blank source key.
pub fn validate_source_key(source_key: &str) -> Result<(), DuplicateError> {
    if source_key.trim().is_empty() {
        return Err(DuplicateError::InvalidInput("source key is required"));
    }
    Ok(())
}

/// Check the inputs that must be present before any remote work starts.
pub fn validate_inputs(source_key: &str, theme_id: &str) -> Result<(), DuplicateError> {
    validate_source_key(source_key)?;
    if theme_id.trim().is_empty() {
        return Err(DuplicateError::InvalidInput("theme id is required"));
    }
    Ok(())
}

/// Plans duplicates using an injected randomness source.
pub struct Duplicator<R> {
    rng: R,
    keygen: KeyGenerator,
}

impl<R: RandomSource> Duplicator<R> {
    pub fn new(rng: R, keygen: KeyGenerator) -> Self {
        Self { rng, keygen }
    }

    /// Compute a [`DuplicateRequest`] whose `new_key` is absent from the
    /// category-filtered `existing` snapshot.
    ///
    /// Does not check that `source_key` itself is part of `existing`.
    pub fn plan(
        &mut self,
        source_key: &str,
        theme_id: &str,
        existing: &[Asset],
    ) -> Result<DuplicateRequest, DuplicateError> {
        validate_inputs(source_key, theme_id)?;

        let variant = derive_variant(source_key);
        let siblings = filter_assets(existing, variant.selector());
        debug!(
            "Planning duplicate of {} as variant '{}' against {} sibling(s)",
            source_key,
            variant.token(),
            siblings.len()
        );

        let new_key = self.keygen.generate(
            variant.token(),
            siblings.iter().filter_map(Asset::key),
            &mut self.rng,
        )?;

        Ok(DuplicateRequest {
            source_key: source_key.to_string(),
            theme_id: theme_id.to_string(),
            variant,
            new_key,
        })
    }
}
