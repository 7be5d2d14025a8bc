//! Category membership of asset keys.

use super::category::{Selector, TEMPLATES_DIR};
use crate::domain::Asset;

/// Whether `key` belongs to the category (or union of categories) named by `selector`.
///
/// A key matches when it starts with `templates/<prefix>`; anything may follow
/// the prefix, so `templates/product.special.liquid` is a product template.
/// Absent and empty keys never match.
pub fn matches(key: Option<&str>, selector: Selector) -> bool {
    let Some(rest) = key.and_then(|k| k.strip_prefix(TEMPLATES_DIR)) else {
        return false;
    };

    selector
        .prefixes()
        .into_iter()
        .any(|prefix| rest.starts_with(prefix))
}

/// Keep the assets whose key matches `selector`, preserving input order.
pub fn filter_assets(assets: &[Asset], selector: Selector) -> Vec<Asset> {
    assets
        .iter()
        .filter(|asset| matches(asset.key(), selector))
        .cloned()
        .collect()
}
