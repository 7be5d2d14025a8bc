//! Template categories and the key-prefix table they map to.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Root segment every template key lives under.
pub const TEMPLATES_DIR: &str = "templates/";

/// One of the three supported template families.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Home,
    Collection,
    Product,
}

impl Category {
    pub const ALL: [Category; 3] = [Category::Home, Category::Collection, Category::Product];

    /// Key token following `templates/`. The home page is stored as `index`.
    pub fn prefix(&self) -> &'static str {
        match self {
            Category::Home => "index",
            Category::Collection => "collection",
            Category::Product => "product",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Category::Home => "home",
            Category::Collection => "collection",
            Category::Product => "product",
        }
    }

    /// Caption shown when listing a category.
    pub fn label(&self) -> &'static str {
        match self {
            Category::Home => "Home Pages",
            Category::Collection => "Collection Pages",
            Category::Product => "Product Pages",
        }
    }

    /// Map a key token (`index`, `collection`, `product`) back to its category.
    pub fn from_token(token: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.prefix() == token)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown template category '{0}' (expected home, collection, product or all)")]
pub struct CategoryParseError(pub String);

impl FromStr for Category {
    type Err = CategoryParseError;

    /// Accepts display names, key tokens and the tab indices `0`..`2`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "home" | "index" | "0" => Ok(Category::Home),
            "collection" | "1" => Ok(Category::Collection),
            "product" | "2" => Ok(Category::Product),
            _ => Err(CategoryParseError(s.to_string())),
        }
    }
}

/// Category selector used for filtering: a single category or the union of all three.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Selector {
    #[default]
    All,
    Only(Category),
}

impl Selector {
    /// Key prefixes (without `templates/`) admitted by this selector.
    pub fn prefixes(&self) -> Vec<&'static str> {
        match self {
            Selector::All => Category::ALL.iter().map(Category::prefix).collect(),
            Selector::Only(category) => vec![category.prefix()],
        }
    }

    /// Parse an optional user-supplied selector; absent or empty means "all".
    pub fn parse_optional(raw: Option<&str>) -> Result<Self, CategoryParseError> {
        match raw.map(str::trim) {
            None | Some("") => Ok(Selector::All),
            Some(s) => s.parse(),
        }
    }
}

impl From<Category> for Selector {
    fn from(category: Category) -> Self {
        Selector::Only(category)
    }
}

impl FromStr for Selector {
    type Err = CategoryParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            return Ok(Selector::All);
        }
        s.parse::<Category>().map(Selector::Only)
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Selector::All => f.write_str("all"),
            Selector::Only(category) => category.fmt(f),
        }
    }
}

/// Variant derived from an existing template key.
///
/// Unknown tokens are kept verbatim so a duplicate of a legacy template is
/// still named after it, while filtering falls back to the union of all
/// categories.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateVariant {
    Home,
    Collection,
    Product,
    Unknown(String),
}

impl TemplateVariant {
    pub fn from_token(token: &str) -> Self {
        match Category::from_token(token) {
            Some(Category::Home) => TemplateVariant::Home,
            Some(Category::Collection) => TemplateVariant::Collection,
            Some(Category::Product) => TemplateVariant::Product,
            None => TemplateVariant::Unknown(token.to_string()),
        }
    }

    pub fn category(&self) -> Option<Category> {
        match self {
            TemplateVariant::Home => Some(Category::Home),
            TemplateVariant::Collection => Some(Category::Collection),
            TemplateVariant::Product => Some(Category::Product),
            TemplateVariant::Unknown(_) => None,
        }
    }

    pub fn selector(&self) -> Selector {
        self.category().map_or(Selector::All, Selector::Only)
    }

    /// Token used when naming a duplicate of this variant.
    pub fn token(&self) -> &str {
        match self {
            TemplateVariant::Unknown(token) => token,
            known => known.category().map_or("", |c| c.prefix()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_prefixes() {
        assert_eq!(Category::Home.prefix(), "index");
        assert_eq!(Category::Collection.prefix(), "collection");
        assert_eq!(Category::Product.prefix(), "product");
    }

    #[test]
    fn test_category_parse_accepts_names_tokens_and_tab_indices() {
        assert_eq!("home".parse::<Category>().unwrap(), Category::Home);
        assert_eq!("index".parse::<Category>().unwrap(), Category::Home);
        assert_eq!("0".parse::<Category>().unwrap(), Category::Home);
        assert_eq!("Collection".parse::<Category>().unwrap(), Category::Collection);
        assert_eq!("1".parse::<Category>().unwrap(), Category::Collection);
        assert_eq!("2".parse::<Category>().unwrap(), Category::Product);
        assert!("blog".parse::<Category>().is_err());
        assert!("3".parse::<Category>().is_err());
    }

    #[test]
    fn test_selector_parse() {
        assert_eq!("all".parse::<Selector>().unwrap(), Selector::All);
        assert_eq!(
            "product".parse::<Selector>().unwrap(),
            Selector::Only(Category::Product)
        );
        assert_eq!(Selector::parse_optional(None).unwrap(), Selector::All);
        assert_eq!(Selector::parse_optional(Some("  ")).unwrap(), Selector::All);
        assert!(Selector::parse_optional(Some("page")).is_err());
    }

    #[test]
    fn test_selector_all_is_union_of_categories() {
        assert_eq!(Selector::All.prefixes(), vec!["index", "collection", "product"]);
        assert_eq!(Selector::Only(Category::Home).prefixes(), vec!["index"]);
    }

    #[test]
    fn test_template_variant_mapping() {
        assert_eq!(TemplateVariant::from_token("index"), TemplateVariant::Home);
        assert_eq!(
            TemplateVariant::from_token("product").selector(),
            Selector::Only(Category::Product)
        );

        let legacy = TemplateVariant::from_token("unknown-thing");
        assert_eq!(legacy, TemplateVariant::Unknown("unknown-thing".to_string()));
        assert_eq!(legacy.selector(), Selector::All);
        assert_eq!(legacy.token(), "unknown-thing");
        assert_eq!(TemplateVariant::Home.token(), "index");
    }
}
