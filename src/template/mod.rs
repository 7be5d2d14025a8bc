//! Theme template selection and duplication.
//!
//! - `category`: the closed set of template families and their key prefixes
//! - `classifier`: prefix matching of asset keys against a category selector
//! - `keygen`: random, collision-free key generation
//! - `duplicator`: variant derivation and duplicate planning
//! - `service`: the browse/duplicate operations over a [`ThemeStore`]

mod category;
mod classifier;
mod duplicator;
mod keygen;
mod service;

pub use category::Selector;
#[cfg(test)]
pub use category::Category;
pub use duplicator::derive_variant;
pub use keygen::KeyGenerator;
pub use service::{ServiceError, TemplateService, ThemeStore};
