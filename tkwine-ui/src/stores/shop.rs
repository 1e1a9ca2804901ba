//! Top-level storefront state store

use super::products::ProductListState;
use dioxus::prelude::*;

/// Top-level storefront display state
#[derive(Clone, Debug, Default, PartialEq, Store)]
pub struct ShopState {
    /// Product listing results
    pub products: ProductListState,
    /// Whether the option catalog has been fetched and applied
    pub catalog_ready: bool,
    /// Error message if the catalog fetch or validation failed
    pub catalog_error: Option<String>,
}
