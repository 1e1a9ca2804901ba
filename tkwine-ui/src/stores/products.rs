//! Product listing state store

use crate::display_types::Product;
use dioxus::prelude::*;

/// State for the product listing view
#[derive(Clone, Debug, Default, PartialEq, Store)]
pub struct ProductListState {
    /// Products on the current page
    pub items: Vec<Product>,
    /// Whether a listing fetch is in flight
    pub loading: bool,
    /// Error message if the last fetch failed
    pub error: Option<String>,
    /// Total result count across all pages
    pub total_items: u64,
    /// Page count for the current filter selection
    pub total_pages: u32,
}
