//! Filter option catalog.
//!
//! The catalog is fetched once per page load and defines the universe of
//! valid filter values: categories, product types, dynamic attribute
//! filters and the price bounds. It is read-only after load; everything
//! that resolves URL tokens or renders filter controls works against it.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Query parameter names with fixed meanings. An attribute code may not
/// shadow one of these, since codes double as parameter names.
pub const RESERVED_PARAMS: &[&str] = &["category", "type", "q", "sort", "price_min", "price_max"];

/// A single selectable value within a filter dimension.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterOption {
    pub id: i64,
    /// Human-readable, URL-safe stable identifier, distinct from `id`.
    pub slug: String,
    pub name: String,
}

/// One dynamic product attribute (grape variety, country, ...).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AttributeFilter {
    /// Stable machine key; also the URL query parameter name for this
    /// dimension.
    pub code: String,
    /// Display name.
    pub name: String,
    pub options: Vec<FilterOption>,
}

/// The read-only set of valid filter values.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct OptionCatalog {
    pub categories: Vec<FilterOption>,
    pub product_types: Vec<FilterOption>,
    pub attribute_filters: Vec<AttributeFilter>,
    /// Inclusive (min, max) price bounds in VND.
    pub price_range: (i64, i64),
}

/// Catalog contract violations.
///
/// Unlike malformed URL values, which silently degrade, a catalog that
/// violates its own contract is a backend bug and is rejected loudly
/// once, at load time.
#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("duplicate attribute code: {0}")]
    DuplicateAttributeCode(String),
    #[error("attribute code shadows a reserved query parameter: {0}")]
    ReservedAttributeCode(String),
    #[error("inverted price bounds: {0}..{1}")]
    InvertedPriceBounds(i64, i64),
    #[error("catalog already loaded")]
    AlreadyLoaded,
}

impl OptionCatalog {
    /// Check the catalog's own invariants.
    pub fn validate(&self) -> Result<(), CatalogError> {
        let mut seen: Vec<&str> = Vec::with_capacity(self.attribute_filters.len());
        for attr in &self.attribute_filters {
            if RESERVED_PARAMS.contains(&attr.code.as_str()) {
                return Err(CatalogError::ReservedAttributeCode(attr.code.clone()));
            }
            if seen.contains(&attr.code.as_str()) {
                return Err(CatalogError::DuplicateAttributeCode(attr.code.clone()));
            }
            seen.push(attr.code.as_str());
        }
        let (min, max) = self.price_range;
        if min > max {
            return Err(CatalogError::InvertedPriceBounds(min, max));
        }
        Ok(())
    }

    /// Resolve a `category` query token (slug first, numeric id fallback).
    pub fn resolve_category(&self, token: &str) -> Option<i64> {
        resolve_token(&self.categories, token)
    }

    /// Resolve a `type` query token (slug first, numeric id fallback).
    pub fn resolve_product_type(&self, token: &str) -> Option<i64> {
        resolve_token(&self.product_types, token)
    }

    /// Look up an attribute filter by its code.
    pub fn attribute(&self, code: &str) -> Option<&AttributeFilter> {
        self.attribute_filters.iter().find(|a| a.code == code)
    }

    pub fn category_slug(&self, id: i64) -> Option<&str> {
        slug_of(&self.categories, id)
    }

    pub fn product_type_slug(&self, id: i64) -> Option<&str> {
        slug_of(&self.product_types, id)
    }

    pub fn attribute_option_slug(&self, code: &str, id: i64) -> Option<&str> {
        self.attribute(code).and_then(|a| slug_of(&a.options, id))
    }
}

/// Slug-first resolution with a numeric-id fallback for legacy links.
///
/// Tokens that match neither resolve to `None`; callers treat that as
/// "filter absent", never as an error.
pub(crate) fn resolve_token(options: &[FilterOption], token: &str) -> Option<i64> {
    if let Some(opt) = options.iter().find(|o| o.slug == token) {
        return Some(opt.id);
    }
    let id: i64 = token.parse().ok()?;
    options.iter().any(|o| o.id == id).then_some(id)
}

fn slug_of(options: &[FilterOption], id: i64) -> Option<&str> {
    options.iter().find(|o| o.id == id).map(|o| o.slug.as_str())
}
