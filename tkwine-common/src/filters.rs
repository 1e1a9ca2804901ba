//! Filter selections for the product listing.

use crate::catalog::OptionCatalog;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Sort orders for the product listing.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortOrder {
    #[default]
    NameAsc,
    NameDesc,
    PriceAsc,
    PriceDesc,
}

impl SortOrder {
    /// Wire literal used in the `sort` query parameter.
    pub fn as_param(self) -> &'static str {
        match self {
            Self::NameAsc => "name-asc",
            Self::NameDesc => "name-desc",
            Self::PriceAsc => "price-asc",
            Self::PriceDesc => "price-desc",
        }
    }

    /// Parse a `sort` query value. Anything unrecognized is rejected and
    /// the caller falls back to the default.
    pub fn from_param(s: &str) -> Option<Self> {
        match s {
            "name-asc" => Some(Self::NameAsc),
            "name-desc" => Some(Self::NameDesc),
            "price-asc" => Some(Self::PriceAsc),
            "price-desc" => Some(Self::PriceDesc),
            _ => None,
        }
    }
}

/// The user's current filter selections, driving the product query.
///
/// Every id held here must exist in the current catalog or be treated as
/// absent by readers; the URL decoder drops unknown ids on the way in.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FilterState {
    pub category_id: Option<i64>,
    pub product_type_id: Option<i64>,
    pub search_query: String,
    pub sort_by: SortOrder,
    /// Committed (low, high) selection, within the catalog bounds.
    /// Transient out-of-range values during a slider drag live in the
    /// widget, not here.
    pub price_range: (i64, i64),
    /// Alcohol-content buckets. Backend-only: not mirrored in the URL.
    pub alcohol_buckets: Vec<String>,
    /// Selected option ids per attribute code, unique, order irrelevant.
    /// A `BTreeMap` keeps the encoded query parameter order stable.
    pub attribute_selections: BTreeMap<String, Vec<i64>>,
    pub page: u32,
}

impl Default for FilterState {
    fn default() -> Self {
        Self {
            category_id: None,
            product_type_id: None,
            search_query: String::new(),
            sort_by: SortOrder::default(),
            price_range: (0, 0),
            alcohol_buckets: Vec::new(),
            attribute_selections: BTreeMap::new(),
            page: 1,
        }
    }
}

impl FilterState {
    /// Default state for a freshly loaded catalog: nothing selected,
    /// price at the full catalog bounds, first page.
    pub fn for_catalog(catalog: &OptionCatalog) -> Self {
        Self {
            price_range: catalog.price_range,
            ..Self::default()
        }
    }

    /// Whether the price selection sits at the catalog bounds.
    pub fn has_default_price(&self, catalog: &OptionCatalog) -> bool {
        self.price_range == catalog.price_range
    }
}
