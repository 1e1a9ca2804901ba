//! Storefront configuration.

use serde::{Deserialize, Serialize};

fn default_api_base() -> String {
    "/api".to_string()
}

fn default_page_size() -> u32 {
    24
}

fn default_search_debounce_ms() -> u32 {
    300
}

/// Frontend settings with serde-level field defaults, so a partial
/// config document (or none at all) still yields a working shop.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ShopConfig {
    /// Base path of the backend REST API.
    #[serde(default = "default_api_base")]
    pub api_base: String,
    /// Products per listing page.
    #[serde(default = "default_page_size")]
    pub page_size: u32,
    /// Trailing debounce for the free-text search input, in milliseconds.
    #[serde(default = "default_search_debounce_ms")]
    pub search_debounce_ms: u32,
}

impl Default for ShopConfig {
    fn default() -> Self {
        Self {
            api_base: default_api_base(),
            page_size: default_page_size(),
            search_debounce_ms: default_search_debounce_ms(),
        }
    }
}
