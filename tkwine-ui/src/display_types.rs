//! Display types for the storefront UI
//!
//! Plain data as the pages render it, mapped from API envelopes in the
//! web crate.

use serde::{Deserialize, Serialize};

/// A product as shown on listing pages.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: i64,
    pub slug: String,
    pub name: String,
    /// Current sale price in VND.
    pub price: i64,
    /// Pre-discount price, when the product is on promotion.
    pub original_price: Option<i64>,
    pub image_url: Option<String>,
    pub in_stock: bool,
}

/// One page of listing results.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductPage {
    pub items: Vec<Product>,
    pub page: u32,
    pub per_page: u32,
    pub total_items: u64,
    pub total_pages: u32,
}

/// Format a VND amount with dot thousand separators: `1250000` becomes
/// `"1.250.000₫"`.
pub fn format_vnd(amount: i64) -> String {
    let mut reversed = String::new();
    for (i, digit) in amount.unsigned_abs().to_string().chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            reversed.push('.');
        }
        reversed.push(digit);
    }
    if amount < 0 {
        reversed.push('-');
    }
    let grouped: String = reversed.chars().rev().collect();
    format!("{grouped}₫")
}
