//! Query-string codec for the product listing URL.
//!
//! Decoding is permissive: unknown slugs and ids are dropped, malformed
//! numbers fall back to catalog defaults, and nothing here ever fails on
//! user-supplied input. Encoding is canonical: slugs over ids, defaults
//! omitted, deterministic parameter order.

use crate::catalog::{resolve_token, FilterOption, OptionCatalog};
use crate::filters::{FilterState, SortOrder};

/// Split a raw query string (with or without the leading `?`) into
/// percent-decoded key/value pairs. Junk pairs pass through as strings.
pub fn parse_query(raw: &str) -> Vec<(String, String)> {
    raw.trim_start_matches('?')
        .split('&')
        .filter(|pair| !pair.is_empty())
        .map(|pair| {
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            (percent_decode(key), percent_decode(value))
        })
        .collect()
}

fn percent_decode(s: &str) -> String {
    // '+' means a space in query strings
    let s = s.replace('+', " ");
    match urlencoding::decode(&s) {
        Ok(decoded) => decoded.into_owned(),
        Err(_) => s,
    }
}

/// Decode parsed query pairs into a complete `FilterState`.
///
/// `category`, `type` and attribute values resolve slug-first with a
/// numeric-id fallback for legacy links; tokens that resolve to nothing
/// are treated as absent. `page` is always reset to 1: a fresh
/// navigation never preserves a stale page offset.
pub fn decode(catalog: &OptionCatalog, pairs: &[(String, String)]) -> FilterState {
    let mut state = FilterState::for_catalog(catalog);
    for (key, value) in pairs {
        match key.as_str() {
            "category" => state.category_id = catalog.resolve_category(value),
            "type" => state.product_type_id = catalog.resolve_product_type(value),
            "q" => state.search_query = value.trim().to_string(),
            "sort" => state.sort_by = SortOrder::from_param(value).unwrap_or_default(),
            // Handled together below so min/max can be validated as a pair
            "price_min" | "price_max" => {}
            code => {
                if let Some(attr) = catalog.attribute(code) {
                    let ids = resolve_list(&attr.options, value);
                    if ids.is_empty() {
                        state.attribute_selections.remove(code);
                    } else {
                        state.attribute_selections.insert(code.to_string(), ids);
                    }
                }
            }
        }
    }
    state.price_range = decode_price(catalog, pairs);
    state.page = 1;
    state
}

/// Comma-separated tokens, each resolved independently; unresolvable
/// tokens are dropped, duplicates collapse.
fn resolve_list(options: &[FilterOption], value: &str) -> Vec<i64> {
    let mut ids = Vec::new();
    for token in value.split(',') {
        let token = token.trim();
        if token.is_empty() {
            continue;
        }
        if let Some(id) = resolve_token(options, token) {
            if !ids.contains(&id) {
                ids.push(id);
            }
        }
    }
    ids
}

fn decode_price(catalog: &OptionCatalog, pairs: &[(String, String)]) -> (i64, i64) {
    let (lo, hi) = catalog.price_range;
    let parsed = |name: &str| {
        pairs
            .iter()
            .rev()
            .find(|(key, _)| key == name)
            .and_then(|(_, value)| value.trim().parse::<i64>().ok())
    };
    let min = parsed("price_min").unwrap_or(lo).clamp(lo, hi);
    let max = parsed("price_max").unwrap_or(hi).clamp(lo, hi);
    if min > max {
        // Inverted pair is malformed; same fallback class as unparseable
        (lo, hi)
    } else {
        (min, max)
    }
}

/// Encode a `FilterState` as a canonical query string.
///
/// Ids become slugs wherever the catalog knows them; a stale id with no
/// catalog entry is written as the raw number rather than dropped.
/// Default-valued fields are omitted entirely so shareable URLs stay
/// minimal, and `page` never appears.
pub fn encode(catalog: &OptionCatalog, state: &FilterState) -> String {
    let mut pairs: Vec<(String, String)> = Vec::new();
    if let Some(id) = state.category_id {
        pairs.push(("category".to_string(), encoded_slug_or_id(catalog.category_slug(id), id)));
    }
    if let Some(id) = state.product_type_id {
        pairs.push(("type".to_string(), encoded_slug_or_id(catalog.product_type_slug(id), id)));
    }
    let q = state.search_query.trim();
    if !q.is_empty() {
        pairs.push(("q".to_string(), urlencoding::encode(q).into_owned()));
    }
    if state.sort_by != SortOrder::default() {
        pairs.push(("sort".to_string(), state.sort_by.as_param().to_string()));
    }
    let (lo, hi) = catalog.price_range;
    if state.price_range.0 != lo {
        pairs.push(("price_min".to_string(), state.price_range.0.to_string()));
    }
    if state.price_range.1 != hi {
        pairs.push(("price_max".to_string(), state.price_range.1.to_string()));
    }
    for (code, ids) in &state.attribute_selections {
        if ids.is_empty() {
            continue;
        }
        // Tokens are encoded individually; the joining comma stays
        // literal, matching the shareable form readers expect.
        let tokens: Vec<String> = ids
            .iter()
            .map(|&id| encoded_slug_or_id(catalog.attribute_option_slug(code, id), id))
            .collect();
        pairs.push((code.clone(), tokens.join(",")));
    }
    pairs
        .iter()
        .map(|(key, value)| format!("{}={}", urlencoding::encode(key), value))
        .collect::<Vec<_>>()
        .join("&")
}

fn encoded_slug_or_id(slug: Option<&str>, id: i64) -> String {
    match slug {
        Some(slug) => urlencoding::encode(slug).into_owned(),
        None => id.to_string(),
    }
}
