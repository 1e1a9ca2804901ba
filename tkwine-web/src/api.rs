//! Backend REST client for the storefront.

use serde::Deserialize;
use tkwine_common::{AttributeFilter, FilterOption, FilterState, OptionCatalog, ShopConfig};
use tkwine_ui::display_types::{Product, ProductPage};

/// Filter catalog API response envelope
#[derive(Deserialize)]
struct CatalogEnvelope {
    categories: Vec<ApiOption>,
    #[serde(rename = "productTypes")]
    product_types: Vec<ApiOption>,
    #[serde(rename = "attributeFilters")]
    attribute_filters: Vec<ApiAttributeFilter>,
    #[serde(rename = "priceRange")]
    price_range: ApiPriceRange,
}

#[derive(Deserialize)]
struct ApiOption {
    id: i64,
    slug: String,
    name: String,
}

#[derive(Deserialize)]
struct ApiAttributeFilter {
    code: String,
    name: String,
    options: Vec<ApiOption>,
}

#[derive(Deserialize)]
struct ApiPriceRange {
    min: i64,
    max: i64,
}

/// Product listing response envelope
#[derive(Deserialize)]
struct ProductsEnvelope {
    items: Vec<ApiProduct>,
    page: u32,
    #[serde(rename = "perPage")]
    per_page: u32,
    #[serde(rename = "totalItems")]
    total_items: u64,
    #[serde(rename = "totalPages")]
    total_pages: u32,
}

#[derive(Deserialize)]
struct ApiProduct {
    id: i64,
    slug: String,
    name: String,
    price: i64,
    #[serde(rename = "originalPrice")]
    original_price: Option<i64>,
    #[serde(rename = "imageUrl")]
    image_url: Option<String>,
    #[serde(rename = "inStock", default)]
    in_stock: bool,
}

fn filter_option(o: ApiOption) -> FilterOption {
    FilterOption {
        id: o.id,
        slug: o.slug,
        name: o.name,
    }
}

/// Fetch the filter option catalog. Called once per page load.
pub async fn fetch_catalog(config: &ShopConfig) -> Result<OptionCatalog, String> {
    let url = format!("{}/filters", config.api_base);
    let resp = reqwest::get(&url)
        .await
        .map_err(|e| format!("Network error: {e}"))?;
    if !resp.status().is_success() {
        return Err(format!("Server error: {}", resp.status()));
    }

    let envelope: CatalogEnvelope = resp.json().await.map_err(|e| format!("Parse error: {e}"))?;

    Ok(OptionCatalog {
        categories: envelope.categories.into_iter().map(filter_option).collect(),
        product_types: envelope.product_types.into_iter().map(filter_option).collect(),
        attribute_filters: envelope
            .attribute_filters
            .into_iter()
            .map(|a| AttributeFilter {
                code: a.code,
                name: a.name,
                options: a.options.into_iter().map(filter_option).collect(),
            })
            .collect(),
        price_range: (envelope.price_range.min, envelope.price_range.max),
    })
}

/// Fetch one page of products for the current filter state.
pub async fn fetch_products(state: &FilterState, config: &ShopConfig) -> Result<ProductPage, String> {
    let url = format!("{}/products?{}", config.api_base, product_query(state, config));
    let resp = reqwest::get(&url)
        .await
        .map_err(|e| format!("Network error: {e}"))?;
    if !resp.status().is_success() {
        return Err(format!("Server error: {}", resp.status()));
    }

    let envelope: ProductsEnvelope = resp.json().await.map_err(|e| format!("Parse error: {e}"))?;

    Ok(ProductPage {
        items: envelope
            .items
            .into_iter()
            .map(|p| Product {
                id: p.id,
                slug: p.slug,
                name: p.name,
                price: p.price,
                original_price: p.original_price,
                image_url: p.image_url,
                in_stock: p.in_stock,
            })
            .collect(),
        page: envelope.page,
        per_page: envelope.per_page,
        total_items: envelope.total_items,
        total_pages: envelope.total_pages,
    })
}

/// Backend query for the paginated product listing. Numeric ids, not
/// slugs: slugs are an address-bar concern only.
fn product_query(state: &FilterState, config: &ShopConfig) -> String {
    let mut pairs: Vec<(String, String)> = Vec::new();
    if let Some(id) = state.category_id {
        pairs.push(("category_id".to_string(), id.to_string()));
    }
    if let Some(id) = state.product_type_id {
        pairs.push(("product_type_id".to_string(), id.to_string()));
    }
    let q = state.search_query.trim();
    if !q.is_empty() {
        pairs.push(("q".to_string(), q.to_string()));
    }
    pairs.push(("sort".to_string(), state.sort_by.as_param().to_string()));
    pairs.push(("price_min".to_string(), state.price_range.0.to_string()));
    pairs.push(("price_max".to_string(), state.price_range.1.to_string()));
    for bucket in &state.alcohol_buckets {
        pairs.push(("alcohol".to_string(), bucket.clone()));
    }
    for (code, ids) in &state.attribute_selections {
        if ids.is_empty() {
            continue;
        }
        let joined = ids.iter().map(ToString::to_string).collect::<Vec<_>>().join(",");
        pairs.push((format!("attr_{code}"), joined));
    }
    pairs.push(("page".to_string(), state.page.to_string()));
    pairs.push(("per_page".to_string(), config.page_size.to_string()));
    serde_urlencoded::to_string(&pairs).unwrap_or_default()
}
