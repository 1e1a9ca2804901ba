//! Filter ↔ URL synchronization wiring for the browser.
//!
//! `use_filter_url_sync` owns the filter store for the lifetime of the
//! listing view, keeps it in sync with the address bar, and returns a
//! `ShopController` with the edit operations the pages call.

use dioxus::prelude::*;
use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;
use tkwine_common::{FilterState, FilterStore, FilterUrlSync, OptionCatalog, ProductFetcher, ShopConfig, SortOrder};
use tkwine_ui::debounce::Debouncer;
use tkwine_ui::stores::{ProductListStateStoreExt, ShopState, ShopStateStoreExt};
use tracing::warn;

use crate::api;
use crate::navigation::{BrowserNavigator, WindowEventListener};

/// Product fetcher that reads the filter store and writes listing
/// results into the reactive shop state.
#[derive(Clone)]
struct WebProductFetcher {
    store: Rc<RefCell<FilterStore>>,
    shop: Store<ShopState>,
    config: ShopConfig,
}

impl ProductFetcher for WebProductFetcher {
    fn fetch_products(&self) {
        let store = Rc::clone(&self.store);
        let config = self.config.clone();
        let shop = self.shop;
        shop.products().loading().set(true);
        spawn(async move {
            // Read the state once the task runs: the triggering store
            // commit has fully unwound by then, and a trigger that was
            // superseded in the meantime simply queries the newer state.
            let state = store.borrow().state().clone();
            match api::fetch_products(&state, &config).await {
                Ok(page) => {
                    shop.products().items().set(page.items);
                    shop.products().total_items().set(page.total_items);
                    shop.products().total_pages().set(page.total_pages);
                    shop.products().error().set(None);
                    shop.products().loading().set(false);
                }
                Err(e) => {
                    warn!("product fetch failed: {e}");
                    shop.products().error().set(Some(e));
                    shop.products().loading().set(false);
                }
            }
        });
    }
}

/// Handle returned by [`use_filter_url_sync`]; pages call these on user
/// interaction. Every URL-visible edit goes store → address bar → back
/// through the URL pass, which is what resets the page offset and
/// triggers the product fetch.
#[derive(Clone)]
pub struct ShopController {
    store: Rc<RefCell<FilterStore>>,
    sync: Rc<RefCell<FilterUrlSync<BrowserNavigator, WebProductFetcher>>>,
    fetcher: WebProductFetcher,
    debouncer: Debouncer,
}

impl ShopController {
    /// Snapshot of the current filter selections for rendering.
    pub fn filter_state(&self) -> FilterState {
        self.store.borrow().state().clone()
    }

    /// The loaded option catalog, when available.
    pub fn catalog(&self) -> Option<OptionCatalog> {
        self.store.borrow().catalog().cloned()
    }

    pub fn set_category(&self, category_id: Option<i64>) {
        self.store.borrow_mut().update(|s| s.category_id = category_id);
        self.handle_navigation();
    }

    pub fn set_product_type(&self, product_type_id: Option<i64>) {
        self.store.borrow_mut().update(|s| s.product_type_id = product_type_id);
        self.handle_navigation();
    }

    pub fn set_sort(&self, sort_by: SortOrder) {
        self.store.borrow_mut().update(|s| s.sort_by = sort_by);
        self.handle_navigation();
    }

    /// Commit a price selection. Transient out-of-range values during a
    /// slider drag stay in the widget; what lands here is clamped into
    /// the catalog bounds.
    pub fn set_price_range(&self, low: i64, high: i64) {
        let Some((min, max)) = self.store.borrow().catalog().map(|c| c.price_range) else {
            return;
        };
        let low = low.clamp(min, max);
        let high = high.clamp(min, max);
        let range = if low <= high { (low, high) } else { (high, low) };
        self.store.borrow_mut().update(|s| s.price_range = range);
        self.handle_navigation();
    }

    pub fn toggle_attribute_option(&self, code: &str, option_id: i64) {
        self.store.borrow_mut().update(|s| {
            let ids = s.attribute_selections.entry(code.to_string()).or_default();
            if let Some(pos) = ids.iter().position(|&id| id == option_id) {
                ids.remove(pos);
            } else {
                ids.push(option_id);
            }
            let now_empty = ids.is_empty();
            if now_empty {
                s.attribute_selections.remove(code);
            }
        });
        self.handle_navigation();
    }

    /// Debounced free-text search.
    pub fn set_search_query(&self, query: String) {
        let controller = self.clone();
        spawn(self.debouncer.debounced(move || {
            controller.store.borrow_mut().update(|s| s.search_query = query);
            controller.handle_navigation();
        }));
    }

    /// Alcohol buckets drive the backend query but have no URL
    /// parameter, so the fetch is triggered directly.
    pub fn set_alcohol_buckets(&self, buckets: Vec<String>) {
        self.store.borrow_mut().update(|s| s.alcohol_buckets = buckets);
        self.fetcher.fetch_products();
    }

    /// Pagination has no URL parameter either; fetch directly.
    pub fn set_page(&self, page: u32) {
        self.store.borrow_mut().update(|s| s.page = page.max(1));
        self.fetcher.fetch_products();
    }

    /// URL → store pass. Runs after in-page edits (the address bar was
    /// just replaced by the store listener) and on popstate.
    pub fn handle_navigation(&self) {
        let mut sync = self.sync.borrow_mut();
        let mut store = self.store.borrow_mut();
        sync.handle_navigation(&mut store);
    }
}

/// Wire the filter store to the address bar and the product API for the
/// lifetime of the calling component.
///
/// Fetches the catalog once, applies the current URL (deep links
/// included), subscribes to `popstate` for back/forward, and mirrors
/// every in-page edit back into the address bar as a replace-style
/// navigation.
pub fn use_filter_url_sync(config: ShopConfig) -> (Store<ShopState>, ShopController) {
    let shop = use_store(ShopState::default);

    let controller = use_hook(|| {
        let store = Rc::new(RefCell::new(FilterStore::new()));
        let navigator = Rc::new(BrowserNavigator::new());
        let fetcher = WebProductFetcher {
            store: Rc::clone(&store),
            shop,
            config: config.clone(),
        };
        let sync = FilterUrlSync::new(navigator, fetcher.clone());
        sync.attach(&mut store.borrow_mut());
        let controller = ShopController {
            store,
            sync: Rc::new(RefCell::new(sync)),
            fetcher,
            debouncer: Debouncer::new(Duration::from_millis(u64::from(config.search_debounce_ms))),
        };

        // Catalog load + initial URL pass, once per page load.
        let boot = controller.clone();
        let boot_config = config.clone();
        spawn(async move {
            match api::fetch_catalog(&boot_config).await {
                Ok(catalog) => {
                    if let Err(e) = boot.store.borrow_mut().load_catalog(catalog) {
                        warn!("catalog rejected: {e}");
                        shop.catalog_error().set(Some(e.to_string()));
                        return;
                    }
                }
                Err(e) => {
                    warn!("catalog fetch failed: {e}");
                    shop.catalog_error().set(Some(e));
                    return;
                }
            }
            shop.catalog_ready().set(true);
            boot.handle_navigation();
        });

        controller
    });

    // Back/forward (and any other external navigation) re-runs the
    // URL → store pass.
    use_hook(|| {
        let nav = controller.clone();
        Rc::new(WindowEventListener::new("popstate", move |_| nav.handle_navigation()))
    });

    (shop, controller)
}
