use std::cell::{Cell, RefCell};
use std::rc::Rc;
use tkwine_common::query::{encode, parse_query};
use tkwine_common::{
    sync_store_to_url, AttributeFilter, FilterOption, FilterStore, FilterUrlSync, Navigator,
    OptionCatalog, ProductFetcher, SortOrder,
};

/// In-memory address bar. `replace` mutates it the way the history API
/// would and records every call for assertions.
struct FakeNavigator {
    pathname: RefCell<String>,
    search: RefCell<String>,
    replaces: RefCell<Vec<(String, String)>>,
}

impl FakeNavigator {
    fn at(pathname: &str, search: &str) -> Self {
        Self {
            pathname: RefCell::new(pathname.to_string()),
            search: RefCell::new(search.to_string()),
            replaces: RefCell::new(Vec::new()),
        }
    }

    /// Simulate an external navigation (link click, back/forward).
    fn set_location(&self, pathname: &str, search: &str) {
        *self.pathname.borrow_mut() = pathname.to_string();
        *self.search.borrow_mut() = search.to_string();
    }

    fn replace_count(&self) -> usize {
        self.replaces.borrow().len()
    }

    fn last_replace(&self) -> Option<(String, String)> {
        self.replaces.borrow().last().cloned()
    }
}

impl Navigator for FakeNavigator {
    fn pathname(&self) -> String {
        self.pathname.borrow().clone()
    }

    fn search(&self) -> String {
        self.search.borrow().clone()
    }

    fn replace(&self, pathname: &str, query: &str) {
        *self.pathname.borrow_mut() = pathname.to_string();
        *self.search.borrow_mut() = query.to_string();
        self.replaces.borrow_mut().push((pathname.to_string(), query.to_string()));
    }
}

struct RecordingFetcher {
    calls: Rc<Cell<usize>>,
}

impl ProductFetcher for RecordingFetcher {
    fn fetch_products(&self) {
        self.calls.set(self.calls.get() + 1);
    }
}

fn opt(id: i64, slug: &str, name: &str) -> FilterOption {
    FilterOption {
        id,
        slug: slug.to_string(),
        name: name.to_string(),
    }
}

fn catalog() -> OptionCatalog {
    OptionCatalog {
        categories: vec![opt(3, "vang-do", "Vang đỏ"), opt(4, "vang-trang", "Vang trắng")],
        product_types: vec![opt(10, "ruou-vang", "Rượu vang")],
        attribute_filters: vec![AttributeFilter {
            code: "grape".to_string(),
            name: "Giống nho".to_string(),
            options: vec![opt(5, "chardonnay", "Chardonnay"), opt(6, "merlot", "Merlot")],
        }],
        price_range: (100_000, 5_000_000),
    }
}

struct Harness {
    store: FilterStore,
    sync: FilterUrlSync<FakeNavigator, RecordingFetcher>,
    navigator: Rc<FakeNavigator>,
    fetches: Rc<Cell<usize>>,
}

impl Harness {
    /// Store, synchronizer and loaded catalog, wired the way the browser
    /// layer wires them.
    fn new(pathname: &str, search: &str) -> Self {
        let navigator = Rc::new(FakeNavigator::at(pathname, search));
        let fetches = Rc::new(Cell::new(0));
        let sync = FilterUrlSync::new(
            Rc::clone(&navigator),
            RecordingFetcher {
                calls: Rc::clone(&fetches),
            },
        );
        let mut store = FilterStore::new();
        sync.attach(&mut store);
        store.load_catalog(catalog()).unwrap();
        Self {
            store,
            sync,
            navigator,
            fetches,
        }
    }

    fn navigate(&mut self) {
        self.sync.handle_navigation(&mut self.store);
    }

    /// External navigation to a new location, then the event delivery.
    fn navigate_to(&mut self, pathname: &str, search: &str) {
        self.navigator.set_location(pathname, search);
        self.navigate();
    }
}

#[test]
fn deep_link_decodes_on_first_navigation() {
    let mut h = Harness::new("/san-pham", "category=vang-do&grape=chardonnay,merlot");
    h.navigate();
    assert_eq!(h.store.state().category_id, Some(3));
    assert_eq!(h.store.state().attribute_selections["grape"], vec![5, 6]);
    assert_eq!(h.fetches.get(), 1);
}

#[test]
fn navigation_before_catalog_load_is_deferred() {
    let navigator = Rc::new(FakeNavigator::at("/san-pham", "category=vang-do"));
    let fetches = Rc::new(Cell::new(0));
    let mut sync = FilterUrlSync::new(
        Rc::clone(&navigator),
        RecordingFetcher {
            calls: Rc::clone(&fetches),
        },
    );
    let mut store = FilterStore::new();
    sync.attach(&mut store);

    sync.handle_navigation(&mut store);
    assert_eq!(store.state().category_id, None);
    assert_eq!(fetches.get(), 0);

    store.load_catalog(catalog()).unwrap();
    sync.handle_navigation(&mut store);
    assert_eq!(store.state().category_id, Some(3));
    assert_eq!(fetches.get(), 1);
}

#[test]
fn unchanged_location_is_skipped() {
    let mut h = Harness::new("/san-pham", "category=vang-do");
    h.navigate();
    h.navigate();
    assert_eq!(h.fetches.get(), 1);
}

#[test]
fn query_cleared_on_same_pathname_clears_filters() {
    let mut h = Harness::new("/san-pham", "category=vang-do");
    h.navigate();
    assert_eq!(h.store.state().category_id, Some(3));

    h.navigate_to("/san-pham", "");
    assert_eq!(h.store.state().category_id, None);
    assert_eq!(h.fetches.get(), 2);
}

#[test]
fn pathname_change_alone_is_not_skipped() {
    let mut h = Harness::new("/san-pham", "");
    h.navigate();
    assert_eq!(h.fetches.get(), 1);

    // Same (empty) query string, different pathname: must still run
    h.navigate_to("/khuyen-mai", "");
    assert_eq!(h.fetches.get(), 2);
}

#[test]
fn unknown_slug_decodes_to_absent_without_blocking_fetch() {
    let mut h = Harness::new("/san-pham", "category=khong-ton-tai");
    h.navigate();
    assert_eq!(h.store.state().category_id, None);
    assert_eq!(h.fetches.get(), 1);
}

#[test]
fn url_driven_commit_does_not_echo_into_the_address_bar() {
    // Legacy numeric link: the store commit under the guard must not
    // rewrite the URL to the canonical slug form on its own.
    let mut h = Harness::new("/san-pham", "category=3");
    h.navigate();
    assert_eq!(h.store.state().category_id, Some(3));
    assert_eq!(h.navigator.replace_count(), 0);
    assert!(!h.sync.guard().is_set()); // released after the commit
}

#[test]
fn store_edit_replaces_url_with_slug_form() {
    let mut h = Harness::new("/san-pham", "");
    h.navigate();

    h.store.update(|s| s.category_id = Some(3));
    assert_eq!(
        h.navigator.last_replace(),
        Some(("/san-pham".to_string(), "category=vang-do".to_string()))
    );

    // The host then delivers the navigation event for the replace; that
    // pass is the fetch trigger for the edit.
    h.navigate();
    assert_eq!(h.fetches.get(), 2);
}

#[test]
fn store_to_url_is_idempotent() {
    let mut h = Harness::new("/san-pham", "");
    h.navigate();
    h.store.update(|s| s.sort_by = SortOrder::PriceAsc);
    assert_eq!(h.navigator.replace_count(), 1);

    // No intervening store change: a second pass must not navigate again
    sync_store_to_url(&h.store, h.navigator.as_ref(), &h.sync.guard());
    assert_eq!(h.navigator.replace_count(), 1);
}

#[test]
fn reverting_to_default_removes_the_parameter() {
    let mut h = Harness::new("/san-pham", "");
    h.navigate();

    h.store.update(|s| s.sort_by = SortOrder::PriceAsc);
    assert_eq!(h.navigator.last_replace().unwrap().1, "sort=price-asc");
    h.navigate();

    h.store.update(|s| s.sort_by = SortOrder::NameAsc);
    assert_eq!(h.navigator.last_replace().unwrap().1, "");
}

#[test]
fn filter_edit_resets_page_through_the_url_pass() {
    let mut h = Harness::new("/san-pham", "");
    h.navigate();

    // Pagination has no URL parameter, so moving pages replaces nothing
    h.store.update(|s| s.page = 3);
    assert_eq!(h.navigator.replace_count(), 0);

    // A filter edit does; the follow-up navigation pass resets the page
    h.store.update(|s| s.category_id = Some(4));
    assert_eq!(h.navigator.replace_count(), 1);
    h.navigate();
    assert_eq!(h.store.state().page, 1);
    assert_eq!(h.store.state().category_id, Some(4));
}

#[test]
fn back_navigation_after_edits_restores_earlier_filters() {
    let mut h = Harness::new("/san-pham", "category=vang-do");
    h.navigate();

    h.store.update(|s| {
        s.attribute_selections.insert("grape".to_string(), vec![6]);
    });
    h.navigate();
    assert_eq!(h.navigator.search(), "category=vang-do&grape=merlot");

    // Back/forward lands on an earlier address
    h.navigate_to("/san-pham", "category=vang-trang");
    assert_eq!(h.store.state().category_id, Some(4));
    assert!(h.store.state().attribute_selections.is_empty());
}

#[test]
fn round_trip_through_address_bar_preserves_resolved_ids() {
    let mut h = Harness::new("/san-pham", "");
    h.navigate();

    h.store.update(|s| {
        s.category_id = Some(3);
        s.search_query = "chateau".to_string();
        s.price_range = (200_000, 900_000);
        s.attribute_selections.insert("grape".to_string(), vec![5, 6]);
    });
    let written = h.navigator.search();
    h.navigate();

    let state = h.store.state().clone();
    assert_eq!(state.category_id, Some(3));
    assert_eq!(state.search_query, "chateau");
    assert_eq!(state.price_range, (200_000, 900_000));
    assert_eq!(state.attribute_selections["grape"], vec![5, 6]);
    // And the address bar still carries the canonical form of the state
    let reencoded = encode(h.store.catalog().unwrap(), &state);
    assert_eq!(parse_query(&written), parse_query(&reencoded));
}
