//! Injectable filter state container.
//!
//! Explicit store rather than ambient global state: the URL synchronizer
//! and the UI layer receive it by reference, and tests drive it directly.
//! Change listeners run synchronously on the thread that mutated the
//! store; there is no deferred dispatch to reason about.

use crate::catalog::{CatalogError, OptionCatalog};
use crate::filters::FilterState;
use tracing::debug;

type Listener = Box<dyn Fn(&FilterStore)>;

/// In-memory state for the product listing filters plus the catalog
/// snapshot it is resolved against.
#[derive(Default)]
pub struct FilterStore {
    catalog: Option<OptionCatalog>,
    state: FilterState,
    initialized: bool,
    listeners: Vec<Listener>,
}

impl FilterStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load the catalog and derive the default filter state from it.
    ///
    /// Happens exactly once per page load; the catalog is read-only
    /// afterwards and a second load is rejected.
    pub fn load_catalog(&mut self, catalog: OptionCatalog) -> Result<(), CatalogError> {
        if self.initialized {
            return Err(CatalogError::AlreadyLoaded);
        }
        catalog.validate()?;
        self.state = FilterState::for_catalog(&catalog);
        self.catalog = Some(catalog);
        self.initialized = true;
        debug!("filter store initialized");
        Ok(())
    }

    pub fn initialized(&self) -> bool {
        self.initialized
    }

    pub fn catalog(&self) -> Option<&OptionCatalog> {
        self.catalog.as_ref()
    }

    pub fn state(&self) -> &FilterState {
        &self.state
    }

    /// Mutate the state in place; listeners fire if it actually changed.
    pub fn update(&mut self, mutate: impl FnOnce(&mut FilterState)) {
        let mut next = self.state.clone();
        mutate(&mut next);
        self.replace(next);
    }

    /// Atomically swap in a fully built state. Listeners observe only the
    /// complete new state, never a field-by-field intermediate.
    pub fn replace(&mut self, next: FilterState) {
        if next == self.state {
            return;
        }
        self.state = next;
        self.notify();
    }

    /// Register a synchronous change listener.
    pub fn subscribe(&mut self, listener: impl Fn(&FilterStore) + 'static) {
        self.listeners.push(Box::new(listener));
    }

    fn notify(&self) {
        for listener in &self.listeners {
            listener(self);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{AttributeFilter, FilterOption};
    use std::cell::Cell;
    use std::rc::Rc;

    fn catalog() -> OptionCatalog {
        OptionCatalog {
            categories: vec![FilterOption {
                id: 3,
                slug: "vang-do".to_string(),
                name: "Vang đỏ".to_string(),
            }],
            product_types: Vec::new(),
            attribute_filters: vec![AttributeFilter {
                code: "grape".to_string(),
                name: "Giống nho".to_string(),
                options: Vec::new(),
            }],
            price_range: (100_000, 5_000_000),
        }
    }

    #[test]
    fn load_catalog_initializes_defaults() {
        let mut store = FilterStore::new();
        assert!(!store.initialized());
        store.load_catalog(catalog()).unwrap();
        assert!(store.initialized());
        assert_eq!(store.state().price_range, (100_000, 5_000_000));
        assert_eq!(store.state().page, 1);
    }

    #[test]
    fn second_catalog_load_is_rejected() {
        let mut store = FilterStore::new();
        store.load_catalog(catalog()).unwrap();
        assert!(matches!(store.load_catalog(catalog()), Err(CatalogError::AlreadyLoaded)));
    }

    #[test]
    fn invalid_catalog_is_rejected_and_store_stays_uninitialized() {
        let mut store = FilterStore::new();
        let mut bad = catalog();
        bad.price_range = (10, 5);
        assert!(store.load_catalog(bad).is_err());
        assert!(!store.initialized());
    }

    #[test]
    fn update_notifies_listeners_once() {
        let mut store = FilterStore::new();
        store.load_catalog(catalog()).unwrap();
        let hits = Rc::new(Cell::new(0));
        let counter = Rc::clone(&hits);
        store.subscribe(move |_| counter.set(counter.get() + 1));
        store.update(|s| s.category_id = Some(3));
        assert_eq!(hits.get(), 1);
    }

    #[test]
    fn no_op_update_does_not_notify() {
        let mut store = FilterStore::new();
        store.load_catalog(catalog()).unwrap();
        let hits = Rc::new(Cell::new(0));
        let counter = Rc::clone(&hits);
        store.subscribe(move |_| counter.set(counter.get() + 1));
        store.update(|_| {});
        store.replace(store.state().clone());
        assert_eq!(hits.get(), 0);
    }
}
