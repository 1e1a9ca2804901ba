//! Bidirectional synchronization between the filter store and the
//! address bar.
//!
//! Two procedures cooperate. URL → store runs on every navigation event
//! (deep links, back/forward, pathname changes) and treats the URL as
//! the source of truth. Store → URL runs as a store change listener and
//! mirrors in-page edits back into the address bar as a replace-style
//! navigation, slugs over ids. A shared guard flag keeps the first
//! procedure's own store commit from echoing back into the URL.
//!
//! The host owns event delivery: it must call [`FilterUrlSync::handle_navigation`]
//! on navigation events, and deliver one more navigation event after each
//! replace issued by the store listener. That follow-up pass is the single
//! product-fetch trigger for in-page filter edits, and the one that resets
//! the page offset.

use crate::query;
use crate::store::FilterStore;
use std::cell::Cell;
use std::rc::Rc;
use tracing::debug;

/// Read access to the current address plus replace-style navigation.
///
/// `replace` must not create a history entry and must not scroll.
pub trait Navigator {
    fn pathname(&self) -> String;
    /// Current query string, without the leading `?`.
    fn search(&self) -> String;
    fn replace(&self, pathname: &str, query: &str);
}

/// Fire-and-forget trigger for the paginated product query. The
/// synchronizer never inspects the result; stale in-flight responses are
/// the fetcher's concern.
pub trait ProductFetcher {
    fn fetch_products(&self);
}

/// Shared re-entrancy flag, the sole coordination primitive between the
/// two procedures. Single-threaded: read and written only on the main
/// thread, no concurrent writers.
#[derive(Clone, Default)]
pub struct SyncGuard(Rc<Cell<bool>>);

impl SyncGuard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_set(&self) -> bool {
        self.0.get()
    }

    fn set(&self) {
        self.0.set(true);
    }

    fn clear(&self) {
        self.0.set(false);
    }
}

/// The URL → store half, plus the wiring point for the other direction.
pub struct FilterUrlSync<N, F> {
    navigator: Rc<N>,
    fetcher: F,
    guard: SyncGuard,
    last_pathname: Option<String>,
    last_search: Option<String>,
}

impl<N: Navigator + 'static, F: ProductFetcher> FilterUrlSync<N, F> {
    pub fn new(navigator: Rc<N>, fetcher: F) -> Self {
        Self {
            navigator,
            fetcher,
            guard: SyncGuard::new(),
            last_pathname: None,
            last_search: None,
        }
    }

    /// The guard shared with the store → URL listener.
    pub fn guard(&self) -> SyncGuard {
        self.guard.clone()
    }

    /// Register the store → URL listener on `store`.
    pub fn attach(&self, store: &mut FilterStore) {
        let navigator = Rc::clone(&self.navigator);
        let guard = self.guard.clone();
        store.subscribe(move |store| sync_store_to_url(store, navigator.as_ref(), &guard));
    }

    /// URL → store. Call on every navigation event.
    ///
    /// Skips only when BOTH the pathname and the query string are
    /// unchanged since the last pass; a pathname change with an empty
    /// query still runs, which is what clears the filters when the user
    /// navigates from a filtered listing back to the bare listing page.
    pub fn handle_navigation(&mut self, store: &mut FilterStore) {
        if !store.initialized() {
            debug!("url sync: navigation before catalog load, deferred");
            return;
        }
        let pathname = self.navigator.pathname();
        let search = self.navigator.search();
        if self.last_pathname.as_deref() == Some(pathname.as_str())
            && self.last_search.as_deref() == Some(search.as_str())
        {
            return;
        }
        self.last_pathname = Some(pathname);
        self.last_search = Some(search.clone());

        let Some(catalog) = store.catalog() else {
            return;
        };
        let pairs = query::parse_query(&search);
        let next = query::decode(catalog, &pairs);

        // Commit, release the guard, then fetch. Listener dispatch
        // happens inside `replace`, while the guard is still set, so the
        // store → URL listener skips the commit this procedure caused.
        self.guard.set();
        store.replace(next);
        self.guard.clear();
        debug!(search = %search, "url sync: applied query string to store");
        self.fetcher.fetch_products();
    }
}

/// Store → URL. Registered on the store by [`FilterUrlSync::attach`];
/// also callable directly when driving the store from tests.
///
/// Encodes the state canonically and issues a replace-style navigation
/// only when the result differs from the current query string, so
/// repeated passes over an unchanged store are no-ops.
pub fn sync_store_to_url(store: &FilterStore, navigator: &impl Navigator, guard: &SyncGuard) {
    if guard.is_set() || !store.initialized() {
        return;
    }
    let Some(catalog) = store.catalog() else {
        return;
    };
    let encoded = query::encode(catalog, store.state());
    if encoded == navigator.search() {
        return;
    }
    debug!(query = %encoded, "url sync: replacing address bar query");
    navigator.replace(&navigator.pathname(), &encoded);
}
