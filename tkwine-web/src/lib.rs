//! tkwine-web - Browser glue for the Thiên Kim Wine storefront
//!
//! API client, history/location navigation primitive, and the hook that
//! keeps filter state and the address bar in sync.

pub mod api;
pub mod filter_sync;
pub mod navigation;

pub use filter_sync::{use_filter_url_sync, ShopController};
pub use navigation::BrowserNavigator;
