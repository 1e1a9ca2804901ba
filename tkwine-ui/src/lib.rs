//! tkwine-ui - Shared UI state for the Thiên Kim Wine storefront
//!
//! Contains display types and reactive stores consumed by the web
//! frontend. Filter selections themselves live in
//! `tkwine_common::FilterStore`; what is here is the display side.

pub mod debounce;
pub mod display_types;
pub mod stores;

pub use display_types::*;
