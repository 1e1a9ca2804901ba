//! Store types for UI state management
//!
//! Display-side reactive state for the storefront. Each store derives
//! `Store` for fine-grained reactivity via lensing; filter selections
//! themselves live in the injectable `tkwine_common::FilterStore`.

pub mod products;
pub mod shop;

pub use products::*;
pub use shop::*;
