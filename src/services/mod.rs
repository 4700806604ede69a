//! Service layer for applister
//!
//! Pure list transformation, the observable list state built on it, and
//! store link handling.

pub mod list_state;
pub mod store_links;
pub mod transform;

pub use list_state::{AppCounts, AppListState};
pub use store_links::{open_in_store, resolve_link, LinkOpener, OpenError, SystemOpener};
pub use transform::{filter_apps, search_apps, sort_apps, transform};
