//! Search module.
//!
//! Browse queries filter and sort the local catalog; [`SearchService`] is the
//! ranked free-text search, backed either by the catalog or by the remote
//! search function.

mod filter;
mod query;
mod service;

pub use filter::Filter;
pub use query::{BrowseQuery, SortOption, DEFAULT_MAX_PRICE};
pub use service::{CatalogSearch, SearchService, SEARCH_DEBOUNCE};
