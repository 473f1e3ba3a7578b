//! Currency Module
//!
//! The currency entity, its input rules and the cache-aside use case.

mod entity;
mod pagination;
mod service;
mod validator;

pub use entity::{Currency, CurrencyDraft};
pub use pagination::{total_pages, Pagination, SortDirection, SortField, SortKey};
pub use service::{
    cache_key, CacheUpdatePolicy, CurrencyService, DEFAULT_CACHE_TTL_SECS, MAX_CACHE_TTL_SECS,
};
pub use validator::CurrencyValidator;
