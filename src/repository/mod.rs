//! Repository Module
//!
//! Contracts for the entity store and the cache store, plus their adapters.
//!
//! # Adapters
//! - `SqliteCurrencyRepository` - relational entity store on an sqlx pool
//! - `RedisCurrencyCache` - Redis cache store
//! - `MemoryCurrencyCache` - in-process cache store used when Redis is not configured

mod memory;
mod redis_cache;
mod sqlite;

use async_trait::async_trait;

use crate::currency::{Currency, CurrencyDraft, SortKey};
use crate::error::Result;
use crate::models::CurrencyResponse;

pub use self::memory::MemoryCurrencyCache;
pub use self::redis_cache::RedisCurrencyCache;
pub use self::sqlite::{DatabaseSettings, SqliteCurrencyRepository};

/// Durable storage for currency rows.
///
/// Storage failures come back as `ServiceError::Persistence`; a missing row
/// as `ServiceError::NotFound`.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CurrencyRepository: Send + Sync {
    async fn create(&self, draft: CurrencyDraft) -> Result<Currency>;
    async fn update(&self, id: i64, draft: CurrencyDraft) -> Result<Currency>;
    async fn get_by_id(&self, id: i64) -> Result<Currency>;
    async fn delete(&self, id: i64) -> Result<()>;
    async fn count(&self) -> Result<i64>;
    async fn get_all(&self, offset: i64, limit: i64, sort: SortKey) -> Result<Vec<Currency>>;
}

/// Expiring snapshots of currency projections.
///
/// Never authoritative. `get_by_key` reports absence as `ServiceError::CacheMiss`
/// and backend trouble as `ServiceError::Cache`.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CurrencyCache: Send + Sync {
    async fn get_by_key(&self, key: &str) -> Result<CurrencyResponse>;
    async fn set(&self, key: &str, ttl_seconds: u64, value: &CurrencyResponse) -> Result<()>;
    async fn delete(&self, key: &str) -> Result<()>;
}
