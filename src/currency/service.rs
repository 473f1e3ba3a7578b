//! Currency Service
//!
//! Cache-aside orchestration over the entity store and the cache store.
//!
//! The entity store is the source of truth. Cache reads short-circuit the
//! store, cache writes are best-effort: a failing cache is logged and the
//! operation carries on.
//!
//! Reads are not versioned, so an update racing a `get_by_id` on the same id
//! can hand out the pre-update snapshot until the entry is refreshed or
//! expires. `CacheUpdatePolicy::Invalidate` narrows that window.

use std::str::FromStr;
use std::sync::Arc;

use metrics::counter;
use tracing::{debug, instrument, warn};

use super::{total_pages, CurrencyDraft, CurrencyValidator, Pagination};
use crate::error::{Result, ServiceError};
use crate::models::{CurrencyListResponse, CurrencyRequest, CurrencyResponse, PageRequest};
use crate::repository::{CurrencyCache, CurrencyRepository};

/// Lifetime of a cached snapshot unless configured otherwise.
pub const DEFAULT_CACHE_TTL_SECS: u64 = 3600;

/// Longest TTL a snapshot is stored with (30 days).
pub const MAX_CACHE_TTL_SECS: u64 = 30 * 24 * 3600;

/// Cache key for a currency id.
pub fn cache_key(id: i64) -> String {
    format!("currency:{}", id)
}

/// What `update` does with the cached snapshot after a successful write.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CacheUpdatePolicy {
    /// Overwrite the entry with the new projection
    #[default]
    Refresh,
    /// Delete the entry; the next read repopulates from the store
    Invalidate,
}

impl FromStr for CacheUpdatePolicy {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "refresh" => Ok(Self::Refresh),
            "invalidate" => Ok(Self::Invalidate),
            other => Err(format!("unknown cache update policy '{}'", other)),
        }
    }
}

/// The currency use case.
pub struct CurrencyService {
    repository: Arc<dyn CurrencyRepository>,
    cache: Arc<dyn CurrencyCache>,
    validator: CurrencyValidator,
    cache_ttl: u64,
    update_policy: CacheUpdatePolicy,
}

impl CurrencyService {
    pub fn new(
        repository: Arc<dyn CurrencyRepository>,
        cache: Arc<dyn CurrencyCache>,
        validator: CurrencyValidator,
    ) -> Self {
        Self {
            repository,
            cache,
            validator,
            cache_ttl: DEFAULT_CACHE_TTL_SECS,
            update_policy: CacheUpdatePolicy::default(),
        }
    }

    /// Sets the snapshot TTL, clamped to `MAX_CACHE_TTL_SECS`.
    pub fn with_cache_ttl(mut self, seconds: u64) -> Self {
        self.cache_ttl = seconds.min(MAX_CACHE_TTL_SECS);
        self
    }

    pub fn with_update_policy(mut self, policy: CacheUpdatePolicy) -> Self {
        self.update_policy = policy;
        self
    }

    // == Create ==
    #[instrument(skip(self, request))]
    pub async fn create(&self, request: CurrencyRequest) -> Result<CurrencyResponse> {
        self.validator.validate(&request)?;

        let created = self.repository.create(CurrencyDraft::from(request)).await?;
        let response = CurrencyResponse::from(created);

        self.store_snapshot(&response, "create").await;
        Ok(response)
    }

    // == Update ==
    #[instrument(skip(self, request))]
    pub async fn update(&self, id: i64, request: CurrencyRequest) -> Result<CurrencyResponse> {
        self.validator.validate(&request)?;

        self.repository.get_by_id(id).await?;
        let updated = self
            .repository
            .update(id, CurrencyDraft::from(request))
            .await?;
        let response = CurrencyResponse::from(updated);

        match self.update_policy {
            CacheUpdatePolicy::Refresh => self.store_snapshot(&response, "update").await,
            CacheUpdatePolicy::Invalidate => self.evict_snapshot(id, "update").await,
        }
        Ok(response)
    }

    // == Get By Id ==
    #[instrument(skip(self))]
    pub async fn get_by_id(&self, id: i64) -> Result<CurrencyResponse> {
        let key = cache_key(id);
        match self.cache.get_by_key(&key).await {
            Ok(cached) => {
                counter!("currency_cache_hits_total").increment(1);
                debug!(%key, "cache hit");
                return Ok(cached);
            }
            Err(ServiceError::CacheMiss(_)) => {
                counter!("currency_cache_misses_total").increment(1);
                debug!(%key, "cache miss");
            }
            Err(err) => {
                counter!("currency_cache_errors_total", "operation" => "get").increment(1);
                warn!(%key, error = %err, "cache read failed, falling back to store");
            }
        }

        let currency = self.repository.get_by_id(id).await?;
        let response = CurrencyResponse::from(currency);

        self.store_snapshot(&response, "get_by_id").await;
        Ok(response)
    }

    // == Delete ==
    #[instrument(skip(self))]
    pub async fn delete(&self, id: i64) -> Result<()> {
        self.repository.get_by_id(id).await?;
        self.repository.delete(id).await?;

        self.evict_snapshot(id, "delete").await;
        Ok(())
    }

    // == Get All ==
    #[instrument(skip(self))]
    pub async fn get_all(&self, request: PageRequest) -> Result<CurrencyListResponse> {
        let pagination = Pagination::from_request(&request)?;

        let total_count = self.repository.count().await?;
        let currencies = match pagination.offset() {
            Some(offset) if !pagination.is_past_end(total_count) => self
                .repository
                .get_all(offset, pagination.limit(), pagination.sort)
                .await?
                .into_iter()
                .map(CurrencyResponse::from)
                .collect(),
            _ => Vec::new(),
        };

        Ok(CurrencyListResponse {
            total_count,
            total_pages: total_pages(total_count, pagination.size),
            page: pagination.page,
            limit: pagination.size,
            currencies,
        })
    }

    async fn store_snapshot(&self, response: &CurrencyResponse, operation: &'static str) {
        let key = cache_key(response.id);
        if let Err(err) = self.cache.set(&key, self.cache_ttl, response).await {
            counter!("currency_cache_errors_total", "operation" => operation).increment(1);
            warn!(%key, operation, error = %err, "cache write failed");
        }
    }

    async fn evict_snapshot(&self, id: i64, operation: &'static str) {
        let key = cache_key(id);
        if let Err(err) = self.cache.delete(&key).await {
            counter!("currency_cache_errors_total", "operation" => operation).increment(1);
            warn!(%key, operation, error = %err, "cache delete failed");
        }
    }
}
