//! In-process cache store
//!
//! JSON snapshots kept in the local `CacheStore` engine. Used when no Redis
//! server is configured.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::instrument;

use super::CurrencyCache;
use crate::cache::CacheStore;
use crate::error::{Result, ServiceError};
use crate::models::CurrencyResponse;

/// `CurrencyCache` on a shared, lock-protected `CacheStore`.
#[derive(Debug, Clone)]
pub struct MemoryCurrencyCache {
    store: Arc<RwLock<CacheStore>>,
}

impl MemoryCurrencyCache {
    pub fn new(max_entries: usize) -> Self {
        Self {
            store: Arc::new(RwLock::new(CacheStore::new(max_entries))),
        }
    }

    /// Shared handle to the engine, for the expiry sweep task.
    pub fn store(&self) -> Arc<RwLock<CacheStore>> {
        self.store.clone()
    }

    pub async fn len(&self) -> usize {
        self.store.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.store.read().await.is_empty()
    }
}

#[async_trait]
impl CurrencyCache for MemoryCurrencyCache {
    #[instrument(skip(self))]
    async fn get_by_key(&self, key: &str) -> Result<CurrencyResponse> {
        // Write lock: reads update LRU order and may drop an expired entry.
        let payload = self.store.write().await.get(key);
        let payload = payload.ok_or_else(|| ServiceError::CacheMiss(key.to_string()))?;
        serde_json::from_str(&payload)
            .map_err(|e| ServiceError::Cache(format!("corrupt snapshot for {}: {}", key, e)))
    }

    #[instrument(skip(self, value))]
    async fn set(&self, key: &str, ttl_seconds: u64, value: &CurrencyResponse) -> Result<()> {
        let payload = serde_json::to_string(value)
            .map_err(|e| ServiceError::Cache(format!("failed to serialize {}: {}", key, e)))?;
        self.store
            .write()
            .await
            .set(key.to_string(), payload, Duration::from_secs(ttl_seconds))
    }

    #[instrument(skip(self))]
    async fn delete(&self, key: &str) -> Result<()> {
        self.store.write().await.delete(key);
        Ok(())
    }
}
