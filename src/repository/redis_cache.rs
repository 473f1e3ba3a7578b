//! Redis cache store

use async_trait::async_trait;
use redis::aio::ConnectionManager;
use tracing::{info, instrument};

use super::CurrencyCache;
use crate::error::{Result, ServiceError};
use crate::models::CurrencyResponse;

/// `CurrencyCache` on a Redis server. The connection manager reconnects on
/// its own and is cheap to clone per call.
#[derive(Clone)]
pub struct RedisCurrencyCache {
    connection: ConnectionManager,
}

impl RedisCurrencyCache {
    pub async fn connect(url: &str) -> redis::RedisResult<Self> {
        let client = redis::Client::open(url)?;
        let connection = ConnectionManager::new(client).await?;
        info!("Redis connected");
        Ok(Self { connection })
    }
}

#[async_trait]
impl CurrencyCache for RedisCurrencyCache {
    #[instrument(skip(self))]
    async fn get_by_key(&self, key: &str) -> Result<CurrencyResponse> {
        let mut conn = self.connection.clone();
        let payload: Option<String> = redis::cmd("GET").arg(key).query_async(&mut conn).await?;
        let payload = payload.ok_or_else(|| ServiceError::CacheMiss(key.to_string()))?;
        serde_json::from_str(&payload)
            .map_err(|e| ServiceError::Cache(format!("corrupt snapshot for {}: {}", key, e)))
    }

    #[instrument(skip(self, value))]
    async fn set(&self, key: &str, ttl_seconds: u64, value: &CurrencyResponse) -> Result<()> {
        let payload = serde_json::to_string(value)
            .map_err(|e| ServiceError::Cache(format!("failed to serialize {}: {}", key, e)))?;
        let mut conn = self.connection.clone();
        redis::cmd("SET")
            .arg(key)
            .arg(payload)
            .arg("EX")
            .arg(ttl_seconds.max(1))
            .query_async::<_, ()>(&mut conn)
            .await?;
        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete(&self, key: &str) -> Result<()> {
        let mut conn = self.connection.clone();
        redis::cmd("DEL")
            .arg(key)
            .query_async::<_, i64>(&mut conn)
            .await?;
        Ok(())
    }
}
