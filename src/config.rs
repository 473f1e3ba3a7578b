//! Configuration Module
//!
//! Handles loading and managing server configuration from environment variables.

use std::env;
use std::str::FromStr;
use std::time::Duration;

use crate::currency::{CacheUpdatePolicy, DEFAULT_CACHE_TTL_SECS, MAX_CACHE_TTL_SECS};
use crate::repository::DatabaseSettings;

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Pretty,
    Json,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pretty" | "text" => Ok(LogFormat::Pretty),
            "json" => Ok(LogFormat::Json),
            other => Err(format!("unknown log format '{}'", other)),
        }
    }
}

/// Server configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server port
    pub server_port: u16,
    /// sqlx URL of the entity store
    pub database_url: String,
    /// Upper bound on pooled database connections
    pub database_max_connections: u32,
    /// Maximum connection lifetime in seconds, 0 = unlimited
    pub database_max_lifetime: u64,
    /// Idle connection timeout in seconds, 0 = unlimited
    pub database_idle_timeout: u64,
    /// Redis URL; the in-memory cache is used when unset
    pub redis_url: Option<String>,
    /// TTL in seconds of cached currency snapshots
    pub cache_ttl: u64,
    /// Capacity of the in-memory cache
    pub cache_max_entries: usize,
    /// Expiry sweep interval of the in-memory cache, in seconds
    pub cache_cleanup_interval: u64,
    /// Whether updates refresh or invalidate the cached snapshot
    pub cache_update_policy: CacheUpdatePolicy,
    /// Per-request timeout in seconds
    pub request_timeout: u64,
    /// Maximum request body size in bytes
    pub body_limit: usize,
    /// Install the Prometheus recorder and expose /metrics
    pub metrics_enabled: bool,
    pub log_format: LogFormat,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `SERVER_PORT` (default: 5000)
    /// - `DATABASE_URL` (default: sqlite://currencies.db)
    /// - `DATABASE_MAX_CONNECTIONS` (default: 5)
    /// - `DATABASE_MAX_LIFETIME_SECS` (default: 1800)
    /// - `DATABASE_IDLE_TIMEOUT_SECS` (default: 600)
    /// - `REDIS_URL` (default: unset)
    /// - `CACHE_TTL` (default: 3600, at most 30 days)
    /// - `CACHE_MAX_ENTRIES` (default: 10000)
    /// - `CACHE_CLEANUP_INTERVAL` (default: 60)
    /// - `CACHE_UPDATE_POLICY` - `refresh` or `invalidate` (default: refresh)
    /// - `REQUEST_TIMEOUT_SECS` (default: 30)
    /// - `BODY_LIMIT_BYTES` (default: 2 MiB)
    /// - `METRICS_ENABLED` (default: true)
    /// - `LOG_FORMAT` - `pretty` or `json` (default: pretty)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            server_port: env_or("SERVER_PORT", defaults.server_port),
            database_url: env::var("DATABASE_URL")
                .ok()
                .filter(|v| !v.trim().is_empty())
                .unwrap_or(defaults.database_url),
            database_max_connections: env_or(
                "DATABASE_MAX_CONNECTIONS",
                defaults.database_max_connections,
            ),
            database_max_lifetime: env_or(
                "DATABASE_MAX_LIFETIME_SECS",
                defaults.database_max_lifetime,
            ),
            database_idle_timeout: env_or(
                "DATABASE_IDLE_TIMEOUT_SECS",
                defaults.database_idle_timeout,
            ),
            redis_url: env::var("REDIS_URL")
                .ok()
                .filter(|v| !v.trim().is_empty()),
            cache_ttl: env_or("CACHE_TTL", defaults.cache_ttl).min(MAX_CACHE_TTL_SECS),
            cache_max_entries: env_or("CACHE_MAX_ENTRIES", defaults.cache_max_entries),
            cache_cleanup_interval: env_or(
                "CACHE_CLEANUP_INTERVAL",
                defaults.cache_cleanup_interval,
            ),
            cache_update_policy: env_or("CACHE_UPDATE_POLICY", defaults.cache_update_policy),
            request_timeout: env_or("REQUEST_TIMEOUT_SECS", defaults.request_timeout),
            body_limit: env_or("BODY_LIMIT_BYTES", defaults.body_limit),
            metrics_enabled: env_or("METRICS_ENABLED", defaults.metrics_enabled),
            log_format: env_or("LOG_FORMAT", defaults.log_format),
        }
    }

    /// Pool settings for the entity store.
    pub fn database_settings(&self) -> DatabaseSettings {
        DatabaseSettings {
            url: self.database_url.clone(),
            max_connections: self.database_max_connections.max(1),
            max_lifetime: seconds(self.database_max_lifetime),
            idle_timeout: seconds(self.database_idle_timeout),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_port: 5000,
            database_url: "sqlite://currencies.db".to_string(),
            database_max_connections: 5,
            database_max_lifetime: 1800,
            database_idle_timeout: 600,
            redis_url: None,
            cache_ttl: DEFAULT_CACHE_TTL_SECS,
            cache_max_entries: 10_000,
            cache_cleanup_interval: 60,
            cache_update_policy: CacheUpdatePolicy::Refresh,
            request_timeout: 30,
            body_limit: 2 * 1024 * 1024,
            metrics_enabled: true,
            log_format: LogFormat::Pretty,
        }
    }
}

/// Parses `name` from the environment, keeping `default` when unset or invalid.
fn env_or<T: FromStr>(name: &str, default: T) -> T {
    env::var(name)
        .ok()
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}

fn seconds(value: u64) -> Option<Duration> {
    (value > 0).then(|| Duration::from_secs(value))
}
