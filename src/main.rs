//! Currency API server
//!
//! # Startup Sequence
//! 1. Load `.env` and configuration from environment variables
//! 2. Initialize tracing and, when enabled, the Prometheus recorder
//! 3. Open the entity store and the cache store
//! 4. Build the currency service and the Axum router
//! 5. Serve HTTP until SIGINT/SIGTERM, then shut down gracefully

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use tokio::signal;
use tokio::task::JoinHandle;
use tracing::{info, warn};

use currency_api::currency::{CurrencyService, CurrencyValidator};
use currency_api::repository::{
    CurrencyCache, MemoryCurrencyCache, RedisCurrencyCache, SqliteCurrencyRepository,
};
use currency_api::telemetry::{init_tracing, install_metrics_recorder};
use currency_api::{create_router, spawn_cleanup_task, AppState, Config, RouterConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let dotenv_loaded = dotenvy::dotenv().is_ok();
    let config = Config::from_env();
    init_tracing(config.log_format);

    info!("Starting Currency API");
    if dotenv_loaded {
        info!("Loaded environment variables from .env file");
    } else {
        info!("No .env file found, using system environment variables");
    }
    info!(
        "Configuration loaded: port={}, database={}, cache_ttl={}s, update_policy={:?}",
        config.server_port, config.database_url, config.cache_ttl, config.cache_update_policy
    );

    let repository = SqliteCurrencyRepository::connect(&config.database_settings())
        .await
        .context("Failed to open the currency database")?;

    let mut cleanup_handle = None;
    let cache: Arc<dyn CurrencyCache> = match &config.redis_url {
        Some(url) => {
            info!("Connecting to Redis...");
            let cache = RedisCurrencyCache::connect(url)
                .await
                .context("Failed to connect to Redis")?;
            Arc::new(cache)
        }
        None => {
            let cache = MemoryCurrencyCache::new(config.cache_max_entries);
            cleanup_handle = Some(spawn_cleanup_task(
                cache.store(),
                config.cache_cleanup_interval,
            ));
            info!(
                "Using in-memory cache: max_entries={}, cleanup_interval={}s",
                config.cache_max_entries, config.cache_cleanup_interval
            );
            Arc::new(cache)
        }
    };

    let service = CurrencyService::new(Arc::new(repository), cache, CurrencyValidator::default())
        .with_cache_ttl(config.cache_ttl)
        .with_update_policy(config.cache_update_policy);

    let mut state = AppState::new(service);
    if config.metrics_enabled {
        let handle = install_metrics_recorder().context("Failed to install metrics recorder")?;
        state = state.with_metrics(handle);
        info!("Metrics available at /metrics");
    }

    let app = create_router(state, &RouterConfig::from(&config));

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server_port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    info!("Server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(cleanup_handle))
        .await
        .context("HTTP server error")?;

    info!("Server shutdown complete");
    Ok(())
}

/// Waits for shutdown signal (Ctrl+C or SIGTERM), then stops background tasks.
async fn shutdown_signal(cleanup_handle: Option<JoinHandle<()>>) {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, initiating shutdown...");
        }
        _ = terminate => {
            info!("Received SIGTERM, initiating shutdown...");
        }
    }

    if let Some(handle) = cleanup_handle {
        handle.abort();
        warn!("Cache cleanup task aborted");
    }
}
