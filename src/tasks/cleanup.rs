//! TTL Cleanup Task
//!
//! Background task that periodically removes expired entries from the
//! in-memory cache. Reads already ignore expired entries; the sweep only
//! reclaims memory held by keys nobody asks for again.

use std::sync::Arc;
use std::time::Duration;

use metrics::gauge;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::cache::CacheStore;

/// Spawns a task that purges expired entries every `cleanup_interval_secs`
/// seconds and publishes the `currency_cache_entries` gauge.
///
/// The returned handle is aborted on shutdown.
pub fn spawn_cleanup_task(
    store: Arc<RwLock<CacheStore>>,
    cleanup_interval_secs: u64,
) -> JoinHandle<()> {
    let interval = Duration::from_secs(cleanup_interval_secs.max(1));

    tokio::spawn(async move {
        info!(
            "Starting cache cleanup task with interval of {} seconds",
            interval.as_secs()
        );

        loop {
            tokio::time::sleep(interval).await;

            let (removed, remaining) = {
                let mut guard = store.write().await;
                let removed = guard.purge_expired();
                (removed, guard.len())
            };
            gauge!("currency_cache_entries").set(remaining as f64);

            if removed > 0 {
                info!("Cache cleanup: removed {} expired entries", removed);
            } else {
                debug!("Cache cleanup: no expired entries found");
            }
        }
    })
}
