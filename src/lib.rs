//! Currency API - a currency CRUD service with a cache-aside layer
//!
//! Currencies live in a relational entity store (SQLite via sqlx). Read
//! projections are cached in Redis, or in an in-process TTL/LRU cache when
//! no Redis server is configured.

pub mod api;
pub mod cache;
pub mod config;
pub mod currency;
pub mod error;
pub mod models;
pub mod repository;
pub mod tasks;
pub mod telemetry;

pub use api::{create_router, AppState, RouterConfig};
pub use config::Config;
pub use currency::CurrencyService;
pub use error::{Result, ServiceError};
pub use tasks::spawn_cleanup_task;
