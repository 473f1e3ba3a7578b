//! API Module
//!
//! HTTP handlers, routing and middleware for the currency REST API.
//!
//! # Endpoints
//! - `POST /currencies` - Create a currency
//! - `GET /currencies` - List currencies page by page
//! - `GET /currencies/:id` - Fetch one currency
//! - `PUT /currencies/:id` - Update a currency
//! - `DELETE /currencies/:id` - Delete a currency
//! - `GET /health` - Health check endpoint
//! - `GET /metrics` - Prometheus metrics

pub mod handlers;
pub mod middleware;
pub mod routes;

pub use handlers::*;
pub use routes::{create_router, RouterConfig};
