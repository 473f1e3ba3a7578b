//! API Routes
//!
//! Configures the Axum router with all endpoints and the middleware stack.

use std::time::Duration;

use axum::{
    http::{HeaderName, HeaderValue, StatusCode},
    middleware,
    routing::get,
    Router,
};
use tower_http::{
    catch_panic::CatchPanicLayer,
    cors::{Any, CorsLayer},
    limit::RequestBodyLimitLayer,
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    set_header::SetResponseHeaderLayer,
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use super::handlers::{
    create_currency, delete_currency, get_currency, health_handler, list_currencies,
    metrics_handler, update_currency, AppState,
};
use super::middleware::{error_envelope, panic_response, request_span, track_metrics};
use crate::config::Config;

/// Limits applied to every request.
#[derive(Debug, Clone)]
pub struct RouterConfig {
    pub body_limit: usize,
    pub request_timeout: Duration,
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            body_limit: 2 * 1024 * 1024,
            request_timeout: Duration::from_secs(30),
        }
    }
}

impl From<&Config> for RouterConfig {
    fn from(config: &Config) -> Self {
        Self {
            body_limit: config.body_limit,
            request_timeout: Duration::from_secs(config.request_timeout.max(1)),
        }
    }
}

/// Creates the main router with all endpoints configured.
///
/// # Middleware (outermost first)
/// - Request id: generates `x-request-id` when absent and echoes it back
/// - Tracing: one span per request carrying the request id
/// - Security headers: nosniff, frame options, XSS protection
/// - CORS: allows any origin
/// - Error envelope: timeouts, oversized bodies, unknown routes and methods
/// - Body limit and request timeout
/// - Panic catching: panics become a 500 envelope
/// - Metrics: per-route request counters and latency histograms
pub fn create_router(state: AppState, config: &RouterConfig) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/currencies", get(list_currencies).post(create_currency))
        .route(
            "/currencies/:id",
            get(get_currency).put(update_currency).delete(delete_currency),
        )
        .route("/health", get(health_handler))
        .route("/metrics", get(metrics_handler))
        .fallback(not_found)
        .route_layer(middleware::from_fn(track_metrics))
        .layer(CatchPanicLayer::custom(panic_response))
        .layer(TimeoutLayer::new(config.request_timeout))
        .layer(RequestBodyLimitLayer::new(config.body_limit))
        .layer(middleware::map_response(error_envelope))
        .layer(cors)
        .layer(security_header("x-content-type-options", "nosniff"))
        .layer(security_header("x-frame-options", "SAMEORIGIN"))
        .layer(security_header("x-xss-protection", "1; mode=block"))
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(TraceLayer::new_for_http().make_span_with(request_span))
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .with_state(state)
}

fn security_header(name: &'static str, value: &'static str) -> SetResponseHeaderLayer<HeaderValue> {
    SetResponseHeaderLayer::if_not_present(
        HeaderName::from_static(name),
        HeaderValue::from_static(value),
    )
}

async fn not_found() -> StatusCode {
    StatusCode::NOT_FOUND
}
