//! HTTP middleware
//!
//! Request metrics, the error envelope for responses produced outside the
//! handlers, and the trace span / panic response helpers used by the router.

use std::any::Any;
use std::time::Instant;

use axum::{
    body::Body,
    extract::{MatchedPath, Request},
    http::{
        header::{CONTENT_LENGTH, CONTENT_TYPE},
        StatusCode,
    },
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use metrics::{counter, histogram};
use tracing::Span;

use crate::models::ErrorResponse;

pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Rewrites error responses that do not carry a JSON body into the standard
/// envelope.
///
/// Covers what never reaches a handler: request timeouts (408), oversized
/// bodies (413), unknown routes (404) and unsupported methods (405).
/// Headers such as `allow` are kept.
pub async fn error_envelope(response: Response) -> Response {
    let status = response.status();
    if !(status.is_client_error() || status.is_server_error()) || is_json(&response) {
        return response;
    }

    let message = status
        .canonical_reason()
        .unwrap_or("request failed")
        .to_lowercase();
    let (parts, _) = response.into_parts();

    let mut envelope = (
        status,
        Json(ErrorResponse::new(status.as_u16(), message, None)),
    )
        .into_response();
    for (name, value) in parts.headers.iter() {
        if name != CONTENT_TYPE && name != CONTENT_LENGTH {
            envelope.headers_mut().append(name.clone(), value.clone());
        }
    }
    envelope
}

fn is_json(response: &Response) -> bool {
    response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.starts_with("application/json"))
}

/// Records `http_requests_total` and `http_request_duration_seconds`,
/// labelled by method, matched route and status.
pub async fn track_metrics(request: Request, next: Next) -> Response {
    let start = Instant::now();
    let path = request
        .extensions()
        .get::<MatchedPath>()
        .map(|p| p.as_str().to_owned())
        .unwrap_or_else(|| request.uri().path().to_owned());
    let method = request.method().to_string();

    let response = next.run(request).await;

    let labels = [
        ("method", method),
        ("path", path),
        ("status", response.status().as_u16().to_string()),
    ];
    counter!("http_requests_total", &labels).increment(1);
    histogram!("http_request_duration_seconds", &labels).record(start.elapsed().as_secs_f64());

    response
}

/// Span for one HTTP request, tagged with its request id.
pub fn request_span(request: &axum::http::Request<Body>) -> Span {
    let request_id = request
        .headers()
        .get(REQUEST_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("-");
    tracing::info_span!(
        "http_request",
        method = %request.method(),
        uri = %request.uri(),
        request_id = %request_id,
    )
}

/// Converts a handler panic into the standard 500 envelope.
pub fn panic_response(_err: Box<dyn Any + Send + 'static>) -> Response {
    tracing::error!("handler panicked");
    let status = StatusCode::INTERNAL_SERVER_ERROR;
    (
        status,
        Json(ErrorResponse::new(
            status.as_u16(),
            "internal server error",
            None,
        )),
    )
        .into_response()
}
