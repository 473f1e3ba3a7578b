//! API Handlers
//!
//! HTTP request handlers for each endpoint. They parse input, call the
//! currency service and let `ServiceError` render failures.

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use metrics_exporter_prometheus::PrometheusHandle;
use tracing::info;

use crate::currency::CurrencyService;
use crate::error::{Result, ServiceError};
use crate::models::{
    CurrencyListResponse, CurrencyRequest, CurrencyResponse, HealthResponse, PageQuery,
    PageRequest,
};

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<CurrencyService>,
    /// Present when the Prometheus recorder is installed
    pub metrics: Option<PrometheusHandle>,
}

impl AppState {
    pub fn new(service: CurrencyService) -> Self {
        Self {
            service: Arc::new(service),
            metrics: None,
        }
    }

    pub fn with_metrics(mut self, handle: PrometheusHandle) -> Self {
        self.metrics = Some(handle);
        self
    }
}

fn parse_id(raw: &str) -> Result<i64> {
    raw.trim()
        .parse::<i64>()
        .ok()
        .filter(|id| *id > 0)
        .ok_or_else(|| ServiceError::BadRequest(format!("invalid currency id '{}'", raw)))
}

fn json_body<T>(payload: std::result::Result<Json<T>, JsonRejection>) -> Result<T> {
    payload
        .map(|Json(body)| body)
        .map_err(|rejection| ServiceError::BadRequest(rejection.body_text()))
}

/// Handler for POST /currencies
pub async fn create_currency(
    State(state): State<AppState>,
    payload: std::result::Result<Json<CurrencyRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<CurrencyResponse>)> {
    let request = json_body(payload)?;
    let created = state.service.create(request).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// Handler for PUT /currencies/:id
pub async fn update_currency(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: std::result::Result<Json<CurrencyRequest>, JsonRejection>,
) -> Result<Json<CurrencyResponse>> {
    let id = parse_id(&id)?;
    let request = json_body(payload)?;
    let updated = state.service.update(id, request).await?;
    Ok(Json(updated))
}

/// Handler for GET /currencies/:id
pub async fn get_currency(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<CurrencyResponse>> {
    let id = parse_id(&id)?;
    Ok(Json(state.service.get_by_id(id).await?))
}

/// Handler for DELETE /currencies/:id
pub async fn delete_currency(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode> {
    let id = parse_id(&id)?;
    state.service.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Handler for GET /currencies?page=&limit=&sort=
pub async fn list_currencies(
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
) -> Result<Json<CurrencyListResponse>> {
    let list = state.service.get_all(PageRequest::from(query)).await?;
    Ok(Json(list))
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    info!("Health check");
    Json(HealthResponse::ok())
}

/// Handler for GET /metrics
pub async fn metrics_handler(State(state): State<AppState>) -> Response {
    match &state.metrics {
        Some(handle) => (
            [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
            handle.render(),
        )
            .into_response(),
        None => ServiceError::NotFound("metrics are disabled".to_string()).into_response(),
    }
}
