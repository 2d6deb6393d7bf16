//! HTTP routes over the lookup service.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use axum::{
    extract::{Extension, Query},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use metrics_exporter_prometheus::PrometheusHandle;
use serde::Deserialize;
use tokio_util::sync::CancellationToken;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, instrument, warn};

use storage::CacheStore;
use weather_common::{ForecastDays, WeatherError, WeatherResult};

use crate::lookup::WeatherLookupService;

const SERVICE_NAME: &str = "weather-api";

/// Shared state handed to every handler.
pub struct AppState {
    pub lookup: WeatherLookupService,
    pub store: Arc<dyn CacheStore>,
    pub prometheus: Option<PrometheusHandle>,
}

/// A [`WeatherError`] rendered as `{"error": "..."}` with its status code.
pub struct ApiError(pub WeatherError);

impl From<WeatherError> for ApiError {
    fn from(err: WeatherError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.0.http_status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        if status.is_client_error() {
            warn!(kind = self.0.kind(), error = %self.0, "Rejected request");
        }
        (
            status,
            Json(serde_json::json!({ "error": self.0.public_message() })),
        )
            .into_response()
    }
}

// ============================================================================
// Request parameters
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct CurrentParams {
    pub city: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ForecastParams {
    pub city: Option<String>,
    /// Kept as text so that non-numeric values get the JSON error body.
    #[serde(rename = "daysQuantity")]
    pub days_quantity: Option<String>,
}

fn required_city(city: Option<&str>) -> WeatherResult<&str> {
    match city.map(str::trim) {
        Some(c) if !c.is_empty() => Ok(c),
        _ => Err(WeatherError::MissingParameter("city".to_string())),
    }
}

fn forecast_days(days_quantity: Option<&str>) -> WeatherResult<ForecastDays> {
    let Some(requested) = days_quantity else {
        return Ok(ForecastDays::default());
    };

    requested
        .trim()
        .parse::<u8>()
        .map_err(|_| WeatherError::InvalidParameter {
            param: "daysQuantity".to_string(),
            message: "daysQuantity must be between 1 and 5.".to_string(),
        })
        .and_then(ForecastDays::new)
}

// ============================================================================
// Weather endpoints
// ============================================================================

/// GET /api/weather/current?city=
#[instrument(skip(state))]
pub async fn current_handler(
    Extension(state): Extension<Arc<AppState>>,
    Query(params): Query<CurrentParams>,
) -> Result<Response, ApiError> {
    let city = required_city(params.city.as_deref())?;
    let weather = state.lookup.current(city).await?;
    Ok(Json(weather).into_response())
}

/// GET /api/weather/forecast?city=&daysQuantity=
#[instrument(skip(state))]
pub async fn forecast_handler(
    Extension(state): Extension<Arc<AppState>>,
    Query(params): Query<ForecastParams>,
) -> Result<Response, ApiError> {
    let city = required_city(params.city.as_deref())?;
    let days = forecast_days(params.days_quantity.as_deref())?;
    let forecast = state.lookup.forecast(city, days).await?;
    Ok(Json(forecast).into_response())
}

/// GET /api/weather/history
#[instrument(skip(state))]
pub async fn history_handler(
    Extension(state): Extension<Arc<AppState>>,
) -> Result<Response, ApiError> {
    let history = state.lookup.search_history().await?;
    Ok(Json(history).into_response())
}

// ============================================================================
// Health and metrics
// ============================================================================

/// GET /health
pub async fn health_handler(Extension(state): Extension<Arc<AppState>>) -> Response {
    match state.store.count().await {
        Ok(cached_entries) => Json(serde_json::json!({
            "status": "ok",
            "service": SERVICE_NAME,
            "cached_entries": cached_entries,
        }))
        .into_response(),
        Err(e) => {
            warn!(error = %e, "Health check could not reach the cache store");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(serde_json::json!({
                    "status": "degraded",
                    "service": SERVICE_NAME,
                    "error": e.public_message(),
                })),
            )
                .into_response()
        }
    }
}

/// GET /metrics - Prometheus text exposition
pub async fn metrics_handler(Extension(state): Extension<Arc<AppState>>) -> Response {
    match &state.prometheus {
        Some(handle) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
            handle.render(),
        )
            .into_response(),
        None => (StatusCode::NOT_FOUND, "metrics recorder not installed").into_response(),
    }
}

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/weather/current", get(current_handler))
        .route("/api/weather/forecast", get(forecast_handler))
        .route("/api/weather/history", get(history_handler))
        .route("/health", get(health_handler))
        .route("/metrics", get(metrics_handler))
        .layer(Extension(state))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

/// Serve until `shutdown` is cancelled.
pub async fn serve(state: Arc<AppState>, listen: &str, shutdown: CancellationToken) -> Result<()> {
    let addr: SocketAddr = listen
        .parse()
        .with_context(|| format!("Invalid listen address '{}'", listen))?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    info!(address = %addr, "Weather API listening");

    axum::serve(listener, create_router(state))
        .with_graceful_shutdown(async move { shutdown.cancelled().await })
        .await
        .context("HTTP server failed")?;

    Ok(())
}
