//! Unauthenticated service endpoints.

use axum::{http::header, response::IntoResponse, Json};
use library_telemetry::{encode_metrics, metrics_content_type};
use serde_json::{json, Value};

use crate::domain::{ApiError, ApiResult};

/// `GET /`
pub async fn welcome() -> &'static str {
    "welcome!"
}

/// `GET /health`
pub async fn health() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": crate::VERSION,
    }))
}

/// `GET /metrics`
pub async fn metrics() -> ApiResult<impl IntoResponse> {
    let body = encode_metrics()?;
    Ok(([(header::CONTENT_TYPE, metrics_content_type())], body))
}

/// Any path no route matches.
pub async fn not_found() -> ApiError {
    ApiError::not_found("Route not found")
}
