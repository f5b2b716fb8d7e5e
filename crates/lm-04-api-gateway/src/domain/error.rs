//! Gateway error types and the fixed error envelope.
//!
//! Every failure leaves the gateway as
//!
//! ```json
//! { "error": { "kind": "not_found", "message": "Book not found" } }
//! ```
//!
//! with the HTTP status derived from the kind alone.

use axum::{
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use shared_types::ErrorKind;
use std::fmt;
use std::time::Duration;

/// Message shown for every `Internal` failure; details stay in the logs.
pub const INTERNAL_MESSAGE: &str = "Internal server error";

/// Client-facing error
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    pub kind: ErrorKind,
    pub message: String,
    /// Seconds until a rate-limited client may retry
    pub retry_after_secs: Option<u64>,
}

/// Wire shape of an error response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorEnvelope {
    pub error: ErrorBody,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub kind: ErrorKind,
    pub message: String,
}

impl ApiError {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            retry_after_secs: None,
        }
    }

    pub fn validation(details: impl Into<String>) -> Self {
        Self::new(ErrorKind::Validation, details)
    }

    /// Missing, malformed or rejected credential, or insufficient role
    pub fn forbidden(details: impl Into<String>) -> Self {
        Self::new(ErrorKind::Forbidden, details)
    }

    pub fn not_found(details: impl Into<String>) -> Self {
        Self::new(ErrorKind::NotFound, details)
    }

    /// Generic internal error. Log the cause before building this.
    pub fn internal() -> Self {
        Self::new(ErrorKind::Internal, INTERNAL_MESSAGE)
    }

    pub fn rate_limited(retry_after: Duration) -> Self {
        // Round up so a client never retries too early.
        let millis = retry_after.as_millis() as u64;
        Self {
            retry_after_secs: Some(millis.div_ceil(1000).max(1)),
            ..Self::new(ErrorKind::RateLimited, "Rate limit exceeded")
        }
    }

    pub fn timeout(limit: Duration) -> Self {
        Self::new(
            ErrorKind::Timeout,
            format!("Request exceeded {}ms timeout", limit.as_millis()),
        )
    }

    pub fn status(&self) -> StatusCode {
        status_for(self.kind)
    }

    pub fn envelope(&self) -> ErrorEnvelope {
        ErrorEnvelope {
            error: ErrorBody {
                kind: self.kind,
                message: self.message.clone(),
            },
        }
    }
}

/// HTTP status for each error kind.
pub fn status_for(kind: ErrorKind) -> StatusCode {
    match kind {
        ErrorKind::Validation => StatusCode::BAD_REQUEST,
        ErrorKind::Unauthorized => StatusCode::UNAUTHORIZED,
        ErrorKind::Forbidden => StatusCode::FORBIDDEN,
        ErrorKind::NotFound => StatusCode::NOT_FOUND,
        ErrorKind::Conflict
        | ErrorKind::Unavailable
        | ErrorKind::NothingToReturn
        | ErrorKind::Inconsistent => StatusCode::CONFLICT,
        ErrorKind::RateLimited => StatusCode::TOO_MANY_REQUESTS,
        ErrorKind::Timeout => StatusCode::GATEWAY_TIMEOUT,
        ErrorKind::Internal => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.kind, self.message)
    }
}

impl std::error::Error for ApiError {}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let mut response = (status, Json(self.envelope())).into_response();
        if let Some(secs) = self.retry_after_secs {
            response
                .headers_mut()
                .insert(header::RETRY_AFTER, HeaderValue::from(secs));
        }
        response
    }
}

/// Result type for handlers
pub type ApiResult<T> = Result<T, ApiError>;

/// Gateway-level errors (startup and serving, never sent to clients)
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),

    /// Server socket bind error
    #[error("server bind error: {0}")]
    Bind(String),

    /// Listener failed while serving
    #[error("server error: {0}")]
    Serve(String),

    /// Metrics registry could not be prepared
    #[error("telemetry error: {0}")]
    Telemetry(String),
}
