//! Error conversions from subsystem and framework error types.
//!
//! Subsystem errors carry their own [`ErrorKind`]; the message they display is
//! client-facing except for `Internal`, which is logged here and replaced by
//! a generic message.

use axum::extract::rejection::{JsonRejection, PathRejection};
use library_telemetry::TelemetryError;
use lm_01_identity::IdentityError;
use lm_02_catalog::CatalogError;
use lm_03_lending::LendingError;
use shared_types::ErrorKind;
use tracing::error;

use crate::domain::ApiError;

fn from_domain(kind: ErrorKind, err: &dyn std::error::Error) -> ApiError {
    if kind == ErrorKind::Internal {
        error!(error = %err, error.debug = ?err, "request failed with an internal error");
        return ApiError::internal();
    }
    ApiError::new(kind, err.to_string())
}

impl From<IdentityError> for ApiError {
    fn from(e: IdentityError) -> Self {
        from_domain(e.kind(), &e)
    }
}

impl From<CatalogError> for ApiError {
    fn from(e: CatalogError) -> Self {
        from_domain(e.kind(), &e)
    }
}

impl From<LendingError> for ApiError {
    fn from(e: LendingError) -> Self {
        from_domain(e.kind(), &e)
    }
}

impl From<TelemetryError> for ApiError {
    fn from(e: TelemetryError) -> Self {
        from_domain(ErrorKind::Internal, &e)
    }
}

/// Unparseable or oversized JSON bodies.
impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::validation(rejection.body_text())
    }
}

/// Path segments that do not parse, such as a malformed id.
impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        ApiError::validation(rejection.body_text())
    }
}
