//! Request extractors that reject with the gateway's error envelope.

use axum::{
    async_trait,
    extract::{FromRequest, FromRequestParts},
    http::request::Parts,
};
use shared_types::Caller;

use crate::domain::ApiError;

/// `axum::Json` with [`ApiError`] as rejection.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct ApiJson<T>(pub T);

/// `axum::extract::Path` with [`ApiError`] as rejection.
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(ApiError))]
pub struct ApiPath<T>(pub T);

/// The caller the access gate authenticated for this request.
///
/// Only routes behind [`AccessGateLayer`](crate::middleware::AccessGateLayer)
/// can produce one; anywhere else extraction fails with `Forbidden`.
#[derive(Debug, Clone)]
pub struct CurrentCaller(pub Caller);

#[async_trait]
impl<S> FromRequestParts<S> for CurrentCaller
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Caller>()
            .cloned()
            .map(CurrentCaller)
            .ok_or_else(|| ApiError::forbidden("Forbidden"))
    }
}
