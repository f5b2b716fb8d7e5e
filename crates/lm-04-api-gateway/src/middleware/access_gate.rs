//! Access gate middleware.
//!
//! Verifies the bearer token on every protected route and attaches the
//! derived [`Caller`] to the request extensions. Role checks happen later, in
//! the subsystem that owns the operation.

use axum::{
    body::Body,
    http::{header, Request},
    response::{IntoResponse, Response},
};
use library_telemetry::HTTP_REJECTIONS;
use lm_01_identity::IdentityApi;
use shared_types::Caller;
use std::sync::Arc;
use tower::{Layer, Service};
use tracing::{debug, warn};

use crate::domain::ApiError;

/// Access gate layer
#[derive(Clone)]
pub struct AccessGateLayer {
    identity: Arc<dyn IdentityApi>,
}

impl AccessGateLayer {
    pub fn new(identity: Arc<dyn IdentityApi>) -> Self {
        Self { identity }
    }
}

impl<S> Layer<S> for AccessGateLayer {
    type Service = AccessGateService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        AccessGateService {
            inner,
            identity: Arc::clone(&self.identity),
        }
    }
}

/// Access gate service
#[derive(Clone)]
pub struct AccessGateService<S> {
    inner: S,
    identity: Arc<dyn IdentityApi>,
}

impl<S> Service<Request<Body>> for AccessGateService<S>
where
    S: Service<Request<Body>, Response = Response> + Clone + Send + 'static,
    S::Future: Send,
{
    type Response = Response;
    type Error = S::Error;
    type Future = std::pin::Pin<
        Box<dyn std::future::Future<Output = Result<Self::Response, Self::Error>> + Send>,
    >;

    fn poll_ready(
        &mut self,
        cx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, mut req: Request<Body>) -> Self::Future {
        let identity = Arc::clone(&self.identity);
        let mut inner = self.inner.clone();

        Box::pin(async move {
            match authenticate(&req, identity.as_ref()) {
                Ok(caller) => {
                    debug!(
                        user_id = %caller.user_id,
                        role = %caller.role,
                        "caller authenticated"
                    );
                    req.extensions_mut().insert(caller);
                    inner.call(req).await
                }
                Err(err) => {
                    HTTP_REJECTIONS.with_label_values(&["forbidden"]).inc();
                    warn!(
                        path = %req.uri().path(),
                        reason = %err.message,
                        "request rejected by access gate"
                    );
                    Ok(err.into_response())
                }
            }
        })
    }
}

fn authenticate<B>(req: &Request<B>, identity: &dyn IdentityApi) -> Result<Caller, ApiError> {
    let token = bearer_token(req).ok_or_else(|| ApiError::forbidden("Forbidden"))?;
    identity.authenticate(token).map_err(ApiError::from)
}

/// Token from `Authorization: Bearer <token>`.
fn bearer_token<B>(req: &Request<B>) -> Option<&str> {
    let value = req.headers().get(header::AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.trim().split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("bearer") {
        return None;
    }
    let token = token.trim();
    (!token.is_empty()).then_some(token)
}
