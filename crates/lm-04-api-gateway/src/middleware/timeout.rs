//! Timeout middleware.
//!
//! Bounds the time spent on one request; an expired request is answered with
//! the error envelope and `504 Gateway Timeout`.

use crate::domain::{ApiError, TimeoutConfig};
use axum::{
    body::Body,
    http::Request,
    response::{IntoResponse, Response},
};
use library_telemetry::HTTP_REJECTIONS;
use std::time::Duration;
use tokio::time::timeout;
use tower::{Layer, Service};
use tracing::warn;

/// Timeout layer
#[derive(Clone)]
pub struct TimeoutLayer {
    limit: Duration,
}

impl TimeoutLayer {
    pub fn new(config: &TimeoutConfig) -> Self {
        Self {
            limit: config.request,
        }
    }
}

impl<S> Layer<S> for TimeoutLayer {
    type Service = TimeoutService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        TimeoutService {
            inner,
            limit: self.limit,
        }
    }
}

/// Timeout service
#[derive(Clone)]
pub struct TimeoutService<S> {
    inner: S,
    limit: Duration,
}

impl<S> Service<Request<Body>> for TimeoutService<S>
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

    fn call(&mut self, req: Request<Body>) -> Self::Future {
        let limit = self.limit;
        let mut inner = self.inner.clone();

        Box::pin(async move {
            let path = req.uri().path().to_owned();
            match timeout(limit, inner.call(req)).await {
                Ok(result) => result,
                Err(_) => {
                    HTTP_REJECTIONS.with_label_values(&["timeout"]).inc();
                    warn!(path = %path, timeout_ms = limit.as_millis() as u64, "request timed out");
                    Ok(ApiError::timeout(limit).into_response())
                }
            }
        })
    }
}
