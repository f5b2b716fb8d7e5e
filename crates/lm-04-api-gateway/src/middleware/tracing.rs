//! Request tracing middleware.
//!
//! Runs every request inside an `api_request` span and records the
//! per-request Prometheus counters.

use axum::{body::Body, http::Request, response::Response};
use library_telemetry::{HTTP_REQUESTS, HTTP_REQUEST_DURATION};
use std::task::{Context, Poll};
use tower::{Layer, Service};
use tracing::{info, info_span, warn, Instrument, Span};

/// Tracing layer that creates spans for each request
#[derive(Clone, Default)]
pub struct TracingLayer;

impl TracingLayer {
    pub fn new() -> Self {
        Self
    }
}

impl<S> Layer<S> for TracingLayer {
    type Service = TracingService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        TracingService { inner }
    }
}

/// Tracing service
#[derive(Clone)]
pub struct TracingService<S> {
    inner: S,
}

impl<S> Service<Request<Body>> for TracingService<S>
where
    S: Service<Request<Body>, Response = Response> + Clone + Send + 'static,
    S::Future: Send,
{
    type Response = Response;
    type Error = S::Error;
    type Future = std::pin::Pin<
        Box<dyn std::future::Future<Output = Result<Self::Response, Self::Error>> + Send>,
    >;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, req: Request<Body>) -> Self::Future {
        let mut inner = self.inner.clone();

        let method = req.method().clone();
        let span = info_span!(
            "api_request",
            http.method = %method,
            http.target = %req.uri().path(),
            http.status_code = tracing::field::Empty,
            otel.kind = "server",
            otel.status_code = tracing::field::Empty,
        );

        Box::pin(
            async move {
                let timer = HTTP_REQUEST_DURATION
                    .with_label_values(&[method.as_str()])
                    .start_timer();
                let result = inner.call(req).await;
                let elapsed = timer.stop_and_record();

                if let Ok(response) = &result {
                    let status = response.status();
                    let span = Span::current();
                    span.record("http.status_code", status.as_u16());
                    span.record(
                        "otel.status_code",
                        if status.is_server_error() { "ERROR" } else { "OK" },
                    );
                    HTTP_REQUESTS
                        .with_label_values(&[method.as_str(), status.as_str()])
                        .inc();

                    let elapsed_ms = (elapsed * 1000.0) as u64;
                    if status.is_server_error() {
                        warn!(status = status.as_u16(), elapsed_ms, "request failed");
                    } else {
                        info!(status = status.as_u16(), elapsed_ms, "request served");
                    }
                }

                result
            }
            .instrument(span),
        )
    }
}
