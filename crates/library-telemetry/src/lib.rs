//! # Library Telemetry
//!
//! Observability for the library node.
//!
//! ## Components
//!
//! - **Logs**: `tracing` events rendered by `tracing-subscriber`, pretty in
//!   development and JSON in containers
//! - **Traces**: optional OpenTelemetry export over OTLP
//! - **Metrics**: Prometheus counters and histograms served by the gateway
//!   on `GET /metrics`
//!
//! ## Usage
//!
//! ```rust,ignore
//! use library_telemetry::{init_telemetry, TelemetryConfig};
//!
//! #[tokio::main]
//! async fn main() {
//!     let config = TelemetryConfig::from_env();
//!     let _guard = init_telemetry(config).await.expect("telemetry");
//!     // Spans, logs and metrics are now being collected
//! }
//! ```
//!
//! ## Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `OTEL_EXPORTER_OTLP_ENDPOINT` | unset | Collector endpoint; export is off when unset |
//! | `OTEL_SERVICE_NAME` | `library-node` | Service name in traces |
//! | `LIBRARY_LOG_LEVEL` | `info` | Log level filter |
//! | `LIBRARY_JSON_LOGS` | `false` (`true` in containers) | JSON log lines |

mod config;
mod metrics;
mod tracing_setup;

pub use config::TelemetryConfig;
pub use metrics::{
    encode_metrics, metrics_content_type, register_metrics, BOOKS_CREATED, HTTP_REJECTIONS,
    HTTP_REQUESTS, HTTP_REQUEST_DURATION, LOAN_OPERATIONS, LOGINS, OPEN_LOANS, REGISTRY,
    USERS_REGISTERED,
};
pub use tracing_setup::TracingGuard;

use thiserror::Error;

/// Telemetry initialization errors
#[derive(Error, Debug)]
pub enum TelemetryError {
    #[error("failed to initialize tracing: {0}")]
    TracerInit(String),

    #[error("failed to initialize Prometheus metrics: {0}")]
    MetricsInit(String),

    #[error("invalid telemetry configuration: {0}")]
    Config(String),
}

/// Initialize metrics and the global tracing subscriber.
///
/// Returns a guard that must be held for the lifetime of the application.
/// When dropped, it flushes pending spans.
pub async fn init_telemetry(config: TelemetryConfig) -> Result<TelemetryGuard, TelemetryError> {
    register_metrics()?;
    let tracing_guard = tracing_setup::init_tracing(&config).await?;

    Ok(TelemetryGuard {
        _tracing: tracing_guard,
    })
}

/// Guard that keeps telemetry active. Drop to flush and shut down.
pub struct TelemetryGuard {
    _tracing: TracingGuard,
}

impl Drop for TelemetryGuard {
    fn drop(&mut self) {
        tracing::info!("shutting down telemetry");
    }
}
