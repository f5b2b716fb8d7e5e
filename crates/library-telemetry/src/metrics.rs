//! Prometheus metrics for the library node.
//!
//! All metrics follow the naming convention: `library_<area>_<metric>_<unit>`
//!
//! ## Metric Types
//!
//! - **Counter**: Monotonically increasing value (e.g., loan_operations_total)
//! - **Gauge**: Value that can go up or down (e.g., loans_open)
//! - **Histogram**: Distribution of values (e.g., http_request_duration_seconds)

use lazy_static::lazy_static;
use prometheus::{
    exponential_buckets, Counter, CounterVec, Encoder, Gauge, HistogramOpts, HistogramVec, Opts,
    Registry, TextEncoder,
};

use crate::TelemetryError;

lazy_static! {
    /// Global metrics registry
    pub static ref REGISTRY: Registry = Registry::new();

    // =========================================================================
    // HTTP
    // =========================================================================

    /// Requests served, by method and status code
    pub static ref HTTP_REQUESTS: CounterVec = CounterVec::new(
        Opts::new("library_http_requests_total", "HTTP requests served"),
        &["method", "status"]
    ).expect("metric creation failed");

    /// Request latency
    pub static ref HTTP_REQUEST_DURATION: HistogramVec = HistogramVec::new(
        HistogramOpts::new(
            "library_http_request_duration_seconds",
            "Time spent serving HTTP requests"
        ).buckets(exponential_buckets(0.0005, 2.0, 16).expect("valid buckets")),
        &["method"]
    ).expect("metric creation failed");

    /// Requests refused before reaching a handler
    pub static ref HTTP_REJECTIONS: CounterVec = CounterVec::new(
        Opts::new("library_http_rejections_total", "Requests refused by middleware"),
        &["reason"]  // reason: forbidden/rate_limited/timeout
    ).expect("metric creation failed");

    // =========================================================================
    // IDENTITY
    // =========================================================================

    /// Successful registrations
    pub static ref USERS_REGISTERED: Counter = Counter::new(
        "library_users_registered_total",
        "Users created through registration"
    ).expect("metric creation failed");

    /// Login attempts by outcome
    pub static ref LOGINS: CounterVec = CounterVec::new(
        Opts::new("library_logins_total", "Login attempts"),
        &["outcome"]  // outcome: ok/unauthorized/internal
    ).expect("metric creation failed");

    // =========================================================================
    // CATALOG AND LENDING
    // =========================================================================

    /// Books added to the catalog
    pub static ref BOOKS_CREATED: Counter = Counter::new(
        "library_books_created_total",
        "Books added to the catalog"
    ).expect("metric creation failed");

    /// Borrow and return attempts by outcome
    pub static ref LOAN_OPERATIONS: CounterVec = CounterVec::new(
        Opts::new("library_loan_operations_total", "Borrow and return attempts"),
        &["operation", "outcome"]  // operation: borrow/return, outcome: ok or error kind
    ).expect("metric creation failed");

    /// Loans currently out
    pub static ref OPEN_LOANS: Gauge = Gauge::new(
        "library_loans_open",
        "Transactions without a return timestamp"
    ).expect("metric creation failed");
}

fn collectors() -> Vec<Box<dyn prometheus::core::Collector>> {
    vec![
        Box::new(HTTP_REQUESTS.clone()),
        Box::new(HTTP_REQUEST_DURATION.clone()),
        Box::new(HTTP_REJECTIONS.clone()),
        Box::new(USERS_REGISTERED.clone()),
        Box::new(LOGINS.clone()),
        Box::new(BOOKS_CREATED.clone()),
        Box::new(LOAN_OPERATIONS.clone()),
        Box::new(OPEN_LOANS.clone()),
    ]
}

/// Register all metrics with the global registry.
///
/// Safe to call more than once; metrics already registered are skipped.
pub fn register_metrics() -> Result<(), TelemetryError> {
    for metric in collectors() {
        match REGISTRY.register(metric) {
            Ok(()) | Err(prometheus::Error::AlreadyReg) => {}
            Err(e) => return Err(TelemetryError::MetricsInit(e.to_string())),
        }
    }
    Ok(())
}

/// Encode all metrics as Prometheus text format.
pub fn encode_metrics() -> Result<String, TelemetryError> {
    let encoder = TextEncoder::new();
    let metric_families = REGISTRY.gather();
    let mut buffer = Vec::new();
    encoder
        .encode(&metric_families, &mut buffer)
        .map_err(|e| TelemetryError::MetricsInit(e.to_string()))?;
    String::from_utf8(buffer).map_err(|e| TelemetryError::MetricsInit(e.to_string()))
}

/// Content type of [`encode_metrics`] output.
pub fn metrics_content_type() -> String {
    TextEncoder::new().format_type().to_string()
}
