//! Telemetry configuration from environment variables.

use std::env;

/// Configuration for logging, tracing export and metrics.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    /// Service name attached to spans and log lines
    pub service_name: String,

    /// OTLP collector endpoint. `None` keeps tracing local.
    pub otlp_endpoint: Option<String>,

    /// Log level filter (trace, debug, info, warn, error) or a full
    /// `EnvFilter` directive
    pub log_level: String,

    /// Whether to print log lines at all
    pub console_output: bool,

    /// JSON log lines instead of the human-readable format
    pub json_logs: bool,

    /// Deployment environment label (dev, staging, prod)
    pub environment: String,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            service_name: "library-node".to_string(),
            otlp_endpoint: None,
            log_level: "info".to_string(),
            console_output: true,
            json_logs: false,
            environment: "dev".to_string(),
        }
    }
}

impl TelemetryConfig {
    /// Create configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `OTEL_SERVICE_NAME`: Service name (default: library-node)
    /// - `OTEL_EXPORTER_OTLP_ENDPOINT`: collector endpoint (default: unset, no export)
    /// - `LIBRARY_LOG_LEVEL` or `RUST_LOG`: Log level (default: info)
    /// - `LIBRARY_CONSOLE_OUTPUT`: Enable console output (default: true)
    /// - `LIBRARY_JSON_LOGS`: Enable JSON logs (default: false in dev, true in containers)
    /// - `LIBRARY_ENVIRONMENT`: Environment label (default: dev)
    pub fn from_env() -> Self {
        let is_container =
            env::var("KUBERNETES_SERVICE_HOST").is_ok() || env::var("DOCKER_CONTAINER").is_ok();

        Self {
            service_name: env::var("OTEL_SERVICE_NAME")
                .unwrap_or_else(|_| "library-node".to_string()),

            otlp_endpoint: env::var("OTEL_EXPORTER_OTLP_ENDPOINT")
                .ok()
                .filter(|v| !v.trim().is_empty()),

            log_level: env::var("LIBRARY_LOG_LEVEL")
                .or_else(|_| env::var("RUST_LOG"))
                .unwrap_or_else(|_| "info".to_string()),

            console_output: env::var("LIBRARY_CONSOLE_OUTPUT")
                .map(|v| parse_flag(&v))
                .unwrap_or(true),

            json_logs: env::var("LIBRARY_JSON_LOGS")
                .map(|v| parse_flag(&v))
                .unwrap_or(is_container),

            environment: env::var("LIBRARY_ENVIRONMENT").unwrap_or_else(|_| "dev".to_string()),
        }
    }

    pub fn with_log_level(mut self, level: impl Into<String>) -> Self {
        self.log_level = level.into();
        self
    }

    pub fn exports_traces(&self) -> bool {
        self.otlp_endpoint.is_some()
    }
}

fn parse_flag(value: &str) -> bool {
    matches!(value.trim().to_lowercase().as_str(), "true" | "1" | "yes" | "on")
}
