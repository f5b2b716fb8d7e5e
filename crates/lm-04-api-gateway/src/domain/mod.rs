//! Domain types for the API Gateway: configuration and the error envelope.

pub mod config;
pub mod error;

pub use config::{
    ConfigError, CorsConfig, GatewayConfig, HttpConfig, LimitsConfig, RateLimitConfig,
    TimeoutConfig,
};
pub use error::{
    status_for, ApiError, ApiResult, ErrorBody, ErrorEnvelope, GatewayError, INTERNAL_MESSAGE,
};
