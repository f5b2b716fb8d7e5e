//! # LM-04 API Gateway
//!
//! HTTP surface of the library backend: routes, the access gate, the error
//! envelope and the middleware stack.
//!
//! ## Architecture
//!
//! ```text
//! ┌───────────────────────────────────────────────────────────┐
//! │                    API GATEWAY (lm-04)                     │
//! ├───────────────────────────────────────────────────────────┤
//! │  CORS → Tracing → RateLimit → Timeout → BodyLimit          │
//! │                        │                                   │
//! │         ┌──────────────┴──────────────┐                    │
//! │      public routes            AccessGate → protected routes│
//! │                        │                                   │
//! │                handlers (users, books, library)            │
//! └────────────────────────┼──────────────────────────────────┘
//!                          │  AppState
//!        ┌─────────────────┼─────────────────┐
//!        ▼                 ▼                 ▼
//!   lm-01-identity   lm-02-catalog     lm-03-lending
//! ```
//!
//! ## Errors
//!
//! Every failure leaves the gateway as
//! `{"error": {"kind": "...", "message": "..."}}` with the status derived
//! from the kind. Internal failures are logged and answered with a generic
//! message.
//!
//! ## Usage
//!
//! ```ignore
//! use lm_04_api_gateway::{ApiGatewayService, AppState, GatewayConfig};
//!
//! let service = ApiGatewayService::new(GatewayConfig::default(), state)?;
//! let listener = service.bind().await?;
//! service.serve(listener, shutdown_signal()).await?;
//! ```

#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod adapters;
pub mod domain;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod service;
pub mod state;

pub use domain::{
    ApiError, ApiResult, ConfigError, CorsConfig, ErrorEnvelope, GatewayConfig, GatewayError,
    HttpConfig, LimitsConfig, RateLimitConfig, TimeoutConfig,
};
pub use router::build_router;
pub use service::ApiGatewayService;
pub use state::AppState;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
