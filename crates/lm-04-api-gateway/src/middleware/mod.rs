//! Middleware stack for the API Gateway.
//!
//! Layer order (outermost first):
//! Request → CORS → Tracing → RateLimit → Timeout → BodyLimit → AccessGate (protected routes) → Handler

pub mod access_gate;
pub mod cors;
pub mod rate_limit;
pub mod timeout;
pub mod tracing;

pub use access_gate::AccessGateLayer;
pub use cors::create_cors_layer;
pub use rate_limit::{cleanup_task, RateLimitLayer, RateLimitState};
pub use timeout::TimeoutLayer;
pub use tracing::TracingLayer;
