//! Adapters for the API Gateway.
//!
//! Framework glue: extractors and conversions into the error envelope.

pub mod error_conversions;
pub mod extract;

pub use extract::{ApiJson, ApiPath, CurrentCaller};
