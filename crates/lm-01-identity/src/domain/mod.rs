//! # Domain Layer
//!
//! Pure identity rules: input validation, token claims and error types.

pub mod config;
pub mod errors;
pub mod token;
pub mod validation;

pub use config::{IdentityConfig, DEFAULT_JWT_SECRET, MAX_TOKEN_TTL_SECS};
pub use errors::IdentityError;
pub use token::{TokenClaims, TokenIssuer};
pub use validation::{validate_email, validate_password, LoginResult, Registration};
