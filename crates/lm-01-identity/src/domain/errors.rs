//! # Domain Errors
//!
//! Error types for the Identity & Access subsystem.

use shared_types::{ErrorKind, StoreError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum IdentityError {
    /// Registration input rejected. The message is client-facing.
    #[error("{0}")]
    Validation(String),

    #[error("User already exists")]
    EmailTaken(String),

    /// Unknown email or wrong password; indistinguishable to the client.
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// Token missing, malformed, badly signed or expired.
    #[error("invalid or expired token")]
    InvalidToken(String),

    #[error("admin role required")]
    AdminRequired,

    #[error("User not found")]
    UserNotFound(String),

    #[error("password hashing failed: {0}")]
    Hashing(String),

    #[error("token signing failed: {0}")]
    Signing(String),

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl IdentityError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            IdentityError::Validation(_) => ErrorKind::Validation,
            IdentityError::EmailTaken(_) => ErrorKind::Conflict,
            IdentityError::InvalidCredentials => ErrorKind::Unauthorized,
            IdentityError::InvalidToken(_) | IdentityError::AdminRequired => ErrorKind::Forbidden,
            IdentityError::UserNotFound(_) => ErrorKind::NotFound,
            IdentityError::Hashing(_) | IdentityError::Signing(_) => ErrorKind::Internal,
            IdentityError::Store(e) => e.kind(),
        }
    }
}
