//! # Domain Errors
//!
//! Error types for the Catalog Management subsystem.

use shared_types::{ErrorKind, QuantityError, StoreError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("{0}")]
    Validation(String),

    #[error("admin role required")]
    AdminRequired,

    #[error("Book not found")]
    BookNotFound(String),

    #[error("Book already exists")]
    DuplicateName(String),

    #[error("invalid quantity: {0}")]
    Quantity(#[from] QuantityError),

    #[error(transparent)]
    Store(StoreError),
}

impl CatalogError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            CatalogError::Validation(_) | CatalogError::Quantity(_) => ErrorKind::Validation,
            CatalogError::AdminRequired => ErrorKind::Forbidden,
            CatalogError::BookNotFound(_) => ErrorKind::NotFound,
            CatalogError::DuplicateName(_) => ErrorKind::Conflict,
            CatalogError::Store(e) => e.kind(),
        }
    }
}

impl From<StoreError> for CatalogError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound { key, .. } => CatalogError::BookNotFound(key),
            StoreError::Duplicate { key, .. } => CatalogError::DuplicateName(key),
            StoreError::Quantity(e) => CatalogError::Quantity(e),
            other => CatalogError::Store(other),
        }
    }
}
