//! # Domain Errors
//!
//! Error types for the lending workflow.

use shared_types::{ErrorKind, StoreError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LendingError {
    #[error("{0}")]
    Validation(String),

    #[error("admin role required")]
    AdminRequired,

    #[error("User not found")]
    UserNotFound(String),

    #[error("Book not found")]
    BookNotFound(String),

    /// Zero available copies, observed or lost in a race.
    #[error("No available copies of the book so unable to borrow")]
    Unavailable { book: String },

    /// Every copy is on the shelf.
    #[error("Unable to return")]
    NothingToReturn { book: String },

    /// A copy is out but the ledger has no open loan for this pair.
    #[error("no open loan of this book for this user")]
    NoOpenLoan { user: String, book: String },

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl LendingError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            LendingError::Validation(_) => ErrorKind::Validation,
            LendingError::AdminRequired => ErrorKind::Forbidden,
            LendingError::UserNotFound(_) | LendingError::BookNotFound(_) => ErrorKind::NotFound,
            LendingError::Unavailable { .. } => ErrorKind::Unavailable,
            LendingError::NothingToReturn { .. } => ErrorKind::NothingToReturn,
            LendingError::NoOpenLoan { .. } => ErrorKind::Inconsistent,
            LendingError::Store(e) => e.kind(),
        }
    }

    /// Short label for metrics.
    pub fn label(&self) -> &'static str {
        self.kind().as_str()
    }
}
