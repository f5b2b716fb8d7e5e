//! # Error Types
//!
//! Defines the error vocabulary shared across subsystems.
//!
//! Every subsystem error exposes a `kind()` mapping onto [`ErrorKind`], which
//! is the only thing the API gateway needs to pick a status code.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use crate::entities::{BookId, TransactionId};

/// Client-visible failure classes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// Missing or malformed input.
    Validation,
    /// No valid credential presented.
    Unauthorized,
    /// Credential valid but role insufficient.
    Forbidden,
    /// Referenced entity does not exist.
    NotFound,
    /// Uniqueness violation (email, book name).
    Conflict,
    /// Borrow attempted with zero available copies.
    Unavailable,
    /// Return attempted with no copies out.
    NothingToReturn,
    /// Counters disagree with the ledger.
    Inconsistent,
    RateLimited,
    Timeout,
    Internal,
}

impl ErrorKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorKind::Validation => "validation",
            ErrorKind::Unauthorized => "unauthorized",
            ErrorKind::Forbidden => "forbidden",
            ErrorKind::NotFound => "not_found",
            ErrorKind::Conflict => "conflict",
            ErrorKind::Unavailable => "unavailable",
            ErrorKind::NothingToReturn => "nothing_to_return",
            ErrorKind::Inconsistent => "inconsistent",
            ErrorKind::RateLimited => "rate_limited",
            ErrorKind::Timeout => "timeout",
            ErrorKind::Internal => "internal",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Rejected quantity arithmetic on a book.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QuantityError {
    #[error("total copies would become {resulting}")]
    NegativeTotal { resulting: i64 },

    #[error("available copies would become {resulting}")]
    NegativeAvailable { resulting: i64 },

    #[error("copy count exceeds supported range")]
    Overflow,
}

/// Rejected loan state transition.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LoanStateError {
    #[error("transaction {transaction_id} was already returned at {returned_at}")]
    AlreadyReturned {
        transaction_id: TransactionId,
        returned_at: DateTime<Utc>,
    },
}

/// Errors raised by the storage adapters behind the outbound ports.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("{entity} not found: {key}")]
    NotFound { entity: &'static str, key: String },

    #[error("{entity} already exists: {key}")]
    Duplicate { entity: &'static str, key: String },

    /// Conditional decrement refused: `available_copies` is zero.
    #[error("no copy of book {0} is available")]
    NoCopyAvailable(BookId),

    /// Conditional increment refused: `available_copies == total_copies`.
    #[error("no copy of book {0} is out")]
    NoOutstandingCopy(BookId),

    #[error(transparent)]
    Quantity(#[from] QuantityError),

    #[error(transparent)]
    LoanState(#[from] LoanStateError),

    #[error("storage backend failure: {0}")]
    Backend(String),
}

impl StoreError {
    pub fn not_found(entity: &'static str, key: impl ToString) -> Self {
        StoreError::NotFound {
            entity,
            key: key.to_string(),
        }
    }

    pub fn duplicate(entity: &'static str, key: impl ToString) -> Self {
        StoreError::Duplicate {
            entity,
            key: key.to_string(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            StoreError::NotFound { .. } => ErrorKind::NotFound,
            StoreError::Duplicate { .. } => ErrorKind::Conflict,
            StoreError::NoCopyAvailable(_) => ErrorKind::Unavailable,
            StoreError::NoOutstandingCopy(_) => ErrorKind::NothingToReturn,
            StoreError::Quantity(_) => ErrorKind::Validation,
            StoreError::LoanState(_) => ErrorKind::Inconsistent,
            StoreError::Backend(_) => ErrorKind::Internal,
        }
    }
}
