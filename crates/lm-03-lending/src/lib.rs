//! # Lending Subsystem (lm-03)
//!
//! The borrow/return workflow and the transaction ledger it writes to.
//!
//! ## Flow
//!
//! ```text
//! Borrow:  caller is admin? → user by email → book by name → available > 0?
//!          → take_copy (atomic, conditional) → ledger.insert(open transaction)
//!                                  └─ insert failed → restore_copy (compensate)
//!
//! Return:  user by email → book by name → available < total?
//!          → earliest open transaction for (user, book)
//!          → restore_copy (atomic, conditional) → ledger.close(transaction)
//!                                  └─ close failed → take_copy (compensate)
//! ```
//!
//! ## Domain Invariants
//!
//! | Invariant | Enforcement |
//! |-----------|-------------|
//! | `0 <= available <= total` | conditional counter moves in the catalog store |
//! | Open loans of a book == `total - available` | every counter move is paired with a ledger write, or compensated |
//! | `returned_at` is never cleared | `Transaction::mark_returned` refuses a second transition |
//! | Deterministic return target | earliest-borrowed open transaction is closed first |
//!
//! ## Hexagonal Architecture
//!
//! The catalog and the credential store belong to other subsystems; this crate
//! only sees them through the [`BookInventory`] and [`UserDirectory`] ports,
//! which the node runtime bridges to the real stores.

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod service;

#[cfg(test)]
pub(crate) mod testing;

pub use adapters::{InMemoryLedger, SystemClock};
pub use domain::{
    LendingError, LoanPolicy, LoanRequest, DEFAULT_LOAN_PERIOD_DAYS, MAX_LOAN_PERIOD_DAYS,
};
pub use ports::{BookInventory, Clock, LendingApi, TransactionLedger, UserDirectory};
pub use service::LendingService;
