//! # Domain Layer
//!
//! Loan policy, request shape and errors. The `Transaction` entity and its
//! one-way state machine live in `shared-types`.

pub mod errors;
pub mod policy;

pub use errors::LendingError;
pub use policy::{LoanPolicy, LoanRequest, DEFAULT_LOAN_PERIOD_DAYS, MAX_LOAN_PERIOD_DAYS};
