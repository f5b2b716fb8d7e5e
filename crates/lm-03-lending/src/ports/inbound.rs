//! # Inbound Ports (Driving Ports)
//!
//! Public API exposed by the lending subsystem.

use async_trait::async_trait;
use shared_types::{Caller, Transaction, TransactionDetails, UserId};

use crate::domain::{LendingError, LoanRequest};

#[async_trait]
pub trait LendingApi: Send + Sync {
    /// Lend one copy of a book to a user. Admin only.
    ///
    /// ## Preconditions (checked in order)
    ///
    /// 1. caller is admin, else `AdminRequired`
    /// 2. user exists, else `UserNotFound`
    /// 3. book exists, else `BookNotFound`
    /// 4. a copy is available, else `Unavailable`
    ///
    /// Returns the new open transaction.
    async fn borrow(&self, caller: &Caller, request: LoanRequest)
        -> Result<Transaction, LendingError>;

    /// Take a copy back from a user. Open to any authenticated caller.
    ///
    /// Closes the earliest-borrowed open transaction for the pair and
    /// returns it.
    async fn return_book(
        &self,
        caller: &Caller,
        request: LoanRequest,
    ) -> Result<Transaction, LendingError>;

    /// Every transaction of one user, joined, oldest first.
    async fn list_user_transactions(
        &self,
        user_id: UserId,
    ) -> Result<Vec<TransactionDetails>, LendingError>;

    /// Every transaction, joined, oldest first.
    async fn list_all_transactions(&self) -> Result<Vec<TransactionDetails>, LendingError>;
}
