//! # Outbound Ports (Driven Ports)
//!
//! SPIs required by the lending workflow. Users and books are owned by other
//! subsystems; the ledger is owned here.

use chrono::{DateTime, Utc};
use shared_types::{
    Book, BookId, StoreError, Transaction, TransactionId, UserId, UserProfile,
};

/// Read-only view of registered users.
pub trait UserDirectory: Send + Sync {
    fn find_by_email(&self, email: &str) -> Result<Option<UserProfile>, StoreError>;

    fn find_by_id(&self, id: UserId) -> Result<Option<UserProfile>, StoreError>;
}

/// The catalog as the workflow needs it: lookups plus atomic counter moves.
pub trait BookInventory: Send + Sync {
    fn find_by_name(&self, name: &str) -> Result<Option<Book>, StoreError>;

    fn find_by_id(&self, id: BookId) -> Result<Option<Book>, StoreError>;

    /// Decrement-if-positive. [`StoreError::NoCopyAvailable`] when zero.
    fn take_copy(&self, id: BookId) -> Result<Book, StoreError>;

    /// Increment-if-below-total. [`StoreError::NoOutstandingCopy`] when full.
    fn restore_copy(&self, id: BookId) -> Result<Book, StoreError>;
}

/// Persistent borrow records.
pub trait TransactionLedger: Send + Sync {
    fn insert(&self, transaction: Transaction) -> Result<(), StoreError>;

    /// The open transaction for the pair with the earliest `borrowed_at`;
    /// ties go to the one inserted first.
    fn find_earliest_open(
        &self,
        user_id: UserId,
        book_id: BookId,
    ) -> Result<Option<Transaction>, StoreError>;

    /// `Open -> Returned`. Fails if the transaction is already returned.
    fn close(&self, id: TransactionId, at: DateTime<Utc>) -> Result<Transaction, StoreError>;

    /// Ordered by `borrowed_at` ascending.
    fn list_by_user(&self, user_id: UserId) -> Result<Vec<Transaction>, StoreError>;

    /// Ordered by `borrowed_at` ascending.
    fn list_all(&self) -> Result<Vec<Transaction>, StoreError>;
}

/// Abstract interface for time (for testability).
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}
