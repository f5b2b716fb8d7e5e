//! # Outbound Ports (Driven Ports)
//!
//! SPI for the document store holding book records.
//!
//! Every mutating method is a single atomic step: the check and the write
//! happen together, so two callers racing for the last copy cannot both win.

use shared_types::{Book, BookId, BookPatch, StoreError};

pub trait CatalogStore: Send + Sync {
    /// Fails with [`StoreError::Duplicate`] if the name is taken.
    fn insert(&self, book: Book) -> Result<(), StoreError>;

    fn get(&self, id: BookId) -> Result<Option<Book>, StoreError>;

    fn find_by_name(&self, name: &str) -> Result<Option<Book>, StoreError>;

    /// All books in creation order.
    fn list(&self) -> Result<Vec<Book>, StoreError>;

    /// Apply an additive patch, enforcing name uniqueness on rename.
    fn apply_patch(&self, id: BookId, patch: &BookPatch) -> Result<Book, StoreError>;

    /// Decrement `available_copies` if it is positive.
    ///
    /// Fails with [`StoreError::NoCopyAvailable`] otherwise.
    fn take_copy(&self, id: BookId) -> Result<Book, StoreError>;

    /// Increment `available_copies` if it is below `total_copies`.
    ///
    /// Fails with [`StoreError::NoOutstandingCopy`] otherwise.
    fn restore_copy(&self, id: BookId) -> Result<Book, StoreError>;
}
