//! # Inbound Ports (Driving Ports)
//!
//! Public API exposed by the Catalog Management subsystem.

use async_trait::async_trait;
use shared_types::{Book, BookId, Caller};

use crate::domain::{BookUpdate, CatalogError, NewBook};

#[async_trait]
pub trait CatalogApi: Send + Sync {
    /// Admin only. Rejects a name already in the catalog.
    async fn create_book(&self, caller: &Caller, request: NewBook) -> Result<Book, CatalogError>;

    /// Admin only. The quantity in `request` is added to both counters.
    async fn update_book(
        &self,
        caller: &Caller,
        book_id: BookId,
        request: BookUpdate,
    ) -> Result<Book, CatalogError>;

    async fn list_books(&self) -> Result<Vec<Book>, CatalogError>;

    async fn get_book(&self, book_id: BookId) -> Result<Book, CatalogError>;
}
