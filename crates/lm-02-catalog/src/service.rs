//! # Catalog Service
//!
//! Implements [`CatalogApi`] over a [`CatalogStore`].

use async_trait::async_trait;
use shared_types::{Book, BookId, Caller};
use std::sync::Arc;
use tracing::info;

use crate::domain::{BookUpdate, CatalogError, NewBook};
use crate::ports::{CatalogApi, CatalogStore};

pub struct CatalogService<S: CatalogStore> {
    store: Arc<S>,
}

impl<S: CatalogStore> CatalogService<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &Arc<S> {
        &self.store
    }
}

fn require_admin(caller: &Caller) -> Result<(), CatalogError> {
    if caller.is_admin() {
        Ok(())
    } else {
        Err(CatalogError::AdminRequired)
    }
}

#[async_trait]
impl<S: CatalogStore + 'static> CatalogApi for CatalogService<S> {
    async fn create_book(&self, caller: &Caller, request: NewBook) -> Result<Book, CatalogError> {
        require_admin(caller)?;
        request.validate()?;

        let book = request.into_book();
        self.store.insert(book.clone())?;

        info!(
            book_id = %book.id,
            book = %book.name,
            total = book.total_copies,
            "book created"
        );
        Ok(book)
    }

    async fn update_book(
        &self,
        caller: &Caller,
        book_id: BookId,
        request: BookUpdate,
    ) -> Result<Book, CatalogError> {
        require_admin(caller)?;
        request.validate()?;

        let patch = request.into_patch();
        let book = self.store.apply_patch(book_id, &patch)?;

        info!(
            book_id = %book.id,
            book = %book.name,
            delta = patch.copies_delta,
            total = book.total_copies,
            available = book.available_copies,
            "book updated"
        );
        Ok(book)
    }

    async fn list_books(&self) -> Result<Vec<Book>, CatalogError> {
        Ok(self.store.list()?)
    }

    async fn get_book(&self, book_id: BookId) -> Result<Book, CatalogError> {
        self.store
            .get(book_id)?
            .ok_or_else(|| CatalogError::BookNotFound(book_id.to_string()))
    }
}
