//! # In-Memory Catalog Store
//!
//! Book records behind one `RwLock`. Conditional counter moves take the
//! write lock for the whole check-and-set, which is what makes them atomic.

use parking_lot::RwLock;
use shared_types::{Book, BookId, BookPatch, StoreError};
use std::collections::HashMap;

use crate::ports::CatalogStore;

#[derive(Debug, Default)]
struct Shelf {
    /// Creation order.
    order: Vec<BookId>,
    books: HashMap<BookId, Book>,
    by_name: HashMap<String, BookId>,
}

impl Shelf {
    fn push(&mut self, book: Book) -> Result<(), StoreError> {
        if self.by_name.contains_key(&book.name) {
            return Err(StoreError::duplicate("book", &book.name));
        }
        if self.books.contains_key(&book.id) {
            return Err(StoreError::duplicate("book", book.id));
        }
        self.order.push(book.id);
        self.by_name.insert(book.name.clone(), book.id);
        self.books.insert(book.id, book);
        Ok(())
    }

    fn book_mut(&mut self, id: BookId) -> Result<&mut Book, StoreError> {
        self.books
            .get_mut(&id)
            .ok_or_else(|| StoreError::not_found("book", id))
    }
}

#[derive(Debug, Default)]
pub struct InMemoryCatalogStore {
    shelf: RwLock<Shelf>,
}

impl InMemoryCatalogStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a store from previously persisted books.
    pub fn from_books(books: Vec<Book>) -> Result<Self, StoreError> {
        let mut shelf = Shelf::default();
        for book in books {
            if book.available_copies > book.total_copies {
                return Err(StoreError::Backend(format!(
                    "book {} has {} available of {} total",
                    book.id, book.available_copies, book.total_copies
                )));
            }
            shelf.push(book)?;
        }
        Ok(Self {
            shelf: RwLock::new(shelf),
        })
    }

    /// Copy of every record in creation order, for persistence.
    pub fn snapshot(&self) -> Vec<Book> {
        let shelf = self.shelf.read();
        shelf
            .order
            .iter()
            .filter_map(|id| shelf.books.get(id).cloned())
            .collect()
    }
}

impl CatalogStore for InMemoryCatalogStore {
    fn insert(&self, book: Book) -> Result<(), StoreError> {
        self.shelf.write().push(book)
    }

    fn get(&self, id: BookId) -> Result<Option<Book>, StoreError> {
        Ok(self.shelf.read().books.get(&id).cloned())
    }

    fn find_by_name(&self, name: &str) -> Result<Option<Book>, StoreError> {
        let shelf = self.shelf.read();
        Ok(shelf
            .by_name
            .get(name)
            .and_then(|id| shelf.books.get(id))
            .cloned())
    }

    fn list(&self) -> Result<Vec<Book>, StoreError> {
        Ok(self.snapshot())
    }

    fn apply_patch(&self, id: BookId, patch: &BookPatch) -> Result<Book, StoreError> {
        let mut shelf = self.shelf.write();

        if let Some(new_name) = &patch.name {
            if let Some(&holder) = shelf.by_name.get(new_name) {
                if holder != id {
                    return Err(StoreError::duplicate("book", new_name));
                }
            }
        }

        let book = shelf.book_mut(id)?;
        let old_name = book.name.clone();
        book.apply_patch(patch)?;
        let updated = book.clone();

        if updated.name != old_name {
            shelf.by_name.remove(&old_name);
            shelf.by_name.insert(updated.name.clone(), id);
        }
        Ok(updated)
    }

    fn take_copy(&self, id: BookId) -> Result<Book, StoreError> {
        let mut shelf = self.shelf.write();
        let book = shelf.book_mut(id)?;
        if !book.take_copy() {
            return Err(StoreError::NoCopyAvailable(id));
        }
        Ok(book.clone())
    }

    fn restore_copy(&self, id: BookId) -> Result<Book, StoreError> {
        let mut shelf = self.shelf.write();
        let book = shelf.book_mut(id)?;
        if !book.restore_copy() {
            return Err(StoreError::NoOutstandingCopy(id));
        }
        Ok(book.clone())
    }
}
