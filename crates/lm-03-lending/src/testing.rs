//! Test doubles for the ports owned by other subsystems.

use chrono::{DateTime, Duration, Utc};
use parking_lot::{Mutex, RwLock};
use shared_types::{
    Book, BookId, Caller, Role, StoreError, Transaction, TransactionId, User, UserId, UserProfile,
};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::ports::{BookInventory, Clock, TransactionLedger, UserDirectory};

#[derive(Default)]
pub struct FakeUsers {
    users: RwLock<Vec<UserProfile>>,
}

impl FakeUsers {
    pub fn add(&self, email: &str, role: Role) -> UserProfile {
        let profile = User {
            id: UserId::new(),
            username: email.split('@').next().unwrap_or_default().to_string(),
            name: email.to_uppercase(),
            email: email.to_string(),
            password_hash: String::new(),
            contact: None,
            role,
        }
        .profile();
        self.users.write().push(profile.clone());
        profile
    }
}

impl UserDirectory for FakeUsers {
    fn find_by_email(&self, email: &str) -> Result<Option<UserProfile>, StoreError> {
        Ok(self.users.read().iter().find(|u| u.email == email).cloned())
    }

    fn find_by_id(&self, id: UserId) -> Result<Option<UserProfile>, StoreError> {
        Ok(self.users.read().iter().find(|u| u.id == id).cloned())
    }
}

#[derive(Default)]
pub struct FakeShelf {
    books: RwLock<HashMap<BookId, Book>>,
}

impl FakeShelf {
    pub fn add(&self, name: &str, copies: u32) -> Book {
        let book = Book::new(name, "Frank Herbert", copies);
        self.books.write().insert(book.id, book.clone());
        book
    }

    pub fn get(&self, id: BookId) -> Book {
        self.books.read()[&id].clone()
    }

    /// Simulate another writer moving the counter behind our back.
    pub fn set_available(&self, id: BookId, available: u32) {
        if let Some(book) = self.books.write().get_mut(&id) {
            book.available_copies = available;
        }
    }
}

impl BookInventory for FakeShelf {
    fn find_by_name(&self, name: &str) -> Result<Option<Book>, StoreError> {
        Ok(self.books.read().values().find(|b| b.name == name).cloned())
    }

    fn find_by_id(&self, id: BookId) -> Result<Option<Book>, StoreError> {
        Ok(self.books.read().get(&id).cloned())
    }

    fn take_copy(&self, id: BookId) -> Result<Book, StoreError> {
        let mut books = self.books.write();
        let book = books
            .get_mut(&id)
            .ok_or_else(|| StoreError::not_found("book", id))?;
        if !book.take_copy() {
            return Err(StoreError::NoCopyAvailable(id));
        }
        Ok(book.clone())
    }

    fn restore_copy(&self, id: BookId) -> Result<Book, StoreError> {
        let mut books = self.books.write();
        let book = books
            .get_mut(&id)
            .ok_or_else(|| StoreError::not_found("book", id))?;
        if !book.restore_copy() {
            return Err(StoreError::NoOutstandingCopy(id));
        }
        Ok(book.clone())
    }
}

/// Ledger wrapper whose writes can be made to fail.
#[derive(Default)]
pub struct FlakyLedger {
    pub inner: crate::adapters::InMemoryLedger,
    pub fail_insert: AtomicBool,
    pub fail_close: AtomicBool,
}

impl TransactionLedger for FlakyLedger {
    fn insert(&self, transaction: Transaction) -> Result<(), StoreError> {
        if self.fail_insert.load(Ordering::SeqCst) {
            return Err(StoreError::Backend("ledger unavailable".into()));
        }
        self.inner.insert(transaction)
    }

    fn find_earliest_open(
        &self,
        user_id: UserId,
        book_id: BookId,
    ) -> Result<Option<Transaction>, StoreError> {
        self.inner.find_earliest_open(user_id, book_id)
    }

    fn close(&self, id: TransactionId, at: DateTime<Utc>) -> Result<Transaction, StoreError> {
        if self.fail_close.load(Ordering::SeqCst) {
            return Err(StoreError::Backend("ledger unavailable".into()));
        }
        self.inner.close(id, at)
    }

    fn list_by_user(&self, user_id: UserId) -> Result<Vec<Transaction>, StoreError> {
        self.inner.list_by_user(user_id)
    }

    fn list_all(&self) -> Result<Vec<Transaction>, StoreError> {
        self.inner.list_all()
    }
}

/// Clock that advances one minute per reading.
pub struct StepClock {
    now: Mutex<DateTime<Utc>>,
}

impl StepClock {
    pub fn starting_at(start: DateTime<Utc>) -> Self {
        Self {
            now: Mutex::new(start),
        }
    }
}

impl Clock for StepClock {
    fn now(&self) -> DateTime<Utc> {
        let mut now = self.now.lock();
        let current = *now;
        *now = current + Duration::minutes(1);
        current
    }
}

pub fn caller_for(profile: &UserProfile) -> Caller {
    Caller {
        user_id: profile.id,
        email: profile.email.clone(),
        role: profile.role,
    }
}
