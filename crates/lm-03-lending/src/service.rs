//! # Lending Service
//!
//! Implements [`LendingApi`]: the borrow/return workflow across the catalog
//! counters and the transaction ledger.
//!
//! ## Atomicity
//!
//! The counter move and the ledger write are two separate stores. Each
//! workflow performs the counter move with a conditional atomic update, then
//! writes the ledger. If the ledger write fails, the counter move is undone
//! before the error is returned, so readers never observe a counter that
//! disagrees with the ledger once the call has completed.

use async_trait::async_trait;
use shared_types::{
    Book, BookId, Caller, StoreError, Transaction, TransactionDetails, UserId, UserProfile,
};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, error, info, warn};

use crate::domain::{LendingError, LoanPolicy, LoanRequest};
use crate::ports::{BookInventory, Clock, LendingApi, TransactionLedger, UserDirectory};

pub struct LendingService<U, B, L, C>
where
    U: UserDirectory,
    B: BookInventory,
    L: TransactionLedger,
    C: Clock,
{
    policy: LoanPolicy,
    users: Arc<U>,
    books: Arc<B>,
    ledger: Arc<L>,
    clock: Arc<C>,
}

impl<U, B, L, C> LendingService<U, B, L, C>
where
    U: UserDirectory,
    B: BookInventory,
    L: TransactionLedger,
    C: Clock,
{
    pub fn new(
        policy: LoanPolicy,
        users: Arc<U>,
        books: Arc<B>,
        ledger: Arc<L>,
        clock: Arc<C>,
    ) -> Self {
        Self {
            policy,
            users,
            books,
            ledger,
            clock,
        }
    }

    pub fn ledger(&self) -> &Arc<L> {
        &self.ledger
    }

    fn resolve(&self, request: &LoanRequest) -> Result<(UserProfile, Book), LendingError> {
        request.validate()?;
        let user = self
            .users
            .find_by_email(&request.email)?
            .ok_or_else(|| LendingError::UserNotFound(request.email.clone()))?;
        let book = self
            .books
            .find_by_name(&request.name)?
            .ok_or_else(|| LendingError::BookNotFound(request.name.clone()))?;
        Ok((user, book))
    }

    /// Undo a `take_copy` whose ledger write failed.
    fn put_copy_back(&self, book_id: BookId) {
        if let Err(e) = self.books.restore_copy(book_id) {
            error!(%book_id, error = %e, "failed to restore copy after aborted borrow");
        }
    }

    /// Undo a `restore_copy` whose ledger write failed.
    fn take_copy_back(&self, book_id: BookId) {
        if let Err(e) = self.books.take_copy(book_id) {
            error!(%book_id, error = %e, "failed to re-take copy after aborted return");
        }
    }

    fn join(&self, transactions: Vec<Transaction>) -> Result<Vec<TransactionDetails>, LendingError> {
        let mut users: HashMap<UserId, Option<UserProfile>> = HashMap::new();
        let mut books: HashMap<BookId, Option<Book>> = HashMap::new();
        let mut details = Vec::with_capacity(transactions.len());

        for tx in &transactions {
            let user = match users.get(&tx.user_id) {
                Some(cached) => cached.clone(),
                None => {
                    let found = self.users.find_by_id(tx.user_id)?;
                    users.insert(tx.user_id, found.clone());
                    found
                }
            };
            let book = match books.get(&tx.book_id) {
                Some(cached) => cached.clone(),
                None => {
                    let found = self.books.find_by_id(tx.book_id)?;
                    books.insert(tx.book_id, found.clone());
                    found
                }
            };
            details.push(TransactionDetails::join(tx, user, book));
        }
        Ok(details)
    }
}

#[async_trait]
impl<U, B, L, C> LendingApi for LendingService<U, B, L, C>
where
    U: UserDirectory + 'static,
    B: BookInventory + 'static,
    L: TransactionLedger + 'static,
    C: Clock + 'static,
{
    async fn borrow(
        &self,
        caller: &Caller,
        request: LoanRequest,
    ) -> Result<Transaction, LendingError> {
        if !caller.is_admin() {
            warn!(caller = %caller.user_id, "borrow refused: caller is not an admin");
            return Err(LendingError::AdminRequired);
        }
        let (user, book) = self.resolve(&request)?;

        if !book.has_available_copy() {
            return Err(LendingError::Unavailable { book: book.name });
        }

        // Another borrower may have taken the last copy since the read above.
        let book = self.books.take_copy(book.id).map_err(|e| match e {
            StoreError::NoCopyAvailable(_) => LendingError::Unavailable {
                book: request.name.clone(),
            },
            other => other.into(),
        })?;

        let borrowed_at = self.clock.now();
        let transaction = Transaction::open(
            user.id,
            book.id,
            borrowed_at,
            self.policy.due_date(borrowed_at),
        );

        if let Err(e) = self.ledger.insert(transaction.clone()) {
            error!(
                user_id = %user.id,
                book = %book.name,
                error = %e,
                "ledger write failed, restoring copy"
            );
            self.put_copy_back(book.id);
            return Err(e.into());
        }

        info!(
            transaction_id = %transaction.id,
            user_id = %user.id,
            book = %book.name,
            available = book.available_copies,
            due = %transaction.due_date,
            "book borrowed"
        );
        Ok(transaction)
    }

    async fn return_book(
        &self,
        caller: &Caller,
        request: LoanRequest,
    ) -> Result<Transaction, LendingError> {
        let (user, book) = self.resolve(&request)?;

        if !book.has_outstanding_copy() {
            return Err(LendingError::NothingToReturn { book: book.name });
        }

        let Some(open) = self.ledger.find_earliest_open(user.id, book.id)? else {
            warn!(
                user_id = %user.id,
                book = %book.name,
                available = book.available_copies,
                total = book.total_copies,
                "return refused: copies are out but this user has no open loan"
            );
            return Err(LendingError::NoOpenLoan {
                user: request.email,
                book: request.name,
            });
        };

        let book = self.books.restore_copy(book.id).map_err(|e| match e {
            StoreError::NoOutstandingCopy(_) => LendingError::NothingToReturn {
                book: request.name.clone(),
            },
            other => other.into(),
        })?;

        let returned = match self.ledger.close(open.id, self.clock.now()) {
            Ok(tx) => tx,
            Err(e) => {
                error!(
                    transaction_id = %open.id,
                    error = %e,
                    "ledger close failed, taking copy back"
                );
                self.take_copy_back(book.id);
                return Err(e.into());
            }
        };

        info!(
            transaction_id = %returned.id,
            user_id = %user.id,
            book = %book.name,
            available = book.available_copies,
            returned_by = %caller.user_id,
            "book returned"
        );
        Ok(returned)
    }

    async fn list_user_transactions(
        &self,
        user_id: UserId,
    ) -> Result<Vec<TransactionDetails>, LendingError> {
        let transactions = self.ledger.list_by_user(user_id)?;
        debug!(%user_id, count = transactions.len(), "listing user transactions");
        self.join(transactions)
    }

    async fn list_all_transactions(&self) -> Result<Vec<TransactionDetails>, LendingError> {
        self.join(self.ledger.list_all()?)
    }
}
