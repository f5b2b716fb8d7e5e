//! # In-Memory Transaction Ledger
//!
//! Append-only vector of borrow records plus an id index. Records are never
//! removed; closing a loan mutates `returned_at` in place.

use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use shared_types::{BookId, StoreError, Transaction, TransactionId, UserId};
use std::collections::HashMap;

use crate::ports::TransactionLedger;

#[derive(Debug, Default)]
struct Entries {
    /// Insertion order.
    records: Vec<Transaction>,
    by_id: HashMap<TransactionId, usize>,
}

impl Entries {
    fn push(&mut self, transaction: Transaction) -> Result<(), StoreError> {
        if self.by_id.contains_key(&transaction.id) {
            return Err(StoreError::duplicate("transaction", transaction.id));
        }
        self.by_id.insert(transaction.id, self.records.len());
        self.records.push(transaction);
        Ok(())
    }
}

fn sorted_by_borrow_time(mut transactions: Vec<Transaction>) -> Vec<Transaction> {
    // Stable: equal timestamps keep insertion order.
    transactions.sort_by_key(|tx| tx.borrowed_at);
    transactions
}

#[derive(Debug, Default)]
pub struct InMemoryLedger {
    entries: RwLock<Entries>,
}

impl InMemoryLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a ledger from previously persisted records.
    pub fn from_transactions(transactions: Vec<Transaction>) -> Result<Self, StoreError> {
        let mut entries = Entries::default();
        for transaction in transactions {
            entries.push(transaction)?;
        }
        Ok(Self {
            entries: RwLock::new(entries),
        })
    }

    /// Copy of every record in insertion order, for persistence.
    pub fn snapshot(&self) -> Vec<Transaction> {
        self.entries.read().records.clone()
    }

    pub fn len(&self) -> usize {
        self.entries.read().records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of open loans against one book.
    pub fn open_count(&self, book_id: BookId) -> usize {
        self.entries
            .read()
            .records
            .iter()
            .filter(|tx| tx.book_id == book_id && tx.is_open())
            .count()
    }
}

impl TransactionLedger for InMemoryLedger {
    fn insert(&self, transaction: Transaction) -> Result<(), StoreError> {
        self.entries.write().push(transaction)
    }

    fn find_earliest_open(
        &self,
        user_id: UserId,
        book_id: BookId,
    ) -> Result<Option<Transaction>, StoreError> {
        Ok(self
            .entries
            .read()
            .records
            .iter()
            .filter(|tx| tx.user_id == user_id && tx.book_id == book_id && tx.is_open())
            .min_by_key(|tx| tx.borrowed_at)
            .cloned())
    }

    fn close(&self, id: TransactionId, at: DateTime<Utc>) -> Result<Transaction, StoreError> {
        let mut entries = self.entries.write();
        let index = *entries
            .by_id
            .get(&id)
            .ok_or_else(|| StoreError::not_found("transaction", id))?;
        let transaction = &mut entries.records[index];
        transaction.mark_returned(at)?;
        Ok(transaction.clone())
    }

    fn list_by_user(&self, user_id: UserId) -> Result<Vec<Transaction>, StoreError> {
        let matching = self
            .entries
            .read()
            .records
            .iter()
            .filter(|tx| tx.user_id == user_id)
            .cloned()
            .collect();
        Ok(sorted_by_borrow_time(matching))
    }

    fn list_all(&self) -> Result<Vec<Transaction>, StoreError> {
        Ok(sorted_by_borrow_time(self.snapshot()))
    }
}
