//! # In-Memory Credential Store
//!
//! Document-store stand-in holding user records behind a single lock, so the
//! email uniqueness check and the insert happen as one step.

use parking_lot::RwLock;
use shared_types::{StoreError, User, UserId};
use std::collections::HashMap;

use crate::ports::CredentialStore;

#[derive(Debug, Default)]
struct Records {
    /// Registration order.
    users: Vec<User>,
    by_email: HashMap<String, usize>,
    by_id: HashMap<UserId, usize>,
}

impl Records {
    fn push(&mut self, user: User) -> Result<(), StoreError> {
        if self.by_email.contains_key(&user.email) {
            return Err(StoreError::duplicate("user", &user.email));
        }
        if self.by_id.contains_key(&user.id) {
            return Err(StoreError::duplicate("user", user.id));
        }
        let index = self.users.len();
        self.by_email.insert(user.email.clone(), index);
        self.by_id.insert(user.id, index);
        self.users.push(user);
        Ok(())
    }
}

#[derive(Debug, Default)]
pub struct InMemoryCredentialStore {
    records: RwLock<Records>,
}

impl InMemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a store from previously persisted users.
    pub fn from_users(users: Vec<User>) -> Result<Self, StoreError> {
        let mut records = Records::default();
        for user in users {
            records.push(user)?;
        }
        Ok(Self {
            records: RwLock::new(records),
        })
    }

    /// Copy of every record, for persistence.
    pub fn snapshot(&self) -> Vec<User> {
        self.records.read().users.clone()
    }

    pub fn len(&self) -> usize {
        self.records.read().users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl CredentialStore for InMemoryCredentialStore {
    fn insert(&self, user: User) -> Result<(), StoreError> {
        self.records.write().push(user)
    }

    fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        let records = self.records.read();
        Ok(records
            .by_email
            .get(email)
            .map(|&index| records.users[index].clone()))
    }

    fn find_by_id(&self, id: UserId) -> Result<Option<User>, StoreError> {
        let records = self.records.read();
        Ok(records
            .by_id
            .get(&id)
            .map(|&index| records.users[index].clone()))
    }

    fn list(&self) -> Result<Vec<User>, StoreError> {
        Ok(self.records.read().users.clone())
    }
}
