//! # bcrypt Password Hasher
//!
//! bcrypt is CPU-bound; both operations run on the blocking thread pool so
//! request tasks are never stalled behind a hash.

use async_trait::async_trait;

use crate::domain::IdentityError;
use crate::ports::PasswordHasher;

#[derive(Debug, Clone, Copy)]
pub struct BcryptHasher {
    cost: u32,
}

impl BcryptHasher {
    pub fn new(cost: u32) -> Self {
        Self { cost }
    }
}

impl Default for BcryptHasher {
    fn default() -> Self {
        Self::new(bcrypt::DEFAULT_COST)
    }
}

#[async_trait]
impl PasswordHasher for BcryptHasher {
    async fn hash(&self, password: &str) -> Result<String, IdentityError> {
        let password = password.to_string();
        let cost = self.cost;

        tokio::task::spawn_blocking(move || {
            bcrypt::hash(password, cost).map_err(|e| IdentityError::Hashing(e.to_string()))
        })
        .await
        .map_err(|e| IdentityError::Hashing(format!("task join error: {}", e)))?
    }

    async fn verify(&self, password: &str, hash: &str) -> Result<bool, IdentityError> {
        let password = password.to_string();
        let hash = hash.to_string();

        tokio::task::spawn_blocking(move || {
            bcrypt::verify(password, &hash).map_err(|e| IdentityError::Hashing(e.to_string()))
        })
        .await
        .map_err(|e| IdentityError::Hashing(format!("task join error: {}", e)))?
    }
}
