//! # Outbound Ports (Driven Ports)
//!
//! SPIs required by the Identity & Access subsystem.

use async_trait::async_trait;
use shared_types::{StoreError, User, UserId};

use crate::domain::IdentityError;

/// Persistent user records.
///
/// Implementations must reject a second user with the same email with
/// [`StoreError::Duplicate`], atomically with respect to concurrent inserts.
pub trait CredentialStore: Send + Sync {
    fn insert(&self, user: User) -> Result<(), StoreError>;

    fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError>;

    fn find_by_id(&self, id: UserId) -> Result<Option<User>, StoreError>;

    /// All users in registration order.
    fn list(&self) -> Result<Vec<User>, StoreError>;
}

/// One-way password hashing.
#[async_trait]
pub trait PasswordHasher: Send + Sync {
    async fn hash(&self, password: &str) -> Result<String, IdentityError>;

    async fn verify(&self, password: &str, hash: &str) -> Result<bool, IdentityError>;
}
