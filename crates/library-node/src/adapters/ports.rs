//! Lending port adapters.
//!
//! - `UserDirectory` - read-only view over the credential store that never
//!   exposes password hashes
//! - `BookInventory` - delegates to the catalog store's atomic counters

use lm_01_identity::CredentialStore;
use lm_02_catalog::CatalogStore;
use lm_03_lending::{BookInventory, UserDirectory};
use shared_types::{Book, BookId, StoreError, UserId, UserProfile};
use std::sync::Arc;

// =============================================================================
// UserDirectory Adapter
// =============================================================================

/// Adapter implementing lm-03's `UserDirectory` over lm-01's credential store.
pub struct CredentialDirectory<S: CredentialStore> {
    store: Arc<S>,
}

impl<S: CredentialStore> CredentialDirectory<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }
}

impl<S: CredentialStore> UserDirectory for CredentialDirectory<S> {
    fn find_by_email(&self, email: &str) -> Result<Option<UserProfile>, StoreError> {
        Ok(self.store.find_by_email(email)?.map(|user| user.profile()))
    }

    fn find_by_id(&self, id: UserId) -> Result<Option<UserProfile>, StoreError> {
        Ok(self.store.find_by_id(id)?.map(|user| user.profile()))
    }
}

// =============================================================================
// BookInventory Adapter
// =============================================================================

/// Adapter implementing lm-03's `BookInventory` over lm-02's catalog store.
pub struct CatalogInventory<S: CatalogStore> {
    store: Arc<S>,
}

impl<S: CatalogStore> CatalogInventory<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }
}

impl<S: CatalogStore> BookInventory for CatalogInventory<S> {
    fn find_by_name(&self, name: &str) -> Result<Option<Book>, StoreError> {
        self.store.find_by_name(name)
    }

    fn find_by_id(&self, id: BookId) -> Result<Option<Book>, StoreError> {
        self.store.get(id)
    }

    fn take_copy(&self, id: BookId) -> Result<Book, StoreError> {
        self.store.take_copy(id)
    }

    fn restore_copy(&self, id: BookId) -> Result<Book, StoreError> {
        self.store.restore_copy(id)
    }
}
