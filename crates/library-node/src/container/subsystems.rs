//! # Subsystem Container
//!
//! ## Initialization Order
//!
//! ```text
//! Level 0: stores (credentials, catalog, ledger), restored from the snapshot
//! Level 1: Identity (lm-01), Catalog (lm-02)
//! Level 2: Lending (lm-03), reading users and books through port adapters
//! ```
//!
//! ## Thread Safety
//!
//! - Stores and services are shared through `Arc`
//! - Each in-memory store does its own locking

use std::sync::Arc;

use lm_01_identity::{BcryptHasher, IdentityApi, IdentityService, InMemoryCredentialStore};
use lm_02_catalog::{CatalogApi, CatalogService, InMemoryCatalogStore};
use lm_03_lending::{InMemoryLedger, LendingApi, LendingService, SystemClock};
use lm_04_api_gateway::AppState;
use shared_types::StoreError;
use thiserror::Error;
use tracing::{info, instrument, warn};

use crate::adapters::{CatalogInventory, CredentialDirectory};
use crate::container::config::{ConfigError, NodeConfig};
use crate::persistence::Snapshot;

/// Concrete identity service with in-memory credentials.
pub type ConcreteIdentityService = IdentityService<InMemoryCredentialStore, BcryptHasher>;

/// Concrete catalog service with the in-memory shelf.
pub type ConcreteCatalogService = CatalogService<InMemoryCatalogStore>;

/// Concrete lending service bridged onto the identity and catalog stores.
pub type ConcreteLendingService = LendingService<
    CredentialDirectory<InMemoryCredentialStore>,
    CatalogInventory<InMemoryCatalogStore>,
    InMemoryLedger,
    SystemClock,
>;

#[derive(Debug, Error)]
pub enum ContainerError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("snapshot rejected: {0}")]
    Store(#[from] StoreError),
}

/// Central container holding all subsystem instances.
pub struct LibraryContainer {
    pub config: NodeConfig,

    // =========================================================================
    // LEVEL 0: Stores
    // =========================================================================
    pub credentials: Arc<InMemoryCredentialStore>,
    pub shelf: Arc<InMemoryCatalogStore>,
    pub ledger: Arc<InMemoryLedger>,

    // =========================================================================
    // LEVEL 1-2: Services
    // =========================================================================
    pub identity: Arc<ConcreteIdentityService>,
    pub catalog: Arc<ConcreteCatalogService>,
    pub lending: Arc<ConcreteLendingService>,
}

impl LibraryContainer {
    /// Empty stores.
    pub fn new(config: NodeConfig) -> Result<Self, ContainerError> {
        Self::restore(config, Snapshot::default())
    }

    /// Stores rebuilt from `snapshot`.
    #[instrument(skip_all, fields(users = snapshot.users.len(), books = snapshot.books.len()))]
    pub fn restore(config: NodeConfig, snapshot: Snapshot) -> Result<Self, ContainerError> {
        config.validate()?;

        let credentials = Arc::new(InMemoryCredentialStore::from_users(snapshot.users)?);
        let shelf = Arc::new(InMemoryCatalogStore::from_books(snapshot.books)?);
        let ledger = Arc::new(InMemoryLedger::from_transactions(snapshot.transactions)?);

        let identity = Arc::new(IdentityService::new(
            &config.identity,
            Arc::clone(&credentials),
            Arc::new(BcryptHasher::new(config.identity.bcrypt_cost)),
        ));
        let catalog = Arc::new(CatalogService::new(Arc::clone(&shelf)));
        let lending = Arc::new(LendingService::new(
            config.loan_policy(),
            Arc::new(CredentialDirectory::new(Arc::clone(&credentials))),
            Arc::new(CatalogInventory::new(Arc::clone(&shelf))),
            Arc::clone(&ledger),
            Arc::new(SystemClock),
        ));

        let container = Self {
            config,
            credentials,
            shelf,
            ledger,
            identity,
            catalog,
            lending,
        };
        container.check_counters();
        info!("subsystem container initialized");
        Ok(container)
    }

    /// Handler state for the gateway.
    pub fn app_state(&self) -> AppState {
        AppState::new(
            Arc::clone(&self.identity) as Arc<dyn IdentityApi>,
            Arc::clone(&self.catalog) as Arc<dyn CatalogApi>,
            Arc::clone(&self.lending) as Arc<dyn LendingApi>,
        )
    }

    /// Current contents of every store.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            users: self.credentials.snapshot(),
            books: self.shelf.snapshot(),
            transactions: self.ledger.snapshot(),
        }
    }

    /// Loans not yet returned, across the whole ledger.
    pub fn open_loans(&self) -> usize {
        self.shelf
            .snapshot()
            .iter()
            .map(|book| self.ledger.open_count(book.id))
            .sum()
    }

    /// Warn about books whose counters disagree with the ledger. Restored
    /// data is served as-is.
    fn check_counters(&self) {
        for book in self.shelf.snapshot() {
            let open = self.ledger.open_count(book.id);
            let outstanding = book.outstanding_copies() as usize;
            if open != outstanding {
                warn!(
                    book = %book.name,
                    open_loans = open,
                    outstanding,
                    "catalog counters disagree with the ledger"
                );
            }
        }
    }
}
