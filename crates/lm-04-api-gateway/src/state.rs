//! Shared handler state: the inbound APIs of the three subsystems.

use lm_01_identity::IdentityApi;
use lm_02_catalog::CatalogApi;
use lm_03_lending::LendingApi;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub identity: Arc<dyn IdentityApi>,
    pub catalog: Arc<dyn CatalogApi>,
    pub lending: Arc<dyn LendingApi>,
}

impl AppState {
    pub fn new(
        identity: Arc<dyn IdentityApi>,
        catalog: Arc<dyn CatalogApi>,
        lending: Arc<dyn LendingApi>,
    ) -> Self {
        Self {
            identity,
            catalog,
            lending,
        }
    }
}
