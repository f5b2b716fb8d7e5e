//! # Node Runtime
//!
//! ## Startup Sequence
//!
//! 1. Restore the snapshot (if any) from `data_dir`
//! 2. Build the subsystem container
//! 3. Bind the gateway listener
//! 4. Serve until the shutdown future resolves
//!
//! ## Shutdown Sequence
//!
//! 1. Stop accepting connections and drain in-flight requests
//! 2. Persist the stores
//! 3. Exit

use std::future::Future;
use std::sync::Arc;

use anyhow::{Context, Result};
use library_telemetry::OPEN_LOANS;
use lm_04_api_gateway::ApiGatewayService;
use tracing::{error, info};

use crate::container::{LibraryContainer, NodeConfig};
use crate::persistence::SnapshotFile;

/// The library node: container plus snapshot lifecycle.
pub struct NodeRuntime {
    container: Arc<LibraryContainer>,
    snapshot_file: SnapshotFile,
}

impl NodeRuntime {
    pub fn new(config: NodeConfig) -> Result<Self> {
        let snapshot_file = SnapshotFile::new(config.snapshot_path());
        let snapshot = snapshot_file
            .load()
            .context("Failed to load snapshot")?
            .unwrap_or_default();

        let container = LibraryContainer::restore(config, snapshot)
            .context("Failed to initialize subsystems")?;
        OPEN_LOANS.set(container.open_loans() as f64);

        Ok(Self {
            container: Arc::new(container),
            snapshot_file,
        })
    }

    pub fn container(&self) -> Arc<LibraryContainer> {
        Arc::clone(&self.container)
    }

    /// Serve the gateway until `shutdown` resolves, then persist.
    ///
    /// The snapshot is written even when serving failed.
    pub async fn run<F>(&self, shutdown: F) -> Result<()>
    where
        F: Future<Output = ()> + Send,
    {
        let config = &self.container.config;
        let gateway = ApiGatewayService::new(config.gateway.clone(), self.container.app_state())
            .context("Failed to build API gateway")?;
        let listener = gateway.bind().await.context("Failed to bind HTTP listener")?;

        info!("Library node running");
        info!("HTTP: {}", config.gateway.http_addr());
        info!("Data Dir: {:?}", config.data_dir);

        let served = gateway.serve(listener, shutdown).await;
        if let Err(e) = &served {
            error!(error = %e, "gateway stopped with an error");
        }

        self.persist()?;
        served.context("API gateway failed")
    }

    /// Write the current store contents to disk.
    pub fn persist(&self) -> Result<()> {
        self.snapshot_file
            .save(&self.container.snapshot())
            .context("Failed to persist snapshot")
    }
}
