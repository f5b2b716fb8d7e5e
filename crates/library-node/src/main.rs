//! # Library Node
//!
//! Command line entry point.
//!
//! ```text
//! library-node [--config <path>] [--dev] [--log-level <filter>]
//! ```

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use library_node::{NodeConfig, NodeRuntime};
use library_telemetry::{init_telemetry, TelemetryConfig};
use tracing::{info, warn};

#[derive(Debug, Parser)]
#[command(name = "library-node", version, about = "Library management backend")]
struct Cli {
    /// JSON configuration file
    #[arg(short, long, env = "LIBRARY_CONFIG")]
    config: Option<PathBuf>,

    /// Allow the development JWT secret
    #[arg(long)]
    dev: bool,

    /// Log filter, e.g. `debug` or `lm_03_lending=trace`
    #[arg(long)]
    log_level: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut telemetry = TelemetryConfig::from_env();
    if let Some(level) = &cli.log_level {
        telemetry = telemetry.with_log_level(level.clone());
    }
    let _telemetry = init_telemetry(telemetry)
        .await
        .context("Failed to initialize telemetry")?;

    let config = NodeConfig::load(cli.config.as_deref()).context("Failed to load configuration")?;
    if cli.dev {
        config.validate()?;
        if config.identity.uses_default_secret() {
            warn!("running with the development JWT secret; do not expose this node");
        }
    } else {
        config.validate_for_production()?;
    }

    info!("===========================================");
    info!("  Library Node v{}", env!("CARGO_PKG_VERSION"));
    info!("===========================================");

    let runtime = NodeRuntime::new(config)?;
    runtime.run(shutdown_signal()).await?;

    info!("Shutdown complete");
    Ok(())
}

/// Resolves on Ctrl+C or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received Ctrl+C"),
        _ = terminate => info!("Received SIGTERM"),
    }
}
