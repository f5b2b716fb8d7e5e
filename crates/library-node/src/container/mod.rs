//! # Subsystem Container
//!
//! Holds every subsystem instance and the stores behind them, wired with the
//! port adapters from [`crate::adapters`].

pub mod config;
pub mod subsystems;

pub use config::{ConfigError, NodeConfig, SNAPSHOT_FILE};
pub use subsystems::{ContainerError, LibraryContainer};
