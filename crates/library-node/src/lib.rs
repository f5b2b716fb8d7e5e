//! # Library Node
//!
//! Wires the identity, catalog and lending subsystems behind the API gateway
//! and gives the in-memory stores a snapshot lifecycle. The entry point is
//! the `main.rs` binary; the modules are public for integration tests.
//!
//! ## Modular Structure
//!
//! - `container/` - configuration and the subsystem container
//! - `adapters/` - lending port implementations over the other stores
//! - `persistence` - snapshot load and save
//! - `runtime` - startup, serving and shutdown

#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod adapters;
pub mod container;
pub mod persistence;
pub mod runtime;

pub use container::{ConfigError, ContainerError, LibraryContainer, NodeConfig};
pub use persistence::{PersistenceError, Snapshot, SnapshotFile};
pub use runtime::NodeRuntime;
