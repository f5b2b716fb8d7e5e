//! # Ports Layer
//!
//! - **Driving Ports (Inbound)**: [`LendingApi`]
//! - **Driven Ports (Outbound)**: [`UserDirectory`], [`BookInventory`],
//!   [`TransactionLedger`], [`Clock`]

pub mod inbound;
pub mod outbound;

pub use inbound::*;
pub use outbound::*;
