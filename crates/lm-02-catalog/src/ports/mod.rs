//! # Ports Layer
//!
//! - **Driving Ports (Inbound)**: [`CatalogApi`]
//! - **Driven Ports (Outbound)**: [`CatalogStore`]

pub mod inbound;
pub mod outbound;

pub use inbound::*;
pub use outbound::*;
