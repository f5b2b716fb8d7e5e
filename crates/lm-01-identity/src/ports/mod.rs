//! # Ports Layer
//!
//! - **Driving Ports (Inbound)**: [`IdentityApi`], consumed by the API gateway
//! - **Driven Ports (Outbound)**: [`CredentialStore`] and [`PasswordHasher`],
//!   implemented by adapters

pub mod inbound;
pub mod outbound;

pub use inbound::*;
pub use outbound::*;
