//! # Port Adapters for Subsystem Integration
//!
//! Concrete implementations of the outbound ports lm-03-lending requires,
//! backed by the stores the identity and catalog subsystems own.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                     LendingService                        │
//! │        UserDirectory            BookInventory             │
//! └───────────┬──────────────────────────┬───────────────────┘
//!             ↓                          ↓
//!   CredentialDirectory          CatalogInventory   (this module)
//!             ↓                          ↓
//!   CredentialStore (lm-01)      CatalogStore (lm-02)
//! ```

pub mod ports;

pub use ports::{CatalogInventory, CredentialDirectory};
