//! # Shared Types Crate
//!
//! This crate contains the entities, identifiers and error vocabulary shared
//! by every library subsystem.
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: Book, User and Transaction are defined once
//!   here; subsystems own behaviour, not shapes.
//! - **Weak References**: a `Transaction` refers to its user and book by id
//!   only. Joined views (`TransactionDetails`) are assembled on read.
//! - **No Secrets on the Wire**: `User` carries the password hash and is never
//!   serialised to clients; `UserProfile` is the public projection.

pub mod entities;
pub mod errors;
pub mod security;

pub use entities::*;
pub use errors::*;
pub use security::*;
