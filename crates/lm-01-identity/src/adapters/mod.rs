//! # Adapters Layer
//!
//! Concrete implementations of the outbound ports.

pub mod bcrypt_hasher;
pub mod memory;

pub use bcrypt_hasher::BcryptHasher;
pub use memory::InMemoryCredentialStore;
