//! # Adapters Layer

pub mod clock;
pub mod memory;

pub use clock::SystemClock;
pub use memory::InMemoryLedger;
