//! # Catalog Management Subsystem (lm-02)
//!
//! Authority over book records and the two copy counters every loan moves.
//!
//! ## Responsibilities
//!
//! - `CreateBook` (admin only): new title, every copy on the shelf, unique name
//! - `UpdateBook` (admin only): rename / re-author, and ADD a quantity delta to
//!   both counters
//! - `ListBooks`, `GetBook`
//! - Expose atomic conditional counter moves ([`CatalogStore::take_copy`],
//!   [`CatalogStore::restore_copy`]) for the lending workflow
//!
//! ## Domain Invariants
//!
//! | Invariant | Enforcement |
//! |-----------|-------------|
//! | `0 <= available <= total` | unsigned counters + conditional moves under one lock |
//! | Unique book name | checked and written under the same write lock |
//! | Additive update never underflows | `Book::apply_patch` rejects before mutating |

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod service;

pub use adapters::InMemoryCatalogStore;
pub use domain::{BookUpdate, CatalogError, NewBook};
pub use ports::{CatalogApi, CatalogStore};
pub use service::CatalogService;
