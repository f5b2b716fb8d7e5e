//! # Domain Layer
//!
//! Catalog requests and errors. The `Book` entity itself lives in
//! `shared-types` because the lending workflow reads it too.

pub mod errors;
pub mod requests;

pub use errors::CatalogError;
pub use requests::{BookUpdate, NewBook};
