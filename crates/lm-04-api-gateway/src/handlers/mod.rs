//! HTTP handlers, one module per route prefix.
//!
//! Handlers only translate between HTTP and the subsystem APIs; every rule
//! lives behind [`AppState`](crate::state::AppState).

pub mod books;
pub mod library;
pub mod system;
pub mod users;
