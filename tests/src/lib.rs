//! # Library Manager Test Suite
//!
//! ## Structure
//!
//! ```text
//! tests/src/
//! ├── harness.rs        # In-process app: router + container, no sockets
//! ├── integration/      # End-to-end flows through the HTTP router
//!     ├── identity_flows.rs
//!     ├── lending_flows.rs
//!     ├── access_control.rs
//!     ├── catalog_flows.rs
//!     ├── concurrency.rs
//!     └── persistence_flows.rs
//!
//! benches/lending_benchmarks.rs  # criterion
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! # All tests
//! cargo test -p lm-tests
//!
//! # By category
//! cargo test -p lm-tests integration::lending_flows::
//!
//! # Benchmarks
//! cargo bench -p lm-tests
//! ```

pub mod harness;
pub mod integration;
