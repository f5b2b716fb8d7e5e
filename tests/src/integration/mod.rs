//! # Integration Flows
//!
//! Every test drives the complete router (middleware, access gate, handlers)
//! over the real subsystems wired by `library-node`.

pub mod access_control;
pub mod concurrency;
pub mod identity_flows;
pub mod lending_flows;
