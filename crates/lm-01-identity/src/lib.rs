//! # Identity & Access Subsystem (lm-01)
//!
//! Owns the user records and the bearer credentials that gate every other
//! operation.
//!
//! ## Responsibilities
//!
//! - Register users, enforcing the email format and password policy
//! - Log users in and issue signed, expiring tokens carrying id, email and role
//! - Verify presented tokens and derive the [`Caller`](shared_types::Caller)
//!   for downstream authorization
//! - Serve user lookups (`GetUser`, `ListUsers`, `GetSelf`)
//!
//! ## Hexagonal Architecture
//!
//! - **Domain Layer** (`domain/`): validation rules, token claims, errors
//! - **Ports Layer** (`ports/`): [`IdentityApi`] inbound, [`CredentialStore`]
//!   and [`PasswordHasher`] outbound
//! - **Adapters Layer** (`adapters/`): in-memory store, bcrypt hasher
//! - **Service** (`service.rs`): [`IdentityService`] wiring it together
//!
//! ## Security
//!
//! - Passwords are only ever stored as bcrypt hashes, computed off the async
//!   runtime on the blocking pool.
//! - Tokens are HS256 JWTs with `iat`/`exp`; expired tokens are rejected.
//! - Records leaving this crate through [`IdentityApi`] are
//!   [`UserProfile`](shared_types::UserProfile)s, never the stored hash.

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod service;

pub use adapters::{BcryptHasher, InMemoryCredentialStore};
pub use domain::{
    validate_email, validate_password, IdentityConfig, IdentityError, LoginResult, Registration,
    TokenClaims, TokenIssuer, DEFAULT_JWT_SECRET, MAX_TOKEN_TTL_SECS,
};
pub use ports::{CredentialStore, IdentityApi, PasswordHasher};
pub use service::IdentityService;
