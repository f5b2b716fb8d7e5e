//! # Inbound Ports (Driving Ports)
//!
//! Public API exposed by the Identity & Access subsystem.

use async_trait::async_trait;
use shared_types::{Caller, UserId, UserProfile};

use crate::domain::{IdentityError, LoginResult, Registration};

/// Primary API for the Identity & Access subsystem.
#[async_trait]
pub trait IdentityApi: Send + Sync {
    /// Create a user after the email and password checks pass.
    ///
    /// ## Returns
    ///
    /// - `Ok(UserProfile)`: the stored user, without its hash
    /// - `Err(Validation)`: first failing check, verbatim message
    /// - `Err(EmailTaken)`: another user already has this email
    async fn register(&self, registration: Registration) -> Result<UserProfile, IdentityError>;

    /// Verify the password and issue a bearer token.
    async fn login(&self, email: &str, password: &str) -> Result<LoginResult, IdentityError>;

    /// The access gate: verify a bearer token and derive the caller.
    ///
    /// Synchronous so it can run inside request middleware without
    /// touching the store.
    fn authenticate(&self, bearer_token: &str) -> Result<Caller, IdentityError>;

    /// Fetch one user. Admins may fetch anyone, members only themselves.
    async fn get_user(&self, caller: &Caller, user_id: UserId)
        -> Result<UserProfile, IdentityError>;

    /// Every registered user. Admin only.
    async fn list_users(&self, caller: &Caller) -> Result<Vec<UserProfile>, IdentityError>;

    /// The caller's own profile.
    async fn get_self(&self, caller: &Caller) -> Result<UserProfile, IdentityError>;
}
