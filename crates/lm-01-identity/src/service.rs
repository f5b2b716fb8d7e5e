//! # Identity Service
//!
//! Implements [`IdentityApi`] over a [`CredentialStore`] and a
//! [`PasswordHasher`].
//!
//! ## Flow
//!
//! ```text
//! register: validate → hash (blocking pool) → insert (uniqueness enforced by store)
//! login:    lookup by email → verify hash → issue token
//! authenticate: verify token signature + expiry → Caller
//! ```

use async_trait::async_trait;
use chrono::Utc;
use shared_types::{Caller, Role, StoreError, User, UserId, UserProfile};
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::domain::{IdentityConfig, IdentityError, LoginResult, Registration, TokenIssuer};
use crate::ports::{CredentialStore, IdentityApi, PasswordHasher};

pub struct IdentityService<S, H>
where
    S: CredentialStore,
    H: PasswordHasher,
{
    store: Arc<S>,
    hasher: Arc<H>,
    tokens: TokenIssuer,
    allow_admin_signup: bool,
}

impl<S, H> IdentityService<S, H>
where
    S: CredentialStore,
    H: PasswordHasher,
{
    pub fn new(config: &IdentityConfig, store: Arc<S>, hasher: Arc<H>) -> Self {
        Self {
            store,
            hasher,
            tokens: TokenIssuer::new(&config.jwt_secret, config.token_ttl_secs),
            allow_admin_signup: config.allow_admin_signup,
        }
    }

    pub fn store(&self) -> &Arc<S> {
        &self.store
    }

    fn load(&self, user_id: UserId) -> Result<User, IdentityError> {
        self.store
            .find_by_id(user_id)?
            .ok_or_else(|| IdentityError::UserNotFound(user_id.to_string()))
    }
}

#[async_trait]
impl<S, H> IdentityApi for IdentityService<S, H>
where
    S: CredentialStore + 'static,
    H: PasswordHasher + 'static,
{
    async fn register(&self, registration: Registration) -> Result<UserProfile, IdentityError> {
        registration.validate()?;

        if self.store.find_by_email(&registration.email)?.is_some() {
            return Err(IdentityError::EmailTaken(registration.email));
        }

        let role = if self.allow_admin_signup {
            Role::from_admin_flag(registration.is_admin)
        } else {
            if registration.is_admin {
                warn!(email = %registration.email, "admin flag ignored: admin signup disabled");
            }
            Role::Member
        };

        let password_hash = self.hasher.hash(&registration.password).await?;
        let user = User {
            id: UserId::new(),
            username: registration.username,
            name: registration.name,
            email: registration.email,
            password_hash,
            contact: registration.contact,
            role,
        };
        let profile = user.profile();

        // A concurrent registration may have claimed the email while we hashed.
        self.store.insert(user).map_err(|e| match e {
            StoreError::Duplicate { key, .. } => IdentityError::EmailTaken(key),
            other => IdentityError::Store(other),
        })?;

        info!(user_id = %profile.id, role = %profile.role, "user registered");
        Ok(profile)
    }

    async fn login(&self, email: &str, password: &str) -> Result<LoginResult, IdentityError> {
        let Some(user) = self.store.find_by_email(email)? else {
            debug!(email, "login for unknown email");
            return Err(IdentityError::InvalidCredentials);
        };

        if !self.hasher.verify(password, &user.password_hash).await? {
            debug!(user_id = %user.id, "login with wrong password");
            return Err(IdentityError::InvalidCredentials);
        }

        let token = self.tokens.issue(&user, Utc::now())?;
        info!(user_id = %user.id, "user logged in");
        Ok(LoginResult {
            user: user.profile(),
            token,
        })
    }

    fn authenticate(&self, bearer_token: &str) -> Result<Caller, IdentityError> {
        self.tokens.verify(bearer_token)?.into_caller()
    }

    async fn get_user(
        &self,
        caller: &Caller,
        user_id: UserId,
    ) -> Result<UserProfile, IdentityError> {
        if !caller.can_view(user_id) {
            return Err(IdentityError::AdminRequired);
        }
        Ok(self.load(user_id)?.profile())
    }

    async fn list_users(&self, caller: &Caller) -> Result<Vec<UserProfile>, IdentityError> {
        if !caller.is_admin() {
            return Err(IdentityError::AdminRequired);
        }
        Ok(self.store.list()?.iter().map(User::profile).collect())
    }

    async fn get_self(&self, caller: &Caller) -> Result<UserProfile, IdentityError> {
        Ok(self.load(caller.user_id)?.profile())
    }
}
