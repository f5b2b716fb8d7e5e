//! # Caller Identity
//!
//! The authenticated principal attached to every protected request.
//!
//! A `Caller` is produced only by verifying a bearer token; handlers never
//! build one from request input. Role checks happen against this value.

use serde::{Deserialize, Serialize};

use crate::entities::{Role, UserId};

/// Who is making the request, as proven by their token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Caller {
    pub user_id: UserId,
    pub email: String,
    pub role: Role,
}

impl Caller {
    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }

    /// `true` if the caller is an admin or is `user_id` themselves.
    pub fn can_view(&self, user_id: UserId) -> bool {
        self.is_admin() || self.user_id == user_id
    }
}
