//! # Identity Configuration

use serde::{Deserialize, Serialize};

/// Signing secret used when none is configured. Only acceptable in
/// development; production startup refuses it.
pub const DEFAULT_JWT_SECRET: &str = "library-dev-secret-do-not-deploy";

/// Minimum accepted length of the signing secret, in bytes.
pub const MIN_SECRET_LEN: usize = 16;

/// Longest accepted token lifetime (ten years).
pub const MAX_TOKEN_TTL_SECS: u64 = 10 * 365 * 24 * 60 * 60;

/// bcrypt accepts work factors in this range.
const BCRYPT_COST_RANGE: std::ops::RangeInclusive<u32> = 4..=31;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct IdentityConfig {
    /// HS256 signing secret.
    pub jwt_secret: String,
    /// Lifetime of an issued token.
    pub token_ttl_secs: u64,
    /// bcrypt work factor (4..=31).
    pub bcrypt_cost: u32,
    /// Honour the `isAdmin` flag supplied at registration.
    pub allow_admin_signup: bool,
}

impl Default for IdentityConfig {
    fn default() -> Self {
        Self {
            jwt_secret: DEFAULT_JWT_SECRET.to_string(),
            token_ttl_secs: 24 * 60 * 60,
            bcrypt_cost: 10,
            allow_admin_signup: true,
        }
    }
}

impl IdentityConfig {
    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), String> {
        if self.jwt_secret.len() < MIN_SECRET_LEN {
            return Err(format!(
                "jwt_secret must be at least {} bytes",
                MIN_SECRET_LEN
            ));
        }
        if self.token_ttl_secs == 0 {
            return Err("token_ttl_secs must be > 0".to_string());
        }
        if self.token_ttl_secs > MAX_TOKEN_TTL_SECS {
            return Err(format!(
                "token_ttl_secs must be at most {MAX_TOKEN_TTL_SECS}"
            ));
        }
        if !BCRYPT_COST_RANGE.contains(&self.bcrypt_cost) {
            return Err(format!(
                "bcrypt_cost must be between {} and {}",
                BCRYPT_COST_RANGE.start(),
                BCRYPT_COST_RANGE.end()
            ));
        }
        Ok(())
    }

    pub fn uses_default_secret(&self) -> bool {
        self.jwt_secret == DEFAULT_JWT_SECRET
    }
}
