//! # Bearer Tokens
//!
//! HS256 JWTs carrying the caller's id, email and admin flag.

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::errors::ErrorKind as JwtErrorKind;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use shared_types::{Caller, Role, User, UserId};

use super::config::MAX_TOKEN_TTL_SECS;
use super::errors::IdentityError;

/// Claims embedded in every issued token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenClaims {
    /// Subject (user id).
    pub sub: String,
    pub email: String,
    #[serde(rename = "isAdmin")]
    pub is_admin: bool,
    /// Issued at (Unix timestamp).
    pub iat: i64,
    /// Expiration time (Unix timestamp).
    pub exp: i64,
}

impl TokenClaims {
    pub fn for_user(user: &User, issued_at: DateTime<Utc>, ttl: Duration) -> Self {
        Self {
            sub: user.id.to_string(),
            email: user.email.clone(),
            is_admin: user.role.is_admin(),
            iat: issued_at.timestamp(),
            exp: issued_at
                .checked_add_signed(ttl)
                .unwrap_or(DateTime::<Utc>::MAX_UTC)
                .timestamp(),
        }
    }

    pub fn into_caller(self) -> Result<Caller, IdentityError> {
        let user_id: UserId = self
            .sub
            .parse()
            .map_err(|_| IdentityError::InvalidToken("malformed subject".into()))?;
        Ok(Caller {
            user_id,
            email: self.email,
            role: Role::from_admin_flag(self.is_admin),
        })
    }
}

/// Signs and verifies tokens with a shared secret.
#[derive(Clone)]
pub struct TokenIssuer {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    ttl: Duration,
}

impl std::fmt::Debug for TokenIssuer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenIssuer")
            .field("ttl", &self.ttl)
            .finish_non_exhaustive()
    }
}

impl TokenIssuer {
    pub fn new(secret: &str, ttl_secs: u64) -> Self {
        // TTLs past the accepted maximum are clamped to it.
        let ttl_secs = i64::try_from(ttl_secs.min(MAX_TOKEN_TTL_SECS)).unwrap_or_default();
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            ttl: Duration::seconds(ttl_secs),
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    pub fn issue(&self, user: &User, now: DateTime<Utc>) -> Result<String, IdentityError> {
        let claims = TokenClaims::for_user(user, now, self.ttl);
        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| IdentityError::Signing(e.to_string()))
    }

    /// Check signature and expiry, returning the embedded claims.
    pub fn verify(&self, token: &str) -> Result<TokenClaims, IdentityError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "sub"]);

        decode::<TokenClaims>(token, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                JwtErrorKind::ExpiredSignature => IdentityError::InvalidToken("expired".into()),
                JwtErrorKind::InvalidSignature => {
                    IdentityError::InvalidToken("bad signature".into())
                }
                _ => IdentityError::InvalidToken(e.to_string()),
            })
    }
}
