//! # Registration Validation
//!
//! Email format and password policy. Checks run in a fixed order and the
//! first failure wins, so clients always see the same message for the same
//! input.

use serde::{Deserialize, Serialize};
use shared_types::UserProfile;

use super::errors::IdentityError;

/// Minimum password length, in characters.
pub const MIN_PASSWORD_LEN: usize = 8;

/// Characters that satisfy the "special character" rule.
pub const SPECIAL_CHARS: &str = "`!@#$%^&*()_+-=[]{};':\"\\|,.<>/?~";

/// Allowed length of the final domain label.
const TLD_LEN: std::ops::RangeInclusive<usize> = 2..=6;

/// Input to `Register`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Registration {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
    #[serde(default, alias = "contactno")]
    pub contact: Option<String>,
    #[serde(default, alias = "isAdmin")]
    pub is_admin: bool,
}

impl Registration {
    /// Run every registration check in order.
    pub fn validate(&self) -> Result<(), IdentityError> {
        validate_email(&self.email)?;
        validate_password(&self.password)?;
        Ok(())
    }
}

/// Output of a successful `Login`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResult {
    pub user: UserProfile,
    pub token: String,
}

fn is_local_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-')
}

fn is_domain_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '.' | '-')
}

fn is_tld_char(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '.'
}

/// `local@domain.tld` where `local` is `[A-Za-z0-9_.-]+`, `domain` is
/// `[0-9A-Za-z.-]+` and `tld` is 2 to 6 letters or dots.
fn is_well_formed_email(email: &str) -> bool {
    let Some((local, rest)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || !local.chars().all(is_local_char) {
        return false;
    }
    if !rest.chars().all(is_domain_char) {
        return false;
    }
    // Any dot may separate domain from tld, as long as both halves fit.
    rest.char_indices()
        .filter(|&(i, c)| c == '.' && i > 0)
        .any(|(i, _)| {
            let tld = &rest[i + 1..];
            TLD_LEN.contains(&tld.len()) && tld.chars().all(is_tld_char)
        })
}

pub fn validate_email(email: &str) -> Result<(), IdentityError> {
    if email.is_empty() {
        return Err(IdentityError::Validation("EmailId is empty".into()));
    }
    if !is_well_formed_email(email) {
        return Err(IdentityError::Validation("Invalid email address".into()));
    }
    Ok(())
}

pub fn validate_password(password: &str) -> Result<(), IdentityError> {
    if password.is_empty() {
        return Err(IdentityError::Validation("Password is empty".into()));
    }
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(IdentityError::Validation("Minimum 8 characters".into()));
    }
    if !password.chars().any(|c| c.is_ascii_digit()) {
        return Err(IdentityError::Validation(
            "Minimum one number required".into(),
        ));
    }
    if !password.chars().any(|c| SPECIAL_CHARS.contains(c)) {
        return Err(IdentityError::Validation(
            "Minimum one special character required".into(),
        ));
    }
    Ok(())
}
