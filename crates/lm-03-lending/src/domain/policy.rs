//! # Loan Policy

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use super::errors::LendingError;

pub const DEFAULT_LOAN_PERIOD_DAYS: u32 = 10;

/// Longest accepted loan period (ten years).
pub const MAX_LOAN_PERIOD_DAYS: u32 = 3650;

/// How long a borrowed copy may be kept.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoanPolicy {
    pub loan_period_days: u32,
}

impl Default for LoanPolicy {
    fn default() -> Self {
        Self {
            loan_period_days: DEFAULT_LOAN_PERIOD_DAYS,
        }
    }
}

impl LoanPolicy {
    pub fn new(loan_period_days: u32) -> Self {
        Self { loan_period_days }
    }

    pub fn due_date(&self, borrowed_at: DateTime<Utc>) -> DateTime<Utc> {
        borrowed_at
            .checked_add_signed(Duration::days(i64::from(self.loan_period_days)))
            .unwrap_or(DateTime::<Utc>::MAX_UTC)
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.loan_period_days == 0 {
            return Err("loan_period_days must be > 0".to_string());
        }
        if self.loan_period_days > MAX_LOAN_PERIOD_DAYS {
            return Err(format!(
                "loan_period_days must be at most {MAX_LOAN_PERIOD_DAYS}"
            ));
        }
        Ok(())
    }
}

/// Body of both `Borrow` and `Return`: who, and which title.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoanRequest {
    /// Email of the user the loan is for.
    #[serde(default)]
    pub email: String,
    /// Book name.
    #[serde(default)]
    pub name: String,
}

impl LoanRequest {
    pub fn new(email: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            name: name.into(),
        }
    }

    pub fn validate(&self) -> Result<(), LendingError> {
        if self.email.trim().is_empty() {
            return Err(LendingError::Validation("EmailId is empty".into()));
        }
        if self.name.trim().is_empty() {
            return Err(LendingError::Validation("Book name is empty".into()));
        }
        Ok(())
    }
}
