//! # Core Domain Entities
//!
//! Defines the library entities as described in the data model.
//!
//! ## Clusters
//!
//! - **Catalog**: `Book`, `BookPatch`
//! - **Members**: `User`, `UserProfile`, `Role`
//! - **Ledger**: `Transaction`, `LoanState`, `TransactionDetails`

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use crate::errors::{LoanStateError, QuantityError};

// =============================================================================
// IDENTIFIERS
// =============================================================================

macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(pub Uuid);

        impl $name {
            /// Generate a fresh random identifier.
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                self.0.fmt(f)
            }
        }

        impl FromStr for $name {
            type Err = uuid::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Uuid::parse_str(s.trim()).map(Self)
            }
        }
    };
}

define_id!(
    /// Identity of a book record in the catalog.
    BookId
);
define_id!(
    /// Identity of a registered user.
    UserId
);
define_id!(
    /// Identity of a borrow record in the ledger.
    TransactionId
);

// =============================================================================
// CLUSTER A: THE CATALOG
// =============================================================================

/// A book title held by the library, with its copy counters.
///
/// ## Invariant
///
/// `available_copies <= total_copies` at all times. Both counters are
/// unsigned, so neither can go negative.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    pub id: BookId,
    /// Unique across the catalog.
    pub name: String,
    pub author: String,
    pub total_copies: u32,
    pub available_copies: u32,
}

impl Book {
    /// A freshly catalogued title has every copy on the shelf.
    pub fn new(name: impl Into<String>, author: impl Into<String>, total_copies: u32) -> Self {
        Self {
            id: BookId::new(),
            name: name.into(),
            author: author.into(),
            total_copies,
            available_copies: total_copies,
        }
    }

    /// Copies currently lent out.
    pub fn outstanding_copies(&self) -> u32 {
        self.total_copies - self.available_copies
    }

    pub fn has_available_copy(&self) -> bool {
        self.available_copies > 0
    }

    pub fn has_outstanding_copy(&self) -> bool {
        self.available_copies < self.total_copies
    }

    /// Take one copy off the shelf.
    pub fn take_copy(&mut self) -> bool {
        if !self.has_available_copy() {
            return false;
        }
        self.available_copies -= 1;
        true
    }

    /// Put one lent copy back on the shelf.
    pub fn restore_copy(&mut self) -> bool {
        if !self.has_outstanding_copy() {
            return false;
        }
        self.available_copies += 1;
        true
    }

    /// Apply an administrative update.
    ///
    /// The quantity delta is ADDED to both counters rather than replacing
    /// them: sending `5` to a book with `total=3, available=1` yields
    /// `total=8, available=6`. Negative deltas are accepted as long as
    /// neither counter drops below zero.
    pub fn apply_patch(&mut self, patch: &BookPatch) -> Result<(), QuantityError> {
        let total = i64::from(self.total_copies)
            .checked_add(patch.copies_delta)
            .ok_or(QuantityError::Overflow)?;
        let available = i64::from(self.available_copies)
            .checked_add(patch.copies_delta)
            .ok_or(QuantityError::Overflow)?;

        if total < 0 {
            return Err(QuantityError::NegativeTotal { resulting: total });
        }
        if available < 0 {
            return Err(QuantityError::NegativeAvailable {
                resulting: available,
            });
        }
        let total = u32::try_from(total).map_err(|_| QuantityError::Overflow)?;
        let available = u32::try_from(available).map_err(|_| QuantityError::Overflow)?;

        if let Some(name) = &patch.name {
            self.name = name.clone();
        }
        if let Some(author) = &patch.author {
            self.author = author.clone();
        }
        self.total_copies = total;
        self.available_copies = available;
        Ok(())
    }
}

/// Administrative change to a book record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookPatch {
    pub name: Option<String>,
    pub author: Option<String>,
    /// Added to both `total_copies` and `available_copies`.
    pub copies_delta: i64,
}

// =============================================================================
// CLUSTER B: MEMBERS
// =============================================================================

/// Access level of a registered user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Member,
}

impl Role {
    pub fn from_admin_flag(is_admin: bool) -> Self {
        if is_admin {
            Role::Admin
        } else {
            Role::Member
        }
    }

    pub fn is_admin(self) -> bool {
        self == Role::Admin
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Admin => write!(f, "admin"),
            Role::Member => write!(f, "member"),
        }
    }
}

/// A registered user as held by the credential store.
///
/// Contains the password hash; never hand this to a client; use
/// [`User::profile`] instead.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub username: String,
    pub name: String,
    /// Unique across all users.
    pub email: String,
    pub password_hash: String,
    pub contact: Option<String>,
    pub role: Role,
}

impl User {
    pub fn profile(&self) -> UserProfile {
        UserProfile {
            id: self.id,
            username: self.username.clone(),
            name: self.name.clone(),
            email: self.email.clone(),
            contact: self.contact.clone(),
            role: self.role,
        }
    }
}

/// Public projection of a [`User`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: UserId,
    pub username: String,
    pub name: String,
    pub email: String,
    pub contact: Option<String>,
    pub role: Role,
}

// =============================================================================
// CLUSTER C: THE LEDGER
// =============================================================================

/// Lifecycle of a loan. `Open` is initial, `Returned` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LoanState {
    Open,
    Returned,
}

/// A borrow record linking one user to one book.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: TransactionId,
    pub user_id: UserId,
    pub book_id: BookId,
    pub borrowed_at: DateTime<Utc>,
    pub due_date: DateTime<Utc>,
    /// `None` while the loan is open. Once set it is never cleared.
    pub returned_at: Option<DateTime<Utc>>,
}

impl Transaction {
    /// Every transaction starts life open.
    pub fn open(
        user_id: UserId,
        book_id: BookId,
        borrowed_at: DateTime<Utc>,
        due_date: DateTime<Utc>,
    ) -> Self {
        Self {
            id: TransactionId::new(),
            user_id,
            book_id,
            borrowed_at,
            due_date,
            returned_at: None,
        }
    }

    pub fn state(&self) -> LoanState {
        if self.returned_at.is_some() {
            LoanState::Returned
        } else {
            LoanState::Open
        }
    }

    pub fn is_open(&self) -> bool {
        self.state() == LoanState::Open
    }

    /// `Open -> Returned`. The only transition there is.
    pub fn mark_returned(&mut self, at: DateTime<Utc>) -> Result<(), LoanStateError> {
        match self.returned_at {
            Some(returned_at) => Err(LoanStateError::AlreadyReturned {
                transaction_id: self.id,
                returned_at,
            }),
            None => {
                self.returned_at = Some(at);
                Ok(())
            }
        }
    }
}

/// A transaction joined with the user and book it references.
///
/// References that no longer resolve come back as `None`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionDetails {
    pub id: TransactionId,
    pub user: Option<UserProfile>,
    pub book: Option<Book>,
    pub borrowed_at: DateTime<Utc>,
    pub due_date: DateTime<Utc>,
    pub returned_at: Option<DateTime<Utc>>,
    pub state: LoanState,
}

impl TransactionDetails {
    pub fn join(tx: &Transaction, user: Option<UserProfile>, book: Option<Book>) -> Self {
        Self {
            id: tx.id,
            user,
            book,
            borrowed_at: tx.borrowed_at,
            due_date: tx.due_date,
            returned_at: tx.returned_at,
            state: tx.state(),
        }
    }
}
