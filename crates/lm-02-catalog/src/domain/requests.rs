//! # Catalog Requests
//!
//! Input shapes for `CreateBook` and `UpdateBook`. Both accept the legacy
//! `totalquantity` field name.

use serde::{Deserialize, Serialize};
use shared_types::{Book, BookPatch};

use super::errors::CatalogError;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewBook {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub author: String,
    #[serde(default, alias = "totalquantity")]
    pub total_copies: u32,
}

impl NewBook {
    pub fn validate(&self) -> Result<(), CatalogError> {
        if self.name.trim().is_empty() {
            return Err(CatalogError::Validation("Book name is empty".into()));
        }
        if self.author.trim().is_empty() {
            return Err(CatalogError::Validation("Author is empty".into()));
        }
        Ok(())
    }

    pub fn into_book(self) -> Book {
        Book::new(self.name, self.author, self.total_copies)
    }
}

/// Administrative update. Omitted fields are left alone; the quantity is a
/// delta ADDED to both the total and the available count.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BookUpdate {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default, alias = "totalquantity")]
    pub total_copies: Option<i64>,
}

impl BookUpdate {
    pub fn validate(&self) -> Result<(), CatalogError> {
        if matches!(&self.name, Some(name) if name.trim().is_empty()) {
            return Err(CatalogError::Validation("Book name is empty".into()));
        }
        if matches!(&self.author, Some(author) if author.trim().is_empty()) {
            return Err(CatalogError::Validation("Author is empty".into()));
        }
        Ok(())
    }

    pub fn into_patch(self) -> BookPatch {
        BookPatch {
            name: self.name,
            author: self.author,
            copies_delta: self.total_copies.unwrap_or(0),
        }
    }
}
