//! # Snapshot Persistence
//!
//! The stores live in memory; this module gives them a lifecycle. The node
//! restores `<data_dir>/library.json` at startup and writes it back on
//! graceful shutdown.
//!
//! Writes go to a sibling temp file which is synced and then renamed over the
//! snapshot, so a crash mid-write leaves the previous snapshot intact.

use serde::{Deserialize, Serialize};
use shared_types::{Book, Transaction, User};
use std::io::Write;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

/// Everything the node persists.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Snapshot {
    pub users: Vec<User>,
    pub books: Vec<Book>,
    pub transactions: Vec<Transaction>,
}

impl Snapshot {
    pub fn is_empty(&self) -> bool {
        self.users.is_empty() && self.books.is_empty() && self.transactions.is_empty()
    }

    /// Loans not yet returned.
    pub fn open_loans(&self) -> usize {
        self.transactions.iter().filter(|t| t.is_open()).count()
    }
}

#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("snapshot I/O failed at {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("snapshot {path:?} is not valid: {source}")]
    Format {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// A snapshot location on disk.
#[derive(Debug, Clone)]
pub struct SnapshotFile {
    path: PathBuf,
}

impl SnapshotFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// `None` when no snapshot has been written yet.
    pub fn load(&self) -> Result<Option<Snapshot>, PersistenceError> {
        let raw = match std::fs::read(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = ?self.path, "no snapshot on disk");
                return Ok(None);
            }
            Err(source) => return Err(self.io_error(source)),
        };

        let snapshot: Snapshot =
            serde_json::from_slice(&raw).map_err(|source| PersistenceError::Format {
                path: self.path.clone(),
                source,
            })?;
        info!(
            path = ?self.path,
            users = snapshot.users.len(),
            books = snapshot.books.len(),
            transactions = snapshot.transactions.len(),
            "snapshot loaded"
        );
        Ok(Some(snapshot))
    }

    pub fn save(&self, snapshot: &Snapshot) -> Result<(), PersistenceError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(|source| self.io_error(source))?;
        }

        let bytes =
            serde_json::to_vec_pretty(snapshot).map_err(|source| PersistenceError::Format {
                path: self.path.clone(),
                source,
            })?;

        // Write atomically via temp file
        let temp_path = self.path.with_extension("json.tmp");
        let mut file = std::fs::File::create(&temp_path).map_err(|source| self.io_error(source))?;
        file.write_all(&bytes)
            .map_err(|source| self.io_error(source))?;
        file.sync_all().map_err(|source| self.io_error(source))?;
        std::fs::rename(&temp_path, &self.path).map_err(|source| self.io_error(source))?;

        info!(
            path = ?self.path,
            users = snapshot.users.len(),
            books = snapshot.books.len(),
            transactions = snapshot.transactions.len(),
            "snapshot saved"
        );
        Ok(())
    }

    fn io_error(&self, source: std::io::Error) -> PersistenceError {
        PersistenceError::Io {
            path: self.path.clone(),
            source,
        }
    }
}
