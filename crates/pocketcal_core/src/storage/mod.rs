//! Key-value persistence port for the event blob.
//!
//! # Responsibility
//! - Define the `get`/`set` contract the event store runs on.
//! - Provide an in-memory backend for tests and a SQLite backend for disk.
//!
//! # Invariants
//! - `get` returns `Ok(None)` for a missing key, never an error.
//! - A failed `set` leaves the previously stored blob untouched.

use crate::db::DbError;
use std::error::Error;
use std::fmt::{Display, Formatter};

mod memory;
mod sqlite;

pub use memory::MemoryKeyValueStore;
pub use sqlite::SqliteKeyValueStore;

pub type StorageResult<T> = Result<T, StorageError>;

/// Backend failure while reading or writing a blob.
#[derive(Debug)]
pub enum StorageError {
    /// Backend refused the write because it would exceed its quota.
    CapacityExceeded {
        key: String,
        limit: usize,
        attempted: usize,
    },
    Db(DbError),
    /// Any other backend-specific failure.
    Backend(String),
}

impl Display for StorageError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::CapacityExceeded {
                key,
                limit,
                attempted,
            } => write!(
                f,
                "storage quota exceeded for `{key}`: {attempted} bytes > {limit} bytes"
            ),
            Self::Db(err) => write!(f, "{err}"),
            Self::Backend(message) => write!(f, "storage backend failure: {message}"),
        }
    }
}

impl Error for StorageError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::CapacityExceeded { .. } | Self::Backend(_) => None,
        }
    }
}

impl From<DbError> for StorageError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

/// Synchronous string blob storage addressed by a logical key.
pub trait KeyValueStore {
    /// Reads the blob stored under `key`.
    fn get(&self, key: &str) -> StorageResult<Option<String>>;
    /// Replaces the blob stored under `key`.
    fn set(&mut self, key: &str, blob: &str) -> StorageResult<()>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for &mut S {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, blob: &str) -> StorageResult<()> {
        (**self).set(key, blob)
    }
}
