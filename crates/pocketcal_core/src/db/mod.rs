//! SQLite bootstrap for the durable blob backend.
//!
//! # Responsibility
//! - Open the calendar database and bring `kv_blobs` to the latest schema.
//! - Attach the failing location, migration or blob key to every SQLite error.
//!
//! # Invariants
//! - No blob is read or written before migrations succeed.

use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod migrations;
mod open;

pub use open::{open_db, open_db_in_memory};

pub type DbResult<T> = Result<T, DbError>;

/// Direction of a failed `kv_blobs` statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlobAccess {
    Read,
    Write,
}

impl BlobAccess {
    fn as_str(self) -> &'static str {
        match self {
            Self::Read => "read",
            Self::Write => "write",
        }
    }
}

#[derive(Debug)]
pub enum DbError {
    /// Connection to `location` (a file path or `:memory:`) failed.
    Open {
        location: String,
        source: rusqlite::Error,
    },
    /// Migration script `name` failed; nothing from the batch was applied.
    Migration {
        version: u32,
        name: &'static str,
        source: rusqlite::Error,
    },
    /// File was written by a newer pocketcal build.
    UnsupportedSchemaVersion {
        db_version: u32,
        latest_supported: u32,
    },
    /// Statement on the `kv_blobs` row for `key` failed.
    Blob {
        key: String,
        access: BlobAccess,
        source: rusqlite::Error,
    },
    /// Connection setup outside migrations and blob access.
    Sqlite(rusqlite::Error),
}

impl DbError {
    pub(crate) fn blob(key: &str, access: BlobAccess, source: rusqlite::Error) -> Self {
        Self::Blob {
            key: key.to_string(),
            access,
            source,
        }
    }
}

impl Display for DbError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Open { location, source } => {
                write!(f, "cannot open calendar database `{location}`: {source}")
            }
            Self::Migration {
                version,
                name,
                source,
            } => write!(f, "calendar migration {version} ({name}) failed: {source}"),
            Self::UnsupportedSchemaVersion {
                db_version,
                latest_supported,
            } => write!(
                f,
                "calendar database schema version {db_version} is newer than supported {latest_supported}"
            ),
            Self::Blob {
                key,
                access,
                source,
            } => write!(
                f,
                "failed to {} kv_blobs row `{key}`: {source}",
                access.as_str()
            ),
            Self::Sqlite(err) => write!(f, "{err}"),
        }
    }
}

impl Error for DbError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Open { source, .. }
            | Self::Migration { source, .. }
            | Self::Blob { source, .. } => Some(source),
            Self::Sqlite(err) => Some(err),
            Self::UnsupportedSchemaVersion { .. } => None,
        }
    }
}

impl From<rusqlite::Error> for DbError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}
