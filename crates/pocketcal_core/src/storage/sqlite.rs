//! SQLite blob backend.
//!
//! # Invariants
//! - The connection must come from `db::open_db*` so `kv_blobs` exists.

use super::{KeyValueStore, StorageResult};
use crate::db::{BlobAccess, DbError};
use rusqlite::{params, Connection, OptionalExtension};

/// Stores each key as one row of the `kv_blobs` table.
pub struct SqliteKeyValueStore<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteKeyValueStore<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl KeyValueStore for SqliteKeyValueStore<'_> {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        self.conn
            .query_row("SELECT blob FROM kv_blobs WHERE key = ?1;", [key], |row| {
                row.get::<_, String>(0)
            })
            .optional()
            .map_err(|source| DbError::blob(key, BlobAccess::Read, source).into())
    }

    fn set(&mut self, key: &str, blob: &str) -> StorageResult<()> {
        self.conn
            .execute(
                "INSERT INTO kv_blobs (key, blob, updated_at)
                 VALUES (?1, ?2, strftime('%s', 'now') * 1000)
                 ON CONFLICT(key) DO UPDATE SET
                    blob = excluded.blob,
                    updated_at = excluded.updated_at;",
                params![key, blob],
            )
            .map(|_| ())
            .map_err(|source| DbError::blob(key, BlobAccess::Write, source).into())
    }
}
