//! Schema versions for the calendar database.
//!
//! The schema is a single `kv_blobs` table; `PRAGMA user_version` records
//! the last applied step.

use crate::db::{DbError, DbResult};
use log::info;
use rusqlite::Connection;

/// Ordered schema steps as `(version, name, sql)`.
const SCHEMA_STEPS: &[(u32, &str, &str)] =
    &[(1, "kv_blobs", include_str!("0001_kv_blobs.sql"))];

/// Returns the schema version this build writes.
pub fn latest_version() -> u32 {
    SCHEMA_STEPS.last().map_or(0, |(version, _, _)| *version)
}

/// Reads the schema version recorded in `conn`.
pub fn schema_version(conn: &Connection) -> DbResult<u32> {
    Ok(conn.pragma_query_value(None, "user_version", |row| row.get(0))?)
}

/// Brings `conn` to [`latest_version`] inside one transaction.
///
/// # Errors
/// - `UnsupportedSchemaVersion` when the file is newer than this build.
/// - `Migration` naming the step that failed; earlier steps are rolled back.
pub fn apply_migrations(conn: &mut Connection) -> DbResult<()> {
    let found = schema_version(conn)?;
    let latest = latest_version();
    if found > latest {
        return Err(DbError::UnsupportedSchemaVersion {
            db_version: found,
            latest_supported: latest,
        });
    }

    let pending = SCHEMA_STEPS
        .iter()
        .filter(|(version, _, _)| *version > found)
        .collect::<Vec<_>>();
    if pending.is_empty() {
        return Ok(());
    }

    let tx = conn.transaction()?;
    for &&(version, name, sql) in &pending {
        tx.execute_batch(sql)
            .and_then(|()| tx.pragma_update(None, "user_version", version))
            .map_err(|source| DbError::Migration {
                version,
                name,
                source,
            })?;
    }
    tx.commit()?;

    info!("event=db_migrate module=db status=ok from_version={found} to_version={latest}");
    Ok(())
}
