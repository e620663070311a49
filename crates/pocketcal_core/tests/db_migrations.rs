use pocketcal_core::db::migrations::{apply_migrations, latest_version, schema_version};
use pocketcal_core::db::{open_db, open_db_in_memory, DbError};
use pocketcal_core::{KeyValueStore, SqliteKeyValueStore};
use rusqlite::{Connection, OpenFlags};

#[test]
fn open_db_in_memory_applies_all_migrations() {
    let conn = open_db_in_memory().unwrap();

    assert_eq!(user_version(&conn), latest_version());
    assert_table_exists(&conn, "kv_blobs");
}

#[test]
fn reopening_same_file_keeps_schema_and_blobs() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("pocketcal.sqlite3");

    let conn_first = open_db(&path).unwrap();
    SqliteKeyValueStore::new(&conn_first)
        .set("calendar_events", "[]")
        .unwrap();
    drop(conn_first);

    let conn_second = open_db(&path).unwrap();
    assert_eq!(user_version(&conn_second), latest_version());
    let blob = SqliteKeyValueStore::new(&conn_second)
        .get("calendar_events")
        .unwrap();
    assert_eq!(blob.as_deref(), Some("[]"));
}

#[test]
fn set_overwrites_existing_key() {
    let conn = open_db_in_memory().unwrap();
    let mut store = SqliteKeyValueStore::new(&conn);

    assert_eq!(store.get("k").unwrap(), None);
    store.set("k", "first").unwrap();
    store.set("k", "second").unwrap();

    assert_eq!(store.get("k").unwrap().as_deref(), Some("second"));
    let rows: i64 = conn
        .query_row("SELECT COUNT(*) FROM kv_blobs;", [], |row| row.get(0))
        .unwrap();
    assert_eq!(rows, 1);
}

#[test]
fn opening_database_with_newer_schema_version_returns_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("future.sqlite3");

    let conn = Connection::open(&path).unwrap();
    conn.execute_batch("PRAGMA user_version = 999;").unwrap();
    drop(conn);

    match open_db(&path).unwrap_err() {
        DbError::UnsupportedSchemaVersion {
            db_version,
            latest_supported,
        } => {
            assert_eq!(db_version, 999);
            assert_eq!(latest_supported, latest_version());
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn schema_version_reads_user_version() {
    let conn = open_db_in_memory().unwrap();
    assert_eq!(schema_version(&conn).unwrap(), user_version(&conn));
}

#[test]
fn failed_step_is_reported_with_its_version_and_name() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("readonly.sqlite3");
    drop(Connection::open(&path).unwrap());
    let mut conn = Connection::open_with_flags(&path, OpenFlags::SQLITE_OPEN_READ_ONLY).unwrap();

    match apply_migrations(&mut conn).unwrap_err() {
        DbError::Migration { version, name, .. } => {
            assert_eq!(version, 1);
            assert_eq!(name, "kv_blobs");
        }
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(user_version(&conn), 0);
}

#[test]
fn unopenable_path_reports_location() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing-dir").join("pocketcal.sqlite3");

    let err = open_db(&path).unwrap_err();
    assert!(matches!(err, DbError::Open { .. }));
    assert!(err.to_string().contains("missing-dir"));
}

fn user_version(conn: &Connection) -> u32 {
    conn.query_row("PRAGMA user_version;", [], |row| row.get(0))
        .unwrap()
}

fn assert_table_exists(conn: &Connection, table_name: &str) {
    let exists: i64 = conn
        .query_row(
            "SELECT EXISTS(
                SELECT 1
                FROM sqlite_master
                WHERE type = 'table' AND name = ?1
            );",
            [table_name],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(exists, 1, "table {table_name} does not exist");
}
