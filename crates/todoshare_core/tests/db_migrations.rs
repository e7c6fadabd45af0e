use rusqlite::Connection;
use todoshare_core::db::migrations::latest_version;
use todoshare_core::db::{open_db, open_db_in_memory, DbError};
use todoshare_core::{KeyValueStore, SqliteKeyValueStore};

#[test]
fn open_db_in_memory_applies_all_migrations() {
    let conn = open_db_in_memory().unwrap();

    assert_eq!(schema_version(&conn), latest_version());
    assert_table_exists(&conn, "kv_items");
}

#[test]
fn reopening_file_database_keeps_items() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("todoshare.sqlite3");

    let conn = open_db(&path).unwrap();
    SqliteKeyValueStore::new(&conn)
        .set_item("todoShare_settings", r#"{"theme":"dark"}"#)
        .unwrap();
    drop(conn);

    let conn = open_db(&path).unwrap();
    assert_eq!(schema_version(&conn), latest_version());
    let value = SqliteKeyValueStore::new(&conn)
        .get_item("todoShare_settings")
        .unwrap();
    assert_eq!(value.as_deref(), Some(r#"{"theme":"dark"}"#));
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

fn schema_version(conn: &Connection) -> u32 {
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
