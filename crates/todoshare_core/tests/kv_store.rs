use todoshare_core::db::open_db_in_memory;
use todoshare_core::{KeyValueStore, SqliteKeyValueStore};

#[test]
fn missing_key_reads_as_none() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteKeyValueStore::new(&conn);

    assert_eq!(store.get_item("todoShare_todos").unwrap(), None);
}

#[test]
fn set_item_replaces_previous_value() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteKeyValueStore::new(&conn);

    store.set_item("k", "first").unwrap();
    store.set_item("k", "second").unwrap();

    assert_eq!(store.get_item("k").unwrap().as_deref(), Some("second"));
    let rows: i64 = conn
        .query_row("SELECT COUNT(*) FROM kv_items;", [], |row| row.get(0))
        .unwrap();
    assert_eq!(rows, 1);
}

#[test]
fn remove_item_is_idempotent() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteKeyValueStore::new(&conn);

    store.set_item("k", "v").unwrap();
    store.remove_item("k").unwrap();
    store.remove_item("k").unwrap();

    assert_eq!(store.get_item("k").unwrap(), None);
}

#[test]
fn borrowed_store_is_a_store() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteKeyValueStore::new(&conn);
    let by_ref = &store;

    by_ref.set_item("shared", "yes").unwrap();
    assert_eq!(store.get_item("shared").unwrap().as_deref(), Some("yes"));
}
