use rusqlite::Connection;
use serde::{Deserialize, Serialize};
use taskflow_core::db::migrations::latest_version;
use taskflow_core::db::open_db_in_memory;
use taskflow_core::repo::kv_repo::{read_value, write_value};
use taskflow_core::{KeyValueStore, MemoryKeyValueStore, RepoError, SqliteKeyValueStore};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct Counter {
    label: String,
    value: u32,
}

#[test]
fn missing_key_reads_default() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteKeyValueStore::try_new(&conn).unwrap();

    let value: u32 = read_value(&store, "taskflow-notifications", 2).unwrap();
    assert_eq!(value, 2);
}

#[test]
fn write_then_read_returns_latest_value() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteKeyValueStore::try_new(&conn).unwrap();

    let first = Counter {
        label: "a".to_string(),
        value: 1,
    };
    let second = Counter {
        label: "b".to_string(),
        value: 7,
    };
    write_value(&store, "counter", &first).unwrap();
    write_value(&store, "counter", &second).unwrap();

    let loaded = read_value(
        &store,
        "counter",
        Counter {
            label: String::new(),
            value: 0,
        },
    )
    .unwrap();
    assert_eq!(loaded, second);
    assert_eq!(store.keys().unwrap(), vec!["counter".to_string()]);
}

#[test]
fn corrupt_value_falls_back_to_default() {
    let store = MemoryKeyValueStore::new();
    store.write_raw("taskflow-tasks", "{not json").unwrap();

    let value: Vec<String> = read_value(&store, "taskflow-tasks", vec!["seed".to_string()]).unwrap();
    assert_eq!(value, vec!["seed".to_string()]);
}

#[test]
fn remove_deletes_key() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteKeyValueStore::try_new(&conn).unwrap();

    write_value(&store, "taskflow-search", "api").unwrap();
    store.remove("taskflow-search").unwrap();

    assert!(store.read_raw("taskflow-search").unwrap().is_none());
    assert!(store.keys().unwrap().is_empty());
}

#[test]
fn store_rejects_uninitialized_connection() {
    let conn = Connection::open_in_memory().unwrap();

    match SqliteKeyValueStore::try_new(&conn) {
        Err(RepoError::UninitializedConnection {
            expected_version,
            actual_version: 0,
        }) => assert_eq!(expected_version, latest_version()),
        Err(other) => panic!("unexpected error: {other}"),
        Ok(_) => panic!("expected uninitialized connection error"),
    }
}

#[test]
fn store_rejects_connection_without_kv_table() {
    let conn = Connection::open_in_memory().unwrap();
    conn.execute_batch(&format!("PRAGMA user_version = {};", latest_version()))
        .unwrap();

    assert!(matches!(
        SqliteKeyValueStore::try_new(&conn),
        Err(RepoError::MissingRequiredTable("kv_entries"))
    ));
}

#[test]
fn store_rejects_connection_missing_required_column() {
    let conn = Connection::open_in_memory().unwrap();
    conn.execute_batch(
        "CREATE TABLE kv_entries (
            key TEXT PRIMARY KEY NOT NULL,
            value TEXT NOT NULL
        );",
    )
    .unwrap();
    conn.execute_batch(&format!("PRAGMA user_version = {};", latest_version()))
        .unwrap();

    assert!(matches!(
        SqliteKeyValueStore::try_new(&conn),
        Err(RepoError::MissingRequiredColumn {
            table: "kv_entries",
            column: "updated_at"
        })
    ));
}
