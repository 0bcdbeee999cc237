use dualstore_core::db::migrations::{latest_version, schema_version};
use dualstore_core::db::{open_db, open_db_in_memory, DbError};
use dualstore_core::{DbRepository, ModelRegistry, Record, Repository, Session};
use rusqlite::Connection;
use serde_json::json;

#[test]
fn open_db_in_memory_creates_records_table() {
    let conn = open_db_in_memory().unwrap();

    assert_eq!(schema_version(&conn).unwrap(), latest_version());
    let exists: i64 = conn
        .query_row(
            "SELECT EXISTS(
                SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = 'records'
            );",
            [],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(exists, 1);
}

#[test]
fn reopening_file_database_keeps_committed_records() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("records.db");
    let registry = ModelRegistry::new().with("Amenity").unwrap();
    let wifi = Record::with_id("Amenity", "wifi", json!({ "name": "Wi-Fi" }));

    {
        let conn = open_db(&path).unwrap();
        let mut repo = DbRepository::new(Session::new(&conn), registry.clone());
        repo.save(&wifi).unwrap();
        repo.session_mut()
            .add(Record::with_id("Amenity", "pool", json!({})));
    }

    let conn = open_db(&path).unwrap();
    assert_eq!(schema_version(&conn).unwrap(), latest_version());
    let repo = DbRepository::new(Session::new(&conn), registry);
    assert_eq!(repo.get_all("Amenity").unwrap(), vec![wifi]);
}

#[test]
fn newer_schema_version_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("future.db");

    let conn = Connection::open(&path).unwrap();
    conn.execute_batch("PRAGMA user_version = 999;").unwrap();
    drop(conn);

    match open_db(&path).unwrap_err() {
        DbError::SchemaTooNew { found, supported } => {
            assert_eq!(found, 999);
            assert_eq!(supported, latest_version());
        }
        other => panic!("unexpected error: {other}"),
    }
}
