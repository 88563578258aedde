use lazyhome_core::db::migrations::latest_version;
use lazyhome_core::db::{open_db, open_db_in_memory, DbError};
use lazyhome_core::{ChoreRegistry, Frequency, RepoError, SqliteKvStore};
use rusqlite::Connection;

#[test]
fn open_db_in_memory_applies_all_migrations() {
    let conn = open_db_in_memory().unwrap();

    assert_eq!(schema_version(&conn), latest_version());
    assert_table_exists(&conn, "kv_store");
}

#[test]
fn reopening_file_database_keeps_data_and_version() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("lazyhome.db");

    {
        let conn = open_db(&path).unwrap();
        let store = SqliteKvStore::try_new(&conn).unwrap();
        ChoreRegistry::new(store)
            .add("Lavar louça", None, Frequency::Daily)
            .unwrap();
    }

    let conn = open_db(&path).unwrap();
    assert_eq!(schema_version(&conn), latest_version());
    let store = SqliteKvStore::try_new(&conn).unwrap();
    let chores = ChoreRegistry::new(store).all().unwrap();
    assert_eq!(chores.len(), 1);
    assert_eq!(chores[0].text, "Lavar louça");
}

#[test]
fn opening_database_with_newer_schema_version_returns_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("future.db");

    let conn = Connection::open(&path).unwrap();
    conn.execute_batch("PRAGMA user_version = 999;").unwrap();
    drop(conn);

    let err = open_db(&path).unwrap_err();
    match err {
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
fn kv_store_requires_migrated_connection() {
    let conn = Connection::open_in_memory().unwrap();
    let err = SqliteKvStore::try_new(&conn).err().expect("unmigrated connection");
    assert!(matches!(err, RepoError::MissingRequiredTable("kv_store")));
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
