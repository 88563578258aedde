use lazyhome_core::db::open_db_in_memory;
use lazyhome_core::repo::kv_repo::{keys, load_or_default, save_json};
use lazyhome_core::{ChoreRegistry, KeyValueStore, ScheduleStore, SqliteKvStore, WeekKey};

#[test]
fn missing_key_returns_caller_default() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteKvStore::try_new(&conn).unwrap();

    let value: Vec<u32> = load_or_default(&store, "nothing_here", || vec![7]).unwrap();
    assert_eq!(value, vec![7]);
    assert_eq!(store.get_raw("nothing_here").unwrap(), None);
}

#[test]
fn save_replaces_whole_document() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteKvStore::try_new(&conn).unwrap();

    save_json(&store, "numbers", &vec![1, 2, 3]).unwrap();
    save_json(&store, "numbers", &vec![4]).unwrap();

    assert_eq!(store.get_raw("numbers").unwrap().as_deref(), Some("[4]"));
    let rows: i64 = conn
        .query_row("SELECT COUNT(*) FROM kv_store WHERE key = 'numbers';", [], |row| {
            row.get(0)
        })
        .unwrap();
    assert_eq!(rows, 1);
}

#[test]
fn malformed_documents_fall_back_to_defaults() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteKvStore::try_new(&conn).unwrap();
    store.set_raw(keys::CHORES, "{not json").unwrap();
    store.set_raw(keys::WEEKLY_SCHEDULE, "[1, 2]").unwrap();

    assert!(ChoreRegistry::new(store).all().unwrap().is_empty());
    let week = WeekKey::parse("2024-01-01").unwrap();
    assert!(ScheduleStore::new(store).get_week(week).unwrap().is_empty());
}

#[test]
fn schedule_document_uses_nested_date_keys() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteKvStore::try_new(&conn).unwrap();
    let week = WeekKey::parse("2024-01-03").unwrap();
    let schedule = ScheduleStore::new(store);

    schedule.add_task(week, week.days()[2], "Aspirar sala").unwrap();

    let raw = store.get_raw(keys::WEEKLY_SCHEDULE).unwrap().unwrap();
    assert_eq!(raw, r#"{"2024-01-01":{"2024-01-03":["Aspirar sala"]}}"#);
}
