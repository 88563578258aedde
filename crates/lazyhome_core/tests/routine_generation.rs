use lazyhome_core::db::open_db_in_memory;
use lazyhome_core::repo::kv_repo::keys;
use lazyhome_core::{
    ChorePatch, Confirmation, Frequency, KeyValueStore, RoutineService, SqliteKvStore, WeekKey,
    DAYS_PER_WEEK,
};

fn week() -> WeekKey {
    WeekKey::parse("2024-07-01").unwrap()
}

fn seed_household(service: &RoutineService<SqliteKvStore<'_>>) {
    let chores = service.chores();
    chores.add("Lavar louça", Some("Cozinha"), Frequency::Daily).unwrap();
    chores.add("Regar plantas", Some("Varanda"), Frequency::Weekly).unwrap();
    chores.add("Trocar lençóis", Some("Quarto"), Frequency::Weekly).unwrap();
    let heavy = chores
        .add("Limpeza pesada", None, Frequency::Weekly)
        .unwrap()
        .unwrap();
    chores.toggle_completed(heavy.id).unwrap();
}

#[test]
fn generates_household_week() {
    let conn = open_db_in_memory().unwrap();
    let service = RoutineService::new(SqliteKvStore::try_new(&conn).unwrap());
    seed_household(&service);

    service.generate(week(), Confirmation::Confirmed).unwrap();

    let days = week().days();
    let stored = service.schedule().get_week(week()).unwrap();
    assert_eq!(stored.day(days[0]), ["Lavar louça", "Regar plantas"]);
    assert_eq!(stored.day(days[1]), ["Lavar louça", "Trocar lençóis"]);
    for day in &days[2..] {
        assert_eq!(stored.day(*day), ["Lavar louça"]);
    }
    assert!(stored
        .iter()
        .all(|(_, tasks)| !tasks.iter().any(|task| task == "Limpeza pesada")));
}

#[test]
fn monthly_chores_are_never_placed() {
    let conn = open_db_in_memory().unwrap();
    let service = RoutineService::new(SqliteKvStore::try_new(&conn).unwrap());
    service
        .chores()
        .add("Limpar geladeira", None, Frequency::Monthly)
        .unwrap();
    service.chores().add("Regar plantas", None, Frequency::Weekly).unwrap();

    let plan = service.generate(week(), Confirmation::Confirmed).unwrap().unwrap();

    assert!(plan
        .iter()
        .all(|(_, tasks)| !tasks.iter().any(|task| task == "Limpar geladeira")));
    // Monthly chores do not consume a round-robin slot either.
    assert_eq!(plan.day(week().days()[0]), ["Regar plantas"]);
}

#[test]
fn daily_chores_cover_all_seven_days_and_weekly_land_once() {
    let conn = open_db_in_memory().unwrap();
    let service = RoutineService::new(SqliteKvStore::try_new(&conn).unwrap());
    service.chores().add("Tirar lixo", None, Frequency::Daily).unwrap();
    service.chores().add("Arrumar cama", None, Frequency::Daily).unwrap();
    let weekly: Vec<String> = (0..10).map(|n| format!("semanal {n}")).collect();
    for text in &weekly {
        service.chores().add(text, None, Frequency::Weekly).unwrap();
    }

    let plan = service.generate(week(), Confirmation::Confirmed).unwrap().unwrap();
    let days = week().days();

    for day in days {
        assert_eq!(&plan.day(day)[..2], ["Tirar lixo", "Arrumar cama"]);
    }
    for (j, text) in weekly.iter().enumerate() {
        let hits: Vec<usize> = (0..DAYS_PER_WEEK)
            .filter(|&i| plan.day(days[i]).contains(text))
            .collect();
        assert_eq!(hits, vec![j % DAYS_PER_WEEK], "chore {text}");
    }
}

#[test]
fn regeneration_is_byte_identical() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteKvStore::try_new(&conn).unwrap();
    let service = RoutineService::new(store);
    seed_household(&service);

    service.generate(week(), Confirmation::Confirmed).unwrap();
    let first = store.get_raw(keys::WEEKLY_SCHEDULE).unwrap();
    service.generate(week(), Confirmation::Confirmed).unwrap();
    let second = store.get_raw(keys::WEEKLY_SCHEDULE).unwrap();

    assert!(first.is_some());
    assert_eq!(first, second);
}

#[test]
fn generation_discards_manual_entries() {
    let conn = open_db_in_memory().unwrap();
    let service = RoutineService::new(SqliteKvStore::try_new(&conn).unwrap());
    seed_household(&service);
    let sunday = week().days()[6];
    service
        .schedule()
        .add_task(week(), sunday, "Consertar torneira")
        .unwrap();

    service.generate(week(), Confirmation::Confirmed).unwrap();

    assert_eq!(
        service.schedule().get_day(week(), sunday).unwrap(),
        ["Lavar louça"]
    );
}

#[test]
fn declined_generation_leaves_schedule_untouched() {
    let conn = open_db_in_memory().unwrap();
    let service = RoutineService::new(SqliteKvStore::try_new(&conn).unwrap());
    seed_household(&service);
    let monday = week().days()[0];
    service.schedule().add_task(week(), monday, "Manual").unwrap();

    assert!(service
        .generate(week(), Confirmation::Declined)
        .unwrap()
        .is_none());
    assert_eq!(service.schedule().get_day(week(), monday).unwrap(), ["Manual"]);
}

#[test]
fn generated_entries_are_decoupled_from_chores() {
    let conn = open_db_in_memory().unwrap();
    let service = RoutineService::new(SqliteKvStore::try_new(&conn).unwrap());
    let chore = service
        .chores()
        .add("Regar plantas", None, Frequency::Weekly)
        .unwrap()
        .unwrap();
    service.generate(week(), Confirmation::Confirmed).unwrap();

    let patch = ChorePatch {
        text: Some("Regar horta".to_string()),
        ..ChorePatch::default()
    };
    service.chores().update(chore.id, &patch).unwrap();
    service
        .chores()
        .remove(chore.id, Confirmation::Confirmed)
        .unwrap();

    let monday = week().days()[0];
    assert_eq!(
        service.schedule().get_day(week(), monday).unwrap(),
        ["Regar plantas"]
    );
}

#[test]
fn preview_does_not_write() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteKvStore::try_new(&conn).unwrap();
    let service = RoutineService::new(store);
    seed_household(&service);

    let preview = service.preview(week()).unwrap();

    assert_eq!(preview.day(week().days()[1]), ["Lavar louça", "Trocar lençóis"]);
    assert!(store.get_raw(keys::WEEKLY_SCHEDULE).unwrap().is_none());
}
