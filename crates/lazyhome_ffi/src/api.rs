//! FFI use-case API for Flutter-facing calls.
//!
//! # Responsibility
//! - Expose chore, schedule and checklist use-cases to Dart via FRB.
//! - Translate string ids/keys into core types and back.
//!
//! # Invariants
//! - Exported functions must not panic across FFI boundary.
//! - Destructive calls (`chore_delete`, `schedule_generate`) only mutate
//!   when `confirmed == true`.
//! - Failures come back as `ok=false` envelopes with a readable message.

use lazyhome_core::db::open_db;
use lazyhome_core::{
    core_version as core_version_inner, init_logging as init_logging_inner, ping as ping_inner,
    ChecklistItem, ChecklistKind, ChecklistStore, Chore, ChorePatch, ChoreRegistry, Confirmation,
    DayKey, Frequency, RoutineService, ScheduleStore, SqliteKvStore, WeekKey, WeekSchedule,
};
use log::warn;
use std::path::PathBuf;
use std::sync::OnceLock;
use uuid::Uuid;

const DB_FILE_NAME: &str = "lazyhome.sqlite3";
static DB_PATH: OnceLock<PathBuf> = OnceLock::new();

/// Minimal health-check API for FRB smoke integration.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Expose core crate version through FFI.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// Input semantics:
/// - `level`: one of `trace|debug|info|warn|error` (case-insensitive).
/// - `log_dir`: absolute directory path where rolling logs are written.
///
/// # FFI contract
/// - Safe to call repeatedly with the same `level + log_dir` (idempotent).
/// - Returns empty string on success and error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err,
    }
}

/// Chore row as shown by the master-routine screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChoreItem {
    pub id: String,
    pub text: String,
    pub zone: String,
    /// `daily|weekly|monthly`.
    pub frequency: String,
    pub completed: bool,
}

/// Chore list envelope, split by rotation state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChoreListResponse {
    pub ok: bool,
    pub active: Vec<ChoreItem>,
    pub completed: Vec<ChoreItem>,
    pub message: String,
}

/// One day column of the week grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduleDay {
    /// `YYYY-MM-DD`.
    pub day_key: String,
    pub tasks: Vec<String>,
}

/// Week grid envelope; always seven days, Monday first, when `ok`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeekResponse {
    pub ok: bool,
    pub week_key: String,
    pub days: Vec<ScheduleDay>,
    pub message: String,
}

/// Checklist row (shopping, wishlist, workouts, notes).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChecklistEntry {
    pub id: String,
    pub text: String,
    pub done: bool,
}

/// Generic action response envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionResponse {
    /// Whether the call completed without storage failure.
    pub ok: bool,
    /// Whether state actually changed (false for declined/no-op calls).
    pub changed: bool,
    /// Id of the created/affected record, when any.
    pub id: Option<String>,
    pub message: String,
}

impl ActionResponse {
    fn changed(message: impl Into<String>, id: Option<String>) -> Self {
        Self {
            ok: true,
            changed: true,
            id,
            message: message.into(),
        }
    }

    fn unchanged(message: impl Into<String>) -> Self {
        Self {
            ok: true,
            changed: false,
            id: None,
            message: message.into(),
        }
    }

    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            changed: false,
            id: None,
            message: message.into(),
        }
    }
}

/// Lists chores split into active and completed.
#[flutter_rust_bridge::frb(sync)]
pub fn chores_list() -> ChoreListResponse {
    match with_store(|store| ChoreRegistry::new(store).list().map_err(|err| err.to_string())) {
        Ok(list) => ChoreListResponse {
            ok: true,
            active: list.active.into_iter().map(to_chore_item).collect(),
            completed: list.completed.into_iter().map(to_chore_item).collect(),
            message: String::new(),
        },
        Err(err) => ChoreListResponse {
            ok: false,
            active: Vec::new(),
            completed: Vec::new(),
            message: format!("chores_list failed: {err}"),
        },
    }
}

/// Adds a chore. Blank text is a no-op (`changed=false`).
#[flutter_rust_bridge::frb(sync)]
pub fn chore_add(text: String, zone: Option<String>, frequency: String) -> ActionResponse {
    let Some(frequency) = Frequency::parse(&frequency) else {
        return ActionResponse::failure(format!(
            "chore_add failed: unknown frequency `{}`",
            frequency.trim()
        ));
    };
    let result = with_store(|store| {
        ChoreRegistry::new(store)
            .add(&text, zone.as_deref(), frequency)
            .map_err(|err| err.to_string())
    });
    match result {
        Ok(Some(chore)) => ActionResponse::changed("Chore added.", Some(chore.id.to_string())),
        Ok(None) => ActionResponse::unchanged("Chore text is empty."),
        Err(err) => ActionResponse::failure(format!("chore_add failed: {err}")),
    }
}

/// Flips the completed flag of one chore.
#[flutter_rust_bridge::frb(sync)]
pub fn chore_toggle(id: String) -> ActionResponse {
    chore_action("chore_toggle", &id, |registry, chore_id| {
        registry.toggle_completed(chore_id)
    })
}

/// Updates chore fields; `None` leaves a field unchanged.
#[flutter_rust_bridge::frb(sync)]
pub fn chore_update(
    id: String,
    text: Option<String>,
    zone: Option<String>,
    frequency: Option<String>,
) -> ActionResponse {
    let frequency = match frequency.as_deref().map(Frequency::parse) {
        Some(None) => {
            return ActionResponse::failure("chore_update failed: unknown frequency");
        }
        Some(parsed) => parsed,
        None => None,
    };
    let patch = ChorePatch {
        text,
        zone,
        frequency,
        completed: None,
    };
    chore_action("chore_update", &id, |registry, chore_id| {
        registry.update(chore_id, &patch)
    })
}

/// Deletes a chore. Requires `confirmed == true`.
#[flutter_rust_bridge::frb(sync)]
pub fn chore_delete(id: String, confirmed: bool) -> ActionResponse {
    let chore_id = match parse_uuid(&id) {
        Ok(chore_id) => chore_id,
        Err(err) => return ActionResponse::failure(format!("chore_delete failed: {err}")),
    };
    let confirmation = Confirmation::from(confirmed);
    let result = with_store(|store| {
        ChoreRegistry::new(store)
            .remove(chore_id, confirmation)
            .map_err(|err| err.to_string())
    });
    match result {
        Ok(true) => ActionResponse::changed("Chore deleted.", Some(id)),
        Ok(false) if !confirmed => ActionResponse::unchanged("Deletion cancelled."),
        Ok(false) => ActionResponse::unchanged("Chore not found."),
        Err(err) => ActionResponse::failure(format!("chore_delete failed: {err}")),
    }
}

/// Returns the grid of the week containing `date` (`YYYY-MM-DD`).
#[flutter_rust_bridge::frb(sync)]
pub fn schedule_week(date: String) -> WeekResponse {
    let week = match WeekKey::parse(&date) {
        Ok(week) => week,
        Err(err) => return week_failure(format!("schedule_week failed: {err}")),
    };
    match with_store(|store| {
        ScheduleStore::new(store)
            .get_week(week)
            .map_err(|err| err.to_string())
    }) {
        Ok(schedule) => to_week_response(week, &schedule),
        Err(err) => week_failure(format!("schedule_week failed: {err}")),
    }
}

/// Returns the grid of the current week on the local clock.
#[flutter_rust_bridge::frb(sync)]
pub fn schedule_current_week() -> WeekResponse {
    schedule_week(WeekKey::current().to_string())
}

/// Appends one manual task to `day_key`.
#[flutter_rust_bridge::frb(sync)]
pub fn schedule_add_task(day_key: String, text: String) -> ActionResponse {
    let day = match DayKey::parse(&day_key) {
        Ok(day) => day,
        Err(err) => return ActionResponse::failure(format!("schedule_add_task failed: {err}")),
    };
    match with_store(|store| {
        ScheduleStore::new(store)
            .add_task(day.week(), day, &text)
            .map_err(|err| err.to_string())
    }) {
        Ok(true) => ActionResponse::changed("Task added.", None),
        Ok(false) => ActionResponse::unchanged("Task text is empty."),
        Err(err) => ActionResponse::failure(format!("schedule_add_task failed: {err}")),
    }
}

/// Removes the task at `index` of `day_key`; out-of-range is a no-op.
#[flutter_rust_bridge::frb(sync)]
pub fn schedule_remove_task(day_key: String, index: u32) -> ActionResponse {
    let day = match DayKey::parse(&day_key) {
        Ok(day) => day,
        Err(err) => {
            return ActionResponse::failure(format!("schedule_remove_task failed: {err}"))
        }
    };
    match with_store(|store| {
        ScheduleStore::new(store)
            .remove_task(day.week(), day, index as usize)
            .map_err(|err| err.to_string())
    }) {
        Ok(true) => ActionResponse::changed("Task removed.", None),
        Ok(false) => ActionResponse::unchanged("No task at that position."),
        Err(err) => ActionResponse::failure(format!("schedule_remove_task failed: {err}")),
    }
}

/// Regenerates the week containing `date` from active chores.
///
/// Requires `confirmed == true`; manual edits of that week are discarded.
#[flutter_rust_bridge::frb(sync)]
pub fn schedule_generate(date: String, confirmed: bool) -> WeekResponse {
    let week = match WeekKey::parse(&date) {
        Ok(week) => week,
        Err(err) => return week_failure(format!("schedule_generate failed: {err}")),
    };
    let result = with_store(|store| {
        let service = RoutineService::new(store);
        match service
            .generate(week, Confirmation::from(confirmed))
            .map_err(|err| err.to_string())?
        {
            Some(plan) => Ok(plan),
            None => service
                .schedule()
                .get_week(week)
                .map_err(|err| err.to_string()),
        }
    });
    match result {
        Ok(schedule) => to_week_response(week, &schedule),
        Err(err) => week_failure(format!("schedule_generate failed: {err}")),
    }
}

/// Lists one checklist (`shopping|wishlist|workouts|notes`).
#[flutter_rust_bridge::frb(sync)]
pub fn checklist_list(kind: String) -> Vec<ChecklistEntry> {
    let Some(kind) = ChecklistKind::parse(&kind) else {
        warn!("event=checklist_list module=ffi status=error error_code=unknown_kind");
        return Vec::new();
    };
    match with_store(|store| {
        ChecklistStore::new(store, kind)
            .list()
            .map_err(|err| err.to_string())
    }) {
        Ok(items) => items.into_iter().map(to_checklist_entry).collect(),
        Err(err) => {
            warn!("event=checklist_list module=ffi status=error error={err}");
            Vec::new()
        }
    }
}

/// Adds an item to one checklist. Blank text is a no-op.
#[flutter_rust_bridge::frb(sync)]
pub fn checklist_add(kind: String, text: String) -> ActionResponse {
    checklist_action("checklist_add", &kind, |checklist| {
        checklist
            .add(&text)
            .map(|item| item.map(|item| item.id.to_string()))
    })
}

/// Flips the done flag of a checklist item.
#[flutter_rust_bridge::frb(sync)]
pub fn checklist_toggle(kind: String, id: String) -> ActionResponse {
    let item_id = match parse_uuid(&id) {
        Ok(item_id) => item_id,
        Err(err) => return ActionResponse::failure(format!("checklist_toggle failed: {err}")),
    };
    checklist_action("checklist_toggle", &kind, |checklist| {
        checklist
            .toggle(item_id)
            .map(|item| item.map(|item| item.id.to_string()))
    })
}

/// Deletes a checklist item.
#[flutter_rust_bridge::frb(sync)]
pub fn checklist_delete(kind: String, id: String) -> ActionResponse {
    let item_id = match parse_uuid(&id) {
        Ok(item_id) => item_id,
        Err(err) => return ActionResponse::failure(format!("checklist_delete failed: {err}")),
    };
    checklist_action("checklist_delete", &kind, |checklist| {
        checklist
            .remove(item_id)
            .map(|removed| removed.then(|| item_id.to_string()))
    })
}

fn chore_action(
    name: &str,
    id: &str,
    action: impl FnOnce(
        &ChoreRegistry<SqliteKvStore<'_>>,
        Uuid,
    ) -> lazyhome_core::RepoResult<Option<Chore>>,
) -> ActionResponse {
    let chore_id = match parse_uuid(id) {
        Ok(chore_id) => chore_id,
        Err(err) => return ActionResponse::failure(format!("{name} failed: {err}")),
    };
    let result = with_store(|store| {
        action(&ChoreRegistry::new(store), chore_id).map_err(|err| err.to_string())
    });
    match result {
        Ok(Some(chore)) => ActionResponse::changed("Chore updated.", Some(chore.id.to_string())),
        Ok(None) => ActionResponse::unchanged("Chore not found or input empty."),
        Err(err) => ActionResponse::failure(format!("{name} failed: {err}")),
    }
}

fn checklist_action(
    name: &str,
    kind: &str,
    action: impl FnOnce(
        &ChecklistStore<SqliteKvStore<'_>>,
    ) -> lazyhome_core::RepoResult<Option<String>>,
) -> ActionResponse {
    let Some(kind) = ChecklistKind::parse(kind) else {
        return ActionResponse::failure(format!("{name} failed: unknown checklist `{kind}`"));
    };
    let result = with_store(|store| {
        action(&ChecklistStore::new(store, kind)).map_err(|err| err.to_string())
    });
    match result {
        Ok(Some(id)) => ActionResponse::changed("Checklist updated.", Some(id)),
        Ok(None) => ActionResponse::unchanged("Nothing to change."),
        Err(err) => ActionResponse::failure(format!("{name} failed: {err}")),
    }
}

fn resolve_db_path() -> PathBuf {
    DB_PATH
        .get_or_init(|| {
            if let Ok(raw) = std::env::var("LAZYHOME_DB_PATH") {
                let trimmed = raw.trim();
                if !trimmed.is_empty() {
                    return PathBuf::from(trimmed);
                }
            }
            std::env::temp_dir().join(DB_FILE_NAME)
        })
        .clone()
}

fn with_store<T>(
    f: impl FnOnce(SqliteKvStore<'_>) -> Result<T, String>,
) -> Result<T, String> {
    let conn = open_db(resolve_db_path()).map_err(|err| format!("DB open failed: {err}"))?;
    let store =
        SqliteKvStore::try_new(&conn).map_err(|err| format!("store init failed: {err}"))?;
    f(store)
}

fn parse_uuid(value: &str) -> Result<Uuid, String> {
    Uuid::parse_str(value.trim()).map_err(|_| format!("invalid id `{}`", value.trim()))
}

fn to_chore_item(chore: Chore) -> ChoreItem {
    ChoreItem {
        id: chore.id.to_string(),
        text: chore.text,
        zone: chore.zone,
        frequency: chore.frequency.as_str().to_string(),
        completed: chore.completed,
    }
}

fn to_checklist_entry(item: ChecklistItem) -> ChecklistEntry {
    ChecklistEntry {
        id: item.id.to_string(),
        text: item.text,
        done: item.done,
    }
}

fn to_week_response(week: WeekKey, schedule: &WeekSchedule) -> WeekResponse {
    WeekResponse {
        ok: true,
        week_key: week.to_string(),
        days: week
            .days()
            .into_iter()
            .map(|day| ScheduleDay {
                day_key: day.to_string(),
                tasks: schedule.day(day).to_vec(),
            })
            .collect(),
        message: String::new(),
    }
}

fn week_failure(message: String) -> WeekResponse {
    WeekResponse {
        ok: false,
        week_key: String::new(),
        days: Vec::new(),
        message,
    }
}
