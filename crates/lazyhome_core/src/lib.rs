//! Core domain logic for LazyHome, the household organizer.
//! This crate is the single source of truth for schedule and chore invariants.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use logging::{default_log_level, init_logging, logging_status};
pub use model::checklist::{ChecklistItem, ChecklistItemId, ChecklistKind};
pub use model::chore::{Chore, ChoreId, ChoreList, ChorePatch, Frequency, DEFAULT_ZONE};
pub use model::confirm::Confirmation;
pub use model::schedule::{DayTasks, WeekSchedule};
pub use model::week::{monday_of, week_start, DayKey, KeyParseError, WeekKey, DAYS_PER_WEEK};
pub use repo::checklist_repo::ChecklistStore;
pub use repo::chore_repo::ChoreRegistry;
pub use repo::kv_repo::{KeyValueStore, RepoError, RepoResult, SqliteKvStore};
pub use repo::schedule_repo::ScheduleStore;
pub use service::meal_service::{
    MealPlan, MealPlanService, MealSuggester, DEFAULT_MEAL_PREFERENCES,
};
pub use service::routine_service::{generate_week_plan, RoutineService};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
