//! Weekly routine generation.
//!
//! # Responsibility
//! - Project the active chore set onto the seven days of one week.
//! - Overwrite that week's schedule once the user confirms.
//!
//! # Invariants
//! - Completed and monthly chores are never placed.
//! - Every active daily chore lands on all seven days, in registry order.
//! - The `j`-th active weekly chore lands only on weekday `j mod 7`.
//! - Output depends only on the week and the registry contents.

use crate::model::chore::{Chore, Frequency};
use crate::model::confirm::Confirmation;
use crate::model::schedule::{DayTasks, WeekSchedule};
use crate::model::week::{WeekKey, DAYS_PER_WEEK};
use crate::repo::chore_repo::ChoreRegistry;
use crate::repo::kv_repo::{KeyValueStore, RepoResult};
use crate::repo::schedule_repo::ScheduleStore;
use log::info;
use std::time::Instant;

/// Builds the generated grid of `week` from `chores`.
///
/// Pure: nothing is read from or written to storage.
pub fn generate_week_plan(week: WeekKey, chores: &[Chore]) -> WeekSchedule {
    let daily = active_texts(chores, Frequency::Daily);
    let weekly = active_texts(chores, Frequency::Weekly);

    let mut plan = WeekSchedule::new();
    for (index, day) in week.days().into_iter().enumerate() {
        let mut tasks: DayTasks = daily.iter().map(|text| text.to_string()).collect();
        tasks.extend(
            weekly
                .iter()
                .enumerate()
                .filter(|(position, _)| position % DAYS_PER_WEEK == index)
                .map(|(_, text)| text.to_string()),
        );
        plan.set_day(day, tasks);
    }
    plan
}

fn active_texts(chores: &[Chore], frequency: Frequency) -> Vec<&str> {
    chores
        .iter()
        .filter(|chore| chore.is_active() && chore.frequency == frequency)
        .map(|chore| chore.text.as_str())
        .collect()
}

/// Couples the chore registry with the schedule store for generation.
pub struct RoutineService<S: KeyValueStore> {
    chores: ChoreRegistry<S>,
    schedule: ScheduleStore<S>,
}

impl<S: KeyValueStore + Clone> RoutineService<S> {
    pub fn new(store: S) -> Self {
        Self {
            chores: ChoreRegistry::new(store.clone()),
            schedule: ScheduleStore::new(store),
        }
    }
}

impl<S: KeyValueStore> RoutineService<S> {
    pub fn chores(&self) -> &ChoreRegistry<S> {
        &self.chores
    }

    pub fn schedule(&self) -> &ScheduleStore<S> {
        &self.schedule
    }

    /// Computes what `generate` would write for `week` without writing it.
    pub fn preview(&self, week: WeekKey) -> RepoResult<WeekSchedule> {
        Ok(generate_week_plan(week, &self.chores.all()?))
    }

    /// Regenerates `week` from the current registry.
    ///
    /// Manual per-day edits of that week are discarded. Returns `None`
    /// without touching storage when the user declined.
    pub fn generate(
        &self,
        week: WeekKey,
        confirmation: Confirmation,
    ) -> RepoResult<Option<WeekSchedule>> {
        if !confirmation.is_confirmed() {
            info!("event=routine_generate module=routine status=declined week={week}");
            return Ok(None);
        }

        let started_at = Instant::now();
        let chores = self.chores.all()?;
        let plan = generate_week_plan(week, &chores);
        self.schedule.replace_week(week, plan.clone())?;

        info!(
            "event=routine_generate module=routine status=ok week={} chores={} duration_ms={}",
            week,
            chores.len(),
            started_at.elapsed().as_millis()
        );
        Ok(Some(plan))
    }
}
