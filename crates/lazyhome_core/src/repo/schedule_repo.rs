//! Persisted weekly schedule grid.
//!
//! # Responsibility
//! - Own the `weekly_schedule` collection (`weekKey -> dayKey -> tasks`).
//! - Provide per-day add/remove and whole-week replacement.
//!
//! # Invariants
//! - Weeks without an entry read as empty; reads never write defaults.
//! - Every stored day belongs to the week it is filed under.
//! - `replace_week` is a full replacement of that week, not a merge.
//! - Each mutation commits the whole updated grid before returning.

use crate::model::schedule::{append_task, remove_task_at, DayTasks, ScheduleBook, WeekSchedule};
use crate::model::week::{DayKey, WeekKey};
use crate::repo::kv_repo::{keys, load_or_default, save_json, KeyValueStore, RepoResult};
use log::{debug, info, warn};

/// Repository over the persisted week grid.
pub struct ScheduleStore<S: KeyValueStore> {
    store: S,
}

impl<S: KeyValueStore> ScheduleStore<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Returns the day map of `week`, empty when nothing was stored.
    pub fn get_week(&self, week: WeekKey) -> RepoResult<WeekSchedule> {
        Ok(self.load()?.remove(&week).unwrap_or_default())
    }

    /// Returns the tasks of `day` inside `week`, empty when absent.
    pub fn get_day(&self, week: WeekKey, day: DayKey) -> RepoResult<DayTasks> {
        Ok(self.get_week(week)?.day(day).to_vec())
    }

    /// Appends `text` to the tasks of `day`.
    ///
    /// Returns `false` without writing when `text` is blank or `day` is not
    /// part of `week`.
    pub fn add_task(&self, week: WeekKey, day: DayKey, text: &str) -> RepoResult<bool> {
        if !week.contains(day) {
            warn!("event=schedule_add module=schedule status=skipped reason=day_outside_week week={week} day={day}");
            return Ok(false);
        }

        let mut book = self.load()?;
        let schedule = book.entry(week).or_default();
        let Some(tasks) = append_task(schedule.day(day), text) else {
            debug!("event=schedule_add module=schedule status=skipped reason=blank_text week={week} day={day}");
            return Ok(false);
        };
        let count = tasks.len();
        schedule.set_day(day, tasks);

        self.save(&book)?;
        info!("event=schedule_add module=schedule status=ok week={week} day={day} tasks={count}");
        Ok(true)
    }

    /// Removes exactly the task at `index` of `day`.
    ///
    /// Returns `false` without writing when `index` is out of range.
    pub fn remove_task(&self, week: WeekKey, day: DayKey, index: usize) -> RepoResult<bool> {
        let mut book = self.load()?;
        let Some(schedule) = book.get_mut(&week) else {
            debug!("event=schedule_remove module=schedule status=skipped reason=unknown_week week={week}");
            return Ok(false);
        };
        let Some(tasks) = remove_task_at(schedule.day(day), index) else {
            debug!(
                "event=schedule_remove module=schedule status=skipped reason=index_out_of_range week={week} day={day} index={index}"
            );
            return Ok(false);
        };
        let count = tasks.len();
        schedule.set_day(day, tasks);

        self.save(&book)?;
        info!("event=schedule_remove module=schedule status=ok week={week} day={day} tasks={count}");
        Ok(true)
    }

    /// Overwrites the whole entry of `week` with `schedule`.
    ///
    /// Days of `schedule` outside `week` are dropped before writing.
    pub fn replace_week(&self, week: WeekKey, mut schedule: WeekSchedule) -> RepoResult<()> {
        let dropped = schedule.retain_week(week);
        if dropped > 0 {
            warn!("event=schedule_replace module=schedule status=warn week={week} dropped_days={dropped}");
        }

        let mut book = self.load()?;
        book.insert(week, schedule);
        self.save(&book)?;

        info!("event=schedule_replace module=schedule status=ok week={week}");
        Ok(())
    }

    /// Returns every week that has a stored entry, oldest first.
    pub fn weeks(&self) -> RepoResult<Vec<WeekKey>> {
        Ok(self.load()?.into_keys().collect())
    }

    fn load(&self) -> RepoResult<ScheduleBook> {
        load_or_default(&self.store, keys::WEEKLY_SCHEDULE, ScheduleBook::new)
    }

    fn save(&self, book: &ScheduleBook) -> RepoResult<()> {
        save_json(&self.store, keys::WEEKLY_SCHEDULE, book)
    }
}
