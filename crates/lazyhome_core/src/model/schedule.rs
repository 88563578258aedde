//! Week schedule grid snapshots.
//!
//! # Responsibility
//! - Hold the day-by-day task grid of one week.
//! - Provide pure add/remove-by-index operations returning new snapshots.
//!
//! # Invariants
//! - Tasks are plain text, decoupled from the chore that produced them.
//! - Order within a day is insertion order; removal never reorders the rest.

use crate::model::week::{DayKey, WeekKey};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Ordered task texts of one day.
pub type DayTasks = Vec<String>;

/// Every stored week, keyed by its Monday.
pub type ScheduleBook = BTreeMap<WeekKey, WeekSchedule>;

/// Day map of one week. Days without an entry read as empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WeekSchedule {
    days: BTreeMap<DayKey, DayTasks>,
}

impl WeekSchedule {
    pub fn new() -> Self {
        Self::default()
    }

    /// Tasks of `day`, or an empty slice when the day has no entry.
    pub fn day(&self, day: DayKey) -> &[String] {
        self.days.get(&day).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn set_day(&mut self, day: DayKey, tasks: DayTasks) {
        self.days.insert(day, tasks);
    }

    pub fn iter(&self) -> impl Iterator<Item = (&DayKey, &DayTasks)> {
        self.days.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.days.values().all(Vec::is_empty)
    }

    /// Drops entries whose day is outside `week`; returns how many were dropped.
    pub fn retain_week(&mut self, week: WeekKey) -> usize {
        let before = self.days.len();
        self.days.retain(|day, _| week.contains(*day));
        before - self.days.len()
    }
}

/// Returns `tasks` with `text` appended, or `None` when `text` is blank.
pub fn append_task(tasks: &[String], text: &str) -> Option<DayTasks> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }
    let mut next = tasks.to_vec();
    next.push(trimmed.to_string());
    Some(next)
}

/// Returns `tasks` without the element at `index`, or `None` when out of range.
pub fn remove_task_at(tasks: &[String], index: usize) -> Option<DayTasks> {
    if index >= tasks.len() {
        return None;
    }
    let mut next = tasks.to_vec();
    next.remove(index);
    Some(next)
}

#[cfg(test)]
mod tests {
    use super::{append_task, remove_task_at, WeekSchedule};
    use crate::model::week::{DayKey, WeekKey};
    use chrono::NaiveDate;

    fn tasks(items: &[&str]) -> Vec<String> {
        items.iter().map(|item| item.to_string()).collect()
    }

    #[test]
    fn remove_task_at_keeps_relative_order() {
        let day = tasks(&["a", "b", "c", "d"]);
        assert_eq!(remove_task_at(&day, 1).unwrap(), tasks(&["a", "c", "d"]));
        assert_eq!(remove_task_at(&day, 3).unwrap(), tasks(&["a", "b", "c"]));
        assert!(remove_task_at(&day, 4).is_none());
        assert!(remove_task_at(&[], 0).is_none());
    }

    #[test]
    fn append_task_rejects_blank_text() {
        assert!(append_task(&tasks(&["a"]), " \t").is_none());
        assert_eq!(append_task(&tasks(&["a"]), " b ").unwrap(), tasks(&["a", "b"]));
    }

    #[test]
    fn retain_week_drops_foreign_days() {
        let week = WeekKey::parse("2024-04-08").unwrap();
        let mut schedule = WeekSchedule::new();
        schedule.set_day(week.days()[0], tasks(&["a"]));
        schedule.set_day(
            DayKey::new(NaiveDate::from_ymd_opt(2024, 4, 15).unwrap()),
            tasks(&["b"]),
        );

        assert_eq!(schedule.retain_week(week), 1);
        assert_eq!(schedule.day(week.days()[0]), ["a"]);
        assert!(schedule.day(week.days()[1]).is_empty());
    }
}
