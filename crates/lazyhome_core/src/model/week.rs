//! Calendar week and day identities.
//!
//! # Responsibility
//! - Resolve any date to the Monday that starts its week.
//! - Provide canonical, locale-independent `YYYY-MM-DD` keys for weeks/days.
//!
//! # Invariants
//! - A `WeekKey` always wraps a Monday.
//! - Two dates inside the same Monday..Sunday span share one `WeekKey`.
//! - Key strings are zero-padded and never depend on display locale.

use chrono::{Datelike, Duration, Local, NaiveDate, NaiveDateTime, NaiveTime};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Number of day buckets in one schedule week.
pub const DAYS_PER_WEEK: usize = 7;

const KEY_FORMAT: &str = "%Y-%m-%d";

static DATE_KEY_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").expect("valid date key regex"));

/// Returns the Monday of the week containing `date`.
///
/// Sunday steps back six days; every other weekday steps back
/// `weekday - 1` days.
pub fn monday_of(date: NaiveDate) -> NaiveDate {
    let offset = i64::from(date.weekday().num_days_from_monday());
    date - Duration::days(offset)
}

/// Returns midnight of the Monday starting the week that contains `at`.
pub fn week_start(at: NaiveDateTime) -> NaiveDateTime {
    monday_of(at.date()).and_time(NaiveTime::MIN)
}

/// Error returned when a key string is not a canonical calendar date.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyParseError {
    input: String,
}

impl Display for KeyParseError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "invalid date key `{}`; expected zero-padded YYYY-MM-DD",
            self.input
        )
    }
}

impl Error for KeyParseError {}

fn parse_date_key(value: &str) -> Result<NaiveDate, KeyParseError> {
    let trimmed = value.trim();
    let invalid = || KeyParseError {
        input: trimmed.to_string(),
    };
    if !DATE_KEY_RE.is_match(trimmed) {
        return Err(invalid());
    }
    NaiveDate::parse_from_str(trimmed, KEY_FORMAT).map_err(|_| invalid())
}

/// Identity of one calendar week: the date of its Monday.
///
/// Deserialization normalizes to the Monday, so a stored non-Monday key
/// still maps onto the week that contains it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "NaiveDate", into = "NaiveDate")]
pub struct WeekKey(NaiveDate);

impl WeekKey {
    /// Resolves the week containing `date`.
    pub fn of(date: NaiveDate) -> Self {
        Self(monday_of(date))
    }

    /// Resolves the week containing today on the local clock.
    pub fn current() -> Self {
        Self::of(Local::now().date_naive())
    }

    /// Parses a canonical key; any day of the week is accepted.
    pub fn parse(value: &str) -> Result<Self, KeyParseError> {
        parse_date_key(value).map(Self::of)
    }

    pub fn monday(self) -> NaiveDate {
        self.0
    }

    /// Returns the seven days of this week, Monday first.
    pub fn days(self) -> [DayKey; DAYS_PER_WEEK] {
        std::array::from_fn(|offset| DayKey(self.0 + Duration::days(offset as i64)))
    }

    /// Returns the day at `index` (0 = Monday .. 6 = Sunday).
    pub fn day(self, index: usize) -> Option<DayKey> {
        self.days().get(index).copied()
    }

    pub fn contains(self, day: DayKey) -> bool {
        day.week() == self
    }

    pub fn previous(self) -> Self {
        Self(self.0 - Duration::days(DAYS_PER_WEEK as i64))
    }

    pub fn next(self) -> Self {
        Self(self.0 + Duration::days(DAYS_PER_WEEK as i64))
    }
}

impl From<NaiveDate> for WeekKey {
    fn from(value: NaiveDate) -> Self {
        Self::of(value)
    }
}

impl From<WeekKey> for NaiveDate {
    fn from(value: WeekKey) -> Self {
        value.0
    }
}

impl Display for WeekKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.format(KEY_FORMAT))
    }
}

/// Identity of one calendar day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DayKey(NaiveDate);

impl DayKey {
    pub fn new(date: NaiveDate) -> Self {
        Self(date)
    }

    pub fn today() -> Self {
        Self(Local::now().date_naive())
    }

    pub fn parse(value: &str) -> Result<Self, KeyParseError> {
        parse_date_key(value).map(Self)
    }

    pub fn date(self) -> NaiveDate {
        self.0
    }

    pub fn week(self) -> WeekKey {
        WeekKey::of(self.0)
    }

    /// Position inside its week (0 = Monday .. 6 = Sunday).
    pub fn weekday_index(self) -> usize {
        self.0.weekday().num_days_from_monday() as usize
    }
}

impl Display for DayKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.format(KEY_FORMAT))
    }
}

#[cfg(test)]
mod tests {
    use super::{monday_of, week_start, DayKey, WeekKey, DAYS_PER_WEEK};
    use chrono::{Datelike, NaiveDate, NaiveTime, Timelike, Weekday};
    use std::collections::BTreeMap;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid test date")
    }

    #[test]
    fn monday_of_maps_every_weekday_to_monday() {
        let monday = date(2024, 3, 11);
        for offset in 0..7 {
            let day = monday + chrono::Duration::days(offset);
            assert_eq!(monday_of(day), monday, "offset {offset}");
        }
    }

    #[test]
    fn sunday_steps_back_six_days() {
        assert_eq!(monday_of(date(2024, 3, 17)), date(2024, 3, 11));
    }

    #[test]
    fn monday_of_is_idempotent_and_always_monday() {
        let mut day = date(2023, 12, 1);
        while day < date(2024, 2, 1) {
            let monday = monday_of(day);
            assert_eq!(monday.weekday(), Weekday::Mon);
            assert_eq!(monday_of(monday), monday);
            day = day.succ_opt().expect("next day");
        }
    }

    #[test]
    fn resolves_across_month_and_year_boundaries() {
        // 2024-12-31 is a Tuesday, 2025-01-01 a Wednesday: same week.
        assert_eq!(monday_of(date(2024, 12, 31)), date(2024, 12, 30));
        assert_eq!(monday_of(date(2025, 1, 5)), date(2024, 12, 30));
        // 2023-12-31 is a Sunday; 2024-01-01 starts the next week.
        assert_eq!(monday_of(date(2023, 12, 31)), date(2023, 12, 25));
        assert_eq!(monday_of(date(2024, 1, 1)), date(2024, 1, 1));
        assert_eq!(monday_of(date(2024, 3, 1)), date(2024, 2, 26));
    }

    #[test]
    fn week_start_zeroes_time_of_day() {
        let at = date(2024, 5, 19).and_hms_opt(23, 59, 59).expect("valid time");
        let start = week_start(at);
        assert_eq!(start.date(), date(2024, 5, 13));
        assert_eq!(start.time(), NaiveTime::MIN);
        assert_eq!(start.hour(), 0);
    }

    #[test]
    fn week_days_run_monday_to_sunday() {
        let week = WeekKey::of(date(2024, 2, 28));
        let days = week.days();
        assert_eq!(days.len(), DAYS_PER_WEEK);
        assert_eq!(days[0].to_string(), "2024-02-26");
        assert_eq!(days[3].to_string(), "2024-02-29");
        assert_eq!(days[6].to_string(), "2024-03-03");
        assert!(days.iter().all(|day| week.contains(*day)));
        assert!(!week.contains(DayKey::new(date(2024, 3, 4))));
        assert_eq!(days[6].weekday_index(), 6);
    }

    #[test]
    fn keys_are_zero_padded_and_parse_strictly() {
        let week = WeekKey::of(date(2024, 1, 3));
        assert_eq!(week.to_string(), "2024-01-01");
        assert_eq!(WeekKey::parse("2024-01-07").unwrap(), week);
        assert!(DayKey::parse("2024-1-7").is_err());
        assert!(DayKey::parse("07/01/2024").is_err());
        assert!(DayKey::parse("2024-02-30").is_err());
    }

    #[test]
    fn keys_serialize_as_json_map_keys() {
        let week = WeekKey::of(date(2024, 1, 3));
        let mut map = BTreeMap::new();
        map.insert(week, vec![week.days()[0]]);

        let json = serde_json::to_string(&map).unwrap();
        assert_eq!(json, r#"{"2024-01-01":["2024-01-01"]}"#);

        let parsed: BTreeMap<WeekKey, Vec<DayKey>> = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, map);
    }

    #[test]
    fn deserializing_non_monday_week_key_normalizes() {
        let parsed: WeekKey = serde_json::from_str(r#""2024-01-04""#).unwrap();
        assert_eq!(parsed.monday(), date(2024, 1, 1));
    }
}
