//! Recurring chore definitions.
//!
//! # Responsibility
//! - Define the master-routine record the generator projects onto weeks.
//! - Normalize user input (blank text rejected, blank zone defaulted).
//!
//! # Invariants
//! - `id` is stable for the chore lifetime and never reused.
//! - `text` is never empty or whitespace-only.
//! - `completed` retires a chore from rotation; it is not a per-day status.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identifier assigned when a chore is added.
pub type ChoreId = Uuid;

/// Zone used when the caller omits one.
pub const DEFAULT_ZONE: &str = "Geral";

/// How often a chore recurs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Frequency {
    /// Placed on all seven days of a generated week.
    Daily,
    /// Placed on exactly one day, chosen round-robin by registry position.
    Weekly,
    /// Kept in the registry but not placed by weekly generation.
    Monthly,
}

impl Frequency {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Daily => "daily",
            Self::Weekly => "weekly",
            Self::Monthly => "monthly",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "daily" => Some(Self::Daily),
            "weekly" => Some(Self::Weekly),
            "monthly" => Some(Self::Monthly),
            _ => None,
        }
    }
}

/// One recurring task in the master routine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chore {
    pub id: ChoreId,
    pub text: String,
    #[serde(default = "default_zone")]
    pub zone: String,
    pub frequency: Frequency,
    #[serde(default)]
    pub completed: bool,
}

impl Chore {
    /// Builds a new active chore with a generated id.
    ///
    /// Returns `None` when `text` is blank.
    pub fn new(text: &str, zone: Option<&str>, frequency: Frequency) -> Option<Self> {
        let text = normalize_text(text)?;
        Some(Self {
            id: Uuid::new_v4(),
            text,
            zone: normalize_zone(zone),
            frequency,
            completed: false,
        })
    }

    /// Whether this chore still takes part in routine generation.
    pub fn is_active(&self) -> bool {
        !self.completed
    }

    /// Applies `patch` in place.
    ///
    /// Returns `false` and leaves the chore untouched when the patch carries
    /// blank text.
    pub fn apply(&mut self, patch: &ChorePatch) -> bool {
        let text = match patch.text.as_deref() {
            Some(raw) => match normalize_text(raw) {
                Some(text) => Some(text),
                None => return false,
            },
            None => None,
        };

        if let Some(text) = text {
            self.text = text;
        }
        if let Some(zone) = patch.zone.as_deref() {
            self.zone = normalize_zone(Some(zone));
        }
        if let Some(frequency) = patch.frequency {
            self.frequency = frequency;
        }
        if let Some(completed) = patch.completed {
            self.completed = completed;
        }
        true
    }
}

/// Partial update for an existing chore; `None` fields are left as-is.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChorePatch {
    pub text: Option<String>,
    pub zone: Option<String>,
    pub frequency: Option<Frequency>,
    pub completed: Option<bool>,
}

/// Registry contents split by rotation state, insertion order preserved.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChoreList {
    pub active: Vec<Chore>,
    pub completed: Vec<Chore>,
}

impl ChoreList {
    pub fn partition(chores: Vec<Chore>) -> Self {
        let (active, completed): (Vec<Chore>, Vec<Chore>) =
            chores.into_iter().partition(Chore::is_active);
        Self { active, completed }
    }
}

fn default_zone() -> String {
    DEFAULT_ZONE.to_string()
}

fn normalize_text(text: &str) -> Option<String> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

fn normalize_zone(zone: Option<&str>) -> String {
    zone.and_then(normalize_text).unwrap_or_else(default_zone)
}
