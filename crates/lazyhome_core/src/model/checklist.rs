//! Simple checklist collections (shopping, wishlist, workouts, notes).
//!
//! All four share one create/toggle/delete shape; only the storage key
//! differs.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub type ChecklistItemId = Uuid;

/// Which persisted collection a checklist store owns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChecklistKind {
    Shopping,
    Wishlist,
    Workouts,
    Notes,
}

impl ChecklistKind {
    pub const ALL: [Self; 4] = [Self::Shopping, Self::Wishlist, Self::Workouts, Self::Notes];

    pub fn storage_key(self) -> &'static str {
        match self {
            Self::Shopping => "shopping_list",
            Self::Wishlist => "wishlist",
            Self::Workouts => "workouts",
            Self::Notes => "notes",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "shopping" | "shopping_list" => Some(Self::Shopping),
            "wishlist" => Some(Self::Wishlist),
            "workouts" => Some(Self::Workouts),
            "notes" => Some(Self::Notes),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChecklistItem {
    pub id: ChecklistItemId,
    pub text: String,
    #[serde(default)]
    pub done: bool,
    /// Unix epoch milliseconds.
    #[serde(default)]
    pub created_at: i64,
}

impl ChecklistItem {
    /// Returns `None` when `text` is blank.
    pub fn new(text: &str) -> Option<Self> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return None;
        }
        Some(Self {
            id: Uuid::new_v4(),
            text: trimmed.to_string(),
            done: false,
            created_at: Utc::now().timestamp_millis(),
        })
    }
}
