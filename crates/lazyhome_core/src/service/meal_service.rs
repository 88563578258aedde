//! AI-assisted meal-plan suggestions.
//!
//! # Responsibility
//! - Persist the user's meal preferences and the last suggested plan.
//! - Call the external suggester with preferences (or the default).
//!
//! # Invariants
//! - The suggester response is opaque prose, stored verbatim, including
//!   error-shaped text.
//! - `request_plan` takes `&mut self`, so at most one request is
//!   outstanding per service.

use crate::repo::kv_repo::{keys, load_or_default, save_json, KeyValueStore, RepoResult};
use log::info;
use std::time::Instant;

/// Preferences sent when the user has not written any.
pub const DEFAULT_MEAL_PREFERENCES: &str = "Refeições saudáveis, práticas e equilibradas";

/// External meal suggestion collaborator.
///
/// No timeout, retry or cancellation is applied around `suggest`.
pub trait MealSuggester {
    fn suggest(&self, preferences: &str) -> String;
}

impl<F> MealSuggester for F
where
    F: Fn(&str) -> String,
{
    fn suggest(&self, preferences: &str) -> String {
        self(preferences)
    }
}

/// Result of one suggestion round.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MealPlan {
    /// Preferences actually sent to the suggester.
    pub preferences: String,
    pub plan: String,
}

pub struct MealPlanService<S: KeyValueStore, M: MealSuggester> {
    store: S,
    suggester: M,
}

impl<S: KeyValueStore, M: MealSuggester> MealPlanService<S, M> {
    pub fn new(store: S, suggester: M) -> Self {
        Self { store, suggester }
    }

    /// Stored preferences, empty when never set.
    pub fn preferences(&self) -> RepoResult<String> {
        load_or_default(&self.store, keys::MEAL_PREFERENCES, String::new)
    }

    pub fn set_preferences(&self, preferences: &str) -> RepoResult<()> {
        save_json(&self.store, keys::MEAL_PREFERENCES, preferences)
    }

    /// Last stored plan, `None` when no request has completed yet.
    pub fn last_plan(&self) -> RepoResult<Option<String>> {
        load_or_default(&self.store, keys::LAST_MEAL_PLAN, || None)
    }

    /// Requests a new plan and stores it as the last plan.
    pub fn request_plan(&mut self) -> RepoResult<MealPlan> {
        let stored = self.preferences()?;
        let preferences = if stored.trim().is_empty() {
            DEFAULT_MEAL_PREFERENCES.to_string()
        } else {
            stored
        };

        let started_at = Instant::now();
        info!("event=meal_request module=meal status=start");
        let plan = self.suggester.suggest(&preferences);
        save_json(&self.store, keys::LAST_MEAL_PLAN, &Some(plan.as_str()))?;
        info!(
            "event=meal_request module=meal status=ok duration_ms={} plan_chars={}",
            started_at.elapsed().as_millis(),
            plan.chars().count()
        );

        Ok(MealPlan { preferences, plan })
    }
}
