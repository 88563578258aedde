//! Chore registry: the persisted master routine.
//!
//! # Responsibility
//! - Own the `chores` collection and its empty-by-default seeding.
//! - Provide add/toggle/update/remove/list over chore definitions.
//!
//! # Invariants
//! - Iteration order is insertion order; it drives round-robin placement.
//! - Blank text and unknown ids decline silently (`Ok(None)`/`Ok(false)`).
//! - Removal only happens after an explicit `Confirmation::Confirmed`.
//! - Every mutation persists the whole collection before returning.

use crate::model::chore::{Chore, ChoreId, ChoreList, ChorePatch, Frequency};
use crate::model::confirm::Confirmation;
use crate::repo::kv_repo::{keys, load_or_default, save_json, KeyValueStore, RepoResult};
use log::{debug, info};

/// Repository over the persisted chore collection.
pub struct ChoreRegistry<S: KeyValueStore> {
    store: S,
}

impl<S: KeyValueStore> ChoreRegistry<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Returns every chore in insertion order.
    pub fn all(&self) -> RepoResult<Vec<Chore>> {
        load_or_default(&self.store, keys::CHORES, Vec::new)
    }

    /// Returns chores split into active and completed.
    pub fn list(&self) -> RepoResult<ChoreList> {
        Ok(ChoreList::partition(self.all()?))
    }

    /// Returns only chores still in rotation, in insertion order.
    pub fn active(&self) -> RepoResult<Vec<Chore>> {
        Ok(self.list()?.active)
    }

    pub fn get(&self, id: ChoreId) -> RepoResult<Option<Chore>> {
        Ok(self.all()?.into_iter().find(|chore| chore.id == id))
    }

    /// Appends a new chore.
    ///
    /// Returns `None` without writing when `text` is blank.
    pub fn add(
        &self,
        text: &str,
        zone: Option<&str>,
        frequency: Frequency,
    ) -> RepoResult<Option<Chore>> {
        let Some(chore) = Chore::new(text, zone, frequency) else {
            debug!("event=chore_add module=chores status=skipped reason=blank_text");
            return Ok(None);
        };

        let mut chores = self.all()?;
        chores.push(chore.clone());
        self.save(&chores)?;

        info!(
            "event=chore_add module=chores status=ok chore_id={} frequency={} total={}",
            chore.id,
            chore.frequency.as_str(),
            chores.len()
        );
        Ok(Some(chore))
    }

    /// Flips `completed` for the chore with `id`.
    pub fn toggle_completed(&self, id: ChoreId) -> RepoResult<Option<Chore>> {
        self.mutate(id, "chore_toggle", |chore| {
            chore.completed = !chore.completed;
            true
        })
    }

    /// Applies a partial update.
    ///
    /// Returns `None` when `id` is unknown or the patch carries blank text.
    pub fn update(&self, id: ChoreId, patch: &ChorePatch) -> RepoResult<Option<Chore>> {
        self.mutate(id, "chore_update", |chore| chore.apply(patch))
    }

    /// Deletes the chore with `id` once the user has confirmed.
    ///
    /// Returns `true` only when a chore was actually removed.
    pub fn remove(&self, id: ChoreId, confirmation: Confirmation) -> RepoResult<bool> {
        if !confirmation.is_confirmed() {
            info!("event=chore_remove module=chores status=declined chore_id={id}");
            return Ok(false);
        }

        let mut chores = self.all()?;
        let before = chores.len();
        chores.retain(|chore| chore.id != id);
        if chores.len() == before {
            debug!("event=chore_remove module=chores status=skipped reason=not_found chore_id={id}");
            return Ok(false);
        }

        self.save(&chores)?;
        info!(
            "event=chore_remove module=chores status=ok chore_id={} total={}",
            id,
            chores.len()
        );
        Ok(true)
    }

    fn mutate(
        &self,
        id: ChoreId,
        event: &'static str,
        change: impl FnOnce(&mut Chore) -> bool,
    ) -> RepoResult<Option<Chore>> {
        let mut chores = self.all()?;
        let Some(chore) = chores.iter_mut().find(|chore| chore.id == id) else {
            debug!("event={event} module=chores status=skipped reason=not_found chore_id={id}");
            return Ok(None);
        };

        if !change(chore) {
            debug!("event={event} module=chores status=skipped reason=invalid_input chore_id={id}");
            return Ok(None);
        }
        let updated = chore.clone();

        self.save(&chores)?;
        info!(
            "event={} module=chores status=ok chore_id={} completed={}",
            event, id, updated.completed
        );
        Ok(Some(updated))
    }

    fn save(&self, chores: &[Chore]) -> RepoResult<()> {
        save_json(&self.store, keys::CHORES, chores)
    }
}
