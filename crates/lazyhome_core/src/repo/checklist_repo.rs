//! Persisted checklist collections.
//!
//! # Invariants
//! - One store owns exactly one `ChecklistKind` storage key.
//! - Blank text and unknown ids decline silently.

use crate::model::checklist::{ChecklistItem, ChecklistItemId, ChecklistKind};
use crate::repo::kv_repo::{load_or_default, save_json, KeyValueStore, RepoResult};
use log::{debug, info};

pub struct ChecklistStore<S: KeyValueStore> {
    store: S,
    kind: ChecklistKind,
}

impl<S: KeyValueStore> ChecklistStore<S> {
    pub fn new(store: S, kind: ChecklistKind) -> Self {
        Self { store, kind }
    }

    pub fn kind(&self) -> ChecklistKind {
        self.kind
    }

    /// Returns items in insertion order.
    pub fn list(&self) -> RepoResult<Vec<ChecklistItem>> {
        load_or_default(&self.store, self.kind.storage_key(), Vec::new)
    }

    pub fn add(&self, text: &str) -> RepoResult<Option<ChecklistItem>> {
        let Some(item) = ChecklistItem::new(text) else {
            debug!(
                "event=checklist_add module=checklist status=skipped reason=blank_text list={}",
                self.kind.storage_key()
            );
            return Ok(None);
        };

        let mut items = self.list()?;
        items.push(item.clone());
        self.save(&items)?;
        info!(
            "event=checklist_add module=checklist status=ok list={} item_id={}",
            self.kind.storage_key(),
            item.id
        );
        Ok(Some(item))
    }

    pub fn toggle(&self, id: ChecklistItemId) -> RepoResult<Option<ChecklistItem>> {
        self.mutate(id, |item| item.done = !item.done)
    }

    pub fn update_text(&self, id: ChecklistItemId, text: &str) -> RepoResult<Option<ChecklistItem>> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Ok(None);
        }
        self.mutate(id, |item| item.text = trimmed.to_string())
    }

    pub fn remove(&self, id: ChecklistItemId) -> RepoResult<bool> {
        let mut items = self.list()?;
        let before = items.len();
        items.retain(|item| item.id != id);
        if items.len() == before {
            return Ok(false);
        }
        self.save(&items)?;
        info!(
            "event=checklist_remove module=checklist status=ok list={} item_id={}",
            self.kind.storage_key(),
            id
        );
        Ok(true)
    }

    /// Drops every item marked done; returns how many were removed.
    pub fn clear_done(&self) -> RepoResult<usize> {
        let mut items = self.list()?;
        let before = items.len();
        items.retain(|item| !item.done);
        let removed = before - items.len();
        if removed > 0 {
            self.save(&items)?;
        }
        Ok(removed)
    }

    fn mutate(
        &self,
        id: ChecklistItemId,
        change: impl FnOnce(&mut ChecklistItem),
    ) -> RepoResult<Option<ChecklistItem>> {
        let mut items = self.list()?;
        let Some(item) = items.iter_mut().find(|item| item.id == id) else {
            return Ok(None);
        };
        change(item);
        let updated = item.clone();
        self.save(&items)?;
        Ok(Some(updated))
    }

    fn save(&self, items: &[ChecklistItem]) -> RepoResult<()> {
        save_json(&self.store, self.kind.storage_key(), items)
    }
}
