//! Repository layer: one repository per persisted collection.
//!
//! # Responsibility
//! - Own each collection's storage key and default-on-missing policy.
//! - Keep storage details behind the `KeyValueStore` contract.
//!
//! # Invariants
//! - Repositories are constructed with an injected store; there is no
//!   shared global state.
//! - Every mutation commits the whole collection before returning.

pub mod checklist_repo;
pub mod chore_repo;
pub mod kv_repo;
pub mod schedule_repo;
