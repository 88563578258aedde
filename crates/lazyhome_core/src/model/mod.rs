//! Domain model for the household organizer.
//!
//! # Responsibility
//! - Define chores, week/day identities and schedule grids.
//! - Keep pure domain operations free of storage and presentation.
//!
//! # Invariants
//! - Every chore is identified by a stable `ChoreId`.
//! - Schedule entries are text snapshots, never references to chores.

pub mod checklist;
pub mod chore;
pub mod confirm;
pub mod schedule;
pub mod week;
