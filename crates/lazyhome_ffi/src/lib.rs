//! Flutter-facing bridge crate for LazyHome core.

pub mod api;
