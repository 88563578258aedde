//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate repositories into use-case level APIs.
//! - Keep UI/FFI layers decoupled from storage details.

pub mod meal_service;
pub mod routine_service;
