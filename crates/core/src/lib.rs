//! Core business logic for Worklane.
//!
//! This crate contains pure business logic with ZERO web or database dependencies.
//! All domain types, calendar math, and report calculations live here.
//!
//! # Modules
//!
//! - `domain` - Agency domain model (users, projects, assignments, time entries, bonuses)
//! - `period` - Report windows and calendar-month overlap math
//! - `report` - The period reporting engine and client rollups
//! - `summary` - Per-employee yearly earnings summaries
//! - `snapshot` - The snapshot input contract and loading seam

pub mod domain;
pub mod period;
pub mod report;
pub mod snapshot;
pub mod summary;
