//! Agency domain model.
//!
//! These types are read-only inputs to the reporting calculations; their
//! lifecycle (creation, editing, approval flows) belongs to the excluded
//! administration layer.

pub mod model;

pub use model::{
    Assignment, BillingType, Bonus, BonusType, Cadence, Project, TimeEntry, TimeEntryStatus, User,
};
