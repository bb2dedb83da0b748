//! Per-employee yearly earnings summaries.
//!
//! Backs the employee self-service view: for one user and one calendar
//! year, a month-by-month breakdown of hours, hourly pay, fixed project
//! payouts, and bonuses.

pub mod service;
pub mod types;

pub use service::SummaryService;
pub use types::{MonthEarnings, YearSummary};
