//! Period financial report generation.
//!
//! This module is the calculation core: it converts a snapshot of
//! timesheets, billing configuration, assignment overrides, and bonuses
//! into revenue/cost/margin figures at company, client, project, and
//! employee level.

pub mod clients;
pub mod engine;
pub mod policy;
pub mod types;


pub use clients::ClientRow;
pub use engine::ReportEngine;
pub use policy::RevenuePolicy;
pub use types::{ClientRevenue, EmployeeRow, Kpi, PeriodReport, ProjectRow, TopLists};
