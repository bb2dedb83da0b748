//! Report windows and calendar-month math.

pub mod window;

pub use window::{ReportWindow, WindowError, month_key, month_span, overlap_months};
