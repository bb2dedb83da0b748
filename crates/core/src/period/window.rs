//! Report window and month-overlap calculations.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use worklane_shared::AppError;

/// Errors from constructing a report window.
#[derive(Debug, Error)]
pub enum WindowError {
    /// Start date after end date.
    #[error("Invalid date window: start {from} is after end {to}")]
    InvalidWindow {
        /// Window start.
        from: NaiveDate,
        /// Window end.
        to: NaiveDate,
    },

    /// Not a real calendar month.
    #[error("Invalid calendar month: {year}-{month:02}")]
    InvalidMonth {
        /// Requested year.
        year: i32,
        /// Requested month (1-12).
        month: u32,
    },
}

impl From<WindowError> for AppError {
    fn from(err: WindowError) -> Self {
        Self::Validation(err.to_string())
    }
}

/// An inclusive date window `[from, to]` with same-day precision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportWindow {
    /// First day of the window.
    pub from: NaiveDate,
    /// Last day of the window.
    pub to: NaiveDate,
}

impl ReportWindow {
    /// Creates a window, rejecting inverted bounds.
    ///
    /// # Errors
    ///
    /// Returns `WindowError::InvalidWindow` when `from > to`.
    pub fn new(from: NaiveDate, to: NaiveDate) -> Result<Self, WindowError> {
        if from > to {
            return Err(WindowError::InvalidWindow { from, to });
        }
        Ok(Self { from, to })
    }

    /// The window covering one whole calendar month.
    ///
    /// # Errors
    ///
    /// Returns `WindowError::InvalidMonth` when the month is not 1-12.
    pub fn for_month(year: i32, month: u32) -> Result<Self, WindowError> {
        let from =
            NaiveDate::from_ymd_opt(year, month, 1).ok_or(WindowError::InvalidMonth { year, month })?;
        let next_month = if month == 12 {
            NaiveDate::from_ymd_opt(year + 1, 1, 1)
        } else {
            NaiveDate::from_ymd_opt(year, month + 1, 1)
        };
        let to = next_month
            .and_then(|d| d.pred_opt())
            .ok_or(WindowError::InvalidMonth { year, month })?;
        Ok(Self { from, to })
    }

    /// Returns true if the date falls within the window, bounds included.
    #[must_use]
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.from && date <= self.to
    }

    /// Month key of the window start.
    #[must_use]
    pub fn from_month_key(&self) -> String {
        month_key(self.from)
    }

    /// Month key of the window end.
    #[must_use]
    pub fn to_month_key(&self) -> String {
        month_key(self.to)
    }
}

/// `YYYY-MM` key of the month containing `date`.
///
/// Keys compare lexicographically in calendar order for four-digit years,
/// which is what the bonus month gate relies on.
#[must_use]
pub fn month_key(date: NaiveDate) -> String {
    format!("{:04}-{:02}", date.year(), date.month())
}

/// Inclusive count of calendar months between the months containing `from`
/// and `to` (e.g. Jan 15 to Feb 1 spans 2 months). Zero when `to` is in an
/// earlier month than `from`.
#[must_use]
pub fn month_span(from: NaiveDate, to: NaiveDate) -> u32 {
    let months = (i64::from(to.year()) - i64::from(from.year())) * 12
        + (i64::from(to.month()) - i64::from(from.month()))
        + 1;
    u32::try_from(months).unwrap_or(0)
}

/// Number of whole calendar months a contract range shares with the window.
///
/// Absent contract bounds default to the window's own bounds; the contract
/// range is clipped to the window before counting.
#[must_use]
pub fn overlap_months(
    window: ReportWindow,
    contract_start: Option<NaiveDate>,
    contract_end: Option<NaiveDate>,
) -> u32 {
    let start = contract_start.unwrap_or(window.from).max(window.from);
    let end = contract_end.unwrap_or(window.to).min(window.to);
    if end < start {
        return 0;
    }
    month_span(start, end)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_new_rejects_inverted_bounds() {
        let err = ReportWindow::new(date(2026, 2, 1), date(2026, 1, 1));
        assert!(matches!(err, Err(WindowError::InvalidWindow { .. })));
    }

    #[test]
    fn test_for_month_covers_whole_month() {
        let w = ReportWindow::for_month(2026, 2).unwrap();
        assert_eq!(w.from, date(2026, 2, 1));
        assert_eq!(w.to, date(2026, 2, 28));

        let december = ReportWindow::for_month(2026, 12).unwrap();
        assert_eq!(december.to, date(2026, 12, 31));
    }

    #[test]
    fn test_for_month_rejects_month_13() {
        assert!(matches!(
            ReportWindow::for_month(2026, 13),
            Err(WindowError::InvalidMonth { .. })
        ));
    }

    #[test]
    fn test_contains_is_inclusive() {
        let w = ReportWindow::for_month(2026, 1).unwrap();
        assert!(w.contains(date(2026, 1, 1)));
        assert!(w.contains(date(2026, 1, 31)));
        assert!(!w.contains(date(2025, 12, 31)));
        assert!(!w.contains(date(2026, 2, 1)));
    }

    #[rstest]
    #[case(date(2026, 1, 15), date(2026, 1, 20), 1)]
    #[case(date(2026, 1, 15), date(2026, 2, 1), 2)]
    #[case(date(2025, 11, 1), date(2026, 2, 28), 4)]
    #[case(date(2026, 2, 1), date(2026, 1, 31), 0)]
    fn test_month_span(#[case] from: NaiveDate, #[case] to: NaiveDate, #[case] expected: u32) {
        assert_eq!(month_span(from, to), expected);
    }

    #[test]
    fn test_overlap_defaults_to_window_bounds() {
        let w = ReportWindow::new(date(2026, 1, 1), date(2026, 2, 28)).unwrap();
        assert_eq!(overlap_months(w, None, None), 2);
    }

    #[test]
    fn test_overlap_clips_contract_to_window() {
        let w = ReportWindow::new(date(2026, 1, 1), date(2026, 3, 31)).unwrap();
        // Contract started before and runs past the window: full window counts.
        assert_eq!(
            overlap_months(w, Some(date(2025, 6, 1)), Some(date(2027, 1, 1))),
            3
        );
        // Contract covers only the middle month.
        assert_eq!(
            overlap_months(w, Some(date(2026, 2, 10)), Some(date(2026, 2, 20))),
            1
        );
    }

    #[test]
    fn test_overlap_zero_when_disjoint() {
        let w = ReportWindow::for_month(2026, 1).unwrap();
        assert_eq!(
            overlap_months(w, Some(date(2026, 5, 1)), Some(date(2026, 6, 1))),
            0
        );
        assert_eq!(
            overlap_months(w, Some(date(2025, 1, 1)), Some(date(2025, 12, 31))),
            0
        );
    }

    #[test]
    fn test_month_key_zero_pads() {
        assert_eq!(month_key(date(2026, 3, 7)), "2026-03");
    }
}
