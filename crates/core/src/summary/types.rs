//! Yearly summary data types.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use worklane_shared::types::UserId;

/// One calendar month of an employee's earnings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthEarnings {
    /// Month key in `YYYY-MM` form.
    pub month: String,
    /// All approved hours, including tracking-only hours.
    pub hours_total: Decimal,
    /// Approved hours on hourly-paid assignments.
    pub hours_hourly: Decimal,
    /// Pay from hourly-paid assignments.
    pub payout_hourly: Decimal,
    /// Fixed payouts from recurring-monthly projects active this month.
    pub payout_project_monthly: Decimal,
    /// Fixed payouts from one-off projects paid this month.
    pub payout_project_one_off: Decimal,
    /// Bonuses tagged for this month.
    pub bonuses: Decimal,
    /// Total compensation for the month.
    pub total: Decimal,
    /// Total divided by all hours; 0 when no hours were logged.
    pub efficiency: Decimal,
}

/// A user's earnings for each month of one calendar year.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct YearSummary {
    /// The summarized user.
    pub user_id: UserId,
    /// Calendar year.
    pub year: i32,
    /// The user's default hourly rate, for display.
    pub hourly_rate_default: Decimal,
    /// Exactly twelve rows, January through December.
    pub months: Vec<MonthEarnings>,
}
