//! Domain entity types.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use worklane_shared::types::{ClientId, ProjectId, UserId};

/// Pricing model of a project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BillingType {
    /// Client pays per approved hour.
    Hourly,
    /// One agreed price for the engagement.
    Fixed,
    /// Flat recurring monthly fee.
    MonthlyRetainer,
}

/// Whether a project is a single deliverable or an ongoing engagement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Cadence {
    /// Single deliverable with a deadline.
    OneOff,
    /// Ongoing engagement billed per calendar month.
    RecurringMonthly,
}

/// Review status of a time entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TimeEntryStatus {
    /// Waiting for review.
    Submitted,
    /// Approved; counts toward hours, cost, and revenue.
    Approved,
    /// Rejected; never counted.
    Rejected,
}

/// Kind of bonus payout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BonusType {
    /// Single payout.
    OneOff,
    /// Recurring monthly payout.
    Monthly,
}

/// An employee (or administrator) identity.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Unique identifier.
    pub id: UserId,
    /// Display name.
    pub name: String,
    /// Default hourly rate, used when no per-assignment override exists.
    pub hourly_rate_default: Decimal,
}

/// A client project with its billing configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    /// Unique identifier.
    pub id: ProjectId,
    /// Project name.
    pub name: String,
    /// Owning client.
    pub client_id: ClientId,
    /// Client display name, denormalized for report rows.
    pub client_name: String,
    /// Pricing model.
    pub billing_type: BillingType,
    /// Delivery cadence.
    pub cadence: Cadence,
    /// Client rate per hour (Hourly billing).
    #[serde(default)]
    pub hourly_client_rate: Option<Decimal>,
    /// Monthly retainer fee (MonthlyRetainer billing).
    #[serde(default)]
    pub monthly_retainer_amount: Option<Decimal>,
    /// Agreed fixed price (Fixed billing).
    #[serde(default)]
    pub fixed_client_price: Option<Decimal>,
    /// Contract start date.
    #[serde(default)]
    pub contract_start: Option<NaiveDate>,
    /// Contract end date, open-ended when absent.
    #[serde(default)]
    pub contract_end: Option<NaiveDate>,
    /// Delivery deadline (meaningful for one-off projects).
    #[serde(default)]
    pub deadline_at: Option<NaiveDate>,
    /// Record creation date.
    #[serde(default)]
    pub created_at: Option<NaiveDate>,
    /// Completion date, if delivered.
    #[serde(default)]
    pub completed_at: Option<NaiveDate>,
}

impl Project {
    /// The date a one-off payout or fixed price is considered paid.
    ///
    /// Ordered fallback: deadline, else creation date, else completion date.
    #[must_use]
    pub fn paid_at(&self) -> Option<NaiveDate> {
        self.deadline_at.or(self.created_at).or(self.completed_at)
    }
}

/// Pairing of an employee to a project, carrying pay-rate overrides.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Assignment {
    /// Assigned employee.
    pub user_id: UserId,
    /// Target project.
    pub project_id: ProjectId,
    /// Hourly rate replacing the user's default for this project.
    #[serde(default)]
    pub hourly_rate_override: Option<Decimal>,
    /// Flat amount paid instead of hourly pay; hours stay tracking-only.
    #[serde(default)]
    pub fixed_payout_amount: Option<Decimal>,
}

impl Assignment {
    /// The nonzero fixed payout for this assignment, if one is configured.
    #[must_use]
    pub fn fixed_payout(&self) -> Option<Decimal> {
        self.fixed_payout_amount.filter(|amount| !amount.is_zero())
    }

    /// True when the employee is paid per-project rather than per-hour.
    ///
    /// Logged hours on a project-paid assignment are for tracking only and
    /// must never generate hourly cost or payout.
    #[must_use]
    pub fn is_project_paid(&self) -> bool {
        self.fixed_payout().is_some()
    }

    /// The hourly rate in effect for this assignment.
    #[must_use]
    pub fn effective_rate(&self, default_rate: Decimal) -> Decimal {
        self.hourly_rate_override.unwrap_or(default_rate)
    }
}

/// Hours logged by one user against one project on one date.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeEntry {
    /// Employee who logged the hours.
    pub user_id: UserId,
    /// Project the hours were logged against.
    pub project_id: ProjectId,
    /// Work date.
    pub date: NaiveDate,
    /// Logged hours.
    pub hours: Decimal,
    /// Review status.
    pub status: TimeEntryStatus,
}

/// A bonus amount attributed to an employee.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bonus {
    /// Receiving employee.
    pub user_id: UserId,
    /// Project the bonus is attributed to; company overhead when absent.
    #[serde(default)]
    pub project_id: Option<ProjectId>,
    /// Bonus amount.
    pub amount: Decimal,
    /// Payout kind.
    #[serde(rename = "type")]
    pub bonus_type: BonusType,
    /// Month tag in `YYYY-MM` form; untagged bonuses count in every period.
    #[serde(default)]
    pub month: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn project(
        deadline_at: Option<NaiveDate>,
        created_at: Option<NaiveDate>,
        completed_at: Option<NaiveDate>,
    ) -> Project {
        Project {
            id: ProjectId::new(),
            name: "P".to_string(),
            client_id: ClientId::new(),
            client_name: "C".to_string(),
            billing_type: BillingType::Fixed,
            cadence: Cadence::OneOff,
            hourly_client_rate: None,
            monthly_retainer_amount: None,
            fixed_client_price: None,
            contract_start: None,
            contract_end: None,
            deadline_at,
            created_at,
            completed_at,
        }
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_paid_at_prefers_deadline() {
        let p = project(
            Some(date(2026, 3, 15)),
            Some(date(2026, 1, 1)),
            Some(date(2026, 4, 1)),
        );
        assert_eq!(p.paid_at(), Some(date(2026, 3, 15)));
    }

    #[test]
    fn test_paid_at_falls_back_to_created() {
        let p = project(None, Some(date(2026, 1, 1)), Some(date(2026, 4, 1)));
        assert_eq!(p.paid_at(), Some(date(2026, 1, 1)));
    }

    #[test]
    fn test_paid_at_falls_back_to_completed() {
        let p = project(None, None, Some(date(2026, 4, 1)));
        assert_eq!(p.paid_at(), Some(date(2026, 4, 1)));
    }

    #[test]
    fn test_paid_at_none_when_no_dates() {
        assert_eq!(project(None, None, None).paid_at(), None);
    }

    #[test]
    fn test_zero_fixed_payout_is_not_project_paid() {
        let a = Assignment {
            user_id: UserId::new(),
            project_id: ProjectId::new(),
            hourly_rate_override: None,
            fixed_payout_amount: Some(Decimal::ZERO),
        };
        assert!(!a.is_project_paid());
        assert_eq!(a.fixed_payout(), None);
    }

    #[test]
    fn test_effective_rate_prefers_override() {
        let a = Assignment {
            user_id: UserId::new(),
            project_id: ProjectId::new(),
            hourly_rate_override: Some(dec!(60)),
            fixed_payout_amount: None,
        };
        assert_eq!(a.effective_rate(dec!(50)), dec!(60));

        let no_override = Assignment {
            hourly_rate_override: None,
            ..a
        };
        assert_eq!(no_override.effective_rate(dec!(50)), dec!(50));
    }

    #[test]
    fn test_enum_wire_names() {
        assert_eq!(
            serde_json::to_string(&BillingType::MonthlyRetainer).unwrap(),
            "\"MONTHLY_RETAINER\""
        );
        assert_eq!(
            serde_json::to_string(&Cadence::RecurringMonthly).unwrap(),
            "\"RECURRING_MONTHLY\""
        );
        assert_eq!(
            serde_json::to_string(&TimeEntryStatus::Approved).unwrap(),
            "\"APPROVED\""
        );
    }

    #[test]
    fn test_bonus_wire_shape() {
        let raw = r#"{"userId":"0193e0f0-0000-7000-8000-000000000001","amount":"250","type":"ONE_OFF","month":"2026-01"}"#;
        let bonus: Bonus = serde_json::from_str(raw).unwrap();
        assert_eq!(bonus.amount, dec!(250));
        assert_eq!(bonus.bonus_type, BonusType::OneOff);
        assert_eq!(bonus.month.as_deref(), Some("2026-01"));
        assert_eq!(bonus.project_id, None);
    }
}
