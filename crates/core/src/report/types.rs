//! Report data types.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use worklane_shared::types::{ClientId, ProjectId, UserId};

/// Company-wide key figures for the period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Kpi {
    /// Total revenue across all projects.
    pub revenue: Decimal,
    /// Total cost: project costs plus unattributed bonus overhead.
    pub cost: Decimal,
    /// Revenue minus cost.
    pub margin: Decimal,
    /// Total approved hours.
    pub hours: Decimal,
    /// Number of projects considered (all supplied projects).
    pub active_projects: usize,
}

/// One project's figures for the period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectRow {
    /// Project identifier.
    pub project_id: ProjectId,
    /// Project name.
    pub name: String,
    /// Owning client.
    pub client_id: ClientId,
    /// Client display name.
    pub client_name: String,
    /// Period revenue.
    pub revenue: Decimal,
    /// Period cost: hourly cost + fixed payouts + attributed bonuses.
    pub cost: Decimal,
    /// Revenue minus cost.
    pub margin: Decimal,
    /// Approved hours logged against the project.
    pub hours: Decimal,
    /// Bonuses attributed to the project.
    pub bonuses: Decimal,
}

/// One employee's compensation figures for the period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeRow {
    /// Employee identifier.
    pub user_id: UserId,
    /// Employee name.
    pub name: String,
    /// Approved hours (including tracking-only hours on project-paid work).
    pub hours: Decimal,
    /// Hourly pay earned.
    pub hourly_payout: Decimal,
    /// Fixed per-project payouts earned.
    pub fixed_payout: Decimal,
    /// Bonuses received.
    pub bonuses: Decimal,
    /// Total compensation.
    pub total: Decimal,
}

/// Revenue aggregated under one client display name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientRevenue {
    /// Client display name.
    pub client_name: String,
    /// Aggregated revenue.
    pub revenue: Decimal,
}

/// Derived leaderboards over the report rows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TopLists {
    /// Top 5 projects by revenue.
    pub projects_by_revenue: Vec<ProjectRow>,
    /// Top 5 clients by aggregated revenue.
    pub clients_by_revenue: Vec<ClientRevenue>,
    /// Top 5 employees by total compensation.
    pub employees_by_payout: Vec<EmployeeRow>,
}

/// The full period report. Self-contained: rendering it requires no
/// further lookups.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PeriodReport {
    /// First day of the reported window.
    pub from: NaiveDate,
    /// Last day of the reported window.
    pub to: NaiveDate,
    /// Company-wide key figures.
    pub kpi: Kpi,
    /// One row per supplied employee, zero-activity rows included.
    pub employees: Vec<EmployeeRow>,
    /// One row per supplied project, zero-activity rows included.
    pub projects: Vec<ProjectRow>,
    /// Derived leaderboards.
    pub top: TopLists,
}
