//! The period reporting engine.
//!
//! A pure function over a snapshot: no I/O, no input mutation,
//! deterministic, safe to call concurrently from independent requests.

use std::collections::{BTreeMap, HashMap};

use rust_decimal::{Decimal, RoundingStrategy};
use worklane_shared::types::{ProjectId, UserId};

use crate::domain::{Assignment, BillingType, Bonus, Cadence, Project, TimeEntryStatus, User};
use crate::period::{ReportWindow, overlap_months};
use crate::snapshot::ReportSnapshot;

use super::policy::RevenuePolicy;
use super::types::{ClientRevenue, EmployeeRow, Kpi, PeriodReport, ProjectRow, TopLists};

const TOP_LIST_LEN: usize = 5;

/// Rounds a final output figure to 2 decimal places, half-up.
///
/// Applied only when assembling output; accumulators stay unrounded so
/// rounding error never compounds across additions.
pub(crate) fn round2(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

#[derive(Debug, Default)]
struct ProjectAcc {
    hours: Decimal,
    hourly_cost: Decimal,
    fixed_cost: Decimal,
    bonuses: Decimal,
}

#[derive(Debug, Default)]
struct EmployeeAcc {
    hours: Decimal,
    hourly_payout: Decimal,
    fixed_payout: Decimal,
    bonuses: Decimal,
}

/// The period reporting engine, configured with a revenue policy.
#[derive(Debug, Clone, Default)]
pub struct ReportEngine {
    policy: RevenuePolicy,
}

impl ReportEngine {
    /// Creates an engine with the given revenue policy.
    #[must_use]
    pub const fn new(policy: RevenuePolicy) -> Self {
        Self { policy }
    }

    /// Computes the period report for a snapshot.
    ///
    /// Every supplied project and user appears exactly once in the output,
    /// zero-activity rows included. Records referencing an unknown user or
    /// project are skipped, never fatal.
    #[must_use]
    pub fn compute(&self, snapshot: &ReportSnapshot) -> PeriodReport {
        let window = snapshot.window;
        let records = &snapshot.records;

        let user_by_id: HashMap<UserId, &User> =
            records.users.iter().map(|u| (u.id, u)).collect();
        let project_by_id: HashMap<ProjectId, &Project> =
            records.projects.iter().map(|p| (p.id, p)).collect();
        let assignment_by_key: HashMap<(UserId, ProjectId), &Assignment> = records
            .assignments
            .iter()
            .map(|a| ((a.user_id, a.project_id), a))
            .collect();

        let mut project_acc: HashMap<ProjectId, ProjectAcc> = HashMap::new();
        let mut employee_acc: HashMap<UserId, EmployeeAcc> = HashMap::new();
        let mut overhead_bonuses = Decimal::ZERO;

        // Stage 1+2: approved hours and hourly cost.
        for entry in &records.time_entries {
            if entry.status != TimeEntryStatus::Approved || !window.contains(entry.date) {
                continue;
            }
            let Some(user) = user_by_id.get(&entry.user_id) else {
                continue;
            };
            if !project_by_id.contains_key(&entry.project_id) {
                continue;
            }

            let assignment = assignment_by_key.get(&(entry.user_id, entry.project_id));
            let project = project_acc.entry(entry.project_id).or_default();
            let employee = employee_acc.entry(entry.user_id).or_default();
            project.hours += entry.hours;
            employee.hours += entry.hours;

            // Hours on a project-paid assignment are tracking-only: they
            // must not generate hourly cost or payout.
            let project_paid = assignment.is_some_and(|a| a.is_project_paid());
            if !project_paid {
                let rate = assignment.map_or(user.hourly_rate_default, |a| {
                    a.effective_rate(user.hourly_rate_default)
                });
                let cost = entry.hours * rate;
                project.hourly_cost += cost;
                employee.hourly_payout += cost;
            }
        }

        // Stage 3: fixed per-project payouts.
        for assignment in &records.assignments {
            let Some(project) = project_by_id.get(&assignment.project_id) else {
                continue;
            };
            if !user_by_id.contains_key(&assignment.user_id) {
                continue;
            }
            let Some(fixed) = assignment.fixed_payout() else {
                continue;
            };

            let amount = match project.cadence {
                Cadence::OneOff => match project.paid_at() {
                    Some(paid_at) if window.contains(paid_at) => fixed,
                    _ => Decimal::ZERO,
                },
                Cadence::RecurringMonthly => {
                    let months =
                        overlap_months(window, project.contract_start, project.contract_end);
                    fixed * Decimal::from(months)
                }
            };
            if amount.is_zero() {
                continue;
            }

            project_acc.entry(project.id).or_default().fixed_cost += amount;
            employee_acc
                .entry(assignment.user_id)
                .or_default()
                .fixed_payout += amount;
        }

        // Stage 4: bonuses, gated by month tag inside the engine.
        for bonus in &records.bonuses {
            if !user_by_id.contains_key(&bonus.user_id) || !Self::bonus_in_window(bonus, window) {
                continue;
            }
            match bonus.project_id {
                Some(project_id) => {
                    // Bonuses pointing at unknown projects are dropped
                    // entirely so employee and company totals stay in sync.
                    if !project_by_id.contains_key(&project_id) {
                        continue;
                    }
                    project_acc.entry(project_id).or_default().bonuses += bonus.amount;
                }
                None => overhead_bonuses += bonus.amount,
            }
            employee_acc.entry(bonus.user_id).or_default().bonuses += bonus.amount;
        }

        // Stage 5: per-project revenue by billing type.
        let mut revenue_by_project: HashMap<ProjectId, Decimal> = HashMap::new();
        for project in &records.projects {
            let acc = project_acc.get(&project.id);
            let revenue = self.project_revenue(project, window, acc);
            revenue_by_project.insert(project.id, revenue);
        }

        // Stage 6+7: assemble rows and company KPIs from unrounded sums.
        let mut revenue_total = Decimal::ZERO;
        let mut cost_total = overhead_bonuses;
        let projects: Vec<ProjectRow> = records
            .projects
            .iter()
            .map(|project| {
                let acc = project_acc.get(&project.id);
                let revenue = revenue_by_project
                    .get(&project.id)
                    .copied()
                    .unwrap_or_default();
                let hours = acc.map(|a| a.hours).unwrap_or_default();
                let bonuses = acc.map(|a| a.bonuses).unwrap_or_default();
                let cost = acc
                    .map(|a| a.hourly_cost + a.fixed_cost + a.bonuses)
                    .unwrap_or_default();
                revenue_total += revenue;
                cost_total += cost;
                ProjectRow {
                    project_id: project.id,
                    name: project.name.clone(),
                    client_id: project.client_id,
                    client_name: project.client_name.clone(),
                    revenue: round2(revenue),
                    cost: round2(cost),
                    margin: round2(revenue - cost),
                    hours: round2(hours),
                    bonuses: round2(bonuses),
                }
            })
            .collect();

        let mut hours_total = Decimal::ZERO;
        let employees: Vec<EmployeeRow> = records
            .users
            .iter()
            .map(|user| {
                let acc = employee_acc.get(&user.id);
                let hours = acc.map(|a| a.hours).unwrap_or_default();
                let hourly = acc.map(|a| a.hourly_payout).unwrap_or_default();
                let fixed = acc.map(|a| a.fixed_payout).unwrap_or_default();
                let bonuses = acc.map(|a| a.bonuses).unwrap_or_default();
                hours_total += hours;
                EmployeeRow {
                    user_id: user.id,
                    name: user.name.clone(),
                    hours: round2(hours),
                    hourly_payout: round2(hourly),
                    fixed_payout: round2(fixed),
                    bonuses: round2(bonuses),
                    total: round2(hourly + fixed + bonuses),
                }
            })
            .collect();

        let kpi = Kpi {
            revenue: round2(revenue_total),
            cost: round2(cost_total),
            margin: round2(revenue_total - cost_total),
            hours: round2(hours_total),
            active_projects: records.projects.len(),
        };

        // Stage 8: leaderboards.
        let top = Self::top_lists(&projects, &employees);

        PeriodReport {
            from: window.from,
            to: window.to,
            kpi,
            employees,
            projects,
            top,
        }
    }

    /// A bonus counts when untagged, or when its `YYYY-MM` tag falls inside
    /// the window's month range.
    fn bonus_in_window(bonus: &Bonus, window: ReportWindow) -> bool {
        bonus.month.as_deref().is_none_or(|tag| {
            tag >= window.from_month_key().as_str() && tag <= window.to_month_key().as_str()
        })
    }

    fn project_revenue(
        &self,
        project: &Project,
        window: ReportWindow,
        acc: Option<&ProjectAcc>,
    ) -> Decimal {
        match project.billing_type {
            BillingType::MonthlyRetainer => {
                let months = overlap_months(window, project.contract_start, project.contract_end);
                project.monthly_retainer_amount.unwrap_or_default() * Decimal::from(months)
            }
            BillingType::Fixed => match project.cadence {
                Cadence::OneOff => match project.paid_at() {
                    Some(paid_at) if window.contains(paid_at) => {
                        project.fixed_client_price.unwrap_or_default()
                    }
                    _ => Decimal::ZERO,
                },
                Cadence::RecurringMonthly => {
                    let months =
                        overlap_months(window, project.contract_start, project.contract_end);
                    project.fixed_client_price.unwrap_or_default() * Decimal::from(months)
                }
            },
            BillingType::Hourly => {
                let hours = acc.map(|a| a.hours).unwrap_or_default();
                let hourly_cost = acc.map(|a| a.hourly_cost).unwrap_or_default();
                let rate = project.hourly_client_rate.unwrap_or_default();
                if rate > Decimal::ZERO {
                    hours * rate
                } else {
                    // No client rate configured: approximate revenue as
                    // internal hourly cost plus the policy markup.
                    hourly_cost * self.policy.hourly_cost_markup
                }
            }
        }
    }

    fn top_lists(projects: &[ProjectRow], employees: &[EmployeeRow]) -> TopLists {
        let mut projects_by_revenue = projects.to_vec();
        projects_by_revenue.sort_by(|a, b| b.revenue.cmp(&a.revenue));
        projects_by_revenue.truncate(TOP_LIST_LEN);

        // BTreeMap keeps client grouping deterministic; ties in revenue then
        // stay in name order after the stable sort.
        let mut by_client: BTreeMap<&str, Decimal> = BTreeMap::new();
        for row in projects {
            *by_client.entry(row.client_name.as_str()).or_default() += row.revenue;
        }
        let mut clients_by_revenue: Vec<ClientRevenue> = by_client
            .into_iter()
            .map(|(client_name, revenue)| ClientRevenue {
                client_name: client_name.to_string(),
                revenue: round2(revenue),
            })
            .collect();
        clients_by_revenue.sort_by(|a, b| b.revenue.cmp(&a.revenue));
        clients_by_revenue.truncate(TOP_LIST_LEN);

        let mut employees_by_payout = employees.to_vec();
        employees_by_payout.sort_by(|a, b| b.total.cmp(&a.total));
        employees_by_payout.truncate(TOP_LIST_LEN);

        TopLists {
            projects_by_revenue,
            clients_by_revenue,
            employees_by_payout,
        }
    }
}
