//! Yearly earnings calculation.

use std::collections::HashMap;

use chrono::Datelike;
use rust_decimal::Decimal;
use worklane_shared::types::ProjectId;

use crate::domain::{Assignment, Bonus, Cadence, Project, TimeEntry, TimeEntryStatus, User};
use crate::period::ReportWindow;
use crate::report::engine::round2;

use super::types::{MonthEarnings, YearSummary};

#[derive(Debug, Default)]
struct MonthAcc {
    hours_total: Decimal,
    hours_hourly: Decimal,
    payout_hourly: Decimal,
    payout_project_monthly: Decimal,
    payout_project_one_off: Decimal,
    bonuses: Decimal,
}

/// Service computing per-employee yearly summaries.
pub struct SummaryService;

impl SummaryService {
    /// Computes one user's month-by-month earnings for a calendar year.
    ///
    /// Pure over its inputs, like the period report: entries are filtered
    /// to approved ones inside the year here, records of other users are
    /// ignored, and dangling project references are skipped.
    #[must_use]
    pub fn year_summary(
        user: &User,
        year: i32,
        projects: &[Project],
        assignments: &[Assignment],
        time_entries: &[TimeEntry],
        bonuses: &[Bonus],
    ) -> YearSummary {
        let project_by_id: HashMap<ProjectId, &Project> =
            projects.iter().map(|p| (p.id, p)).collect();
        let own_assignments: Vec<&Assignment> = assignments
            .iter()
            .filter(|a| a.user_id == user.id)
            .collect();
        let assignment_by_project: HashMap<ProjectId, &Assignment> = own_assignments
            .iter()
            .map(|a| (a.project_id, *a))
            .collect();

        let mut months: Vec<MonthAcc> = (0..12).map(|_| MonthAcc::default()).collect();

        // Approved hours and hourly pay.
        for entry in time_entries {
            if entry.user_id != user.id
                || entry.status != TimeEntryStatus::Approved
                || entry.date.year() != year
                || !project_by_id.contains_key(&entry.project_id)
            {
                continue;
            }
            let Some(acc) = months.get_mut(entry.date.month0() as usize) else {
                continue;
            };
            acc.hours_total += entry.hours;

            let assignment = assignment_by_project.get(&entry.project_id);
            if assignment.is_some_and(|a| a.is_project_paid()) {
                continue;
            }
            let rate = assignment.map_or(user.hourly_rate_default, |a| {
                a.effective_rate(user.hourly_rate_default)
            });
            acc.hours_hourly += entry.hours;
            acc.payout_hourly += entry.hours * rate;
        }

        // Fixed project payouts.
        for assignment in &own_assignments {
            let Some(fixed) = assignment.fixed_payout() else {
                continue;
            };
            let Some(project) = project_by_id.get(&assignment.project_id) else {
                continue;
            };

            match project.cadence {
                Cadence::OneOff => {
                    let Some(paid_at) = project.paid_at() else {
                        continue;
                    };
                    if paid_at.year() == year {
                        if let Some(acc) = months.get_mut(paid_at.month0() as usize) {
                            acc.payout_project_one_off += fixed;
                        }
                    }
                }
                Cadence::RecurringMonthly => {
                    for (index, acc) in months.iter_mut().enumerate() {
                        let month = u32::try_from(index + 1).unwrap_or(1);
                        let Ok(window) = ReportWindow::for_month(year, month) else {
                            continue;
                        };
                        let starts_by_end =
                            project.contract_start.unwrap_or(window.from) <= window.to;
                        let ends_after_start =
                            project.contract_end.unwrap_or(window.to) >= window.from;
                        if starts_by_end && ends_after_start {
                            acc.payout_project_monthly += fixed;
                        }
                    }
                }
            }
        }

        // Bonuses tagged for a month of this year.
        for bonus in bonuses {
            if bonus.user_id != user.id {
                continue;
            }
            let Some(index) = bonus
                .month
                .as_deref()
                .and_then(|tag| Self::month_index(tag, year))
            else {
                continue;
            };
            if let Some(acc) = months.get_mut(index) {
                acc.bonuses += bonus.amount;
            }
        }

        let months = months
            .into_iter()
            .enumerate()
            .map(|(index, acc)| {
                let total = acc.payout_hourly
                    + acc.payout_project_monthly
                    + acc.payout_project_one_off
                    + acc.bonuses;
                let efficiency = if acc.hours_total.is_zero() {
                    Decimal::ZERO
                } else {
                    total / acc.hours_total
                };
                MonthEarnings {
                    month: format!("{year:04}-{:02}", index + 1),
                    hours_total: round2(acc.hours_total),
                    hours_hourly: round2(acc.hours_hourly),
                    payout_hourly: round2(acc.payout_hourly),
                    payout_project_monthly: round2(acc.payout_project_monthly),
                    payout_project_one_off: round2(acc.payout_project_one_off),
                    bonuses: round2(acc.bonuses),
                    total: round2(total),
                    efficiency: round2(efficiency),
                }
            })
            .collect();

        YearSummary {
            user_id: user.id,
            year,
            hourly_rate_default: user.hourly_rate_default,
            months,
        }
    }

    /// Zero-based month index from a `YYYY-MM` tag, when the tag names a
    /// real month of `year`. The month part must be exactly two digits so
    /// tags like `2026-9` never match, same as the period report's gate.
    fn month_index(tag: &str, year: i32) -> Option<usize> {
        let month = tag.strip_prefix(&format!("{year:04}-"))?;
        if month.len() != 2 {
            return None;
        }
        let month = month.parse::<u32>().ok()?;
        if (1..=12).contains(&month) {
            usize::try_from(month - 1).ok()
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;
    use worklane_shared::types::{ClientId, UserId};

    use crate::domain::{BillingType, BonusType};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn user(rate: Decimal) -> User {
        User {
            id: UserId::new(),
            name: "Ada".to_string(),
            hourly_rate_default: rate,
        }
    }

    fn project(cadence: Cadence) -> Project {
        Project {
            id: ProjectId::new(),
            name: "Site".to_string(),
            client_id: ClientId::new(),
            client_name: "Acme".to_string(),
            billing_type: BillingType::Hourly,
            cadence,
            hourly_client_rate: None,
            monthly_retainer_amount: None,
            fixed_client_price: None,
            contract_start: None,
            contract_end: None,
            deadline_at: None,
            created_at: None,
            completed_at: None,
        }
    }

    fn entry(user: &User, project: &Project, date: NaiveDate, hours: Decimal) -> TimeEntry {
        TimeEntry {
            user_id: user.id,
            project_id: project.id,
            date,
            hours,
            status: TimeEntryStatus::Approved,
        }
    }

    #[test]
    fn test_always_returns_twelve_months() {
        let u = user(dec!(50));
        let summary = SummaryService::year_summary(&u, 2026, &[], &[], &[], &[]);
        assert_eq!(summary.months.len(), 12);
        assert_eq!(summary.months[0].month, "2026-01");
        assert_eq!(summary.months[11].month, "2026-12");
        assert!(summary.months.iter().all(|m| m.total.is_zero()));
    }

    #[test]
    fn test_hourly_pay_lands_in_the_worked_month() {
        let u = user(dec!(50));
        let p = project(Cadence::RecurringMonthly);
        let entries = vec![
            entry(&u, &p, date(2026, 3, 10), dec!(8)),
            entry(&u, &p, date(2026, 3, 11), dec!(2)),
            entry(&u, &p, date(2025, 3, 10), dec!(99)), // other year
        ];
        let summary = SummaryService::year_summary(&u, 2026, &[p], &[], &entries, &[]);

        let march = &summary.months[2];
        assert_eq!(march.hours_total, dec!(10));
        assert_eq!(march.hours_hourly, dec!(10));
        assert_eq!(march.payout_hourly, dec!(500));
        assert_eq!(march.efficiency, dec!(50));
    }

    #[test]
    fn test_project_paid_hours_are_tracking_only() {
        let u = user(dec!(50));
        let p = project(Cadence::OneOff);
        let assignment = Assignment {
            user_id: u.id,
            project_id: p.id,
            hourly_rate_override: None,
            fixed_payout_amount: Some(dec!(1000)),
        };
        let entries = vec![entry(&u, &p, date(2026, 5, 4), dec!(6))];
        let summary =
            SummaryService::year_summary(&u, 2026, &[p], &[assignment], &entries, &[]);

        let may = &summary.months[4];
        assert_eq!(may.hours_total, dec!(6));
        assert_eq!(may.hours_hourly, dec!(0));
        assert_eq!(may.payout_hourly, dec!(0));
    }

    #[test]
    fn test_one_off_payout_lands_in_deadline_month() {
        let u = user(dec!(50));
        let mut p = project(Cadence::OneOff);
        p.deadline_at = Some(date(2026, 7, 15));
        let assignment = Assignment {
            user_id: u.id,
            project_id: p.id,
            hourly_rate_override: None,
            fixed_payout_amount: Some(dec!(2500)),
        };
        let summary = SummaryService::year_summary(&u, 2026, &[p], &[assignment], &[], &[]);

        assert_eq!(summary.months[6].payout_project_one_off, dec!(2500));
        assert_eq!(summary.months[6].total, dec!(2500));
        assert_eq!(summary.months[5].payout_project_one_off, dec!(0));
    }

    #[test]
    fn test_recurring_payout_fills_contract_months() {
        let u = user(dec!(50));
        let mut p = project(Cadence::RecurringMonthly);
        p.contract_start = Some(date(2026, 2, 10));
        p.contract_end = Some(date(2026, 4, 5));
        let assignment = Assignment {
            user_id: u.id,
            project_id: p.id,
            hourly_rate_override: None,
            fixed_payout_amount: Some(dec!(800)),
        };
        let summary = SummaryService::year_summary(&u, 2026, &[p], &[assignment], &[], &[]);

        let monthly: Vec<Decimal> = summary
            .months
            .iter()
            .map(|m| m.payout_project_monthly)
            .collect();
        assert_eq!(monthly[0], dec!(0));
        assert_eq!(monthly[1], dec!(800));
        assert_eq!(monthly[2], dec!(800));
        assert_eq!(monthly[3], dec!(800));
        assert_eq!(monthly[4], dec!(0));
    }

    #[test]
    fn test_bonus_tags_gate_by_year_and_month() {
        let u = user(dec!(50));
        let bonuses = vec![
            Bonus {
                user_id: u.id,
                project_id: None,
                amount: dec!(300),
                bonus_type: BonusType::OneOff,
                month: Some("2026-09".to_string()),
            },
            Bonus {
                user_id: u.id,
                project_id: None,
                amount: dec!(100),
                bonus_type: BonusType::OneOff,
                month: Some("2025-09".to_string()), // other year
            },
            Bonus {
                user_id: u.id,
                project_id: None,
                amount: dec!(50),
                bonus_type: BonusType::OneOff,
                month: None, // untagged: not placeable in a month
            },
        ];
        let summary = SummaryService::year_summary(&u, 2026, &[], &[], &[], &bonuses);

        assert_eq!(summary.months[8].bonuses, dec!(300));
        let year_total: Decimal = summary.months.iter().map(|m| m.bonuses).sum();
        assert_eq!(year_total, dec!(300));
    }

    #[test]
    fn test_unpadded_month_tags_never_match() {
        let u = user(dec!(50));
        let bonus = |month: &str| Bonus {
            user_id: u.id,
            project_id: None,
            amount: dec!(100),
            bonus_type: BonusType::OneOff,
            month: Some(month.to_string()),
        };
        let bonuses = vec![bonus("2026-9"), bonus("2026-009"), bonus("2026-xx")];
        let summary = SummaryService::year_summary(&u, 2026, &[], &[], &[], &bonuses);

        assert!(summary.months.iter().all(|m| m.bonuses.is_zero()));
    }

    #[test]
    fn test_other_users_records_are_ignored() {
        let u = user(dec!(50));
        let other = user(dec!(70));
        let p = project(Cadence::RecurringMonthly);
        let entries = vec![entry(&other, &p, date(2026, 1, 5), dec!(8))];
        let summary = SummaryService::year_summary(&u, 2026, &[p], &[], &entries, &[]);
        assert!(summary.months[0].hours_total.is_zero());
    }
}
