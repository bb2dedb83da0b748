//! Per-client rollups over a period report.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use worklane_shared::types::ClientId;

use super::engine::round2;
use super::types::PeriodReport;

/// One client's aggregated figures for the period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientRow {
    /// Client identifier.
    pub client_id: ClientId,
    /// Client display name.
    pub client_name: String,
    /// Revenue across the client's projects.
    pub revenue: Decimal,
    /// Cost across the client's projects.
    pub cost: Decimal,
    /// Margin across the client's projects.
    pub margin: Decimal,
    /// Approved hours across the client's projects.
    pub hours: Decimal,
    /// Margin per approved hour; 0 when no hours were logged.
    pub efficiency_per_hour: Decimal,
}

impl PeriodReport {
    /// Folds the project rows into one row per client, sorted by revenue
    /// descending.
    ///
    /// Sums the already-rounded project rows so the rollup matches what a
    /// reader adds up from the project table.
    #[must_use]
    pub fn client_rollup(&self) -> Vec<ClientRow> {
        #[derive(Default)]
        struct Acc {
            client_name: String,
            revenue: Decimal,
            cost: Decimal,
            margin: Decimal,
            hours: Decimal,
        }

        let mut by_client: BTreeMap<ClientId, Acc> = BTreeMap::new();
        for row in &self.projects {
            let acc = by_client.entry(row.client_id).or_default();
            if acc.client_name.is_empty() {
                acc.client_name.clone_from(&row.client_name);
            }
            acc.revenue += row.revenue;
            acc.cost += row.cost;
            acc.margin += row.margin;
            acc.hours += row.hours;
        }

        let mut rows: Vec<ClientRow> = by_client
            .into_iter()
            .map(|(client_id, acc)| {
                let efficiency = if acc.hours.is_zero() {
                    Decimal::ZERO
                } else {
                    acc.margin / acc.hours
                };
                ClientRow {
                    client_id,
                    client_name: acc.client_name,
                    revenue: acc.revenue,
                    cost: acc.cost,
                    margin: acc.margin,
                    hours: acc.hours,
                    efficiency_per_hour: round2(efficiency),
                }
            })
            .collect();
        rows.sort_by(|a, b| b.revenue.cmp(&a.revenue));
        rows
    }
}
