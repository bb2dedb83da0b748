//! Tunable business constants for report calculations.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Revenue calculation policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RevenuePolicy {
    /// Markup applied to a project's internal hourly cost to approximate
    /// revenue when no client rate is configured. The historical agency
    /// value is 1.3 (a 30% markup over internal cost).
    pub hourly_cost_markup: Decimal,
}

impl RevenuePolicy {
    /// Policy with the historical 1.3 markup.
    #[must_use]
    pub fn standard() -> Self {
        Self {
            // 13 / 10^1
            hourly_cost_markup: Decimal::new(13, 1),
        }
    }
}

impl Default for RevenuePolicy {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_standard_markup_is_thirty_percent() {
        assert_eq!(RevenuePolicy::standard().hourly_cost_markup, dec!(1.3));
    }
}
