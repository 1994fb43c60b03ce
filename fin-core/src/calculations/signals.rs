//! Health signals for headline metrics.
//!
//! A signal classifies a single output so a front end can colour it. The
//! thresholds are rules of thumb, not financial advice.

use serde::Serialize;

use crate::calculations::{
    BreakEvenResult, CacLtvResult, EmiResult, NpvResult, RunwayResult, UnitEconomicsResult,
};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Signal {
    #[default]
    Neutral,
    Positive,
    Warning,
    Critical,
}

impl RunwayResult {
    /// Under six months is critical, under a year is a warning.
    pub fn runway_signal(&self) -> Signal {
        if self.runway_months < 6.0 {
            Signal::Critical
        } else if self.runway_months < 12.0 {
            Signal::Warning
        } else {
            Signal::Positive
        }
    }

    pub fn burn_multiple_signal(&self) -> Signal {
        if self.burn_multiple > 2.0 {
            Signal::Critical
        } else {
            Signal::Neutral
        }
    }
}

impl BreakEvenResult {
    pub fn margin_signal(&self) -> Signal {
        positive_or_critical(self.contribution_margin)
    }
}

impl UnitEconomicsResult {
    pub fn margin_signal(&self) -> Signal {
        positive_or_critical(self.contribution_margin_unit)
    }

    pub fn profit_signal(&self) -> Signal {
        positive_or_critical(self.profit_month)
    }
}

impl CacLtvResult {
    /// A ratio of 3:1 or better is healthy; below 1:1 loses money on every
    /// customer.
    pub fn ratio_signal(&self) -> Signal {
        if self.ltv_cac_ratio >= 3.0 {
            Signal::Positive
        } else if self.ltv_cac_ratio >= 1.0 {
            Signal::Warning
        } else {
            Signal::Critical
        }
    }
}

impl EmiResult {
    /// Warns when total interest exceeds 30% of `principal`.
    pub fn interest_signal(
        &self,
        principal: f64,
    ) -> Signal {
        if self.total_interest > principal * 0.3 {
            Signal::Warning
        } else {
            Signal::Neutral
        }
    }
}

impl NpvResult {
    pub fn signal(&self) -> Signal {
        if self.is_positive {
            Signal::Positive
        } else {
            Signal::Critical
        }
    }
}

fn positive_or_critical(value: f64) -> Signal {
    if value > 0.0 {
        Signal::Positive
    } else {
        Signal::Critical
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use crate::calculations::{
        Calculator, CacLtvInput, EmiInput, NpvInput, calculate_break_even, calculate_cac_ltv,
        calculate_emi, calculate_npv, calculate_runway, calculate_unit_economics,
    };

    use super::*;

    // =========================================================================
    // Runway signals
    // =========================================================================

    #[test]
    fn runway_signal_thresholds() {
        assert_eq!(calculate_runway(500_000.0, 100_000.0).runway_signal(), Signal::Critical);
        assert_eq!(calculate_runway(600_000.0, 100_000.0).runway_signal(), Signal::Warning);
        assert_eq!(calculate_runway(1_200_000.0, 100_000.0).runway_signal(), Signal::Positive);
    }

    #[test]
    fn runway_signal_infinite_runway_is_positive() {
        let result = calculate_runway(1_000_000.0, 0.0);

        assert_eq!(result.runway_signal(), Signal::Positive);
    }

    #[test]
    fn burn_multiple_signal_flags_fast_burn() {
        // 300,000 × 12 / 1,000,000 = 3.6
        let fast = calculate_runway(1_000_000.0, 300_000.0);
        let steady = calculate_runway(1_000_000.0, 100_000.0);

        assert_eq!(fast.burn_multiple_signal(), Signal::Critical);
        assert_eq!(steady.burn_multiple_signal(), Signal::Neutral);
    }

    // =========================================================================
    // Margin and profit signals
    // =========================================================================

    #[test]
    fn break_even_margin_signal() {
        assert_eq!(calculate_break_even(50_000.0, 100.0, 40.0).margin_signal(), Signal::Positive);
        assert_eq!(calculate_break_even(50_000.0, 100.0, 100.0).margin_signal(), Signal::Critical);
    }

    #[test]
    fn unit_economics_signals() {
        let healthy = calculate_unit_economics(100.0, 40.0, 1_000.0, 30_000.0, 50.0);
        let losing = calculate_unit_economics(100.0, 40.0, 100.0, 30_000.0, 50.0);

        assert_eq!(healthy.margin_signal(), Signal::Positive);
        assert_eq!(healthy.profit_signal(), Signal::Positive);
        assert_eq!(losing.profit_signal(), Signal::Critical);
    }

    // =========================================================================
    // Growth and financing signals
    // =========================================================================

    #[test]
    fn ltv_cac_ratio_signal_thresholds() {
        // Default inputs give LTV 840 against CAC 100.
        let healthy = CacLtvInput::default().evaluate();
        let marginal = calculate_cac_ltv(50_000.0, 500.0, 50.0, 70.0, 3.0);
        let losing = calculate_cac_ltv(50_000.0, 500.0, 50.0, 70.0, 1.0);

        assert_eq!(healthy.ratio_signal(), Signal::Positive);
        assert_eq!(marginal.ratio_signal(), Signal::Warning);
        assert_eq!(losing.ratio_signal(), Signal::Critical);
    }

    #[test]
    fn ltv_cac_ratio_signal_no_customers_is_positive() {
        let result = calculate_cac_ltv(50_000.0, 0.0, 50.0, 70.0, 24.0);

        assert_eq!(result.ratio_signal(), Signal::Positive);
    }

    #[test]
    fn emi_interest_signal() {
        let short = EmiInput::default();
        let long = calculate_emi(1_000_000.0, 10.0, 120.0);

        assert_eq!(short.evaluate().interest_signal(short.principal), Signal::Neutral);
        assert_eq!(long.interest_signal(1_000_000.0), Signal::Warning);
    }

    #[test]
    fn npv_signal() {
        assert_eq!(NpvInput::default().evaluate().signal(), Signal::Positive);
        assert_eq!(calculate_npv(10.0, &[-100.0, 10.0]).signal(), Signal::Critical);
    }

    #[test]
    fn signal_serializes_lowercase() {
        let json = serde_json::to_string(&Signal::Warning).unwrap();

        assert_eq!(json, "\"warning\"");
    }
}
