//! Unit economics calculator.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::calculations::Calculator;
use crate::calculations::common::{ratio_or_infinity, serialize_sentinel};
use crate::currency::{Currency, MonetaryFields, convert};

/// Inputs for the unit economics calculator.
///
/// `units_per_month` is a count and is never converted between currencies.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnitEconomicsInput {
    pub price: f64,
    pub variable_cost: f64,
    pub units_per_month: f64,
    pub fixed_costs: f64,
    /// Customer acquisition cost per unit sold.
    pub cac: f64,
}

impl Default for UnitEconomicsInput {
    fn default() -> Self {
        Self {
            price: 100.0,
            variable_cost: 40.0,
            units_per_month: 1_000.0,
            fixed_costs: 30_000.0,
            cac: 50.0,
        }
    }
}

/// Outputs of the unit economics calculator.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct UnitEconomicsResult {
    pub contribution_margin_unit: f64,
    pub contribution_margin_month: f64,
    pub profit_month: f64,

    /// Units whose contribution repays one CAC; `+∞` when the unit margin is
    /// not positive.
    #[serde(serialize_with = "serialize_sentinel")]
    pub payback_units: f64,
}

/// Computes per-unit and monthly contribution, profit and CAC payback.
pub fn calculate_unit_economics(
    price: f64,
    variable_cost: f64,
    units_per_month: f64,
    fixed_costs: f64,
    cac: f64,
) -> UnitEconomicsResult {
    let contribution_margin_unit = price - variable_cost;
    let contribution_margin_month = contribution_margin_unit * units_per_month;
    let profit_month = contribution_margin_month - fixed_costs;
    let payback_units = ratio_or_infinity(cac, contribution_margin_unit);
    if payback_units.is_infinite() {
        debug!(contribution_margin_unit, "non-positive unit margin; CAC is never repaid");
    }

    UnitEconomicsResult {
        contribution_margin_unit,
        contribution_margin_month,
        profit_month,
        payback_units,
    }
}

impl Calculator for UnitEconomicsInput {
    type Output = UnitEconomicsResult;

    fn evaluate(&self) -> UnitEconomicsResult {
        calculate_unit_economics(
            self.price,
            self.variable_cost,
            self.units_per_month,
            self.fixed_costs,
            self.cac,
        )
    }
}

impl MonetaryFields for UnitEconomicsInput {
    fn rescale(
        &mut self,
        from: Currency,
        to: Currency,
    ) {
        self.price = convert(self.price, from, to);
        self.variable_cost = convert(self.variable_cost, from, to);
        self.fixed_costs = convert(self.fixed_costs, from, to);
        self.cac = convert(self.cac, from, to);
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn calculate_unit_economics_default_inputs() {
        let result = UnitEconomicsInput::default().evaluate();

        assert_eq!(result.contribution_margin_unit, 60.0);
        assert_eq!(result.contribution_margin_month, 60_000.0);
        assert_eq!(result.profit_month, 30_000.0);
        assert_eq!(result.payback_units, 50.0 / 60.0);
    }

    #[test]
    fn calculate_unit_economics_loss_making_month() {
        let result = calculate_unit_economics(100.0, 40.0, 100.0, 30_000.0, 50.0);

        // 60 × 100 − 30,000
        assert_eq!(result.profit_month, -24_000.0);
    }

    #[test]
    fn calculate_unit_economics_zero_margin_never_pays_back() {
        let result = calculate_unit_economics(40.0, 40.0, 1_000.0, 30_000.0, 50.0);

        assert_eq!(result.contribution_margin_unit, 0.0);
        assert_eq!(result.contribution_margin_month, 0.0);
        assert_eq!(result.payback_units, f64::INFINITY);
    }

    #[test]
    fn rescale_leaves_units_untouched() {
        let mut input = UnitEconomicsInput::default();

        input.rescale(Currency::Usd, Currency::Inr);

        assert_eq!(input.price, 8_300.0);
        assert_eq!(input.variable_cost, 3_320.0);
        assert_eq!(input.fixed_costs, 2_490_000.0);
        assert_eq!(input.cac, 4_150.0);
        assert_eq!(input.units_per_month, 1_000.0);
    }
}
