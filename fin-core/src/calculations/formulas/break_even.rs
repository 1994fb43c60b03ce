//! Break-even calculator.
//!
//! Finds the number of units (and the revenue) needed to cover fixed costs
//! given the per-unit contribution margin.
//!
//! # Example
//!
//! ```
//! use fin_core::calculations::calculate_break_even;
//!
//! let result = calculate_break_even(50_000.0, 100.0, 100.0);
//!
//! assert_eq!(result.contribution_margin, 0.0);
//! assert_eq!(result.break_even_units, f64::INFINITY);
//! assert_eq!(result.break_even_revenue, f64::INFINITY);
//! ```

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::calculations::Calculator;
use crate::calculations::common::{ratio_or_infinity, serialize_sentinel};
use crate::currency::{Currency, MonetaryFields, convert};

/// Inputs for the break-even calculator. All fields are monetary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BreakEvenInput {
    /// Fixed costs for the period (rent, salaries, ...).
    pub fixed_costs: f64,

    /// Selling price per unit.
    pub price: f64,

    /// Variable cost per unit.
    pub variable_cost: f64,
}

impl Default for BreakEvenInput {
    fn default() -> Self {
        Self {
            fixed_costs: 50_000.0,
            price: 100.0,
            variable_cost: 40.0,
        }
    }
}

/// Outputs of the break-even calculator.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BreakEvenResult {
    /// Price minus variable cost.
    pub contribution_margin: f64,

    /// Units to sell before fixed costs are covered; `+∞` when the margin is
    /// not positive.
    #[serde(serialize_with = "serialize_sentinel")]
    pub break_even_units: f64,

    /// Break-even units multiplied by price.
    #[serde(serialize_with = "serialize_sentinel")]
    pub break_even_revenue: f64,
}

/// Computes the break-even point.
pub fn calculate_break_even(
    fixed_costs: f64,
    price: f64,
    variable_cost: f64,
) -> BreakEvenResult {
    let contribution_margin = price - variable_cost;
    let break_even_units = ratio_or_infinity(fixed_costs, contribution_margin);
    if break_even_units.is_infinite() {
        debug!(contribution_margin, "non-positive contribution margin; break-even unreachable");
    }

    BreakEvenResult {
        contribution_margin,
        break_even_units,
        break_even_revenue: break_even_units * price,
    }
}

impl Calculator for BreakEvenInput {
    type Output = BreakEvenResult;

    fn evaluate(&self) -> BreakEvenResult {
        calculate_break_even(self.fixed_costs, self.price, self.variable_cost)
    }
}

impl MonetaryFields for BreakEvenInput {
    fn rescale(
        &mut self,
        from: Currency,
        to: Currency,
    ) {
        self.fixed_costs = convert(self.fixed_costs, from, to);
        self.price = convert(self.price, from, to);
        self.variable_cost = convert(self.variable_cost, from, to);
    }
}
