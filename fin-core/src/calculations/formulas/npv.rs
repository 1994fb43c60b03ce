//! Net present value calculator.
//!
//! Cashflows are yearly and ordered; index 0 is the initial outlay and is not
//! discounted:
//!
//! ```text
//! NPV = Σ cf_t / (1 + r)^t,  t = 0..n−1
//! ```
//!
//! # Example
//!
//! ```
//! use fin_core::calculations::calculate_npv;
//!
//! let result = calculate_npv(10.0, &[-100_000.0, 30_000.0, 40_000.0, 50_000.0, 40_000.0]);
//!
//! assert_eq!(result.periods, 4);
//! assert!(result.is_positive);
//! assert!((result.npv - 25_216.86).abs() < 0.01);
//! ```

use serde::{Deserialize, Serialize};

use crate::calculations::Calculator;
use crate::calculations::common::{percent, serialize_sentinel};
use crate::currency::{Currency, MonetaryFields};

/// Inputs for the NPV calculator. Every cashflow is monetary; the discount
/// rate is a percentage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NpvInput {
    /// Discount rate in percent per period.
    pub discount_rate: f64,
    pub cashflows: Vec<f64>,
}

impl Default for NpvInput {
    fn default() -> Self {
        Self {
            discount_rate: 10.0,
            cashflows: vec![-100_000.0, 30_000.0, 40_000.0, 50_000.0, 40_000.0],
        }
    }
}

impl NpvInput {
    /// Appends a zero cashflow for a new period.
    pub fn add_cashflow(&mut self) {
        self.cashflows.push(0.0);
    }

    /// Replaces the cashflow at `index`. Returns `false` if out of range.
    pub fn update_cashflow(
        &mut self,
        index: usize,
        value: f64,
    ) -> bool {
        match self.cashflows.get_mut(index) {
            Some(slot) => {
                *slot = value;
                true
            }
            None => false,
        }
    }

    /// Removes the cashflow at `index`.
    ///
    /// The last remaining cashflow is never removed. Returns `false` when
    /// nothing was removed.
    pub fn remove_cashflow(
        &mut self,
        index: usize,
    ) -> bool {
        if self.cashflows.len() <= 1 || index >= self.cashflows.len() {
            return false;
        }
        self.cashflows.remove(index);
        true
    }
}

/// Outputs of the NPV calculator.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct NpvResult {
    /// `+∞` when a later cashflow is discounted at -100%.
    #[serde(serialize_with = "serialize_sentinel")]
    pub npv: f64,
    /// Number of periods after the initial outlay.
    pub periods: usize,
    /// `true` when NPV is zero or positive.
    pub is_positive: bool,
}

/// Discounts `cashflows` at `discount_rate` percent per period.
///
/// An empty sequence has an NPV of zero and zero periods.
pub fn calculate_npv(
    discount_rate: f64,
    cashflows: &[f64],
) -> NpvResult {
    let rate = percent(discount_rate);
    let npv: f64 = cashflows
        .iter()
        .enumerate()
        .map(|(period, cashflow)| cashflow / (1.0 + rate).powi(period as i32))
        .sum();

    NpvResult {
        npv,
        periods: cashflows.len().saturating_sub(1),
        is_positive: npv >= 0.0,
    }
}

impl Calculator for NpvInput {
    type Output = NpvResult;

    fn evaluate(&self) -> NpvResult {
        calculate_npv(self.discount_rate, &self.cashflows)
    }
}

impl MonetaryFields for NpvInput {
    fn rescale(
        &mut self,
        from: Currency,
        to: Currency,
    ) {
        self.cashflows.rescale(from, to);
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    // =========================================================================
    // calculate_npv tests
    // =========================================================================

    #[test]
    fn calculate_npv_default_project_is_acceptable() {
        let result = NpvInput::default().evaluate();

        assert!((result.npv - 25_216.86).abs() < 0.01);
        assert_eq!(result.periods, 4);
        assert!(result.is_positive);
    }

    #[test]
    fn calculate_npv_zero_rate_is_plain_sum() {
        let result = calculate_npv(0.0, &[-100.0, 60.0, 60.0]);

        assert_eq!(result.npv, 20.0);
        assert_eq!(result.periods, 2);
    }

    #[test]
    fn calculate_npv_zero_counts_as_acceptable() {
        let result = calculate_npv(0.0, &[-100.0, 100.0]);

        assert_eq!(result.npv, 0.0);
        assert!(result.is_positive);
    }

    #[test]
    fn calculate_npv_negative_project_is_rejected() {
        let result = calculate_npv(10.0, &[-100_000.0, 10_000.0, 10_000.0]);

        assert!(result.npv < 0.0);
        assert!(!result.is_positive);
    }

    #[test]
    fn calculate_npv_initial_outlay_is_not_discounted() {
        let result = calculate_npv(50.0, &[-1_000.0]);

        assert_eq!(result.npv, -1_000.0);
        assert_eq!(result.periods, 0);
    }

    #[test]
    fn calculate_npv_empty_cashflows() {
        let result = calculate_npv(10.0, &[]);

        assert_eq!(result.npv, 0.0);
        assert_eq!(result.periods, 0);
        assert!(result.is_positive);
    }

    #[test]
    fn calculate_npv_full_discount_serializes_as_infinity() {
        let result = calculate_npv(-100.0, &[-1_000.0, 500.0]);

        let json = serde_json::to_value(result).unwrap();

        assert_eq!(result.npv, f64::INFINITY);
        assert_eq!(json["npv"], "Infinity");
        assert_eq!(json["periods"], 1);
    }

    // =========================================================================
    // cashflow editing tests
    // =========================================================================

    #[test]
    fn add_cashflow_appends_zero() {
        let mut input = NpvInput::default();

        input.add_cashflow();

        assert_eq!(input.cashflows.len(), 6);
        assert_eq!(input.cashflows[5], 0.0);
    }

    #[test]
    fn update_cashflow_replaces_value() {
        let mut input = NpvInput::default();

        let updated = input.update_cashflow(2, 45_000.0);

        assert!(updated);
        assert_eq!(input.cashflows[2], 45_000.0);
    }

    #[test]
    fn update_cashflow_out_of_range_is_ignored() {
        let mut input = NpvInput::default();

        let updated = input.update_cashflow(9, 1.0);

        assert!(!updated);
        assert_eq!(input, NpvInput::default());
    }

    #[test]
    fn remove_cashflow_removes_at_index() {
        let mut input = NpvInput::default();

        let removed = input.remove_cashflow(0);

        assert!(removed);
        assert_eq!(input.cashflows, vec![30_000.0, 40_000.0, 50_000.0, 40_000.0]);
    }

    #[test]
    fn remove_cashflow_keeps_last_remaining_entry() {
        let mut input = NpvInput {
            discount_rate: 10.0,
            cashflows: vec![-5_000.0],
        };

        let removed = input.remove_cashflow(0);

        assert!(!removed);
        assert_eq!(input.cashflows, vec![-5_000.0]);
    }

    // =========================================================================
    // rescale tests
    // =========================================================================

    #[test]
    fn rescale_converts_every_cashflow_but_not_rate() {
        let mut input = NpvInput::default();

        input.rescale(Currency::Inr, Currency::Usd);

        assert_eq!(
            input.cashflows,
            vec![-1_204.82, 361.45, 481.93, 602.41, 481.93]
        );
        assert_eq!(input.discount_rate, 10.0);
    }
}
