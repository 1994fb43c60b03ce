//! Single-round cap table dilution.

use serde::{Deserialize, Serialize};

use crate::calculations::Calculator;
use crate::currency::{Currency, MonetaryFields, convert};

/// Inputs for the cap table calculator. Both fields are monetary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CapTableInput {
    pub pre_money_valuation: f64,
    pub investment: f64,
}

impl Default for CapTableInput {
    fn default() -> Self {
        Self {
            pre_money_valuation: 5_000_000.0,
            investment: 1_000_000.0,
        }
    }
}

/// Outputs of the cap table calculator.
///
/// `investor_percent + founders_percent` is always exactly 100.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CapTableResult {
    pub post_money_valuation: f64,
    pub investor_percent: f64,
    /// Founders plus option pool.
    pub founders_percent: f64,
}

/// Computes post-money valuation and the resulting ownership split.
pub fn calculate_cap_table(
    pre_money_valuation: f64,
    investment: f64,
) -> CapTableResult {
    let post_money_valuation = pre_money_valuation + investment;
    let investor_percent = if post_money_valuation > 0.0 {
        investment / post_money_valuation * 100.0
    } else {
        0.0
    };

    CapTableResult {
        post_money_valuation,
        investor_percent,
        founders_percent: 100.0 - investor_percent,
    }
}

impl Calculator for CapTableInput {
    type Output = CapTableResult;

    fn evaluate(&self) -> CapTableResult {
        calculate_cap_table(self.pre_money_valuation, self.investment)
    }
}

impl MonetaryFields for CapTableInput {
    fn rescale(
        &mut self,
        from: Currency,
        to: Currency,
    ) {
        self.pre_money_valuation = convert(self.pre_money_valuation, from, to);
        self.investment = convert(self.investment, from, to);
    }
}
