//! Cash runway calculator.
//!
//! Answers "how long will the cash last at the current net burn?".
//!
//! | Output | Formula |
//! |--------|---------|
//! | runway months | cash ÷ monthly burn (∞ when burn ≤ 0) |
//! | runway days   | runway months × 30 |
//! | burn multiple | monthly burn × 12 ÷ cash (0 when cash ≤ 0) |
//!
//! # Example
//!
//! ```
//! use fin_core::calculations::calculate_runway;
//!
//! let result = calculate_runway(1_000_000.0, 100_000.0);
//!
//! assert_eq!(result.runway_months, 10.0);
//! assert_eq!(result.runway_days, 300.0);
//! assert_eq!(result.burn_multiple, 1.2);
//! ```

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::calculations::Calculator;
use crate::calculations::common::{ratio_or_infinity, serialize_sentinel};
use crate::currency::{Currency, MonetaryFields, convert};

/// Days counted per month when expressing runway in days.
pub const DAYS_PER_MONTH: f64 = 30.0;

/// Inputs for the runway calculator. Both fields are monetary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunwayInput {
    /// Cash in bank.
    pub cash: f64,

    /// Monthly cash outflow minus cash inflow.
    pub monthly_burn: f64,
}

impl Default for RunwayInput {
    fn default() -> Self {
        Self {
            cash: 1_000_000.0,
            monthly_burn: 100_000.0,
        }
    }
}

/// Outputs of the runway calculator.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RunwayResult {
    /// Months until cash reaches zero; `+∞` when the company is not burning.
    #[serde(serialize_with = "serialize_sentinel")]
    pub runway_months: f64,

    /// Runway expressed in 30-day months.
    #[serde(serialize_with = "serialize_sentinel")]
    pub runway_days: f64,

    /// Annualized burn relative to cash on hand.
    pub burn_multiple: f64,
}

/// Computes runway and burn multiple.
pub fn calculate_runway(
    cash: f64,
    monthly_burn: f64,
) -> RunwayResult {
    let runway_months = ratio_or_infinity(cash, monthly_burn);
    if runway_months.is_infinite() {
        debug!(monthly_burn, "non-positive burn; runway is unbounded");
    }

    let burn_multiple = if cash > 0.0 {
        monthly_burn * 12.0 / cash
    } else {
        0.0
    };

    RunwayResult {
        runway_months,
        runway_days: runway_months * DAYS_PER_MONTH,
        burn_multiple,
    }
}

impl Calculator for RunwayInput {
    type Output = RunwayResult;

    fn evaluate(&self) -> RunwayResult {
        calculate_runway(self.cash, self.monthly_burn)
    }
}

impl MonetaryFields for RunwayInput {
    fn rescale(
        &mut self,
        from: Currency,
        to: Currency,
    ) {
        self.cash = convert(self.cash, from, to);
        self.monthly_burn = convert(self.monthly_burn, from, to);
    }
}
