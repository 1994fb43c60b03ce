//! Margin-based pricing with goods and services tax.
//!
//! The target margin is a margin on price, not a markup on cost:
//! `price = cost ÷ (1 − margin)`. GST is then added on top.
//!
//! # Example
//!
//! ```
//! use fin_core::calculations::calculate_pricing_gst;
//!
//! let result = calculate_pricing_gst(100.0, 60.0, 18.0);
//!
//! assert_eq!(result.price_before_gst, 250.0);
//! assert_eq!(result.price_after_gst, 295.0);
//! assert_eq!(result.gross_margin_per_unit, 150.0);
//! ```

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::calculations::Calculator;
use crate::calculations::common::{percent, serialize_sentinel};
use crate::currency::{Currency, MonetaryFields, convert};

/// Inputs for the pricing calculator. Only `cost` is monetary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricingGstInput {
    /// Cost per unit.
    pub cost: f64,
    /// Target gross margin on price, in percent.
    pub target_margin: f64,
    /// GST rate in percent.
    pub gst: f64,
}

impl Default for PricingGstInput {
    fn default() -> Self {
        Self {
            cost: 100.0,
            target_margin: 60.0,
            gst: 18.0,
        }
    }
}

/// Outputs of the pricing calculator.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PricingGstResult {
    /// `+∞` when the target margin is 100% or more.
    #[serde(serialize_with = "serialize_sentinel")]
    pub price_before_gst: f64,

    #[serde(serialize_with = "serialize_sentinel")]
    pub price_after_gst: f64,

    #[serde(serialize_with = "serialize_sentinel")]
    pub gross_margin_per_unit: f64,
}

/// Computes the pre-tax price that achieves the target margin, and the
/// price including GST.
pub fn calculate_pricing_gst(
    cost: f64,
    target_margin: f64,
    gst: f64,
) -> PricingGstResult {
    let price_before_gst = if target_margin < 100.0 {
        cost / (1.0 - percent(target_margin))
    } else {
        debug!(target_margin, "target margin of 100% or more is unreachable");
        f64::INFINITY
    };

    PricingGstResult {
        price_before_gst,
        price_after_gst: price_before_gst * (1.0 + percent(gst)),
        gross_margin_per_unit: price_before_gst - cost,
    }
}

impl Calculator for PricingGstInput {
    type Output = PricingGstResult;

    fn evaluate(&self) -> PricingGstResult {
        calculate_pricing_gst(self.cost, self.target_margin, self.gst)
    }
}

impl MonetaryFields for PricingGstInput {
    fn rescale(
        &mut self,
        from: Currency,
        to: Currency,
    ) {
        self.cost = convert(self.cost, from, to);
    }
}
