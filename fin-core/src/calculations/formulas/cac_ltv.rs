//! Customer acquisition cost and lifetime value calculator.
//!
//! | Output | Formula |
//! |--------|---------|
//! | CAC | marketing spend ÷ new customers |
//! | LTV | ARPU × gross margin × lifespan |
//! | LTV:CAC | LTV ÷ CAC |
//! | payback months | CAC ÷ (ARPU × gross margin) |
//!
//! Gross margin is a percentage; lifespan is in months.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::calculations::Calculator;
use crate::calculations::common::{percent, ratio_or_infinity, serialize_sentinel};
use crate::currency::{Currency, MonetaryFields, convert};

/// Inputs for the CAC/LTV calculator.
///
/// Only `marketing_spend` and `arpu` are monetary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CacLtvInput {
    pub marketing_spend: f64,
    pub new_customers: f64,
    /// Average revenue per user per month.
    pub arpu: f64,
    /// Gross margin in percent.
    pub gross_margin: f64,
    pub lifespan_months: f64,
}

impl Default for CacLtvInput {
    fn default() -> Self {
        Self {
            marketing_spend: 50_000.0,
            new_customers: 500.0,
            arpu: 50.0,
            gross_margin: 70.0,
            lifespan_months: 24.0,
        }
    }
}

/// Outputs of the CAC/LTV calculator.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CacLtvResult {
    #[serde(serialize_with = "serialize_sentinel")]
    pub cac: f64,

    pub ltv: f64,

    #[serde(serialize_with = "serialize_sentinel")]
    pub ltv_cac_ratio: f64,

    #[serde(serialize_with = "serialize_sentinel")]
    pub payback_months: f64,
}

/// Computes CAC, LTV, their ratio and the CAC payback period.
///
/// When no customers were acquired, CAC is `+∞` and so is the ratio: an
/// undefined acquisition cost reports as "∞" on both metrics rather than
/// collapsing the ratio to zero.
pub fn calculate_cac_ltv(
    marketing_spend: f64,
    new_customers: f64,
    arpu: f64,
    gross_margin: f64,
    lifespan_months: f64,
) -> CacLtvResult {
    let cac = ratio_or_infinity(marketing_spend, new_customers);
    let monthly_margin = arpu * percent(gross_margin);
    let ltv = monthly_margin * lifespan_months;

    let ltv_cac_ratio = if cac.is_finite() {
        ratio_or_infinity(ltv, cac)
    } else {
        debug!(new_customers, "no customers acquired; CAC is undefined");
        f64::INFINITY
    };

    CacLtvResult {
        cac,
        ltv,
        ltv_cac_ratio,
        payback_months: ratio_or_infinity(cac, monthly_margin),
    }
}

impl Calculator for CacLtvInput {
    type Output = CacLtvResult;

    fn evaluate(&self) -> CacLtvResult {
        calculate_cac_ltv(
            self.marketing_spend,
            self.new_customers,
            self.arpu,
            self.gross_margin,
            self.lifespan_months,
        )
    }
}

impl MonetaryFields for CacLtvInput {
    fn rescale(
        &mut self,
        from: Currency,
        to: Currency,
    ) {
        self.marketing_spend = convert(self.marketing_spend, from, to);
        self.arpu = convert(self.arpu, from, to);
    }
}
