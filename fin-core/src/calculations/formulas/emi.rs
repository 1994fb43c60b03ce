//! Equated monthly instalment (loan amortization) calculator.
//!
//! Uses the standard amortization formula
//!
//! ```text
//! EMI = P × r × (1 + r)^n / ((1 + r)^n − 1)
//! ```
//!
//! where `r` is the monthly rate (`annual_rate / 12 / 100`) and `n` the
//! tenure in months. A zero rate degenerates to straight-line repayment.
//! Results are kept at full precision; rounding is a display concern.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::calculations::Calculator;
use crate::currency::{Currency, MonetaryFields, convert};

/// Inputs for the EMI calculator. Only `principal` is monetary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmiInput {
    pub principal: f64,
    /// Annual interest rate in percent.
    pub annual_rate: f64,
    /// Loan tenure in months; expected to be a positive whole number.
    pub tenure_months: f64,
}

impl Default for EmiInput {
    fn default() -> Self {
        Self {
            principal: 1_000_000.0,
            annual_rate: 10.0,
            tenure_months: 36.0,
        }
    }
}

/// Outputs of the EMI calculator.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EmiResult {
    pub emi: f64,
    pub total_payment: f64,
    pub total_interest: f64,
}

impl EmiResult {
    const ZERO: Self = Self {
        emi: 0.0,
        total_payment: 0.0,
        total_interest: 0.0,
    };
}

/// Computes the monthly instalment and the totals paid over the tenure.
///
/// A non-positive tenure yields an all-zero result.
pub fn calculate_emi(
    principal: f64,
    annual_rate: f64,
    tenure_months: f64,
) -> EmiResult {
    if tenure_months <= 0.0 {
        debug!(tenure_months, "non-positive tenure; no instalments");
        return EmiResult::ZERO;
    }

    let monthly_rate = annual_rate / 12.0 / 100.0;

    let growth = (1.0 + monthly_rate).powf(tenure_months);

    // A rate too small to move `1 + r` off 1.0 would divide by zero.
    if monthly_rate == 0.0 || growth == 1.0 {
        return EmiResult {
            emi: principal / tenure_months,
            total_payment: principal,
            total_interest: 0.0,
        };
    }

    let emi = principal * monthly_rate * growth / (growth - 1.0);
    let total_payment = emi * tenure_months;

    EmiResult {
        emi,
        total_payment,
        total_interest: total_payment - principal,
    }
}

impl Calculator for EmiInput {
    type Output = EmiResult;

    fn evaluate(&self) -> EmiResult {
        calculate_emi(self.principal, self.annual_rate, self.tenure_months)
    }
}

impl MonetaryFields for EmiInput {
    fn rescale(
        &mut self,
        from: Currency,
        to: Currency,
    ) {
        self.principal = convert(self.principal, from, to);
    }
}
