//! Startup finance calculators.
//!
//! This module provides the formula library: eight independent calculators,
//! the shared numeric helpers they rely on, chart series derived from their
//! results and the health signals used to colour headline metrics.

pub mod common;
pub mod formulas;
pub mod series;
pub mod signals;

pub use formulas::{
    BreakEvenInput, BreakEvenResult, CacLtvInput, CacLtvResult, CapTableInput, CapTableResult,
    EmiInput, EmiResult, NpvInput, NpvResult, PricingGstInput, PricingGstResult, RunwayInput,
    RunwayResult, UnitEconomicsInput, UnitEconomicsResult, calculate_break_even,
    calculate_cac_ltv, calculate_cap_table, calculate_emi, calculate_npv, calculate_pricing_gst,
    calculate_runway, calculate_unit_economics,
};
pub use signals::Signal;

/// A calculator input set that can be evaluated into its outputs.
///
/// Evaluation is synchronous and never fails: undefined results are reported
/// as `f64::INFINITY`. Call `evaluate` again after every input change; no
/// state is cached between calls.
pub trait Calculator {
    /// The named outputs derived from this input set.
    type Output;

    /// Computes every output from the current inputs.
    fn evaluate(&self) -> Self::Output;
}
