//! Chart series derived from calculator inputs and results.
//!
//! These are plain data points for an external renderer. Each builder takes
//! the calculator output it charts so the series always agrees with the
//! headline numbers.

use serde::Serialize;

use crate::calculations::common::percent;
use crate::calculations::{
    CacLtvInput, CacLtvResult, CapTableResult, EmiInput, EmiResult, RunwayInput, RunwayResult,
};

/// Maximum number of months plotted on month-indexed charts.
///
/// Infinite runway or lifespan would otherwise produce an unbounded series.
pub const RUNWAY_CHART_HORIZON_MONTHS: u32 = 120;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RunwayPoint {
    pub month: u32,
    pub cash: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PaybackPoint {
    pub month: u32,
    #[serde(serialize_with = "crate::calculations::common::serialize_sentinel")]
    pub cumulative_cost: f64,
    pub cumulative_value: f64,
}

/// One bar of the NPV cash-flow chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CashflowBar {
    /// `Initial` for the outlay, `Yr n` afterwards.
    pub period: String,
    pub value: f64,
    pub cumulative: f64,
    pub is_inflow: bool,
}

/// A labelled share of a pie chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Slice {
    pub name: &'static str,
    pub value: f64,
}

/// Number of whole months to plot for a possibly infinite duration, or
/// `None` when there is nothing to plot.
fn plotted_months(duration: f64) -> Option<u32> {
    let months = duration.ceil();
    if !(months >= 0.0) {
        return None;
    }
    let capped = months.min(f64::from(RUNWAY_CHART_HORIZON_MONTHS));
    Some(capped as u32)
}

/// Cash remaining at each month until it runs out.
pub fn runway_depletion(
    input: &RunwayInput,
    result: &RunwayResult,
) -> Vec<RunwayPoint> {
    let Some(months) = plotted_months(result.runway_months) else {
        return Vec::new();
    };

    (0..=months)
        .map(|month| RunwayPoint {
            month,
            cash: (input.cash - input.monthly_burn * f64::from(month)).max(0.0),
        })
        .collect()
}

/// Flat acquisition cost against margin-adjusted revenue accumulated over
/// the customer lifespan.
pub fn cac_payback_curve(
    input: &CacLtvInput,
    result: &CacLtvResult,
) -> Vec<PaybackPoint> {
    let Some(months) = plotted_months(input.lifespan_months) else {
        return Vec::new();
    };
    let monthly_value = input.arpu * percent(input.gross_margin);

    (0..=months)
        .map(|month| PaybackPoint {
            month,
            cumulative_cost: result.cac,
            cumulative_value: monthly_value * f64::from(month),
        })
        .collect()
}

pub fn npv_cashflow_bars(cashflows: &[f64]) -> Vec<CashflowBar> {
    let mut cumulative = 0.0;

    cashflows
        .iter()
        .enumerate()
        .map(|(index, &value)| {
            cumulative += value;
            CashflowBar {
                period: if index == 0 {
                    "Initial".to_string()
                } else {
                    format!("Yr {index}")
                },
                value,
                cumulative,
                is_inflow: value >= 0.0,
            }
        })
        .collect()
}

pub fn emi_composition(
    input: &EmiInput,
    result: &EmiResult,
) -> [Slice; 2] {
    [
        Slice {
            name: "Principal",
            value: input.principal,
        },
        Slice {
            name: "Interest",
            value: result.total_interest,
        },
    ]
}

pub fn ownership_split(result: &CapTableResult) -> [Slice; 2] {
    [
        Slice {
            name: "Founders + ESOP",
            value: result.founders_percent,
        },
        Slice {
            name: "Investor",
            value: result.investor_percent,
        },
    ]
}
