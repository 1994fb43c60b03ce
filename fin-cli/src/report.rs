//! Evaluated calculator output, ready for printing.

use std::fmt::Write as _;

use fin_core::calculations::series::{
    self, CashflowBar, PaybackPoint, RunwayPoint, Slice,
};
use fin_core::calculations::Signal;
use fin_core::{Calculator, CalculatorKind, Currency, Workbench};
use serde::Serialize;
use serde_json::{Value, json};

use crate::format::{INFINITY_SYMBOL, format_currency, format_number, format_percent};

/// How a metric value is displayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Unit {
    Money,
    Months,
    Days,
    Percent,
    /// Burn multiple, shown as `1.2x`.
    Multiple,
    /// LTV to CAC, shown as `3.5:1`.
    Ratio,
    Count,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Metric {
    pub key: &'static str,
    pub label: &'static str,
    pub value: f64,
    pub unit: Unit,
    pub signal: Option<Signal>,
}

impl Metric {
    fn new(
        key: &'static str,
        label: &'static str,
        value: f64,
        unit: Unit,
    ) -> Self {
        Self {
            key,
            label,
            value,
            unit,
            signal: None,
        }
    }

    fn with_signal(
        mut self,
        signal: Signal,
    ) -> Self {
        self.signal = Some(signal);
        self
    }

    pub fn display(
        &self,
        currency: Currency,
    ) -> String {
        if !self.value.is_finite() {
            return INFINITY_SYMBOL.to_string();
        }
        match self.unit {
            Unit::Money => format_currency(self.value, currency),
            Unit::Months => format!("{} months", format_number(self.value, 1)),
            Unit::Days => format!("{} days", format_number(self.value, 0)),
            Unit::Percent => format_percent(self.value, 2),
            Unit::Multiple => format!("{}x", format_number(self.value, 2)),
            Unit::Ratio => format!("{}:1", format_number(self.value, 2)),
            Unit::Count => format_number(self.value, 2),
        }
    }
}

/// Series for the calculator's chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", content = "points", rename_all = "kebab-case")]
pub enum Chart {
    RunwayDepletion(Vec<RunwayPoint>),
    CacPayback(Vec<PaybackPoint>),
    Cashflows(Vec<CashflowBar>),
    Composition([Slice; 2]),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    pub calculator: CalculatorKind,
    pub currency: Currency,
    pub inputs: Value,
    pub outputs: Value,
    pub metrics: Vec<Metric>,
    pub chart: Option<Chart>,
}

/// Evaluates one calculator from the workbench inputs.
pub fn build_report(
    calculator: CalculatorKind,
    workbench: &Workbench,
    with_chart: bool,
) -> serde_json::Result<Report> {
    let currency = workbench.currency();
    let all = workbench.inputs();

    let (inputs, outputs, metrics, chart) = match calculator {
        CalculatorKind::Runway => {
            let input = &all.runway;
            let result = input.evaluate();
            let metrics = vec![
                Metric::new("runway_months", "Runway", result.runway_months, Unit::Months)
                    .with_signal(result.runway_signal()),
                Metric::new("runway_days", "Runway (days)", result.runway_days, Unit::Days),
                Metric::new("burn_multiple", "Burn multiple", result.burn_multiple, Unit::Multiple)
                    .with_signal(result.burn_multiple_signal()),
            ];
            let chart = Some(Chart::RunwayDepletion(series::runway_depletion(input, &result)));
            (serde_json::to_value(input)?, serde_json::to_value(result)?, metrics, chart)
        }
        CalculatorKind::BreakEven => {
            let input = &all.break_even;
            let result = input.evaluate();
            let metrics = vec![
                Metric::new(
                    "contribution_margin",
                    "Contribution margin",
                    result.contribution_margin,
                    Unit::Money,
                )
                .with_signal(result.margin_signal()),
                Metric::new("break_even_units", "Break-even units", result.break_even_units, Unit::Count),
                Metric::new(
                    "break_even_revenue",
                    "Break-even revenue",
                    result.break_even_revenue,
                    Unit::Money,
                ),
            ];
            (serde_json::to_value(input)?, serde_json::to_value(result)?, metrics, None)
        }
        CalculatorKind::UnitEconomics => {
            let input = &all.unit_economics;
            let result = input.evaluate();
            let metrics = vec![
                Metric::new(
                    "contribution_margin_unit",
                    "Contribution / unit",
                    result.contribution_margin_unit,
                    Unit::Money,
                )
                .with_signal(result.margin_signal()),
                Metric::new(
                    "contribution_margin_month",
                    "Contribution / month",
                    result.contribution_margin_month,
                    Unit::Money,
                ),
                Metric::new("profit_month", "Profit / month", result.profit_month, Unit::Money)
                    .with_signal(result.profit_signal()),
                Metric::new("payback_units", "CAC payback (units)", result.payback_units, Unit::Count),
            ];
            (serde_json::to_value(input)?, serde_json::to_value(result)?, metrics, None)
        }
        CalculatorKind::CacLtv => {
            let input = &all.cac_ltv;
            let result = input.evaluate();
            let metrics = vec![
                Metric::new("cac", "CAC", result.cac, Unit::Money),
                Metric::new("ltv", "LTV", result.ltv, Unit::Money),
                Metric::new("ltv_cac_ratio", "LTV : CAC", result.ltv_cac_ratio, Unit::Ratio)
                    .with_signal(result.ratio_signal()),
                Metric::new("payback_months", "Payback", result.payback_months, Unit::Months),
            ];
            let chart = Some(Chart::CacPayback(series::cac_payback_curve(input, &result)));
            (serde_json::to_value(input)?, serde_json::to_value(result)?, metrics, chart)
        }
        CalculatorKind::PricingGst => {
            let input = &all.pricing_gst;
            let result = input.evaluate();
            let metrics = vec![
                Metric::new("price_before_gst", "Price before GST", result.price_before_gst, Unit::Money),
                Metric::new("price_after_gst", "Price after GST", result.price_after_gst, Unit::Money),
                Metric::new(
                    "gross_margin_per_unit",
                    "Gross margin / unit",
                    result.gross_margin_per_unit,
                    Unit::Money,
                ),
            ];
            (serde_json::to_value(input)?, serde_json::to_value(result)?, metrics, None)
        }
        CalculatorKind::Emi => {
            let input = &all.emi;
            let result = input.evaluate();
            let metrics = vec![
                Metric::new("emi", "Monthly EMI", result.emi, Unit::Money),
                Metric::new("total_payment", "Total payment", result.total_payment, Unit::Money),
                Metric::new("total_interest", "Total interest", result.total_interest, Unit::Money)
                    .with_signal(result.interest_signal(input.principal)),
            ];
            let chart = Some(Chart::Composition(series::emi_composition(input, &result)));
            (serde_json::to_value(input)?, serde_json::to_value(result)?, metrics, chart)
        }
        CalculatorKind::Npv => {
            let input = &all.npv;
            let result = input.evaluate();
            let metrics = vec![
                Metric::new("npv", "NPV", result.npv, Unit::Money).with_signal(result.signal()),
                Metric::new("periods", "Periods", result.periods as f64, Unit::Count),
            ];
            let chart = Some(Chart::Cashflows(series::npv_cashflow_bars(&input.cashflows)));
            (serde_json::to_value(input)?, serde_json::to_value(result)?, metrics, chart)
        }
        CalculatorKind::CapTable => {
            let input = &all.cap_table;
            let result = input.evaluate();
            let metrics = vec![
                Metric::new(
                    "post_money_valuation",
                    "Post-money valuation",
                    result.post_money_valuation,
                    Unit::Money,
                ),
                Metric::new("investor_percent", "Investor", result.investor_percent, Unit::Percent),
                Metric::new(
                    "founders_percent",
                    "Founders + ESOP",
                    result.founders_percent,
                    Unit::Percent,
                ),
            ];
            let chart = Some(Chart::Composition(series::ownership_split(&result)));
            (serde_json::to_value(input)?, serde_json::to_value(result)?, metrics, chart)
        }
    };

    Ok(Report {
        calculator,
        currency,
        inputs,
        outputs,
        metrics,
        chart: chart.filter(|_| with_chart),
    })
}

impl Report {
    pub fn to_json(&self) -> serde_json::Result<Value> {
        let signals: serde_json::Map<String, Value> = self
            .metrics
            .iter()
            .filter_map(|m| {
                m.signal
                    .map(|signal| serde_json::to_value(signal).map(|v| (m.key.to_string(), v)))
            })
            .collect::<serde_json::Result<_>>()?;

        let mut value = json!({
            "calculator": self.calculator,
            "currency": self.currency,
            "inputs": self.inputs,
            "outputs": self.outputs,
            "signals": signals,
        });
        if let Some(chart) = &self.chart {
            value["chart"] = serde_json::to_value(chart)?;
        }
        Ok(value)
    }

    pub fn render_text(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "{} ({})", self.calculator.title(), self.currency);

        let width = self.metrics.iter().map(|m| m.label.len()).max().unwrap_or(0);
        for metric in &self.metrics {
            let _ = write!(out, "  {:<width$}  {}", metric.label, metric.display(self.currency));
            match metric.signal {
                Some(signal) if signal != Signal::Neutral => {
                    let _ = write!(out, "  [{}]", signal_label(signal));
                }
                _ => {}
            }
            out.push('\n');
        }

        if let Some(chart) = &self.chart {
            out.push_str(&self.render_chart(chart));
        }
        out
    }

    fn render_chart(
        &self,
        chart: &Chart,
    ) -> String {
        let money = |v: f64| format_currency(v, self.currency);
        let mut out = String::from("\n");

        match chart {
            Chart::RunwayDepletion(points) => {
                let _ = writeln!(out, "  {:>5}  Cash", "Month");
                for p in points {
                    let _ = writeln!(out, "  {:>5}  {}", p.month, money(p.cash));
                }
            }
            Chart::CacPayback(points) => {
                let _ = writeln!(out, "  {:>5}  CAC / Cumulative value", "Month");
                for p in points {
                    let _ = writeln!(
                        out,
                        "  {:>5}  {} / {}",
                        p.month,
                        money(p.cumulative_cost),
                        money(p.cumulative_value)
                    );
                }
            }
            Chart::Cashflows(bars) => {
                let _ = writeln!(out, "  {:<8}  Cash flow / Cumulative", "Period");
                for bar in bars {
                    let _ = writeln!(
                        out,
                        "  {:<8}  {} / {}",
                        bar.period,
                        money(bar.value),
                        money(bar.cumulative)
                    );
                }
            }
            Chart::Composition(slices) => {
                for slice in slices {
                    let value = match self.calculator {
                        CalculatorKind::CapTable => format_percent(slice.value, 2),
                        _ => money(slice.value),
                    };
                    let _ = writeln!(out, "  {:<16}  {}", slice.name, value);
                }
            }
        }
        out
    }
}

fn signal_label(signal: Signal) -> &'static str {
    match signal {
        Signal::Neutral => "neutral",
        Signal::Positive => "good",
        Signal::Warning => "warning",
        Signal::Critical => "critical",
    }
}
