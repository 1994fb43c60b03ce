//! Command-line arguments.
//!
//! Every calculator input is an optional flag; omitted flags keep the sample
//! value. Amount flags go through [`parse_amount`], so `12,34,567` and
//! `1,234,567` are both accepted and blank means zero.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use fin_core::calculations::{
    BreakEvenInput, CacLtvInput, CapTableInput, EmiInput, NpvInput, PricingGstInput,
    RunwayInput, UnitEconomicsInput,
};
use fin_core::{CalculatorInputs, CalculatorKind, CalculatorTab, Currency};

use crate::utils::parse_amount;

/// Startup finance calculators: runway, unit economics, pricing, loans,
/// NPV and dilution.
#[derive(Debug, Parser)]
#[command(name = "fincalc", version, about)]
pub struct Cli {
    /// Path to a fincalc.toml file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Currency the entered amounts are in (INR, USD, EUR)
    #[arg(long, global = true)]
    pub currency: Option<Currency>,

    /// Switch to this currency before evaluating, converting every amount
    #[arg(long, global = true)]
    pub to: Option<Currency>,

    /// Print JSON instead of a table
    #[arg(long, global = true)]
    pub json: bool,

    /// Log level or EnvFilter directive (overrides config)
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    #[command(flatten)]
    Calculator(CalculatorCommand),

    /// Show the fixed conversion rates
    Rates,

    /// Save, list, show or delete scenarios
    Scenario {
        #[command(subcommand)]
        action: ScenarioCommand,
    },
}

#[derive(Debug, Subcommand)]
pub enum CalculatorCommand {
    /// Months of cash left at the current burn
    Runway(RunwayArgs),

    /// Units and revenue needed to cover fixed costs
    BreakEven(BreakEvenArgs),

    /// Per-unit and monthly contribution and CAC payback
    UnitEconomics(UnitEconomicsArgs),

    /// Customer acquisition cost against lifetime value
    CacLtv(CacLtvArgs),

    /// Price for a target margin, with GST
    PricingGst(PricingGstArgs),

    /// Monthly loan instalment and total interest
    Emi(EmiArgs),

    /// Net present value of yearly cash flows
    Npv(NpvArgs),

    /// Post-money valuation and ownership after a round
    CapTable(CapTableArgs),
}

impl CalculatorCommand {
    pub fn kind(&self) -> CalculatorKind {
        match self {
            Self::Runway(_) => CalculatorKind::Runway,
            Self::BreakEven(_) => CalculatorKind::BreakEven,
            Self::UnitEconomics(_) => CalculatorKind::UnitEconomics,
            Self::CacLtv(_) => CalculatorKind::CacLtv,
            Self::PricingGst(_) => CalculatorKind::PricingGst,
            Self::Emi(_) => CalculatorKind::Emi,
            Self::Npv(_) => CalculatorKind::Npv,
            Self::CapTable(_) => CalculatorKind::CapTable,
        }
    }

    /// Whether `--chart` was given. Calculators without a chart report false.
    pub fn chart(&self) -> bool {
        match self {
            Self::Runway(args) => args.chart.chart,
            Self::CacLtv(args) => args.chart.chart,
            Self::Emi(args) => args.chart.chart,
            Self::Npv(args) => args.chart.chart,
            Self::CapTable(args) => args.chart.chart,
            Self::BreakEven(_) | Self::UnitEconomics(_) | Self::PricingGst(_) => false,
        }
    }

    /// Copies the given flags onto this calculator's inputs.
    pub fn apply(
        &self,
        inputs: &mut CalculatorInputs,
    ) {
        match self {
            Self::Runway(args) => args.apply(&mut inputs.runway),
            Self::BreakEven(args) => args.apply(&mut inputs.break_even),
            Self::UnitEconomics(args) => args.apply(&mut inputs.unit_economics),
            Self::CacLtv(args) => args.apply(&mut inputs.cac_ltv),
            Self::PricingGst(args) => args.apply(&mut inputs.pricing_gst),
            Self::Emi(args) => args.apply(&mut inputs.emi),
            Self::Npv(args) => args.apply(&mut inputs.npv),
            Self::CapTable(args) => args.apply(&mut inputs.cap_table),
        }
    }
}

#[derive(Debug, Subcommand)]
pub enum ScenarioCommand {
    /// Save inputs under a name, e.g. `scenario save "Plan B" runway --cash 5,00,000`
    Save {
        name: String,

        /// Tab to reopen the scenario on [default: the calculator's tab, else overview]
        #[arg(long)]
        tab: Option<CalculatorTab>,

        /// Start from the inputs of a saved scenario instead of the samples
        #[arg(long)]
        from: Option<i64>,

        /// Calculator whose inputs to set before saving
        #[command(subcommand)]
        calculator: Option<CalculatorCommand>,
    },

    /// List saved scenarios, oldest first
    List,

    /// Show a scenario and evaluate its saved inputs
    Show { id: i64 },

    /// Delete a scenario
    Delete { id: i64 },
}

/// Flags shared by every calculator subcommand.
#[derive(Debug, Clone, Copy, Default, Args)]
pub struct ChartFlag {
    /// Also print the chart series
    #[arg(long)]
    pub chart: bool,
}

#[derive(Debug, Default, Args)]
pub struct RunwayArgs {
    /// Cash in bank
    #[arg(long, value_parser = parse_amount, allow_hyphen_values = true)]
    pub cash: Option<f64>,

    /// Net monthly burn
    #[arg(long, value_parser = parse_amount, allow_hyphen_values = true)]
    pub burn: Option<f64>,

    #[command(flatten)]
    pub chart: ChartFlag,
}

impl RunwayArgs {
    pub fn apply(
        &self,
        input: &mut RunwayInput,
    ) {
        set(&mut input.cash, self.cash);
        set(&mut input.monthly_burn, self.burn);
    }
}

#[derive(Debug, Default, Args)]
pub struct BreakEvenArgs {
    #[arg(long, value_parser = parse_amount, allow_hyphen_values = true)]
    pub fixed_costs: Option<f64>,

    /// Price per unit
    #[arg(long, value_parser = parse_amount, allow_hyphen_values = true)]
    pub price: Option<f64>,

    /// Variable cost per unit
    #[arg(long, value_parser = parse_amount, allow_hyphen_values = true)]
    pub variable_cost: Option<f64>,
}

impl BreakEvenArgs {
    pub fn apply(
        &self,
        input: &mut BreakEvenInput,
    ) {
        set(&mut input.fixed_costs, self.fixed_costs);
        set(&mut input.price, self.price);
        set(&mut input.variable_cost, self.variable_cost);
    }
}

#[derive(Debug, Default, Args)]
pub struct UnitEconomicsArgs {
    #[arg(long, value_parser = parse_amount, allow_hyphen_values = true)]
    pub price: Option<f64>,

    #[arg(long, value_parser = parse_amount, allow_hyphen_values = true)]
    pub variable_cost: Option<f64>,

    /// Units sold per month
    #[arg(long, value_parser = parse_amount, allow_hyphen_values = true)]
    pub units: Option<f64>,

    /// Monthly fixed costs
    #[arg(long, value_parser = parse_amount, allow_hyphen_values = true)]
    pub fixed_costs: Option<f64>,

    /// Acquisition cost per unit
    #[arg(long, value_parser = parse_amount, allow_hyphen_values = true)]
    pub cac: Option<f64>,
}

impl UnitEconomicsArgs {
    pub fn apply(
        &self,
        input: &mut UnitEconomicsInput,
    ) {
        set(&mut input.price, self.price);
        set(&mut input.variable_cost, self.variable_cost);
        set(&mut input.units_per_month, self.units);
        set(&mut input.fixed_costs, self.fixed_costs);
        set(&mut input.cac, self.cac);
    }
}

#[derive(Debug, Default, Args)]
pub struct CacLtvArgs {
    #[arg(long, value_parser = parse_amount, allow_hyphen_values = true)]
    pub marketing_spend: Option<f64>,

    #[arg(long, value_parser = parse_amount, allow_hyphen_values = true)]
    pub new_customers: Option<f64>,

    /// Average revenue per user per month
    #[arg(long, value_parser = parse_amount, allow_hyphen_values = true)]
    pub arpu: Option<f64>,

    /// Gross margin in percent
    #[arg(long, value_parser = parse_amount, allow_hyphen_values = true)]
    pub gross_margin: Option<f64>,

    /// Customer lifespan in months
    #[arg(long, value_parser = parse_amount, allow_hyphen_values = true)]
    pub lifespan: Option<f64>,

    #[command(flatten)]
    pub chart: ChartFlag,
}

impl CacLtvArgs {
    pub fn apply(
        &self,
        input: &mut CacLtvInput,
    ) {
        set(&mut input.marketing_spend, self.marketing_spend);
        set(&mut input.new_customers, self.new_customers);
        set(&mut input.arpu, self.arpu);
        set(&mut input.gross_margin, self.gross_margin);
        set(&mut input.lifespan_months, self.lifespan);
    }
}

#[derive(Debug, Default, Args)]
pub struct PricingGstArgs {
    /// Cost per unit
    #[arg(long, value_parser = parse_amount, allow_hyphen_values = true)]
    pub cost: Option<f64>,

    /// Target margin on price, in percent
    #[arg(long, value_parser = parse_amount, allow_hyphen_values = true)]
    pub margin: Option<f64>,

    /// GST rate in percent
    #[arg(long, value_parser = parse_amount, allow_hyphen_values = true)]
    pub gst: Option<f64>,
}

impl PricingGstArgs {
    pub fn apply(
        &self,
        input: &mut PricingGstInput,
    ) {
        set(&mut input.cost, self.cost);
        set(&mut input.target_margin, self.margin);
        set(&mut input.gst, self.gst);
    }
}

#[derive(Debug, Default, Args)]
pub struct EmiArgs {
    #[arg(long, value_parser = parse_amount, allow_hyphen_values = true)]
    pub principal: Option<f64>,

    /// Annual interest rate in percent
    #[arg(long, value_parser = parse_amount, allow_hyphen_values = true)]
    pub rate: Option<f64>,

    /// Tenure in months
    #[arg(long, value_parser = parse_amount, allow_hyphen_values = true)]
    pub tenure: Option<f64>,

    #[command(flatten)]
    pub chart: ChartFlag,
}

impl EmiArgs {
    pub fn apply(
        &self,
        input: &mut EmiInput,
    ) {
        set(&mut input.principal, self.principal);
        set(&mut input.annual_rate, self.rate);
        set(&mut input.tenure_months, self.tenure);
    }
}

#[derive(Debug, Default, Args)]
pub struct NpvArgs {
    /// Discount rate in percent per year
    #[arg(long, value_parser = parse_amount, allow_hyphen_values = true)]
    pub rate: Option<f64>,

    /// One cash flow per year, starting with the initial outlay; repeat the
    /// flag for each year
    #[arg(long = "cashflow", value_parser = parse_amount, allow_hyphen_values = true)]
    pub cashflows: Vec<f64>,

    #[command(flatten)]
    pub chart: ChartFlag,
}

impl NpvArgs {
    pub fn apply(
        &self,
        input: &mut NpvInput,
    ) {
        set(&mut input.discount_rate, self.rate);
        if !self.cashflows.is_empty() {
            input.cashflows = self.cashflows.clone();
        }
    }
}

#[derive(Debug, Default, Args)]
pub struct CapTableArgs {
    #[arg(long, value_parser = parse_amount, allow_hyphen_values = true)]
    pub pre_money: Option<f64>,

    #[arg(long, value_parser = parse_amount, allow_hyphen_values = true)]
    pub investment: Option<f64>,

    #[command(flatten)]
    pub chart: ChartFlag,
}

impl CapTableArgs {
    pub fn apply(
        &self,
        input: &mut CapTableInput,
    ) {
        set(&mut input.pre_money_valuation, self.pre_money);
        set(&mut input.investment, self.investment);
    }
}

fn set(
    field: &mut f64,
    value: Option<f64>,
) {
    if let Some(value) = value {
        *field = value;
    }
}
