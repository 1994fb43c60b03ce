use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown tab '{0}'")]
pub struct TabParseError(pub String);

/// A screen of the calculator suite. Scenarios remember which one was open.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CalculatorTab {
    #[default]
    Overview,
    Fundraising,
    Growth,
    Operations,
    Valuation,
    Pricing,
    Learning,
}

impl CalculatorTab {
    pub const ALL: [CalculatorTab; 7] = [
        Self::Overview,
        Self::Fundraising,
        Self::Growth,
        Self::Operations,
        Self::Valuation,
        Self::Pricing,
        Self::Learning,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Overview => "overview",
            Self::Fundraising => "fundraising",
            Self::Growth => "growth",
            Self::Operations => "operations",
            Self::Valuation => "valuation",
            Self::Pricing => "pricing",
            Self::Learning => "learning",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|tab| tab.as_str().eq_ignore_ascii_case(s.trim()))
    }

    /// Calculators shown on this tab. Overview and learning host none.
    pub fn calculators(&self) -> &'static [CalculatorKind] {
        match self {
            Self::Overview | Self::Learning => &[],
            Self::Fundraising => &[CalculatorKind::Runway],
            Self::Growth => &[CalculatorKind::CacLtv],
            Self::Operations => &[CalculatorKind::BreakEven, CalculatorKind::UnitEconomics],
            Self::Valuation => &[CalculatorKind::CapTable, CalculatorKind::Npv],
            Self::Pricing => &[CalculatorKind::PricingGst, CalculatorKind::Emi],
        }
    }
}

impl fmt::Display for CalculatorTab {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CalculatorTab {
    type Err = TabParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| TabParseError(s.to_string()))
    }
}

/// Identifies one of the eight calculators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CalculatorKind {
    Runway,
    BreakEven,
    UnitEconomics,
    CacLtv,
    PricingGst,
    Emi,
    Npv,
    CapTable,
}

impl CalculatorKind {
    pub const ALL: [CalculatorKind; 8] = [
        CalculatorKind::Runway,
        CalculatorKind::BreakEven,
        CalculatorKind::UnitEconomics,
        CalculatorKind::CacLtv,
        CalculatorKind::PricingGst,
        CalculatorKind::Emi,
        CalculatorKind::Npv,
        CalculatorKind::CapTable,
    ];

    pub fn title(&self) -> &'static str {
        match self {
            Self::Runway => "Runway Calculator",
            Self::BreakEven => "Break-even Analysis",
            Self::UnitEconomics => "Unit Economics",
            Self::CacLtv => "CAC & LTV Analysis",
            Self::PricingGst => "Pricing & GST",
            Self::Emi => "Loan EMI Calculator",
            Self::Npv => "NPV Calculator",
            Self::CapTable => "Simple Cap Table & Dilution",
        }
    }

    /// The tab the calculator is shown on.
    pub fn tab(&self) -> CalculatorTab {
        match self {
            Self::Runway => CalculatorTab::Fundraising,
            Self::CacLtv => CalculatorTab::Growth,
            Self::BreakEven | Self::UnitEconomics => CalculatorTab::Operations,
            Self::CapTable | Self::Npv => CalculatorTab::Valuation,
            Self::PricingGst | Self::Emi => CalculatorTab::Pricing,
        }
    }
}
