use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::calculations::common::round_half_up_cents;

/// Error returned when a string is not a supported currency code.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("unsupported currency '{0}' (expected INR, USD or EUR)")]
pub struct CurrencyParseError(pub String);

/// A supported display currency.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    #[default]
    Inr,
    Usd,
    Eur,
}

impl Currency {
    pub const ALL: [Currency; 3] = [Currency::Inr, Currency::Usd, Currency::Eur];

    /// ISO 4217 code.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Inr => "INR",
            Self::Usd => "USD",
            Self::Eur => "EUR",
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            Self::Inr => "₹",
            Self::Usd => "$",
            Self::Eur => "€",
        }
    }

    /// Parses an ISO code, ignoring case and surrounding whitespace.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_uppercase().as_str() {
            "INR" => Some(Self::Inr),
            "USD" => Some(Self::Usd),
            "EUR" => Some(Self::Eur),
            _ => None,
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Currency {
    type Err = CurrencyParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| CurrencyParseError(s.to_string()))
    }
}

/// Fixed conversion rates anchored on INR.
///
/// Rates are approximate constants and are never refreshed at runtime.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConversionRateTable {
    inr: f64,
    usd: f64,
    eur: f64,
}

impl ConversionRateTable {
    /// The process-wide table: 1 USD ≈ 83 INR, 1 EUR ≈ 90 INR.
    pub const STANDARD: Self = Self {
        inr: 1.0,
        usd: 83.0,
        eur: 90.0,
    };

    /// Value of one unit of `currency` in INR.
    pub fn rate_to_inr(
        &self,
        currency: Currency,
    ) -> f64 {
        match currency {
            Currency::Inr => self.inr,
            Currency::Usd => self.usd,
            Currency::Eur => self.eur,
        }
    }
}

/// Converts a monetary value between currencies using the standard table.
///
/// Returns `value` unchanged when `from == to` or when `value` is not finite,
/// so repeated conversions to the same currency are idempotent and `+∞`
/// sentinels survive a currency change. Otherwise the value is routed through
/// INR and rounded to cents (half-up).
///
/// # Examples
///
/// ```
/// use fin_core::currency::{Currency, convert};
///
/// assert_eq!(convert(1_000.0, Currency::Usd, Currency::Inr), 83_000.0);
/// assert_eq!(convert(1_000.0, Currency::Inr, Currency::Usd), 12.05);
/// assert_eq!(convert(42.5, Currency::Eur, Currency::Eur), 42.5);
/// assert_eq!(convert(f64::INFINITY, Currency::Inr, Currency::Eur), f64::INFINITY);
/// ```
pub fn convert(
    value: f64,
    from: Currency,
    to: Currency,
) -> f64 {
    if from == to || !value.is_finite() {
        return value;
    }

    let table = ConversionRateTable::STANDARD;
    let in_inr = value * table.rate_to_inr(from);
    round_half_up_cents(in_inr / table.rate_to_inr(to))
}
