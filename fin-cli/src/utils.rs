use std::num::ParseFloatError;

use thiserror::Error;

/// Error returned when a string cannot be parsed as an amount.
#[derive(Debug, Error, PartialEq)]
pub enum ParseAmountError {
    #[error("invalid amount '{input}': {source}")]
    Invalid {
        input: String,
        #[source]
        source: ParseFloatError,
    },

    #[error("amount '{0}' must be a finite number")]
    NotFinite(String),
}

/// Normalizes input for number parsing: trims whitespace and removes commas (thousands separator).
fn normalize_amount_input(s: &str) -> String {
    s.trim().replace(',', "")
}

/// Parses a string into an amount.
///
/// Handles comma as thousands separator in either western or Indian
/// grouping (`"1,234.56"`, `"12,34,567"`). Empty or whitespace-only input is
/// treated as 0.
pub fn parse_amount(s: &str) -> Result<f64, ParseAmountError> {
    let normalized = normalize_amount_input(s);
    if normalized.is_empty() {
        return Ok(0.0);
    }

    let value: f64 = normalized.parse().map_err(|e| {
        tracing::error!(input = %s, "invalid amount: {}", e);
        ParseAmountError::Invalid {
            input: s.to_string(),
            source: e,
        }
    })?;

    if !value.is_finite() {
        tracing::error!(input = %s, "non-finite amount");
        return Err(ParseAmountError::NotFinite(s.to_string()));
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn parse_amount_accepts_comma_thousands_separator() {
        assert_eq!(parse_amount("1,234.56").unwrap(), 1_234.56);
        assert_eq!(parse_amount("12,34,567").unwrap(), 1_234_567.0);
    }

    #[test]
    fn parse_amount_trims_whitespace() {
        assert_eq!(parse_amount("  123.45  ").unwrap(), 123.45);
    }

    #[test]
    fn parse_amount_accepts_negative_values() {
        assert_eq!(parse_amount("-1,00,000").unwrap(), -100_000.0);
    }

    #[test]
    fn parse_amount_empty_treated_as_zero() {
        assert_eq!(parse_amount("").unwrap(), 0.0);
        assert_eq!(parse_amount("   ").unwrap(), 0.0);
    }

    #[test]
    fn parse_amount_invalid_returns_error() {
        assert!(matches!(parse_amount("abc"), Err(ParseAmountError::Invalid { .. })));
    }

    #[test]
    fn parse_amount_rejects_infinity() {
        assert_eq!(
            parse_amount("inf"),
            Err(ParseAmountError::NotFinite("inf".to_string()))
        );
    }
}
