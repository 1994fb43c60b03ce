//! Display formatting for calculator outputs.
//!
//! Mirrors the `en-IN` number style: Indian digit grouping (`12,34,567`),
//! up to the requested number of decimals with trailing zeros dropped, and
//! `∞` for the "never" sentinel.

use fin_core::Currency;

pub const INFINITY_SYMBOL: &str = "∞";

/// Groups the digits of a non-negative integer string as lakhs and crores.
fn group_indian(digits: &str) -> String {
    if digits.len() <= 3 {
        return digits.to_string();
    }

    let (head, tail) = digits.split_at(digits.len() - 3);
    let mut groups: Vec<&str> = Vec::new();
    let mut rest = head;
    while rest.len() > 2 {
        let (left, right) = rest.split_at(rest.len() - 2);
        groups.push(right);
        rest = left;
    }
    groups.push(rest);
    groups.reverse();

    format!("{},{}", groups.join(","), tail)
}

/// Formats the magnitude of `value` and reports whether a minus sign is
/// needed. Values that round to zero are never negative.
fn format_magnitude(
    value: f64,
    decimals: usize,
) -> (bool, String) {
    let scale = 10f64.powi(decimals as i32);
    let rounded = (value.abs() * scale).round() / scale;
    let fixed = format!("{:.*}", decimals, rounded);

    let (integer, fraction) = match fixed.split_once('.') {
        Some((integer, fraction)) => (integer, fraction.trim_end_matches('0')),
        None => (fixed.as_str(), ""),
    };

    let mut text = group_indian(integer);
    if !fraction.is_empty() {
        text.push('.');
        text.push_str(fraction);
    }

    (value < 0.0 && rounded != 0.0, text)
}

/// Formats a plain number with at most `decimals` decimals.
pub fn format_number(
    value: f64,
    decimals: usize,
) -> String {
    if !value.is_finite() {
        return INFINITY_SYMBOL.to_string();
    }

    let (negative, text) = format_magnitude(value, decimals);
    if negative { format!("-{text}") } else { text }
}

/// Formats a money amount with the currency symbol and at most two decimals.
pub fn format_currency(
    value: f64,
    currency: Currency,
) -> String {
    if !value.is_finite() {
        return INFINITY_SYMBOL.to_string();
    }

    let (negative, text) = format_magnitude(value, 2);
    let sign = if negative { "-" } else { "" };
    format!("{sign}{}{text}", currency.symbol())
}

pub fn format_percent(
    value: f64,
    decimals: usize,
) -> String {
    if !value.is_finite() {
        return INFINITY_SYMBOL.to_string();
    }
    format!("{}%", format_number(value, decimals))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    // =========================================================================
    // format_number tests
    // =========================================================================

    #[test]
    fn format_number_uses_indian_grouping() {
        assert_eq!(format_number(1_234_567.5, 2), "12,34,567.5");
        assert_eq!(format_number(100_000_000.0, 2), "10,00,00,000");
        assert_eq!(format_number(999.0, 2), "999");
        assert_eq!(format_number(1_000.0, 2), "1,000");
    }

    #[test]
    fn format_number_drops_trailing_zeros() {
        assert_eq!(format_number(10.0, 1), "10");
        assert_eq!(format_number(2.50, 2), "2.5");
        assert_eq!(format_number(8.4, 2), "8.4");
    }

    #[test]
    fn format_number_rounds_to_requested_decimals() {
        assert_eq!(format_number(2.857_142, 2), "2.86");
        assert_eq!(format_number(2.857_142, 1), "2.9");
    }

    #[test]
    fn format_number_negative_values() {
        assert_eq!(format_number(-12_345.0, 0), "-12,345");
        assert_eq!(format_number(-0.001, 2), "0");
    }

    #[test]
    fn format_number_infinity() {
        assert_eq!(format_number(f64::INFINITY, 2), "∞");
    }

    // =========================================================================
    // format_currency tests
    // =========================================================================

    #[test]
    fn format_currency_prefixes_symbol() {
        assert_eq!(format_currency(1_000_000.0, Currency::Inr), "₹10,00,000");
        assert_eq!(format_currency(12_048.19, Currency::Usd), "$12,048.19");
        assert_eq!(format_currency(555.56, Currency::Eur), "€555.56");
    }

    #[test]
    fn format_currency_sign_before_symbol() {
        assert_eq!(format_currency(-100_000.0, Currency::Inr), "-₹1,00,000");
    }

    #[test]
    fn format_currency_infinity_has_no_symbol() {
        assert_eq!(format_currency(f64::INFINITY, Currency::Usd), "∞");
    }

    // =========================================================================
    // format_percent tests
    // =========================================================================

    #[test]
    fn format_percent_appends_sign() {
        assert_eq!(format_percent(16.666_666, 2), "16.67%");
        assert_eq!(format_percent(f64::INFINITY, 2), "∞");
    }
}
