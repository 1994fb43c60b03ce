//! Common numeric helpers shared by the calculators.
//!
//! Every formula in this crate is total: conditions that would divide by zero
//! or by a non-positive quantity produce `f64::INFINITY` instead of an error,
//! so the caller always has a renderable value.

/// Rounds a value to two decimal places using half-up rounding on the
/// scaled integer.
///
/// Midpoints are rounded toward positive infinity (`floor(x * 100 + 0.5)`),
/// so `-0.125` becomes `-0.12`. Non-finite values pass through unchanged.
///
/// # Examples
///
/// ```
/// use fin_core::calculations::common::round_half_up_cents;
///
/// assert_eq!(round_half_up_cents(123.454), 123.45);
/// assert_eq!(round_half_up_cents(0.125), 0.13);
/// assert_eq!(round_half_up_cents(-0.125), -0.12);
/// assert_eq!(round_half_up_cents(f64::INFINITY), f64::INFINITY);
/// ```
pub fn round_half_up_cents(value: f64) -> f64 {
    if !value.is_finite() {
        return value;
    }
    (value * 100.0 + 0.5).floor() / 100.0
}

/// Divides `numerator` by `denominator` when the denominator is strictly
/// positive, otherwise returns positive infinity.
///
/// This is the "never / not viable" rule used for runway, break-even units,
/// payback periods and CAC.
///
/// # Examples
///
/// ```
/// use fin_core::calculations::common::ratio_or_infinity;
///
/// assert_eq!(ratio_or_infinity(100.0, 4.0), 25.0);
/// assert_eq!(ratio_or_infinity(100.0, 0.0), f64::INFINITY);
/// assert_eq!(ratio_or_infinity(100.0, -5.0), f64::INFINITY);
/// ```
pub fn ratio_or_infinity(
    numerator: f64,
    denominator: f64,
) -> f64 {
    if denominator > 0.0 {
        numerator / denominator
    } else {
        f64::INFINITY
    }
}

/// Converts a percentage (e.g. `18.0` for 18%) to a fraction.
pub fn percent(value: f64) -> f64 {
    value / 100.0
}

/// Serializes an output value, writing non-finite sentinels as strings.
///
/// JSON has no representation for infinity, and `serde_json` would otherwise
/// emit `null`. Use with `#[serde(serialize_with = "...")]` on fields that
/// may carry the `+∞` sentinel.
pub fn serialize_sentinel<S>(
    value: &f64,
    serializer: S,
) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    if value.is_finite() {
        serializer.serialize_f64(*value)
    } else if value.is_nan() {
        serializer.serialize_str("NaN")
    } else if value.is_sign_positive() {
        serializer.serialize_str("Infinity")
    } else {
        serializer.serialize_str("-Infinity")
    }
}
