//! Decimal rounding for published scores.
//!
//! Scores are rounded to a fixed number of decimal places with ties going to
//! the even neighbour, so `0.03125` becomes `0.0312` and `0.09375` becomes
//! `0.0938`.
//!
//! Rounding works on the exact decimal expansion of the binary value, never
//! on `value * 10^decimals`: the multiplication rounds too, and can turn
//! `4.37645` (stored slightly above the half-way point) into a false tie.

/// Decimal places used for every published distance and t-statistic.
pub const SCORE_DECIMALS: usize = 4;

/// Rounds `value` to `decimals` places, ties to even.
///
/// Non-finite values pass through unchanged.
pub fn round_to(value: f64, decimals: usize) -> f64 {
    if !value.is_finite() {
        return value;
    }
    format!("{:.*}", decimals, value).parse().unwrap_or(value)
}

/// `round_to(value, SCORE_DECIMALS)`.
pub fn round_score(value: f64) -> f64 {
    round_to(value, SCORE_DECIMALS)
}
