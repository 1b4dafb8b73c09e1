//! Display rounding

use rust_decimal::prelude::*;
use rust_decimal::RoundingStrategy;

/// Round `value` to `dp` decimal places, halves away from zero.
///
/// Non-finite input maps to 0 so NaN/Infinity never reach a caller's output.
/// Values outside the decimal range are returned unchanged.
pub fn round_to(value: f64, dp: u32) -> f64 {
    if !value.is_finite() {
        return 0.0;
    }

    Decimal::from_f64(value)
        .map(|d| d.round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero))
        .and_then(|d| d.to_f64())
        .unwrap_or(value)
}

/// `value` itself when finite, otherwise 0
pub fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        0.0
    }
}

/// Format `value` with exactly `dp` decimals after rounding
pub fn format_fixed(value: f64, dp: u32) -> String {
    format!("{:.*}", dp as usize, round_to(value, dp))
}
