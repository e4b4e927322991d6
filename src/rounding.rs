//! Numeric normalisation for report output.

/// Above this many cents an `f64` cannot carry a fractional part
/// precise enough to tell a representation error from a real value.
const CORRECTION_LIMIT: f64 = (1u64 << 47) as f64;

/// Rounds a monetary amount to two decimals, half away from zero.
///
/// Non-finite values (NaN, infinities) become `0.0`.  Amounts whose
/// decimal form ends in `5` but whose binary form falls a couple of
/// ULPs short of the half (e.g. `1.005`) still round away from zero;
/// every other value is rounded as it is.
pub fn round_money(value: f64) -> f64 {
    if !value.is_finite() {
        return 0.0;
    }
    let cents = value * 100.0;
    let gap = 0.5 - (cents - cents.trunc()).abs();
    let tolerance = 2.0 * cents.abs() * f64::EPSILON;
    let rounded = if cents.abs() < CORRECTION_LIMIT && gap > 0.0 && gap <= tolerance {
        cents.trunc() + cents.signum()
    } else {
        cents.round()
    };
    let rounded = rounded / 100.0;
    if rounded.is_finite() {
        // normalise -0.0
        rounded + 0.0
    } else {
        0.0
    }
}
