//! Rounding and unit conversions used for display.
//!
//! Rounding is half away from zero at 2 decimals, so `2.345 → 2.35` and
//! `-2.345 → -2.35` (subject to the binary representation of the input).

/// Feet per meter.
pub const FEET_PER_METER: f64 = 3.2808399;

/// Round to 2 decimal places.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Millimeters to meters, rounded to 2 decimals.
pub fn mm_to_m(mm: f64) -> f64 {
    round2(mm / 1000.0)
}

/// Meters to feet, rounded to 2 decimals.
pub fn meters_to_feet(meters: f64) -> f64 {
    round2(meters * FEET_PER_METER)
}
