//! Parsing and formatting of diopter quantities (sphere, cylinder, addition)
//! and of the cylinder axis.
//!
//! Inputs arrive as user-typed text. Anything that does not parse is treated
//! as absent rather than as an error; the validator decides what is legal.

/// Optical powers are ground in quarter-diopter steps.
pub const POWER_STEP: f64 = 0.25;

/// Axis degrees accepted by the validator, inclusive.
pub const AXIS_MIN: i32 = 1;
pub const AXIS_MAX: i32 = 180;

const STEP_TOLERANCE: f64 = 1e-6;

/// Parses a power field. A lone `-` is shorthand for zero with the sign still
/// pending, so it yields `Some(0.0)`.
pub fn parse_power(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    if trimmed == "-" {
        return Some(0.0);
    }
    parse_finite(trimmed)
}

/// Raw numeric value of an axis field, before any rounding.
pub fn parse_axis_value(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    parse_finite(trimmed)
}

/// Axis as whole degrees, as used for display and transposition.
pub fn parse_axis(raw: &str) -> Option<i32> {
    parse_axis_value(raw).map(|v| v.round() as i32)
}

fn parse_finite(s: &str) -> Option<f64> {
    s.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Rounds half away from zero at two decimals. The nudge keeps values such as
/// `1.245` (stored as `1.24499..`) from rounding the wrong way.
pub fn round_to_hundredth(value: f64) -> f64 {
    let scaled = value * 100.0;
    let nudged = scaled + scaled.signum() * 1e-7;
    let rounded = nudged.round() / 100.0;
    if rounded == 0.0 {
        0.0
    } else {
        rounded
    }
}

/// `+1.25`, `-0.75`, `+0.00`. Anything that rounds to zero is positive zero.
pub fn format_power(value: f64) -> String {
    let rounded = round_to_hundredth(value);
    if rounded == 0.0 {
        "+0.00".to_string()
    } else if rounded > 0.0 {
        format!("+{:.2}", rounded)
    } else {
        format!("{:.2}", rounded)
    }
}

/// True when `value` lies on the quarter-diopter grid.
pub fn is_quarter_step(value: f64) -> bool {
    let steps = value / POWER_STEP;
    (steps - steps.round()).abs() < STEP_TOLERANCE
}

/// True when `value` is a whole degree inside `[AXIS_MIN, AXIS_MAX]`.
pub fn is_valid_axis(value: f64) -> bool {
    value.fract().abs() < STEP_TOLERANCE
        && value >= AXIS_MIN as f64
        && value <= AXIS_MAX as f64
}
