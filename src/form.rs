//! Field-level helpers for the order form: normalization on blur and the
//! "copy addition" button.

use crate::config::FormPolicy;
use crate::power::{format_power, parse_axis, parse_power};
use crate::prescription::RawEyeEntry;

/// `"1.5"` becomes `"+1.50"`. Empty, a lone `-` and non-numeric text are left
/// as typed.
pub fn normalize_power_field(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed == "-" {
        return trimmed.to_string();
    }
    match parse_power(trimmed) {
        Some(value) => format_power(value),
        None => raw.to_string(),
    }
}

/// `"90.0"` becomes `"90"`. Non-numeric text is left as typed.
pub fn normalize_axis_field(raw: &str) -> String {
    match parse_axis(raw) {
        Some(axis) => axis.to_string(),
        None => raw.trim().to_string(),
    }
}

pub fn normalize_eye(raw: &RawEyeEntry, policy: &FormPolicy) -> RawEyeEntry {
    let mut eye = RawEyeEntry {
        sphere: normalize_power_field(&raw.sphere),
        cylinder: normalize_power_field(&raw.cylinder),
        axis: normalize_axis_field(&raw.axis),
        addition: normalize_power_field(&raw.addition),
    };

    if policy.clear_axis_on_zero_cylinder
        && parse_power(&eye.cylinder).is_some_and(|c| c == 0.0)
    {
        eye.cylinder.clear();
        eye.axis.clear();
    }
    eye
}

/// Returns the new `(right, left)` additions. A lone value is copied to the
/// empty side; otherwise right wins.
pub fn copy_addition(right: &str, left: &str) -> (String, String) {
    let right_empty = right.trim().is_empty();
    let left_empty = left.trim().is_empty();
    if right_empty && !left_empty {
        (left.to_string(), left.to_string())
    } else {
        (right.to_string(), right.to_string())
    }
}
