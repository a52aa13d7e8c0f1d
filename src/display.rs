//! Derives the per-eye rows and the addition block shown on the prescription
//! image from a raw entry, a display mode and the transpose flag.
//!
//! Always recompute from the original entry. Feeding rows back in would
//! compound transpositions.

use crate::power::{format_power, parse_axis, parse_power, round_to_hundredth};
use crate::prescription::{DisplayMode, Eye, PrescriptionEntry, RawEyeEntry};
use crate::transpose::{transpose, PowerTriple};
use serde::{Deserialize, Serialize};

/// Sphere cell marker for a lens with no correction.
pub const PLANO: &str = "PLN";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EyeDisplayRow {
    pub eye: Eye,
    pub label: String,
    pub spherical: String,
    pub cylindrical: String,
    pub axis: String,
    pub axis_error: bool,
    pub has_data: bool,
}

impl EyeDisplayRow {
    fn empty(eye: Eye) -> Self {
        Self {
            eye,
            label: eye.label().to_string(),
            spherical: String::new(),
            cylindrical: String::new(),
            axis: String::new(),
            axis_error: false,
            has_data: false,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdditionSummary {
    pub should_display: bool,
    pub right: String,
    pub left: String,
}

impl AdditionSummary {
    /// Both eyes carry the same value, printed once.
    pub fn is_combined(&self) -> bool {
        self.right == self.left
    }

    pub fn value(&self, eye: Eye) -> &str {
        match eye {
            Eye::Right => &self.right,
            Eye::Left => &self.left,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DerivedDisplay {
    pub mode: DisplayMode,
    pub transpose: bool,
    /// Right eye first, then left.
    pub rows: [EyeDisplayRow; 2],
    pub addition: AdditionSummary,
}

impl DerivedDisplay {
    pub fn row(&self, eye: Eye) -> &EyeDisplayRow {
        match eye {
            Eye::Right => &self.rows[0],
            Eye::Left => &self.rows[1],
        }
    }

    pub fn rows_with_data(&self) -> impl Iterator<Item = &EyeDisplayRow> {
        self.rows.iter().filter(|r| r.has_data)
    }
}

pub fn compute_display(
    entry: &PrescriptionEntry,
    mode: DisplayMode,
    transpose: bool,
) -> DerivedDisplay {
    DerivedDisplay {
        mode,
        transpose,
        rows: [
            compute_eye_row(Eye::Right, &entry.right_eye, mode, transpose),
            compute_eye_row(Eye::Left, &entry.left_eye, mode, transpose),
        ],
        addition: compute_addition(entry, mode),
    }
}

pub fn compute_eye_row(
    eye: Eye,
    raw: &RawEyeEntry,
    mode: DisplayMode,
    apply_transpose: bool,
) -> EyeDisplayRow {
    if !raw.has_power_data() {
        return EyeDisplayRow::empty(eye);
    }

    let mut triple = PowerTriple::new(
        parse_power(&raw.sphere),
        parse_power(&raw.cylinder),
        parse_axis(&raw.axis),
    );

    if mode == DisplayMode::Near {
        if let Some(add) = parse_power(&raw.addition) {
            triple.sphere = Some(triple.sphere.unwrap_or(0.0) + add);
        }
    }

    if apply_transpose {
        triple = transpose(triple);
    }

    // Zero cylinder is optically no cylinder.
    let cylindrical = triple
        .cylinder
        .filter(|c| round_to_hundredth(*c) != 0.0)
        .map(format_power)
        .unwrap_or_default();

    let axis = triple.axis.map(|a| a.to_string()).unwrap_or_default();

    let spherical = match triple.sphere {
        Some(s) if round_to_hundredth(s) == 0.0 => {
            if cylindrical.is_empty() && axis.is_empty() {
                PLANO.to_string()
            } else {
                String::new()
            }
        }
        Some(s) => format_power(s),
        None => String::new(),
    };

    let axis_error = !cylindrical.is_empty() && axis.is_empty();

    EyeDisplayRow {
        eye,
        label: eye.label().to_string(),
        spherical,
        cylindrical,
        axis,
        axis_error,
        has_data: true,
    }
}

/// Only `Complete` shows the addition; it ignores the transpose flag.
pub fn compute_addition(entry: &PrescriptionEntry, mode: DisplayMode) -> AdditionSummary {
    if mode != DisplayMode::Complete {
        return AdditionSummary::default();
    }

    let formatted = |eye: Eye| {
        parse_power(&entry.eye(eye).addition)
            .map(format_power)
            .unwrap_or_default()
    };
    let right = formatted(Eye::Right);
    let left = formatted(Eye::Left);
    let should_display = !right.is_empty() || !left.is_empty();

    AdditionSummary {
        should_display,
        right,
        left,
    }
}
