//! Sphere/cylinder transposition: `(S, C, A)` and `(S + C, -C, A ± 90)`
//! describe the same lens.

use crate::power::AXIS_MAX;

/// A sphere/cylinder/axis triple. Absent values stay absent through the
/// transform unless the transform itself produces them.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PowerTriple {
    pub sphere: Option<f64>,
    pub cylinder: Option<f64>,
    pub axis: Option<i32>,
}

impl PowerTriple {
    pub fn new(sphere: Option<f64>, cylinder: Option<f64>, axis: Option<i32>) -> Self {
        Self {
            sphere,
            cylinder,
            axis,
        }
    }
}

/// Wraps any degree value into `(0, 180]`; `0` and `180` are the same meridian
/// and always come out as `180`.
pub fn normalize_axis(axis: i32) -> i32 {
    let wrapped = axis.rem_euclid(AXIS_MAX);
    if wrapped == 0 {
        AXIS_MAX
    } else {
        wrapped
    }
}

/// Quarter turn of the cylinder axis: `+90` up to 90, `-90` above it.
pub fn rotate_axis(axis: i32) -> i32 {
    let rotated = if axis <= 90 { axis + 90 } else { axis - 90 };
    normalize_axis(rotated)
}

/// Total; never fails. Missing sphere counts as zero only when a cylinder is
/// folded into it.
pub fn transpose(triple: PowerTriple) -> PowerTriple {
    let PowerTriple {
        sphere,
        cylinder,
        axis,
    } = triple;

    match cylinder {
        Some(cyl) => PowerTriple {
            sphere: Some(sphere.unwrap_or(0.0) + cyl),
            cylinder: Some(-cyl),
            axis: axis.map(rotate_axis),
        },
        None => PowerTriple {
            sphere,
            cylinder: None,
            axis: axis.map(rotate_axis),
        },
    }
}
