//! Gate for the "generate" and "save" actions.
//!
//! Every rule runs for every eye and field; violations are collected rather
//! than short-circuited so the form can highlight all of them at once. The
//! live preview never consults this module.

use crate::power::{is_quarter_step, is_valid_axis, parse_axis_value, parse_power};
use crate::prescription::{Eye, PrescriptionEntry, RawEyeEntry, MAX_LENS_DESCRIPTION_CHARS};
use std::collections::BTreeMap;
use std::fmt;
use strum::IntoEnumIterator;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FieldKey {
    General,
    Sphere(Eye),
    Cylinder(Eye),
    Axis(Eye),
    Addition(Eye),
    LensDescription,
}

impl fmt::Display for FieldKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::General => write!(f, "general"),
            Self::Sphere(eye) => write!(f, "{}_sphere", eye),
            Self::Cylinder(eye) => write!(f, "{}_cylinder", eye),
            Self::Axis(eye) => write!(f, "{}_axis", eye),
            Self::Addition(eye) => write!(f, "{}_addition", eye),
            Self::LensDescription => write!(f, "lens_description"),
        }
    }
}

pub const MSG_NO_DATA: &str = "Please fill in at least one field for right or left eye.";
pub const MSG_POWER_STEP: &str = "Spherical and cylinder values must be in steps of 0.25";
pub const MSG_ADDITION: &str = "Addition values must be in steps of 0.25 and should be positive";
pub const MSG_AXIS_RANGE: &str = "Axis values must be whole degrees in the range 1 to 180";
pub const MSG_AXIS_MISSING: &str = "Axis is required when a cylinder is entered";

/// Field to message. Empty means the entry may be generated or saved.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    errors: BTreeMap<FieldKey, String>,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn errors(&self) -> &BTreeMap<FieldKey, String> {
        &self.errors
    }

    pub fn get(&self, key: FieldKey) -> Option<&str> {
        self.errors.get(&key).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    fn record(&mut self, key: FieldKey, message: &str) {
        self.errors.insert(key, message.to_string());
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .errors
            .iter()
            .map(|(k, v)| format!("{}: {}", k, v))
            .collect();
        write!(f, "{}", parts.join("; "))
    }
}

pub fn validate(entry: &PrescriptionEntry) -> ValidationReport {
    let mut report = ValidationReport::default();

    if Eye::iter().all(|eye| !entry.eye(eye).has_power_data()) {
        report.record(FieldKey::General, MSG_NO_DATA);
    }

    for eye in Eye::iter() {
        validate_eye(eye, entry.eye(eye), &mut report);
    }

    if entry.lens_description.chars().count() > MAX_LENS_DESCRIPTION_CHARS {
        report.record(
            FieldKey::LensDescription,
            &format!(
                "Lens description must be at most {} characters",
                MAX_LENS_DESCRIPTION_CHARS
            ),
        );
    }

    report
}

fn validate_eye(eye: Eye, raw: &RawEyeEntry, report: &mut ValidationReport) {
    if let Some(sphere) = parse_power(&raw.sphere) {
        if !is_quarter_step(sphere) {
            report.record(FieldKey::Sphere(eye), MSG_POWER_STEP);
        }
    }

    let cylinder = parse_power(&raw.cylinder);
    if let Some(cyl) = cylinder {
        if !is_quarter_step(cyl) {
            report.record(FieldKey::Cylinder(eye), MSG_POWER_STEP);
        }
    }

    if let Some(add) = parse_power(&raw.addition) {
        if add < 0.0 || !is_quarter_step(add) {
            report.record(FieldKey::Addition(eye), MSG_ADDITION);
        }
    }

    match parse_axis_value(&raw.axis) {
        Some(axis) if !is_valid_axis(axis) => {
            report.record(FieldKey::Axis(eye), MSG_AXIS_RANGE);
        }
        Some(_) => {}
        None => {
            // Same condition the renderer highlights as an axis error cell.
            if cylinder.is_some_and(|c| !cylinder_is_zero(c)) {
                report.record(FieldKey::Axis(eye), MSG_AXIS_MISSING);
            }
        }
    }
}

fn cylinder_is_zero(cyl: f64) -> bool {
    crate::power::round_to_hundredth(cyl) == 0.0
}
