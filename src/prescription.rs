use crate::error::LfResult;
use crate::power::{parse_axis, parse_power};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use strum_macros::{Display, EnumIter, EnumString};
use typed_builder::TypedBuilder;

/// Longest lens description the order form accepts.
pub const MAX_LENS_DESCRIPTION_CHARS: usize = 142;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, EnumIter, EnumString, Display,
    Serialize, Deserialize,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum Eye {
    Right,
    Left,
}

impl Eye {
    /// Row label printed on the prescription image.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Right => "RIGHT",
            Self::Left => "LEFT",
        }
    }

    pub fn initial(&self) -> char {
        match self {
            Self::Right => 'R',
            Self::Left => 'L',
        }
    }
}

/// How the addition is presented.
///
/// `Near` folds the addition into the sphere, `Complete` prints it separately
/// and `Distance` leaves it out.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    EnumIter,
    EnumString,
    Display,
    Serialize,
    Deserialize,
    clap::ValueEnum,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum DisplayMode {
    Distance,
    Near,
    #[default]
    Complete,
}

/// The four numeric fields of one eye, exactly as typed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TypedBuilder)]
#[serde(default)]
pub struct RawEyeEntry {
    #[builder(default, setter(into))]
    pub sphere: String,
    #[builder(default, setter(into))]
    pub cylinder: String,
    #[builder(default, setter(into))]
    pub axis: String,
    #[builder(default, setter(into))]
    pub addition: String,
}

impl RawEyeEntry {
    /// True when sphere, cylinder or axis holds a usable number. Addition alone
    /// does not count: there is nothing to fold it into.
    pub fn has_power_data(&self) -> bool {
        parse_power(&self.sphere).is_some()
            || parse_power(&self.cylinder).is_some()
            || parse_axis(&self.axis).is_some()
    }
}

/// Snapshot of the order form taken on "generate" or "save".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TypedBuilder)]
#[serde(default, rename_all = "camelCase")]
pub struct PrescriptionEntry {
    #[builder(default)]
    pub right_eye: RawEyeEntry,
    #[builder(default)]
    pub left_eye: RawEyeEntry,
    #[builder(default, setter(into))]
    pub customer_name: String,
    #[builder(default, setter(into))]
    pub supplier_name: String,
    #[builder(default, setter(into))]
    pub lens_description: String,
    #[builder(default = false)]
    pub urgent: bool,
    #[builder(default, setter(into))]
    pub branch: String,
}

impl PrescriptionEntry {
    pub fn eye(&self, eye: Eye) -> &RawEyeEntry {
        match eye {
            Eye::Right => &self.right_eye,
            Eye::Left => &self.left_eye,
        }
    }

    pub fn eye_mut(&mut self, eye: Eye) -> &mut RawEyeEntry {
        match eye {
            Eye::Right => &mut self.right_eye,
            Eye::Left => &mut self.left_eye,
        }
    }

    pub fn load_from_file<P: AsRef<Path>>(path: P) -> LfResult<Self> {
        let content = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }
}
