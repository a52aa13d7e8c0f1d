//! Shapes persisted for each lens order.
//!
//! `input_power` keeps what the operator typed (after blur normalization);
//! `ordered_power` keeps what the generated image showed, which can differ
//! after a transposition done for lab compatibility.

use crate::config::{FormPolicy, ShopDefinitions};
use crate::display::DerivedDisplay;
use crate::form::normalize_eye;
use crate::prescription::{DisplayMode, Eye, PrescriptionEntry};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct InputPower {
    pub right_spherical: String,
    pub right_cylindrical: String,
    pub right_axis: String,
    pub right_addition: String,
    pub left_spherical: String,
    pub left_cylindrical: String,
    pub left_axis: String,
    pub left_addition: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct OrderedPower {
    pub mode: DisplayMode,
    pub transpose_applied: bool,
    pub right_spherical: String,
    pub right_cylindrical: String,
    pub right_axis: String,
    pub left_spherical: String,
    pub left_cylindrical: String,
    pub left_axis: String,
    pub right_addition: String,
    pub left_addition: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct OrderRecord {
    pub customer_name: String,
    pub supplier_name: String,
    pub lens_description: String,
    pub urgent: bool,
    pub branch_name: String,
    /// Assigned at write time by the store boundary.
    pub created_at: Option<String>,
    pub delivered: bool,
    pub delivered_at: Option<String>,
    #[serde(rename = "input_power")]
    pub input_power: InputPower,
    #[serde(rename = "ordered_power")]
    pub ordered_power: OrderedPower,
}

impl InputPower {
    pub fn from_entry(entry: &PrescriptionEntry, policy: &FormPolicy) -> Self {
        let right = normalize_eye(&entry.right_eye, policy);
        let left = normalize_eye(&entry.left_eye, policy);
        Self {
            right_spherical: right.sphere,
            right_cylindrical: right.cylinder,
            right_axis: right.axis,
            right_addition: right.addition,
            left_spherical: left.sphere,
            left_cylindrical: left.cylinder,
            left_axis: left.axis,
            left_addition: left.addition,
        }
    }
}

impl OrderedPower {
    pub fn from_display(display: &DerivedDisplay) -> Self {
        let right = display.row(Eye::Right);
        let left = display.row(Eye::Left);
        let addition = &display.addition;
        let (right_addition, left_addition) = if addition.should_display {
            (addition.right.clone(), addition.left.clone())
        } else {
            (String::new(), String::new())
        };
        Self {
            mode: display.mode,
            transpose_applied: display.transpose,
            right_spherical: right.spherical.clone(),
            right_cylindrical: right.cylindrical.clone(),
            right_axis: right.axis.clone(),
            left_spherical: left.spherical.clone(),
            left_cylindrical: left.cylindrical.clone(),
            left_axis: left.axis.clone(),
            right_addition,
            left_addition,
        }
    }

    /// Three compact lines for order listings.
    pub fn summary(&self) -> PowerSummary {
        let right_line = format!(
            "{}: {}",
            Eye::Right.initial(),
            summarize_eye(&self.right_spherical, &self.right_cylindrical, &self.right_axis)
        );
        let left_line = format!(
            "{}: {}",
            Eye::Left.initial(),
            summarize_eye(&self.left_spherical, &self.left_cylindrical, &self.left_axis)
        );

        let right_add = or_zero(&self.right_addition);
        let left_add = or_zero(&self.left_addition);
        let add_line = if right_add == left_add {
            format!("Add: {}", left_add)
        } else {
            format!("Add: R:{} L:{}", right_add, left_add)
        };

        PowerSummary {
            right_line,
            left_line,
            add_line,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PowerSummary {
    pub right_line: String,
    pub left_line: String,
    pub add_line: String,
}

fn or_zero(s: &str) -> &str {
    if s.is_empty() {
        "0.00"
    } else {
        s
    }
}

fn summarize_eye(sph: &str, cyl: &str, axis: &str) -> String {
    let mut out = or_zero(sph).to_string();
    let zero_cyl = cyl.is_empty() || cyl == "0.00" || cyl == "+0.00";
    if !zero_cyl {
        out.push(' ');
        out.push_str(cyl);
        if !axis.is_empty() {
            out.push_str(&format!(" × {}°", axis));
        }
    }
    out
}

impl OrderRecord {
    /// `createdAt` stays unset; the store boundary stamps it.
    pub fn build(
        entry: &PrescriptionEntry,
        display: &DerivedDisplay,
        policy: &FormPolicy,
        shop: &ShopDefinitions,
    ) -> Self {
        Self {
            customer_name: entry.customer_name.trim().to_string(),
            supplier_name: entry.supplier_name.trim().to_string(),
            lens_description: entry.lens_description.trim().to_string(),
            urgent: entry.urgent,
            branch_name: shop.resolve_branch(&entry.branch),
            created_at: None,
            delivered: false,
            delivered_at: None,
            input_power: InputPower::from_entry(entry, policy),
            ordered_power: OrderedPower::from_display(display),
        }
    }

    pub fn mark_delivered(&mut self, at: impl Into<String>) {
        self.delivered = true;
        self.delivered_at = Some(at.into());
    }

    pub fn mark_undelivered(&mut self) {
        self.delivered = false;
        self.delivered_at = None;
    }

    pub fn transfer(&mut self, branch: impl Into<String>) {
        self.branch_name = branch.into();
    }
}
