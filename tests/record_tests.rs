use lensforge::config::{FormPolicy, ShopDefinitions};
use lensforge::display::compute_display;
use lensforge::prescription::{DisplayMode, PrescriptionEntry, RawEyeEntry};
use lensforge::record::{OrderRecord, OrderedPower};
use serde_json::Value;

fn sample_entry() -> PrescriptionEntry {
    PrescriptionEntry::builder()
        .right_eye(
            RawEyeEntry::builder()
                .sphere("2")
                .cylinder("-1")
                .axis("90")
                .addition("1.5")
                .build(),
        )
        .left_eye(
            RawEyeEntry::builder()
                .sphere("-0.5")
                .addition("1.5")
                .build(),
        )
        .customer_name("  Asha Rao ")
        .supplier_name("Lensmart")
        .lens_description("Progressive")
        .build()
}

fn build(entry: &PrescriptionEntry, mode: DisplayMode, transpose: bool) -> OrderRecord {
    let display = compute_display(entry, mode, transpose);
    OrderRecord::build(
        entry,
        &display,
        &FormPolicy::default(),
        &ShopDefinitions::default(),
    )
}

#[test]
fn test_record_keeps_input_and_ordered_apart() {
    let record = build(&sample_entry(), DisplayMode::Complete, true);

    assert_eq!(record.input_power.right_spherical, "+2.00");
    assert_eq!(record.input_power.right_cylindrical, "-1.00");
    assert_eq!(record.input_power.right_axis, "90");

    assert!(record.ordered_power.transpose_applied);
    assert_eq!(record.ordered_power.mode, DisplayMode::Complete);
    assert_eq!(record.ordered_power.right_spherical, "+1.00");
    assert_eq!(record.ordered_power.right_cylindrical, "+1.00");
    assert_eq!(record.ordered_power.right_axis, "180");
    assert_eq!(record.ordered_power.right_addition, "+1.50");
}

#[test]
fn test_record_wire_shape() {
    let record = build(&sample_entry(), DisplayMode::Near, false);
    let json: Value = serde_json::to_value(&record).unwrap();

    for key in [
        "customerName",
        "supplierName",
        "lensDescription",
        "urgent",
        "branchName",
        "createdAt",
        "input_power",
        "ordered_power",
    ] {
        assert!(json.get(key).is_some(), "missing key {}", key);
    }
    assert_eq!(json["customerName"], "Asha Rao");
    assert_eq!(json["ordered_power"]["mode"], "near");
    assert_eq!(json["ordered_power"]["transposeApplied"], false);
    assert_eq!(json["ordered_power"]["rightSpherical"], "+3.50");
    assert_eq!(json["ordered_power"]["rightAddition"], "");
    assert_eq!(json["input_power"]["rightAddition"], "+1.50");
    assert!(json["createdAt"].is_null());
}

#[test]
fn test_record_round_trips_through_json() {
    let record = build(&sample_entry(), DisplayMode::Complete, false);
    let json = serde_json::to_string(&record).unwrap();
    let back: OrderRecord = serde_json::from_str(&json).unwrap();
    assert_eq!(back, record);
}

#[test]
fn test_branch_falls_back_to_default() {
    let mut entry = sample_entry();
    assert_eq!(build(&entry, DisplayMode::Complete, false).branch_name, "sadar");
    entry.branch = " 46 ".to_string();
    assert_eq!(build(&entry, DisplayMode::Complete, false).branch_name, "46");
}

#[test]
fn test_summary_lines() {
    let record = build(&sample_entry(), DisplayMode::Complete, false);
    let summary = record.ordered_power.summary();
    assert_eq!(summary.right_line, "R: +2.00 -1.00 × 90°");
    assert_eq!(summary.left_line, "L: -0.50");
    assert_eq!(summary.add_line, "Add: +1.50");
}

#[test]
fn test_summary_of_split_and_empty_values() {
    let ordered = OrderedPower {
        right_addition: "+1.00".to_string(),
        ..Default::default()
    };
    let summary = ordered.summary();
    assert_eq!(summary.right_line, "R: 0.00");
    assert_eq!(summary.add_line, "Add: R:+1.00 L:0.00");
}

#[test]
fn test_delivery_and_transfer() {
    let mut record = build(&sample_entry(), DisplayMode::Complete, false);
    assert!(!record.delivered);

    record.mark_delivered("2026-10-18T10:00:00+00:00");
    assert!(record.delivered);
    assert_eq!(
        record.delivered_at.as_deref(),
        Some("2026-10-18T10:00:00+00:00")
    );

    record.mark_undelivered();
    assert!(!record.delivered);
    assert!(record.delivered_at.is_none());

    record.transfer("46");
    assert_eq!(record.branch_name, "46");
}
