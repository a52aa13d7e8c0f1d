use comfy_table::presets::ASCII_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use lensforge::display::DerivedDisplay;
use lensforge::record::PowerSummary;
use lensforge::render::layout::EMPTY_CELL;
use lensforge::validator::ValidationReport;

pub fn print_display_table(display: &DerivedDisplay) {
    println!(
        "\nView: {}{}",
        display.mode,
        if display.transpose { " (transposed)" } else { "" }
    );

    let mut table = Table::new();
    table
        .load_preset(ASCII_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);

    table.add_row(vec![
        Cell::new("Eye").add_attribute(Attribute::Bold),
        Cell::new("Spherical").add_attribute(Attribute::Bold),
        Cell::new("Cylindrical").add_attribute(Attribute::Bold),
        Cell::new("Axis").add_attribute(Attribute::Bold),
    ]);

    let mut shown = 0;
    for row in display.rows_with_data() {
        let axis = Cell::new(or_dash(&row.axis)).set_alignment(CellAlignment::Right);
        let axis = if row.axis_error { axis.fg(Color::Red) } else { axis };
        table.add_row(vec![
            Cell::new(&row.label),
            Cell::new(or_dash(&row.spherical)).set_alignment(CellAlignment::Right),
            Cell::new(or_dash(&row.cylindrical)).set_alignment(CellAlignment::Right),
            axis,
        ]);
        shown += 1;
    }
    if shown == 0 {
        table.add_row(vec!["(no eye data)", "", "", ""]);
    }

    let addition = &display.addition;
    if addition.should_display {
        let cells = if addition.is_combined() {
            vec![format!("{} (Both Eyes)", addition.right), String::new()]
        } else {
            vec![
                format!("{} (R)", or_dash(&addition.right)),
                format!("{} (L)", or_dash(&addition.left)),
            ]
        };
        table.add_row(vec![
            Cell::new("ADDITION").fg(Color::Cyan),
            Cell::new(&cells[0]),
            Cell::new(&cells[1]),
            Cell::new(""),
        ]);
    }
    println!("{}", table);
}

pub fn print_validation_report(report: &ValidationReport) {
    if report.is_valid() {
        println!("✅ Entry is valid.");
        return;
    }
    let mut table = Table::new();
    table.load_preset(ASCII_FULL);
    table.add_row(vec![
        Cell::new("Field").add_attribute(Attribute::Bold),
        Cell::new("Problem").add_attribute(Attribute::Bold),
    ]);
    for (field, message) in report.errors() {
        table.add_row(vec![Cell::new(field.to_string()), Cell::new(message).fg(Color::Red)]);
    }
    println!("\n⚠️  {} validation problem(s):", report.len());
    println!("{}", table);
}

pub fn print_power_summary(summary: &PowerSummary) {
    println!("\nOrdered Power:");
    println!("  {}", summary.right_line);
    println!("  {}", summary.left_line);
    println!("  {}", summary.add_line);
}

fn or_dash(s: &str) -> &str {
    if s.is_empty() {
        EMPTY_CELL
    } else {
        s
    }
}
