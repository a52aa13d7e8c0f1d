use super::ViewArgs;
use crate::reports;
use clap::Args;
use lensforge::display::compute_display;
use lensforge::error::LfResult;
use lensforge::prescription::PrescriptionEntry;
use lensforge::record::OrderedPower;
use lensforge::validator::validate;
use tracing::info;

#[derive(Args, Debug, Clone)]
pub struct PreviewArgs {
    #[command(flatten)]
    pub view: ViewArgs,
}

/// Live preview: always prints the rows, validation problems are reported
/// alongside rather than blocking.
pub fn run(args: &PreviewArgs) -> LfResult<()> {
    info!("📂 Loading entry: {}", args.view.entry);
    let entry = PrescriptionEntry::load_from_file(&args.view.entry)?;

    let display = compute_display(&entry, args.view.mode, args.view.transpose);
    reports::print_display_table(&display);

    let report = validate(&entry);
    reports::print_validation_report(&report);

    let summary = OrderedPower::from_display(&display).summary();
    reports::print_power_summary(&summary);
    Ok(())
}
