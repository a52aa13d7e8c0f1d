use super::ViewArgs;
use crate::reports;
use clap::Args;
use lensforge::config::Config;
use lensforge::error::{LensForgeError, LfResult};
use lensforge::prescription::PrescriptionEntry;
use lensforge::render::FontRasterizer;
use lensforge::session::OrderSession;
use std::fs;
use tracing::info;

#[derive(Args, Debug, Clone)]
pub struct RenderArgs {
    #[command(flatten)]
    pub config: Config,

    #[command(flatten)]
    pub view: ViewArgs,

    /// Where to write the PNG.
    #[arg(short, long, default_value = "prescription.png")]
    pub out: String,
}

pub fn run(args: &RenderArgs, config: Config) -> LfResult<()> {
    info!("📂 Loading entry: {}", args.view.entry);
    let entry = PrescriptionEntry::load_from_file(&args.view.entry)?;

    let rasterizer = FontRasterizer::from_config(&config.layout)?;
    let session = OrderSession::new(config, rasterizer, ());
    let display = session.switch_view(&entry, args.view.mode, args.view.transpose);
    reports::print_display_table(&display);

    let image = match session.generate(&entry) {
        Ok(image) => image,
        Err(LensForgeError::Validation(report)) => {
            reports::print_validation_report(&report);
            return Err(LensForgeError::Validation(report));
        }
        Err(e) => return Err(e),
    };

    fs::write(&args.out, &image.bytes)?;
    info!(
        "🖼️  Wrote {} ({}x{}, {})",
        args.out, image.width, image.height, image.content_type
    );
    Ok(())
}
