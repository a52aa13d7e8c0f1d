use super::ViewArgs;
use crate::reports;
use clap::Args;
use lensforge::config::Config;
use lensforge::error::{LensForgeError, LfResult};
use lensforge::prescription::PrescriptionEntry;
use lensforge::session::OrderSession;
use lensforge::store::{JsonDirStore, OrderStore};
use tracing::{error, info};

#[derive(Args, Debug, Clone)]
pub struct SaveArgs {
    #[command(flatten)]
    pub config: Config,

    #[command(flatten)]
    pub view: ViewArgs,

    /// Directory receiving one JSON document per order.
    #[arg(short, long, default_value = "data/orders")]
    pub store: String,
}

pub fn run(args: &SaveArgs, config: Config) -> LfResult<()> {
    info!("📂 Loading entry: {}", args.view.entry);
    let entry = PrescriptionEntry::load_from_file(&args.view.entry)?;

    let store = JsonDirStore::open(&args.store)?;
    save_with(store, &entry, args, config)
}

fn save_with<S: OrderStore>(
    store: S,
    entry: &PrescriptionEntry,
    args: &SaveArgs,
    config: Config,
) -> LfResult<()> {
    let session = OrderSession::new(config, (), store);
    let display = session.switch_view(entry, args.view.mode, args.view.transpose);

    match session.save(entry) {
        Ok(id) => {
            info!("💾 Order saved with ID: {}", id);
            println!("{}", id);
            Ok(())
        }
        Err(LensForgeError::Validation(report)) => {
            reports::print_validation_report(&report);
            Err(LensForgeError::Validation(report))
        }
        Err(LensForgeError::SaveFailed { source, record }) => {
            error!("Order was not saved; nothing was written. Retry with the same entry.");
            reports::print_display_table(&display);
            reports::print_power_summary(&record.ordered_power.summary());
            Err(LensForgeError::SaveFailed { source, record })
        }
        Err(e) => Err(e),
    }
}
