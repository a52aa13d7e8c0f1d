pub mod preview;
pub mod render;
pub mod save;

use clap::Args;
use lensforge::prescription::DisplayMode;

/// Entry file plus the view it should be shown in.
#[derive(Args, Debug, Clone)]
pub struct ViewArgs {
    /// JSON file holding the prescription entry.
    #[arg(short, long)]
    pub entry: String,

    #[arg(short, long, value_enum, default_value_t = DisplayMode::Complete)]
    pub mode: DisplayMode,

    #[arg(long, default_value_t = false)]
    pub transpose: bool,
}
