use clap::{ArgMatches, CommandFactory, FromArgMatches, Parser, Subcommand};
use lensforge::config::Config;
use lensforge::error::LfResult;
use std::process;
use tracing::{error, info};

mod cmd;
mod reports;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// JSON file with layout, form and shop settings.
    #[arg(global = true, long = "config")]
    config_file: Option<String>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    Preview(cmd::preview::PreviewArgs),
    Render(cmd::render::RenderArgs),
    Save(cmd::save::SaveArgs),
}

fn main() {
    tracing_subscriber::fmt::init();

    // Raw matches tell typed flags apart from clap defaults.
    let matches = Cli::command().get_matches();
    let cli = Cli::from_arg_matches(&matches).unwrap_or_else(|e| e.exit());

    info!("🚀 Initializing LensForge...");

    let result = match &cli.command {
        Commands::Preview(args) => cmd::preview::run(args),
        Commands::Render(args) => resolve_config(&cli, &args.config, &matches, "render")
            .and_then(|config| cmd::render::run(args, config)),
        Commands::Save(args) => resolve_config(&cli, &args.config, &matches, "save")
            .and_then(|config| cmd::save::run(args, config)),
    };

    if let Err(e) = result {
        error!("❌ {}", e);
        process::exit(1);
    }
}

/// File values form the base; flags typed on the command line win.
fn resolve_config(
    cli: &Cli,
    cli_config: &Config,
    matches: &ArgMatches,
    subcommand: &str,
) -> LfResult<Config> {
    let config = match (&cli.config_file, matches.subcommand_matches(subcommand)) {
        (Some(path), Some(sub_matches)) => {
            info!("⚙️  Loading config from: {}", path);
            let mut file_config = Config::load_from_file(path)?;
            file_config.merge_from_cli(cli_config, sub_matches);
            file_config
        }
        _ => cli_config.clone(),
    };
    config.check()?;
    Ok(config)
}
