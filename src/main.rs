// Main entry point for browser-junit

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};
use tracing::info;

use browser_junit::cli::{Cli, Commands};
use browser_junit::commands;
use browser_junit::config::Config;
use browser_junit::logging;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    if cli.verbose {
        info!("Starting browser-junit v{}", env!("CARGO_PKG_VERSION"));
    }

    if let Some(path) = &cli.init_config {
        return commands::handle_init_config(path);
    }

    // Explicit config files must parse; implicit lookup falls back to defaults
    let config = match &cli.config_file {
        Some(path) => Config::read(path)
            .with_context(|| format!("Failed to load configuration: {}", path.display()))?,
        None => Config::load().unwrap_or_default(),
    };

    if cli.config {
        println!("Current configuration:\n");
        print!("{}", config.to_toml());
        return Ok(());
    }

    match &cli.command {
        Some(Commands::Replay(args)) => commands::handle_replay(args, config).await,
        None => {
            Cli::command().print_help()?;
            Ok(())
        }
    }
}
