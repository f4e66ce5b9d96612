//! Testboard CLI -- command-line front end for the report pipeline.

mod cli;
mod commands;
mod error;
mod logging;
mod output;

use clap::Parser;
use colored::Colorize;
use tracing::debug;

use testboard_core::config::GeneralConfig;

use crate::cli::{Cli, Commands};
use crate::error::CliError;
use crate::output::OutputWriter;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        eprintln!("{} {}", "error:".red().bold(), e);
        std::process::exit(e.exit_code());
    }
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let writer = OutputWriter::new(cli.output);

    // `config` reports loading problems itself, so it starts with default logging.
    let config = match cli.command {
        Commands::Config(_) => None,
        _ => Some(commands::load_config(&cli.config).await?),
    };
    let general = config
        .as_ref()
        .map(|c| c.general.clone())
        .unwrap_or_else(GeneralConfig::default);
    logging::init_tracing(&general, cli.log_level.as_deref())
        .map_err(|e| CliError::Config(format!("{e:#}")))?;

    testboard_core::metrics::describe_all();
    debug!(config = %cli.config.display(), "testboard starting");

    match (cli.command, config) {
        (Commands::Config(args), _) => commands::config::execute(args, &cli.config, &writer).await,
        (Commands::Generate(args), Some(config)) => {
            commands::generate::execute(args, &config, &writer).await
        }
        (Commands::Render(args), Some(config)) => {
            commands::render::execute(args, &config, &writer).await
        }
        (Commands::Summary(args), Some(config)) => {
            commands::summary::execute(args, &config, &writer).await
        }
        (_, None) => Err(CliError::Config("configuration was not loaded".to_owned())),
    }
}
