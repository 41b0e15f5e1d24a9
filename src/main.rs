//! appconfig CLI entry point.

use clap::Parser;

use appconfig::cli::commands::{check, docs, flag, show};
use appconfig::cli::{Cli, Commands};
use appconfig::config;
use appconfig::infrastructure::logging::{error, LogConfig, LoggerImpl};

fn main() {
    let cli = Cli::parse();

    let store = config::global();
    let log_config = store.get().map(LogConfig::from).unwrap_or_default();
    if let Err(err) = LoggerImpl::init(&log_config) {
        eprintln!("{err:#}");
    }
    match store.load() {
        Ok(resolution) => resolution.log_diagnostics(),
        Err(err) => error!(error = %err, "Configuration failed to resolve"),
    }

    let result = match &cli.command {
        Commands::Show(args) => show::execute(args, store, cli.json),
        Commands::Check(args) => check::execute(args, store, cli.json),
        Commands::Docs => docs::execute(store.loader().schema(), cli.json),
        Commands::Flag(args) => flag::execute(args, store, cli.json),
    };

    if let Err(err) = result {
        appconfig::cli::handle_error(err, cli.json);
    }
}
