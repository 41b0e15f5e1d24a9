//! CLI type definitions
//!
//! This module contains clap command structures that define the CLI interface.

use clap::{Parser, Subcommand};

use super::commands::check::CheckArgs;
use super::commands::flag::FlagArgs;
use super::commands::show::ShowArgs;

#[derive(Parser, Debug)]
#[command(name = "appconfig")]
#[command(about = "Inspect the application's resolved configuration", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output in JSON format
    #[arg(short, long, global = true)]
    pub json: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show every resolved setting and where it came from
    Show(ShowArgs),

    /// Validate the environment and list all issues
    Check(CheckArgs),

    /// Print the documentation table generated from the schema
    Docs,

    /// Report whether a feature flag is enabled
    Flag(FlagArgs),
}
