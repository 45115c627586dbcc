//! npmgen CLI library

#![forbid(unsafe_code)]
#![allow(clippy::missing_errors_doc)]

pub mod commands;

use clap::{Parser, Subcommand};
use npmgen::observability::Verbosity;

pub use commands::{GenerateCommand, Outcome};

/// Command-line interface
#[derive(Debug, Parser)]
#[command(name = "npmgen")]
#[command(version)]
#[command(about = "Scaffold npm projects with babel and eslint preconfigured", long_about = None)]
pub struct Cli {
    /// Increase log output (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Only log errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Command to run
    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Log verbosity selected by the flags
    #[must_use]
    pub const fn verbosity(&self) -> Verbosity {
        Verbosity::from_flags(self.quiet, self.verbose)
    }
}

/// Available commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Generate a new project
    Generate(GenerateCommand),
}

/// Run the parsed command
pub async fn run(cli: Cli) -> anyhow::Result<Outcome> {
    match cli.command {
        Commands::Generate(command) => command.execute().await,
    }
}
