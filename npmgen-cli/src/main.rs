//! npmgen CLI tool

#![forbid(unsafe_code)]

use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use npmgen_cli_lib::Cli;

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    npmgen::observability::init(cli.verbosity())?;

    let outcome = npmgen_cli_lib::run(cli).await?;
    Ok(outcome.exit_code())
}
