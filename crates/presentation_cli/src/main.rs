//! SmartRent CLI
//!
//! Command-line interface to the rental backend and the local utilities.

#![allow(clippy::print_stdout)]

use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use infrastructure::{AppConfig, SmartRent, init_logging};
use presentation_cli::{Cli, execute, log_filter_from_verbosity};
use tracing::debug;

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    let mut config = AppConfig::load_from(cli.config.as_deref())
        .context("Failed to load configuration")?;
    if let Some(url) = cli.url {
        config.api.base_url = url;
    }

    // -v overrides the configured level
    let mut logging = config.logging.clone();
    if cli.verbose > 0 {
        logging.level = log_filter_from_verbosity(cli.verbose).to_string();
    }
    init_logging(&logging)?;

    let (toolkit, _page) = SmartRent::headless(&config)?;
    debug!(?toolkit, "Running command");

    let output = execute(&toolkit, cli.command).await?;
    println!("{}", output.render()?);

    Ok(if output.is_failure() {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    })
}
