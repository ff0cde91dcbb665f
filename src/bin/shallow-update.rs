//! shallow-update CLI Binary
//!
//! Decodes the shallow/unshallow section of a captured pkt-line stream.

use anyhow::Context;
use clap::Parser;
use shallow_update::logging::init_logging;
use shallow_update::tooling::cli::{Cli, CliContext};
use std::process;

fn run(cli: &Cli) -> anyhow::Result<String> {
    let context = CliContext::new(cli.config.clone()).context("loading configuration")?;

    init_logging(Some(&context.config().logging), &cli.log_overrides())
        .context("initializing logging")?;

    let output = context.execute(&cli.command)?;
    Ok(output)
}

fn main() {
    let cli = Cli::parse();

    match run(&cli) {
        Ok(output) => {
            println!("{}", output);
        }
        Err(e) => {
            eprintln!("Error: {:#}", e);
            process::exit(1);
        }
    }
}
