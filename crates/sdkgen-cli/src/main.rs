#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

mod cli;
mod commands;


use clap::Parser;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::prelude::*;

use cli::{Cli, Command};

/// Environment variable holding the log filter, e.g. `SDKGEN_LOG=debug`.
const LOG_ENV: &str = "SDKGEN_LOG";

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Command::Generate(args) => commands::generate::run(args.into()),
    };

    if let Err(err) = result {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}

fn init_tracing(verbose: bool) {
    let builder = EnvFilter::builder();
    let filter = match std::env::var(LOG_ENV) {
        Ok(directives) => builder.parse_lossy(directives),
        Err(_) if verbose => builder.parse_lossy("info"),
        Err(_) => builder.parse_lossy("warn"),
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .with(filter)
        .init();
}
