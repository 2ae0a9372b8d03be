mod catalog;
mod cli;
mod commands;
mod loader;
mod model;
mod quotes;
mod util;

use anyhow::Result;
use clap::Parser;
use tracing::error;
use tracing_subscriber::EnvFilter;

use crate::cli::{Cli, Commands};

fn main() {
    init_tracing();

    if let Err(err) = run() {
        error!(error = %err, "command failed");
        for cause in err.chain().skip(1) {
            error!(cause = %cause, "caused by");
        }
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Catalog(args) => commands::catalog::run(args),
        Commands::Frases(args) => commands::frases::run(args),
        Commands::Random(args) => commands::random::run(args),
        Commands::Status(args) => commands::status::run(args),
        Commands::ConvertBooks(args) => commands::convert_books::run(args),
        Commands::ConvertQuotes(args) => commands::convert_quotes::run(args),
    }
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
