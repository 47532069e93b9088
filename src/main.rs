// src/main.rs

use clap::Parser;
use tracing::error;
use tracing_subscriber::EnvFilter;

mod cli;

use cli::Cli;

fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("{level},rusqlite=warn")));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = cli::run(cli) {
        error!("{}", e);
        std::process::exit(1);
    }
}
