//! Tidewise CLI - ingest CSV time series and review the diagnostic checklist.

mod cli;
mod commands;

use clap::Parser;
use cli::{Cli, Commands};
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Commands::Ingest {
            file,
            standalone,
            max_size_mb,
            save_session,
            json,
        } => commands::ingest::run(file, standalone, max_size_mb, save_session, json, cli.verbose),

        Commands::Export {
            file,
            output,
            delimiter,
            standalone,
        } => commands::export::run(file, output, delimiter, standalone, cli.verbose),

        Commands::Inspect { file, json } => commands::inspect::run(file, json, cli.verbose),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Log to stderr; `RUST_LOG` wins over `--verbose`.
fn init_tracing(verbose: bool) {
    let default = if verbose { "tidewise=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
