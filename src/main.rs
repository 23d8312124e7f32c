mod adapters;
mod cli;
mod config;
mod core;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands};

fn main() {
    let args = Cli::parse();
    init_tracing(args.verbose, args.quiet);

    let dir = cli::context::kintai_dir(args.dir.as_deref());

    let result = match &args.command {
        Commands::Init { channel } => cli::commands::init::execute(&dir, channel),
        Commands::Sync => cli::commands::sync::execute(&dir),
        Commands::Query {
            authors,
            since,
            summary,
        } => cli::commands::query::execute(&dir, authors, since.as_deref(), *summary),
        Commands::Classify { text } => cli::commands::classify::execute(text),
        Commands::Categories => cli::commands::categories::execute(),
        Commands::Status => cli::commands::status::execute(&dir),
    };

    if let Err(e) = result {
        cli::output::error(&format!("Error: {e}"));
        std::process::exit(1);
    }
}

/// Diagnostics go to stderr. `RUST_LOG` wins over the flags.
fn init_tracing(verbose: bool, quiet: bool) {
    let default_level = if verbose {
        "kintai=debug"
    } else if quiet {
        "error"
    } else {
        "warn"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
