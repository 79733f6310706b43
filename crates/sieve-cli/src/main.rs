//! Sieve CLI - normalize delimited exports and indicator documents.

mod cli;
mod commands;
mod config;

use clap::Parser;
use cli::{Cli, Commands};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = match config::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    let result = match cli.command {
        Commands::Aggregate {
            file,
            start,
            end,
            convention,
            default_convention,
            delimiter,
            format,
            output,
            fill_gaps,
        } => commands::aggregate::run(
            commands::aggregate::AggregateArgs {
                file,
                start,
                end,
                convention,
                default_convention,
                delimiter,
                format,
                output,
                fill_gaps,
            },
            config,
            cli.verbose,
        ),

        Commands::Inspect {
            file,
            delimiter,
            json,
        } => commands::inspect::run(file, delimiter, json, config),

        Commands::Extract {
            file,
            id,
            list,
            json,
        } => commands::extract::run(file, id, list, json, cli.verbose),
    };

    match result {
        Ok(commands::Outcome::Done) => {}
        Ok(commands::Outcome::NotFound) => std::process::exit(2),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}
