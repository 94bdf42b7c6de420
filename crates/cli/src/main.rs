#![warn(clippy::all, clippy::pedantic)]

mod commands;

use anyhow::Result;

use clap::{Parser, Subcommand};

use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use crate::commands::spend::Spend;
use crate::commands::template::Template;

/// Command-line entrypoint for the Equity contract playground CLI.
#[derive(Parser, Debug)]
#[command(name = "equity-cli", version, about = "Equity contract input and witness utilities")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Top-level subcommand groups.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Compiled-template utilities
    Template {
        #[command(subcommand)]
        template: Box<Template>,
    },
    /// Spend-flow utilities
    Spend {
        #[command(subcommand)]
        spend: Box<Spend>,
    },
}

fn main() -> Result<()> {
    logging_init();

    let parsed = Cli::parse();

    match parsed.command {
        Commands::Template { template } => template.handle(),
        Commands::Spend { spend } => spend.handle(),
    }
}

fn logging_init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true))
        .with(filter)
        .init();
}
