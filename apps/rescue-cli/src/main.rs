//! # rescue-cli
//!
//! Command-line interface for the disaster-response rescue agent.
//!
//! - `rescue simulate` — run the sensor/agent loop and print the summary
//! - `rescue transitions` — print the agent's static transition table

mod commands;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

/// Disaster-response rescue agent simulator.
#[derive(Parser)]
#[command(
    name = "rescue",
    version,
    long_version = concat!(
        env!("CARGO_PKG_VERSION"),
        " (",
        env!("RESCUE_GIT_HASH"),
        " ",
        env!("RESCUE_BUILD_DATE"),
        ")"
    ),
    about
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the scan/response simulation.
    Simulate(commands::simulate::SimulateArgs),
    /// Show the agent's state transition table.
    Transitions,
}

fn main() -> anyhow::Result<()> {
    // Diagnostics go to stderr so they don't interleave with the narration on stdout.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env()
                .add_directive("rescue_goal=info".parse()?)
                .add_directive("rescue_sim=info".parse()?),
        )
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();

    let cli = Cli::parse();

    match &cli.command {
        Commands::Simulate(args) => commands::simulate::execute(args),
        Commands::Transitions => commands::transitions::execute(),
    }
}
