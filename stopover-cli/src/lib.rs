//! Command-line interface for the Stopover route planner.
#![forbid(unsafe_code)]

use clap::{Parser, Subcommand};

mod error;
mod graph;
mod solve;

pub use error::CliError;

pub(crate) const ARG_SOLVE_REQUEST: &str = "request";
pub(crate) const ARG_BASE_URL: &str = "base-url";
pub(crate) const ARG_TIMEOUT_SECS: &str = "timeout-secs";
pub(crate) const ARG_SOLVER: &str = "solver";
pub(crate) const ENV_SOLVE_REQUEST: &str = "STOPOVER_CMDS_SOLVE_REQUEST_PATH";

/// Run the Stopover CLI with the current process arguments and environment.
///
/// # Errors
///
/// Returns a [`CliError`] when argument parsing, configuration layering or
/// the requested command fails.
pub fn run() -> Result<(), CliError> {
    let _ = env_logger::try_init();
    let cli = Cli::try_parse().map_err(CliError::ArgumentParsing)?;
    match cli.command {
        Command::Solve(args) => solve::run_solve(args),
        Command::GraphInfo(args) => graph::run_graph_info(args),
    }
}

#[derive(Debug, Parser)]
#[command(
    name = "stopover",
    about = "Plan the shortest multi-stop route through a road network backend",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Order the stops of a trip and print the composed route.
    Solve(solve::SolveArgs),
    /// Print the backend's routing graph size counters.
    GraphInfo(graph::GraphInfoArgs),
}

#[cfg(test)]
mod tests;
