//! Solve command implementation for the Stopover CLI.

use std::io::{BufReader, Write};
use std::time::Duration;

use camino::{Utf8Path, Utf8PathBuf};
use clap::Parser;
use geo::Coord;
use log::debug;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};

use stopover_core::{PlanResponse, PlannerSession, RouteSolver};
use stopover_oracle::{HttpDistanceOracle, HttpDistanceOracleConfig, RemoteSolver};
use stopover_solver_brute::BruteForceSolver;

use crate::{ARG_BASE_URL, ARG_SOLVER, ARG_SOLVE_REQUEST, ARG_TIMEOUT_SECS, CliError, ENV_SOLVE_REQUEST};

/// Which ordering search handles the plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub(crate) enum SolverKind {
    /// Search locally, pricing each pair through the backend.
    #[default]
    Local,
    /// Delegate the whole search to the backend in one request.
    Remote,
}

/// CLI arguments for the `solve` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Order the stops of a trip for the shortest total distance \
                 and print the composed route. The trip is provided as a \
                 JSON file listing two to seven stops; the first is the \
                 start, the last is the destination, and everything between \
                 is reordered freely.",
    about = "Order the stops of a trip and print the composed route"
)]
#[ortho_config(prefix = "STOPOVER")]
pub(crate) struct SolveArgs {
    /// Path to a JSON file containing the trip's stops.
    #[arg(value_name = "path")]
    #[serde(default)]
    pub(crate) request_path: Option<Utf8PathBuf>,
    /// Base URL for the shortest-path backend (e.g. "http://localhost:8000").
    #[arg(long = ARG_BASE_URL, value_name = "url")]
    #[serde(default)]
    pub(crate) base_url: Option<String>,
    /// Per-request timeout in seconds.
    #[arg(long = ARG_TIMEOUT_SECS, value_name = "secs")]
    #[serde(default)]
    pub(crate) timeout_secs: Option<u64>,
    /// Where the ordering search runs.
    #[arg(long = ARG_SOLVER, value_enum, value_name = "kind")]
    #[serde(default)]
    pub(crate) solver: Option<SolverKind>,
}

impl SolveArgs {
    fn into_config(self) -> Result<SolveConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        SolveConfig::try_from(merged)
    }
}

/// Resolved `solve` command configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct SolveConfig {
    /// Path to the JSON request file.
    pub(crate) request_path: Utf8PathBuf,
    /// Base URL for the shortest-path backend.
    pub(crate) base_url: String,
    /// Per-request timeout.
    pub(crate) timeout: Duration,
    /// Which ordering search handles the plan.
    pub(crate) solver: SolverKind,
}

impl SolveConfig {
    pub(crate) fn validate_sources(&self) -> Result<(), CliError> {
        if self.request_path.is_file() {
            Ok(())
        } else {
            Err(CliError::MissingSourceFile {
                field: ARG_SOLVE_REQUEST,
                path: self.request_path.clone(),
            })
        }
    }

    fn http_config(&self) -> HttpDistanceOracleConfig {
        HttpDistanceOracleConfig::new(self.base_url.clone()).with_timeout(self.timeout)
    }
}

impl TryFrom<SolveArgs> for SolveConfig {
    type Error = CliError;

    fn try_from(args: SolveArgs) -> Result<Self, Self::Error> {
        let request_path = args.request_path.ok_or(CliError::MissingArgument {
            field: ARG_SOLVE_REQUEST,
            env: ENV_SOLVE_REQUEST,
        })?;
        let defaults = HttpDistanceOracleConfig::default();
        let base_url = args.base_url.unwrap_or(defaults.base_url);
        let timeout = args
            .timeout_secs
            .map_or(defaults.timeout, Duration::from_secs);
        let solver = args.solver.unwrap_or_default();
        Ok(Self {
            request_path,
            base_url,
            timeout,
            solver,
        })
    }
}

/// One stop of the trip, in the order it was picked.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub(crate) struct RequestPoint {
    /// Latitude in degrees.
    pub(crate) lat: f64,
    /// Longitude in degrees.
    pub(crate) lon: f64,
}

impl From<RequestPoint> for Coord<f64> {
    fn from(point: RequestPoint) -> Self {
        Self {
            x: point.lon,
            y: point.lat,
        }
    }
}

/// The JSON body of a solve request: stops in selection order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct SolveRequest {
    /// Two to seven stops; first is the start, last is the destination.
    pub(crate) waypoints: Vec<RequestPoint>,
}

/// Builds a solver instance for the current solve invocation.
pub(super) trait PlanSolverBuilder {
    fn build(&self, config: &SolveConfig) -> Result<Box<dyn RouteSolver>, CliError>;
}

pub(super) struct BackendSolverBuilder;

impl PlanSolverBuilder for BackendSolverBuilder {
    fn build(&self, config: &SolveConfig) -> Result<Box<dyn RouteSolver>, CliError> {
        let http = config.http_config();
        let build_err = |source| CliError::BuildBackendClient {
            base_url: config.base_url.clone(),
            source,
        };
        match config.solver {
            SolverKind::Local => {
                let oracle = HttpDistanceOracle::with_config(http).map_err(build_err)?;
                Ok(Box::new(BruteForceSolver::new(oracle)))
            }
            SolverKind::Remote => {
                let solver = RemoteSolver::with_config(http).map_err(build_err)?;
                Ok(Box::new(solver))
            }
        }
    }
}

pub(super) fn run_solve(args: SolveArgs) -> Result<(), CliError> {
    let mut stdout = std::io::stdout().lock();
    run_solve_with(args, &BackendSolverBuilder, &mut stdout)
}

pub(super) fn run_solve_with(
    args: SolveArgs,
    builder: &dyn PlanSolverBuilder,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    let response = execute_solve(args, builder)?;
    write_response(writer, &response)
}

fn execute_solve(
    args: SolveArgs,
    builder: &dyn PlanSolverBuilder,
) -> Result<PlanResponse, CliError> {
    let config = args.into_config()?;
    config.validate_sources()?;
    let request = load_request(&config.request_path)?;
    debug!(
        "solving {} stops via {:?} against {}",
        request.waypoints.len(),
        config.solver,
        config.base_url
    );

    let session = PlannerSession::new(builder.build(&config)?);
    for point in &request.waypoints {
        session
            .add_waypoint(Coord::from(*point))
            .map_err(|source| CliError::RejectedWaypoint {
                path: config.request_path.clone(),
                source,
            })?;
    }
    session
        .plan_route()
        .map_err(|source| CliError::Plan { source })
}

/// Loads a JSON-encoded [`SolveRequest`] from disk.
pub(super) fn load_request(path: &Utf8Path) -> Result<SolveRequest, CliError> {
    let file = std::fs::File::open(path.as_std_path()).map_err(|source| CliError::OpenRequest {
        path: path.to_path_buf(),
        source,
    })?;
    let reader = BufReader::new(file);
    serde_json::from_reader(reader).map_err(|source| CliError::ParseRequest {
        path: path.to_path_buf(),
        source,
    })
}

fn write_response(writer: &mut dyn Write, response: &PlanResponse) -> Result<(), CliError> {
    let payload = serde_json::to_string_pretty(response).map_err(CliError::SerializeResponse)?;
    writer
        .write_all(payload.as_bytes())
        .map_err(CliError::WriteOutput)?;
    writer.write_all(b"\n").map_err(CliError::WriteOutput)?;
    Ok(())
}
