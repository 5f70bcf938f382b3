//! Graph-info command implementation for the Stopover CLI.

use std::io::Write;
use std::time::Duration;

use clap::Parser;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};

use stopover_oracle::{GraphStats, HttpDistanceOracle, HttpDistanceOracleConfig};

use crate::{ARG_BASE_URL, ARG_TIMEOUT_SECS, CliError};

/// CLI arguments for the `graph-info` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(about = "Print the backend's routing graph size counters")]
#[ortho_config(prefix = "STOPOVER")]
pub(crate) struct GraphInfoArgs {
    /// Base URL for the shortest-path backend (e.g. "http://localhost:8000").
    #[arg(long = ARG_BASE_URL, value_name = "url")]
    #[serde(default)]
    pub(crate) base_url: Option<String>,
    /// Per-request timeout in seconds.
    #[arg(long = ARG_TIMEOUT_SECS, value_name = "secs")]
    #[serde(default)]
    pub(crate) timeout_secs: Option<u64>,
}

impl GraphInfoArgs {
    fn into_config(self) -> Result<GraphInfoConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        Ok(GraphInfoConfig::from(merged))
    }
}

/// Resolved `graph-info` command configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct GraphInfoConfig {
    /// Base URL for the shortest-path backend.
    pub(crate) base_url: String,
    /// Per-request timeout.
    pub(crate) timeout: Duration,
}

impl From<GraphInfoArgs> for GraphInfoConfig {
    fn from(args: GraphInfoArgs) -> Self {
        let defaults = HttpDistanceOracleConfig::default();
        Self {
            base_url: args.base_url.unwrap_or(defaults.base_url),
            timeout: args
                .timeout_secs
                .map_or(defaults.timeout, Duration::from_secs),
        }
    }
}

/// Fetches graph counters for the current invocation.
pub(super) trait GraphStatsFetcher {
    fn fetch(&self, config: &GraphInfoConfig) -> Result<GraphStats, CliError>;
}

pub(super) struct BackendStatsFetcher;

impl GraphStatsFetcher for BackendStatsFetcher {
    fn fetch(&self, config: &GraphInfoConfig) -> Result<GraphStats, CliError> {
        let http = HttpDistanceOracleConfig::new(config.base_url.clone())
            .with_timeout(config.timeout);
        let oracle =
            HttpDistanceOracle::with_config(http).map_err(|source| CliError::BuildBackendClient {
                base_url: config.base_url.clone(),
                source,
            })?;
        Ok(oracle.graph_stats()?)
    }
}

pub(super) fn run_graph_info(args: GraphInfoArgs) -> Result<(), CliError> {
    let mut stdout = std::io::stdout().lock();
    run_graph_info_with(args, &BackendStatsFetcher, &mut stdout)
}

pub(super) fn run_graph_info_with(
    args: GraphInfoArgs,
    fetcher: &dyn GraphStatsFetcher,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    let config = args.into_config()?;
    let stats = fetcher.fetch(&config)?;
    let payload = serde_json::to_string_pretty(&stats).map_err(CliError::SerializeResponse)?;
    writer
        .write_all(payload.as_bytes())
        .map_err(CliError::WriteOutput)?;
    writer.write_all(b"\n").map_err(CliError::WriteOutput)?;
    Ok(())
}
