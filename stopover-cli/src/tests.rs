//! Unit tests for CLI configuration, request parsing and command output.

use std::time::Duration;

use camino::Utf8PathBuf;
use rstest::rstest;
use tempfile::TempDir;

use stopover_core::{Leg, OptimalRoute, RouteSolver, SolveError, TripPlan};
use stopover_oracle::GraphStats;

use crate::graph::{self, GraphInfoArgs, GraphInfoConfig, GraphStatsFetcher};
use crate::solve::{
    self, PlanSolverBuilder, RequestPoint, SolveArgs, SolveConfig, SolveRequest, SolverKind,
};
use crate::{ARG_SOLVE_REQUEST, CliError, ENV_SOLVE_REQUEST};

fn workspace() -> (TempDir, Utf8PathBuf) {
    let tmp = TempDir::new().expect("tempdir");
    let root = Utf8PathBuf::from_path_buf(tmp.path().to_path_buf()).expect("utf-8 workspace");
    (tmp, root)
}

fn write_request(path: &Utf8PathBuf, request: &SolveRequest) {
    let payload = serde_json::to_string_pretty(request).expect("serialize request");
    std::fs::write(path.as_std_path(), payload).expect("write request");
}

#[rstest]
fn converting_solve_without_request_errors() {
    let err = SolveConfig::try_from(SolveArgs::default()).expect_err("missing request");

    match err {
        CliError::MissingArgument { field, env } => {
            assert_eq!(field, ARG_SOLVE_REQUEST);
            assert_eq!(env, ENV_SOLVE_REQUEST);
        }
        other => panic!("expected MissingArgument, found {other:?}"),
    }
}

#[rstest]
fn solve_config_applies_backend_defaults() {
    let args = SolveArgs {
        request_path: Some(Utf8PathBuf::from("trip.json")),
        ..SolveArgs::default()
    };

    let config = SolveConfig::try_from(args).expect("config should build");

    assert_eq!(config.base_url, "http://localhost:8000");
    assert_eq!(config.timeout, Duration::from_secs(30));
    assert_eq!(config.solver, SolverKind::Local);
}

#[rstest]
fn solve_config_honours_overrides() {
    let args = SolveArgs {
        request_path: Some(Utf8PathBuf::from("trip.json")),
        base_url: Some("http://routing.internal:9000".to_owned()),
        timeout_secs: Some(5),
        solver: Some(SolverKind::Remote),
    };

    let config = SolveConfig::try_from(args).expect("config should build");

    assert_eq!(config.base_url, "http://routing.internal:9000");
    assert_eq!(config.timeout, Duration::from_secs(5));
    assert_eq!(config.solver, SolverKind::Remote);
}

#[rstest]
fn validate_sources_reports_missing_request() {
    let (_tmp, root) = workspace();
    let config = SolveConfig {
        request_path: root.join("absent.json"),
        base_url: "http://localhost:8000".to_owned(),
        timeout: Duration::from_secs(30),
        solver: SolverKind::Local,
    };

    let err = config.validate_sources().expect_err("expected failure");

    match err {
        CliError::MissingSourceFile { field, path } => {
            assert_eq!(field, ARG_SOLVE_REQUEST);
            assert_eq!(path, root.join("absent.json"));
        }
        other => panic!("expected MissingSourceFile, found {other:?}"),
    }
}

#[rstest]
fn load_request_decodes_json() {
    let (_tmp, root) = workspace();
    let path = root.join("trip.json");
    let request = SolveRequest {
        waypoints: vec![
            RequestPoint {
                lat: 37.21,
                lon: 28.36,
            },
            RequestPoint {
                lat: 37.25,
                lon: 28.40,
            },
        ],
    };
    write_request(&path, &request);

    let decoded = solve::load_request(&path).expect("request should decode");

    assert_eq!(decoded, request);
}

#[rstest]
fn load_request_rejects_invalid_json() {
    let (_tmp, root) = workspace();
    let path = root.join("trip.json");
    std::fs::write(path.as_std_path(), "{ not valid json").expect("write request");

    let err = solve::load_request(&path).expect_err("invalid json should error");

    match err {
        CliError::ParseRequest { path: seen, .. } => assert_eq!(seen, path),
        other => panic!("expected ParseRequest, found {other:?}"),
    }
}

#[rstest]
fn load_request_missing_file_is_an_open_error() {
    let (_tmp, root) = workspace();
    let path = root.join("trip.json");

    let err = solve::load_request(&path).expect_err("missing request should error");

    match err {
        CliError::OpenRequest { path: seen, .. } => assert_eq!(seen, path),
        other => panic!("expected OpenRequest, found {other:?}"),
    }
}

/// Solver that answers every plan with its direct start-to-end leg.
struct DirectLegSolver;

impl RouteSolver for DirectLegSolver {
    fn solve(&self, plan: &TripPlan) -> Result<OptimalRoute, SolveError> {
        let leg = Leg::new(
            plan.start.location,
            plan.end.location,
            2.0,
            vec![plan.start.location, plan.end.location],
            2,
        );
        Ok(OptimalRoute {
            order: vec![plan.start.clone(), plan.end.clone()],
            legs: vec![leg],
            total_distance_km: 2.0,
            total_nodes: 2,
        })
    }
}

struct DirectLegBuilder;

impl PlanSolverBuilder for DirectLegBuilder {
    fn build(&self, _config: &SolveConfig) -> Result<Box<dyn RouteSolver>, CliError> {
        Ok(Box::new(DirectLegSolver))
    }
}

#[rstest]
fn run_solve_prints_the_plan_response() {
    let (_tmp, root) = workspace();
    let path = root.join("trip.json");
    write_request(
        &path,
        &SolveRequest {
            waypoints: vec![
                RequestPoint {
                    lat: 37.21,
                    lon: 28.36,
                },
                RequestPoint {
                    lat: 37.25,
                    lon: 28.40,
                },
            ],
        },
    );
    let args = SolveArgs {
        request_path: Some(path),
        ..SolveArgs::default()
    };
    let mut output = Vec::new();

    solve::run_solve_with(args, &DirectLegBuilder, &mut output).expect("solve should succeed");

    let json: serde_json::Value = serde_json::from_slice(&output).expect("output should be JSON");
    assert_eq!(json["route"]["total_distance_km"], 2.0);
    let labels: Vec<&str> = json["order"]
        .as_array()
        .expect("order should be an array")
        .iter()
        .map(|wp| wp["label"].as_str().expect("label should be a string"))
        .collect();
    assert_eq!(labels, vec!["start", "stop 1"]);
}

struct FixedStatsFetcher;

impl GraphStatsFetcher for FixedStatsFetcher {
    fn fetch(&self, _config: &GraphInfoConfig) -> Result<GraphStats, CliError> {
        Ok(GraphStats {
            node_count: 1289,
            edge_count: 3410,
        })
    }
}

#[rstest]
fn run_graph_info_prints_the_counters() {
    let mut output = Vec::new();

    graph::run_graph_info_with(GraphInfoArgs::default(), &FixedStatsFetcher, &mut output)
        .expect("graph-info should succeed");

    let json: serde_json::Value = serde_json::from_slice(&output).expect("output should be JSON");
    assert_eq!(json["node_count"], 1289);
    assert_eq!(json["edge_count"], 3410);
}
