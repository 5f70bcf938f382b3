//! Facade crate for the Stopover route-ordering engine.
//!
//! This crate re-exports the core domain types and exposes the HTTP oracle
//! client and the local exact solver behind feature flags.

#![forbid(unsafe_code)]

pub use stopover_core::{
    DistanceOracle, Leg, LegQuery, MAX_WAYPOINTS, MIN_WAYPOINTS, OptimalRoute, OracleError,
    PairKey, PlanError, PlanResponse, PlannerSession, Route, RouteSolver, SolveError, TripPlan,
    Waypoint, WaypointStore, WaypointStoreError,
};

#[cfg(feature = "oracle-http")]
pub use stopover_oracle::{
    BackendError, GraphStats, HttpDistanceOracle, HttpDistanceOracleConfig, OracleBuildError,
    RemoteSolver,
};

#[cfg(feature = "solver-local")]
pub use stopover_solver_brute::{BruteForceSolver, Permutations};
