//! Core domain types for the Stopover route-ordering engine.
//!
//! The engine takes a fixed start point, a fixed end point and a small set of
//! intermediate waypoints, asks an external shortest-path service to price
//! each candidate leg, and stitches the cheapest visiting order into one
//! continuous route. This crate holds the pieces shared by every deployment:
//! the waypoint selection list, the oracle and solver contracts, route
//! composition, and the planning session that ties them together.

pub mod leg;
pub mod oracle;
pub mod route;
pub mod session;
pub mod solver;
pub mod store;
pub mod waypoint;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use leg::{Leg, PairKey};
pub use oracle::{DistanceOracle, LegQuery, OracleError};
pub use route::{OptimalRoute, Route};
pub use session::{PlanError, PlanResponse, PlannerSession};
pub use solver::{RouteSolver, SolveError};
pub use store::{MAX_WAYPOINTS, MIN_WAYPOINTS, TripPlan, WaypointStore, WaypointStoreError};
pub use waypoint::Waypoint;
