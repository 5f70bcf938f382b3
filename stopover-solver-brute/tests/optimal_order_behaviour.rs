//! End-to-end ordering behaviour through the planner session.

use geo::Coord;
use rstest::rstest;
use stopover_core::test_support::ScriptedOracle;
use stopover_core::{PlanError, PlannerSession, RouteSolver, SolveError, WaypointStore};
use stopover_solver_brute::BruteForceSolver;

const START: Coord<f64> = Coord { x: 0.0, y: 0.0 };
const END: Coord<f64> = Coord { x: 10.0, y: 0.0 };
const M1: Coord<f64> = Coord { x: 1.0, y: 1.0 };
const M2: Coord<f64> = Coord { x: 2.0, y: 1.0 };

fn session(oracle: ScriptedOracle) -> PlannerSession<BruteForceSolver<ScriptedOracle>> {
    PlannerSession::new(BruteForceSolver::new(oracle))
}

#[rstest]
fn start_and_end_alone_produce_the_direct_route() {
    let oracle = ScriptedOracle::new().leg(START, END, 12.5);
    let session = session(oracle);
    session.add_waypoint(START).expect("capacity available");
    session.add_waypoint(END).expect("capacity available");

    let response = session.plan_route().expect("direct leg reachable");

    assert_eq!(response.route.segments.len(), 1);
    assert_eq!(response.route.total_distance_km, 12.5);
    let labels: Vec<&str> = response.order.iter().map(|wp| wp.label.as_str()).collect();
    assert_eq!(labels, vec!["start", "stop 1"]);
}

#[rstest]
fn one_stop_route_sums_its_two_legs() {
    let oracle = ScriptedOracle::new().leg(START, M1, 2.0).leg(M1, END, 3.0);
    let session = session(oracle);
    for point in [START, M1, END] {
        session.add_waypoint(point).expect("capacity available");
    }

    let response = session.plan_route().expect("both legs reachable");

    assert_eq!(response.route.segments.len(), 2);
    assert_eq!(response.route.total_distance_km, 5.0);
}

#[rstest]
fn cheaper_ordering_wins_over_selection_order() {
    // Visiting M1 first costs 7; visiting M2 first costs 3.
    let oracle = ScriptedOracle::new()
        .leg(START, M1, 1.0)
        .leg(M1, M2, 1.0)
        .leg(M2, END, 5.0)
        .leg(START, M2, 1.0)
        .leg(M2, M1, 1.0)
        .leg(M1, END, 1.0);
    let session = session(oracle);
    for point in [START, M1, M2, END] {
        session.add_waypoint(point).expect("capacity available");
    }

    let response = session.plan_route().expect("both orderings feasible");

    assert_eq!(response.route.total_distance_km, 3.0);
    let visited: Vec<usize> = response.order.iter().map(|wp| wp.index).collect();
    assert_eq!(visited, vec![0, 2, 1, 3]);
    // The reported trace is the segment polylines laid end to end.
    let stitched: Vec<Coord<f64>> = response
        .route
        .segments
        .iter()
        .flat_map(|leg| leg.polyline.iter().copied())
        .collect();
    assert_eq!(response.route.trace, stitched);
}

#[rstest]
fn isolated_stop_fails_the_whole_plan() {
    // M2 has no priced legs at all, so every ordering is infeasible.
    let oracle = ScriptedOracle::new()
        .leg(START, M1, 1.0)
        .leg(M1, END, 1.0)
        .leg(START, END, 2.0);
    let session = session(oracle);
    for point in [START, M1, M2, END] {
        session.add_waypoint(point).expect("capacity available");
    }

    let err = session.plan_route().expect_err("no complete route exists");

    assert_eq!(err, PlanError::Solve(SolveError::NoRouteFound));
}

#[rstest]
fn shared_legs_are_priced_once_per_plan() {
    let mut oracle = ScriptedOracle::new();
    for from in [START, M1, M2, END] {
        for to in [START, M1, M2, END] {
            if from != to {
                oracle = oracle.leg(from, to, 1.0);
            }
        }
    }
    let solver = BruteForceSolver::new(oracle);
    let mut store = WaypointStore::default();
    for point in [START, M1, M2, END] {
        store.add(point).expect("capacity available");
    }
    let plan = store.snapshot().expect("enough waypoints");

    solver.solve(&plan).expect("all legs priced");

    // Two orderings share six distinct directed pairs between them.
    assert_eq!(solver.oracle().queries().len(), 6);
}
