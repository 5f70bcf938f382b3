//! Tests for the brute-force solver.

use super::*;
use rstest::rstest;
use stopover_core::test_support::ScriptedOracle;

fn wp(index: usize, x: f64, y: f64) -> Waypoint {
    Waypoint::new(index, Coord { x, y }, format!("wp {index}"))
}

/// Start at the origin, end at (10, 0), middles on the y = 1 line.
fn plan(middles: usize) -> TripPlan {
    TripPlan {
        start: wp(0, 0.0, 0.0),
        middles: (1..=middles).map(|i| wp(i, i as f64, 1.0)).collect(),
        end: wp(middles + 1, 10.0, 0.0),
    }
}

fn all_pairs_oracle(plan: &TripPlan, distance_km: f64) -> ScriptedOracle {
    let mut oracle = ScriptedOracle::new();
    let points = plan.points();
    for from in &points {
        for to in &points {
            if from.index != to.index {
                oracle = oracle.leg(from.location, to.location, distance_km);
            }
        }
    }
    oracle
}

#[rstest]
fn direct_plan_issues_one_query_and_one_leg() {
    let plan = plan(0);
    let oracle = all_pairs_oracle(&plan, 4.0);
    let solver = BruteForceSolver::new(oracle);

    let optimal = solver.solve(&plan).expect("direct leg reachable");

    assert_eq!(optimal.legs.len(), 1);
    assert_eq!(optimal.total_distance_km, 4.0);
    assert_eq!(solver.oracle.queries().len(), 1);
}

#[rstest]
fn single_middle_sums_both_legs() {
    let plan = plan(1);
    let (start, middle, end) = (
        plan.start.location,
        plan.middles[0].location,
        plan.end.location,
    );
    let oracle = ScriptedOracle::new()
        .leg(start, middle, 2.0)
        .leg(middle, end, 3.5);
    let solver = BruteForceSolver::new(oracle);

    let optimal = solver.solve(&plan).expect("both legs reachable");

    assert_eq!(optimal.total_distance_km, 5.5);
    let visited: Vec<usize> = optimal.order.iter().map(|wp| wp.index).collect();
    assert_eq!(visited, vec![0, 1, 2]);
}

#[rstest]
fn two_middles_pick_the_cheaper_ordering() {
    let plan = plan(2);
    let (s, m1, m2, e) = (
        plan.start.location,
        plan.middles[0].location,
        plan.middles[1].location,
        plan.end.location,
    );
    // [S, M1, M2, E] totals 7; [S, M2, M1, E] totals 3.
    let oracle = ScriptedOracle::new()
        .leg(s, m1, 1.0)
        .leg(m1, m2, 1.0)
        .leg(m2, e, 5.0)
        .leg(s, m2, 1.0)
        .leg(m2, m1, 1.0)
        .leg(m1, e, 1.0);
    let solver = BruteForceSolver::new(oracle);

    let optimal = solver.solve(&plan).expect("both orderings feasible");

    assert_eq!(optimal.total_distance_km, 3.0);
    let visited: Vec<usize> = optimal.order.iter().map(|wp| wp.index).collect();
    assert_eq!(visited, vec![0, 2, 1, 3]);
}

#[rstest]
fn equal_totals_keep_the_first_generated_ordering() {
    let plan = plan(2);
    let solver = BruteForceSolver::new(all_pairs_oracle(&plan, 1.0));

    let optimal = solver.solve(&plan).expect("all legs priced");

    // Both orderings total 3.0; generation order starts with the identity.
    assert_eq!(optimal.total_distance_km, 3.0);
    let visited: Vec<usize> = optimal.order.iter().map(|wp| wp.index).collect();
    assert_eq!(visited, vec![0, 1, 2, 3]);
}

#[rstest]
fn unreachable_leg_disqualifies_only_orderings_using_it() {
    let plan = plan(2);
    let (s, m1, m2, e) = (
        plan.start.location,
        plan.middles[0].location,
        plan.middles[1].location,
        plan.end.location,
    );
    // M2 -> E missing: the cheap [S, M1, M2, E] ordering is infeasible and
    // the expensive one must win.
    let oracle = ScriptedOracle::new()
        .leg(s, m1, 1.0)
        .leg(m1, m2, 1.0)
        .leg(s, m2, 10.0)
        .leg(m2, m1, 10.0)
        .leg(m1, e, 10.0);
    let solver = BruteForceSolver::new(oracle);

    let optimal = solver.solve(&plan).expect("one ordering remains");

    assert_eq!(optimal.total_distance_km, 30.0);
}

#[rstest]
fn no_feasible_ordering_is_a_terminal_failure() {
    let plan = plan(2);
    // Nothing scripted: every leg is unreachable.
    let solver = BruteForceSolver::new(ScriptedOracle::new());

    let err = solver.solve(&plan).expect_err("no complete route");

    assert_eq!(err, SolveError::NoRouteFound);
}

#[rstest]
#[case(1, 2)]
#[case(2, 6)]
#[case(3, 12)]
#[case(4, 20)]
#[case(5, 30)]
fn queries_are_deduplicated_across_orderings(#[case] middles: usize, #[case] distinct: usize) {
    let plan = plan(middles);
    let solver = BruteForceSolver::new(all_pairs_oracle(&plan, 1.0));

    solver.solve(&plan).expect("all legs priced");

    // 2n boundary legs plus n(n-1) middle-to-middle legs, each priced once
    // no matter how many orderings share it.
    assert_eq!(solver.oracle.queries().len(), distinct);
}
