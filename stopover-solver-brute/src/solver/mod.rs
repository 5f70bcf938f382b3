//! Exhaustive search over middle-waypoint orderings.

use std::collections::{HashMap, HashSet};

use geo::Coord;
use log::debug;
use stopover_core::{
    DistanceOracle, Leg, LegQuery, OptimalRoute, PairKey, RouteSolver, SolveError, TripPlan,
    Waypoint,
};

use crate::permute::Permutations;

/// Exact solver evaluating every ordering of a plan's middle waypoints.
///
/// The solver first collects the deduplicated set of ordered pairs any
/// candidate ordering can need and prices them in a single oracle batch, so
/// every leg has resolved before any ordering is judged and the same leg is
/// never priced twice. It then walks the orderings in generation order,
/// keeping the strictly cheaper one; an ordering containing an unreachable
/// leg totals infinite and can never win.
///
/// Complexity is `O(n! * (n+1))` leg lookups over `n` middles. That is the
/// point: the selection UI caps `n` at five, and at that size the exact
/// optimum is cheaper than being clever. Larger plans need a different
/// algorithm, not a bigger budget.
#[derive(Debug)]
pub struct BruteForceSolver<O> {
    oracle: O,
}

impl<O: DistanceOracle> BruteForceSolver<O> {
    /// Construct a solver over the given oracle.
    pub fn new(oracle: O) -> Self {
        Self { oracle }
    }

    /// Borrow the underlying oracle.
    pub fn oracle(&self) -> &O {
        &self.oracle
    }

    /// Every ordered pair some candidate ordering needs, deduplicated.
    ///
    /// With at least one middle this is start-to-middle, middle-to-end and
    /// middle-to-middle in both directions; the direct start-to-end pair
    /// only exists for the degenerate plan without middles.
    fn leg_queries(plan: &TripPlan) -> Vec<LegQuery> {
        let mut seen: HashSet<PairKey> = HashSet::new();
        let mut queries: Vec<LegQuery> = Vec::new();
        let mut push = |from: Coord<f64>, to: Coord<f64>| {
            if seen.insert(PairKey::new(from, to)) {
                queries.push((from, to));
            }
        };

        if plan.middles.is_empty() {
            push(plan.start.location, plan.end.location);
            return queries;
        }
        for middle in &plan.middles {
            push(plan.start.location, middle.location);
            push(middle.location, plan.end.location);
        }
        for from in &plan.middles {
            for to in &plan.middles {
                if from.index != to.index {
                    push(from.location, to.location);
                }
            }
        }
        queries
    }
}

impl<O: DistanceOracle> RouteSolver for BruteForceSolver<O> {
    fn solve(&self, plan: &TripPlan) -> Result<OptimalRoute, SolveError> {
        let queries = Self::leg_queries(plan);
        let legs = self
            .oracle
            .fetch_legs(&queries)
            .map_err(|err| SolveError::Backend {
                message: err.to_string(),
            })?;
        let priced: HashMap<PairKey, Leg> = queries
            .iter()
            .zip(legs)
            .map(|(&(from, to), leg)| (PairKey::new(from, to), leg))
            .collect();

        let mut evaluated = 0usize;
        let mut best: Option<(Vec<usize>, f64)> = None;
        for ordering in Permutations::new(plan.middles.len()) {
            evaluated += 1;
            let total = ordering_total(plan, &ordering, &priced);
            if total.is_finite() && best.as_ref().is_none_or(|(_, cost)| total < *cost) {
                best = Some((ordering, total));
            }
        }
        debug!(
            "evaluated {evaluated} orderings over {} distinct legs",
            priced.len()
        );

        let Some((winner, total_distance_km)) = best else {
            return Err(SolveError::NoRouteFound);
        };

        let order = visiting_order(plan, &winner);
        let mut route_legs: Vec<Leg> = Vec::with_capacity(order.len().saturating_sub(1));
        for pair in order.windows(2) {
            let (Some(from), Some(to)) = (pair.first(), pair.get(1)) else {
                continue;
            };
            let leg = priced
                .get(&PairKey::new(from.location, to.location))
                .cloned()
                .ok_or(SolveError::NoRouteFound)?;
            route_legs.push(leg);
        }
        let total_nodes = route_legs.iter().map(|leg| leg.node_count).sum();
        debug!(
            "winning order {:?} totals {total_distance_km} km",
            order.iter().map(|wp| wp.index).collect::<Vec<_>>()
        );

        Ok(OptimalRoute {
            order,
            legs: route_legs,
            total_distance_km,
            total_nodes,
        })
    }
}

/// Total distance of one candidate ordering; infinite as soon as any of its
/// legs is unreachable or unpriced.
fn ordering_total(plan: &TripPlan, ordering: &[usize], priced: &HashMap<PairKey, Leg>) -> f64 {
    let mut total = 0.0_f64;
    let mut previous = plan.start.location;
    for next in ordering
        .iter()
        .filter_map(|&i| plan.middles.get(i))
        .map(|wp| wp.location)
        .chain(std::iter::once(plan.end.location))
    {
        total += priced
            .get(&PairKey::new(previous, next))
            .map_or(f64::INFINITY, |leg| leg.distance_km);
        previous = next;
    }
    total
}

/// The full visiting sequence for one ordering of the middles.
fn visiting_order(plan: &TripPlan, ordering: &[usize]) -> Vec<Waypoint> {
    let mut order = Vec::with_capacity(ordering.len() + 2);
    order.push(plan.start.clone());
    order.extend(
        ordering
            .iter()
            .filter_map(|&i| plan.middles.get(i))
            .cloned(),
    );
    order.push(plan.end.clone());
    order
}

#[cfg(test)]
mod tests;
