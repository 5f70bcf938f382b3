//! Contract for finding the cheapest visiting order of a trip plan.

use thiserror::Error;

use crate::{OptimalRoute, TripPlan};

/// Errors returned by [`RouteSolver::solve`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SolveError {
    /// Every candidate ordering contained an unreachable leg; no complete
    /// route exists for the plan. No partial route is produced.
    #[error("no feasible route visits every waypoint")]
    NoRouteFound,
    /// A delegated backend failed outright, before any ordering could be
    /// judged. Distinct from [`SolveError::NoRouteFound`] so diagnostics can
    /// tell a dead service from a disconnected map.
    #[error("route backend failure: {message}")]
    Backend {
        /// Description of the backend failure.
        message: String,
    },
}

/// Find the visiting order of a plan's middles that minimises total
/// distance, keeping the start and end fixed.
///
/// Implementations must be deterministic for fixed oracle responses: ties
/// between equal-cost orderings go to the one generated first. The final
/// selection may only be made once every leg needed to judge every ordering
/// has resolved; partial results never pick a winner.
pub trait RouteSolver: Send + Sync {
    /// Solve a plan, producing the winning ordering or a terminal error.
    fn solve(&self, plan: &TripPlan) -> Result<OptimalRoute, SolveError>;
}

impl<S: RouteSolver + ?Sized> RouteSolver for Box<S> {
    fn solve(&self, plan: &TripPlan) -> Result<OptimalRoute, SolveError> {
        (**self).solve(plan)
    }
}
