//! One interactive planning session.
//!
//! The session is the single owner of the waypoint selection and the search
//! lifecycle. Adding points, resetting, and planning all go through it, and
//! an epoch counter ensures a route computed for a superseded selection is
//! discarded instead of reaching the presentation adapter.

use std::sync::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};

use geo::Coord;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{Route, RouteSolver, SolveError, Waypoint, WaypointStore, WaypointStoreError};

/// Errors returned by [`PlannerSession::plan_route`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlanError {
    /// The selection failed a precondition.
    #[error(transparent)]
    Store(#[from] WaypointStoreError),
    /// The search itself failed.
    #[error(transparent)]
    Solve(#[from] SolveError),
    /// A reset or a newer search started while this one was in flight; its
    /// result was discarded.
    #[error("search superseded before completion")]
    Superseded,
}

/// What the presentation adapter receives: the composed route plus the
/// winning visiting order for captioning. It never sees raw oracle
/// responses.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PlanResponse {
    /// Waypoints in winning visiting order.
    pub order: Vec<Waypoint>,
    /// The composed route.
    pub route: Route,
}

/// Owns the waypoint selection and runs searches against a solver.
///
/// Callers share the session across threads; the selection sits behind a
/// mutex and every mutation or search bumps an epoch. A search that finishes
/// after its epoch was overtaken returns [`PlanError::Superseded`] so stale
/// routes never surface.
#[derive(Debug)]
pub struct PlannerSession<S> {
    store: Mutex<WaypointStore>,
    solver: S,
    epoch: AtomicU64,
}

impl<S: RouteSolver> PlannerSession<S> {
    /// Create a session with an empty selection.
    pub fn new(solver: S) -> Self {
        Self {
            store: Mutex::new(WaypointStore::new()),
            solver,
            epoch: AtomicU64::new(0),
        }
    }

    /// Append a waypoint, returning it with its assigned label.
    ///
    /// # Errors
    ///
    /// Returns [`WaypointStoreError::CapacityExceeded`] when the selection
    /// is full.
    pub fn add_waypoint(&self, location: Coord<f64>) -> Result<Waypoint, WaypointStoreError> {
        let mut store = self.lock_store();
        store.add(location).map(Waypoint::clone)
    }

    /// Clear the selection and invalidate any search still in flight.
    pub fn reset(&self) {
        let mut store = self.lock_store();
        store.reset();
        self.epoch.fetch_add(1, Ordering::SeqCst);
    }

    /// Number of waypoints currently selected.
    pub fn waypoint_count(&self) -> usize {
        self.lock_store().len()
    }

    /// The current selection in insertion order.
    pub fn waypoints(&self) -> Vec<Waypoint> {
        self.lock_store().waypoints().to_vec()
    }

    /// Search for the cheapest complete route over the current selection.
    ///
    /// Starting a search supersedes any earlier one still in flight. The
    /// result is composed only when this search is still the latest; if a
    /// reset or newer search overtook it meanwhile, the result is discarded
    /// and [`PlanError::Superseded`] is returned instead.
    ///
    /// # Errors
    ///
    /// [`WaypointStoreError::InsufficientWaypoints`] below two points,
    /// [`SolveError::NoRouteFound`] when no ordering is feasible, or
    /// [`PlanError::Superseded`] as above.
    pub fn plan_route(&self) -> Result<PlanResponse, PlanError> {
        let (plan, token) = {
            let store = self.lock_store();
            let plan = store.snapshot()?;
            let token = self.epoch.fetch_add(1, Ordering::SeqCst) + 1;
            (plan, token)
        };

        let outcome = self.solver.solve(&plan);
        if self.epoch.load(Ordering::SeqCst) != token {
            return Err(PlanError::Superseded);
        }

        let optimal = outcome?;
        let route = Route::compose(&optimal);
        Ok(PlanResponse {
            order: optimal.order,
            route,
        })
    }

    fn lock_store(&self) -> std::sync::MutexGuard<'_, WaypointStore> {
        match self.store.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}
