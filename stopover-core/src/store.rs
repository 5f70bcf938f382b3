//! Ordered list of selected waypoints and the trip plan derived from it.

use geo::Coord;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::Waypoint;

/// Maximum number of waypoints in one selection.
pub const MAX_WAYPOINTS: usize = 7;

/// Minimum number of waypoints needed to search for a route.
pub const MIN_WAYPOINTS: usize = 2;

/// Errors returned by [`WaypointStore`] operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WaypointStoreError {
    /// An add was attempted while the selection already holds the maximum.
    /// The list is left unchanged.
    #[error("waypoint limit of {cap} reached")]
    CapacityExceeded {
        /// The configured waypoint cap.
        cap: usize,
    },
    /// A snapshot was requested with fewer than two waypoints selected.
    #[error("a route needs at least {needed} waypoints, got {got}")]
    InsufficientWaypoints {
        /// How many waypoints a search requires.
        needed: usize,
        /// How many were selected.
        got: usize,
    },
}

/// A search-ready view of the selection: fixed start, fixed end, and the
/// intermediate waypoints whose visiting order is still to be decided.
///
/// Roles are derived from list position at snapshot time: first element is
/// the start, last is the end, everything between is a middle.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TripPlan {
    /// Fixed first point of the route.
    pub start: Waypoint,
    /// Intermediate waypoints in selection order.
    pub middles: Vec<Waypoint>,
    /// Fixed last point of the route.
    pub end: Waypoint,
}

impl TripPlan {
    /// The full visiting sequence in selection order: start, middles, end.
    pub fn points(&self) -> Vec<&Waypoint> {
        let mut points = Vec::with_capacity(self.middles.len() + 2);
        points.push(&self.start);
        points.extend(self.middles.iter());
        points.push(&self.end);
        points
    }
}

/// Holds the waypoints the user has picked so far, in insertion order.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use stopover_core::WaypointStore;
///
/// let mut store = WaypointStore::new();
/// store.add(Coord { x: 28.36, y: 37.21 })?;
/// store.add(Coord { x: 28.37, y: 37.22 })?;
///
/// let plan = store.snapshot()?;
/// assert!(plan.middles.is_empty());
/// # Ok::<(), stopover_core::WaypointStoreError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct WaypointStore {
    waypoints: Vec<Waypoint>,
}

impl WaypointStore {
    /// Create an empty selection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a waypoint at the given location.
    ///
    /// The display label reflects the slot at insertion time: the first pick
    /// is captioned "start", the last possible slot "end", everything else
    /// "stop N". Labels never change afterwards even when later selections
    /// shift a waypoint's functional role.
    ///
    /// # Errors
    ///
    /// Returns [`WaypointStoreError::CapacityExceeded`] when the selection
    /// already holds [`MAX_WAYPOINTS`] points; the list is left unchanged.
    pub fn add(&mut self, location: Coord<f64>) -> Result<&Waypoint, WaypointStoreError> {
        let index = self.waypoints.len();
        if index >= MAX_WAYPOINTS {
            return Err(WaypointStoreError::CapacityExceeded { cap: MAX_WAYPOINTS });
        }
        self.waypoints
            .push(Waypoint::new(index, location, display_label(index)));
        // Just pushed, so the list is non-empty.
        Ok(&self.waypoints[index])
    }

    /// Remove every waypoint unconditionally.
    pub fn reset(&mut self) {
        self.waypoints.clear();
    }

    /// Number of selected waypoints.
    pub fn len(&self) -> usize {
        self.waypoints.len()
    }

    /// Whether the selection is empty.
    pub fn is_empty(&self) -> bool {
        self.waypoints.is_empty()
    }

    /// The selection in insertion order.
    pub fn waypoints(&self) -> &[Waypoint] {
        &self.waypoints
    }

    /// Derive a [`TripPlan`] from the current selection order.
    ///
    /// # Errors
    ///
    /// Returns [`WaypointStoreError::InsufficientWaypoints`] when fewer than
    /// [`MIN_WAYPOINTS`] points are selected; no oracle query is issued for
    /// such a selection.
    pub fn snapshot(&self) -> Result<TripPlan, WaypointStoreError> {
        let (Some(start), Some(end)) = (self.waypoints.first(), self.waypoints.last()) else {
            return Err(WaypointStoreError::InsufficientWaypoints {
                needed: MIN_WAYPOINTS,
                got: self.waypoints.len(),
            });
        };
        if self.waypoints.len() < MIN_WAYPOINTS {
            return Err(WaypointStoreError::InsufficientWaypoints {
                needed: MIN_WAYPOINTS,
                got: self.waypoints.len(),
            });
        }
        let middles = self.waypoints[1..self.waypoints.len() - 1].to_vec();
        Ok(TripPlan {
            start: start.clone(),
            middles,
            end: end.clone(),
        })
    }
}

fn display_label(index: usize) -> String {
    match index {
        0 => "start".to_owned(),
        i if i == MAX_WAYPOINTS - 1 => "end".to_owned(),
        i => format!("stop {i}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn coord(i: usize) -> Coord<f64> {
        Coord {
            x: i as f64,
            y: -(i as f64),
        }
    }

    fn filled(count: usize) -> WaypointStore {
        let mut store = WaypointStore::new();
        for i in 0..count {
            store.add(coord(i)).expect("within capacity");
        }
        store
    }

    #[rstest]
    fn eighth_add_fails_and_leaves_store_unchanged() {
        let mut store = filled(MAX_WAYPOINTS);
        let err = store.add(coord(7)).expect_err("capacity reached");
        assert_eq!(err, WaypointStoreError::CapacityExceeded { cap: 7 });
        assert_eq!(store.len(), MAX_WAYPOINTS);
    }

    #[rstest]
    #[case(0)]
    #[case(1)]
    fn snapshot_requires_two_waypoints(#[case] count: usize) {
        let store = filled(count);
        let err = store.snapshot().expect_err("too few waypoints");
        assert_eq!(
            err,
            WaypointStoreError::InsufficientWaypoints {
                needed: 2,
                got: count
            }
        );
    }

    #[rstest]
    fn snapshot_derives_roles_from_positions() {
        let store = filled(4);
        let plan = store.snapshot().expect("enough waypoints");
        assert_eq!(plan.start.index, 0);
        assert_eq!(plan.end.index, 3);
        let middle_indices: Vec<usize> = plan.middles.iter().map(|wp| wp.index).collect();
        assert_eq!(middle_indices, vec![1, 2]);
    }

    #[rstest]
    fn labels_are_fixed_at_insertion() {
        let store = filled(MAX_WAYPOINTS);
        let labels: Vec<&str> = store.waypoints().iter().map(|wp| wp.label.as_str()).collect();
        assert_eq!(
            labels,
            vec!["start", "stop 1", "stop 2", "stop 3", "stop 4", "stop 5", "end"]
        );
    }

    #[rstest]
    fn second_pick_becomes_end_in_snapshot_despite_label() {
        // With two points selected, the second acts as the end even though
        // its label was assigned for an intermediate slot.
        let store = filled(2);
        let plan = store.snapshot().expect("enough waypoints");
        assert_eq!(plan.end.label, "stop 1");
        assert!(plan.middles.is_empty());
    }

    #[rstest]
    fn reset_clears_everything() {
        let mut store = filled(5);
        store.reset();
        assert!(store.is_empty());
        assert!(store.snapshot().is_err());
    }
}
