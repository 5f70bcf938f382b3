//! Winning orderings and the composed routes built from them.

use geo::Coord;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{Leg, Waypoint};

/// The minimum-cost visiting order found by a search, with its priced legs.
///
/// `order` holds the full visiting sequence (start, middles in winning
/// order, end) and `legs` one entry per consecutive pair in that sequence.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct OptimalRoute {
    /// Waypoints in winning visiting order.
    pub order: Vec<Waypoint>,
    /// One priced leg per consecutive pair of `order`.
    pub legs: Vec<Leg>,
    /// Sum of the legs' distances in kilometres.
    pub total_distance_km: f64,
    /// Sum of the legs' node counts.
    pub total_nodes: u32,
}

/// A continuous route ready for the presentation adapter.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use stopover_core::{Leg, OptimalRoute, Route, Waypoint};
///
/// let a = Coord { x: 0.0, y: 0.0 };
/// let b = Coord { x: 1.0, y: 0.0 };
/// let optimal = OptimalRoute {
///     order: vec![
///         Waypoint::new(0, a, "start"),
///         Waypoint::new(1, b, "stop 1"),
///     ],
///     legs: vec![Leg::new(a, b, 2.0, vec![a, b], 2)],
///     total_distance_km: 2.0,
///     total_nodes: 2,
/// };
/// let route = Route::compose(&optimal);
/// assert_eq!(route.segments.len(), 1);
/// assert_eq!(route.trace, vec![a, b]);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Route {
    /// Priced segments in visiting order.
    pub segments: Vec<Leg>,
    /// Total distance in kilometres.
    pub total_distance_km: f64,
    /// Total graph nodes across all segments.
    pub total_nodes: u32,
    /// Every segment polyline concatenated in visiting order.
    pub trace: Vec<Coord<f64>>,
}

impl Route {
    /// Stitch a winning ordering's legs into one continuous route.
    ///
    /// The segment polylines are concatenated as-is: the coordinate shared
    /// at a segment boundary appears in both neighbouring polylines, so it
    /// shows up twice in the trace. Renderers tolerate the duplicate;
    /// anything recomputing distance from the trace has to account for it.
    pub fn compose(optimal: &OptimalRoute) -> Self {
        let trace: Vec<Coord<f64>> = optimal
            .legs
            .iter()
            .flat_map(|leg| leg.polyline.iter().copied())
            .collect();
        let total_distance_km = optimal.legs.iter().map(|leg| leg.distance_km).sum();
        let total_nodes = optimal.legs.iter().map(|leg| leg.node_count).sum();
        Self {
            segments: optimal.legs.clone(),
            total_distance_km,
            total_nodes,
            trace,
        }
    }
}
