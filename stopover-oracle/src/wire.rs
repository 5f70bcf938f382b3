//! Request and response types for the shortest-path backend's JSON API.
//!
//! The backend speaks `[lat, lon]` coordinate pairs while the rest of the
//! engine uses [`geo::Coord`] with `x` = longitude and `y` = latitude; the
//! conversion happens here and nowhere else. Responses carry more fields
//! than the client needs (node identifiers, echo of the snapped endpoints);
//! only the consumed fields are modelled and serde ignores the rest.

use geo::Coord;
use serde::{Deserialize, Serialize};
use stopover_core::Leg;

/// Body for `POST /api/find-path`.
#[derive(Debug, Clone, Serialize)]
pub struct PathRequest {
    /// Latitude of the leg's starting point.
    pub start_lat: f64,
    /// Longitude of the leg's starting point.
    pub start_lon: f64,
    /// Latitude of the leg's destination.
    pub end_lat: f64,
    /// Longitude of the leg's destination.
    pub end_lon: f64,
}

impl PathRequest {
    /// Build a request for the directed pair `from` to `to`.
    #[must_use]
    pub fn new(from: Coord<f64>, to: Coord<f64>) -> Self {
        Self {
            start_lat: from.y,
            start_lon: from.x,
            end_lat: to.y,
            end_lon: to.x,
        }
    }
}

/// Successful body for `POST /api/find-path`, and the per-segment shape
/// inside [`OptimalRouteResponse`].
#[derive(Debug, Clone, Deserialize)]
pub struct PathResponse {
    /// Polyline of the path as `[lat, lon]` pairs.
    pub coordinates: Vec<[f64; 2]>,
    /// Path length in kilometres, rounded to three decimals by the backend.
    pub distance: f64,
    /// Number of graph nodes on the path.
    pub node_count: u32,
}

impl PathResponse {
    /// Convert to a [`Leg`] priced for the directed pair `from` to `to`.
    ///
    /// The backend is not trusted on the numbers: a NaN, infinite or
    /// negative distance marks the pair unreachable instead of poisoning
    /// route totals downstream.
    #[must_use]
    pub fn into_leg(self, from: Coord<f64>, to: Coord<f64>) -> Leg {
        if !self.distance.is_finite() || self.distance < 0.0 {
            return Leg::unreachable(from, to);
        }
        let polyline = self.coordinates.into_iter().map(coord_from_wire).collect();
        Leg::new(from, to, self.distance, polyline, self.node_count)
    }
}

/// Error body the backend sends alongside non-success statuses.
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorResponse {
    /// Short error summary.
    pub error: String,
    /// Optional human-readable detail.
    pub message: Option<String>,
}

/// A waypoint in an [`OptimalRouteRequest`].
#[derive(Debug, Clone, Serialize)]
pub struct WirePoint {
    /// Latitude in degrees.
    pub lat: f64,
    /// Longitude in degrees.
    pub lon: f64,
}

impl From<Coord<f64>> for WirePoint {
    fn from(coord: Coord<f64>) -> Self {
        Self {
            lat: coord.y,
            lon: coord.x,
        }
    }
}

/// Body for `POST /api/find-optimal-route`.
#[derive(Debug, Clone, Serialize)]
pub struct OptimalRouteRequest {
    /// Latitude of the fixed starting point.
    pub start_lat: f64,
    /// Longitude of the fixed starting point.
    pub start_lon: f64,
    /// Intermediate stops in selection order; the backend chooses the
    /// visiting order.
    pub waypoints: Vec<WirePoint>,
    /// Latitude of the fixed destination.
    pub end_lat: f64,
    /// Longitude of the fixed destination.
    pub end_lon: f64,
}

/// Successful body for `POST /api/find-optimal-route`.
///
/// `optimal_order` carries the backend's internal node identifiers for the
/// snapped stops in visit order; the client recovers the caller's waypoints
/// from the segment boundaries instead.
#[derive(Debug, Clone, Deserialize)]
pub struct OptimalRouteResponse {
    /// Snapped node identifiers in visit order, start and end included.
    pub optimal_order: Vec<String>,
    /// Total length of the winning route in kilometres.
    pub total_distance: f64,
    /// One entry per consecutive pair of visited stops.
    pub segments: Vec<PathResponse>,
    /// Concatenation of the segment polylines as `[lat, lon]` pairs.
    pub coordinates: Vec<[f64; 2]>,
}

/// The `stats` block of `GET /api/graph`.
///
/// The endpoint also ships the full node and edge tables; the client only
/// reads the counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphStats {
    /// Number of nodes in the routing graph.
    pub node_count: u64,
    /// Number of undirected edges in the routing graph.
    pub edge_count: u64,
}

/// Body for `GET /api/graph`, reduced to the consumed fields.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct GraphResponse {
    /// Graph size counters.
    pub stats: GraphStats,
}

/// Body for `GET /health`.
#[derive(Debug, Clone, Deserialize)]
pub struct HealthResponse {
    /// Liveness indicator, `"healthy"` when the server is up.
    pub status: String,
    /// Whether the routing graph has been loaded.
    pub graph_loaded: bool,
}

/// Convert a wire `[lat, lon]` pair to engine coordinates.
#[must_use]
pub fn coord_from_wire(pair: [f64; 2]) -> Coord<f64> {
    Coord {
        x: pair[1],
        y: pair[0],
    }
}
