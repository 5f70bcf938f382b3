//! [`RouteSolver`] that delegates the whole ordering search to the backend.
//!
//! `POST /api/find-optimal-route` runs the same exhaustive search server
//! side and ships back the winning order, per-leg detail and stitched
//! polyline in one round trip. Useful when the backend is remote enough
//! that one request per pair would dominate the search.

use geo::Coord;
use log::debug;
use reqwest::{Client, StatusCode};
use tokio::runtime::Runtime;

use stopover_core::{OptimalRoute, RouteSolver, SolveError, TripPlan, Waypoint};

use crate::client::{
    HttpDistanceOracleConfig, OracleBuildError, block_on_bridged, build_transport,
    convert_reqwest_error, endpoint,
};
use crate::wire::{OptimalRouteRequest, OptimalRouteResponse, PathResponse, WirePoint, coord_from_wire};

/// Solver that forwards the plan to the backend's bulk ordering endpoint.
///
/// Shares its configuration shape and runtime behaviour with
/// [`crate::HttpDistanceOracle`]; only the `concurrency` setting is unused,
/// as the whole plan travels in a single request.
pub struct RemoteSolver {
    client: Client,
    config: HttpDistanceOracleConfig,
    runtime: Runtime,
}

impl std::fmt::Debug for RemoteSolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RemoteSolver")
            .field("client", &self.client)
            .field("config", &self.config)
            .field("runtime", &"<tokio::runtime::Runtime>")
            .finish()
    }
}

impl RemoteSolver {
    /// Create a new solver with default configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client or Tokio runtime fails to build.
    pub fn new(base_url: impl Into<String>) -> Result<Self, OracleBuildError> {
        Self::with_config(HttpDistanceOracleConfig::new(base_url))
    }

    /// Create a new solver with explicit configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client or Tokio runtime fails to build.
    pub fn with_config(config: HttpDistanceOracleConfig) -> Result<Self, OracleBuildError> {
        let (client, runtime) = build_transport(&config)?;
        Ok(Self {
            client,
            config,
            runtime,
        })
    }

    async fn solve_async(&self, plan: &TripPlan) -> Result<OptimalRouteResponse, SolveError> {
        let url = endpoint(&self.config.base_url, "/api/find-optimal-route");
        let request = OptimalRouteRequest {
            start_lat: plan.start.location.y,
            start_lon: plan.start.location.x,
            waypoints: plan
                .middles
                .iter()
                .map(|wp| WirePoint::from(wp.location))
                .collect(),
            end_lat: plan.end.location.y,
            end_lon: plan.end.location.x,
        };

        let response = self
            .client
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(|err| backend(convert_reqwest_error(&err, &url, self.config.timeout)))?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            debug!("backend found no complete route for the plan");
            return Err(SolveError::NoRouteFound);
        }
        if !status.is_success() {
            return Err(backend(format!("{url} returned HTTP {}", status.as_u16())));
        }
        response
            .json::<OptimalRouteResponse>()
            .await
            .map_err(|err| backend(format!("unparseable body from {url}: {err}")))
    }
}

fn backend(message: impl ToString) -> SolveError {
    SolveError::Backend {
        message: message.to_string(),
    }
}

/// Recover the visiting order of the plan's middles from the response.
///
/// The backend reports visited stops as its own snapped node identifiers,
/// which mean nothing to the caller. Each interior segment boundary is the
/// snapped location of one visited middle, so matching boundaries to the
/// nearest still-unassigned middle reconstructs the order. Assignment is
/// greedy and deterministic; snapping error is small against the spacing of
/// distinct stops.
fn visiting_order(plan: &TripPlan, segments: &[PathResponse]) -> Result<Vec<Waypoint>, SolveError> {
    if segments.len() != plan.middles.len() + 1 {
        return Err(backend(format!(
            "expected {} segments, backend sent {}",
            plan.middles.len() + 1,
            segments.len()
        )));
    }

    let mut remaining: Vec<Waypoint> = plan.middles.to_vec();
    let mut order = Vec::with_capacity(plan.middles.len() + 2);
    order.push(plan.start.clone());
    for segment in &segments[1..] {
        let boundary = segment
            .coordinates
            .first()
            .copied()
            .map(coord_from_wire)
            .ok_or_else(|| backend("backend sent a segment with no coordinates"))?;
        let nearest = remaining
            .iter()
            .enumerate()
            .min_by(|(_, a), (_, b)| {
                squared_distance(a.location, boundary)
                    .total_cmp(&squared_distance(b.location, boundary))
            })
            .map(|(slot, _)| slot)
            .ok_or_else(|| backend("backend sent more segments than stops"))?;
        order.push(remaining.remove(nearest));
    }
    order.push(plan.end.clone());
    Ok(order)
}

fn squared_distance(a: Coord<f64>, b: Coord<f64>) -> f64 {
    let dx = a.x - b.x;
    let dy = a.y - b.y;
    dx.mul_add(dx, dy * dy)
}

/// Assemble the [`OptimalRoute`] from the recovered order and wire segments.
fn into_route(order: Vec<Waypoint>, segments: Vec<PathResponse>) -> Result<OptimalRoute, SolveError> {
    let mut legs = Vec::with_capacity(segments.len());
    for (slot, segment) in segments.into_iter().enumerate() {
        let from = order[slot].location;
        let to = order[slot + 1].location;
        let leg = segment.into_leg(from, to);
        if !leg.is_reachable() {
            return Err(backend("backend sent an invalid distance in a segment"));
        }
        legs.push(leg);
    }
    let total_distance_km = legs.iter().map(|leg| leg.distance_km).sum();
    let total_nodes = legs.iter().map(|leg| leg.node_count).sum();
    Ok(OptimalRoute {
        order,
        legs,
        total_distance_km,
        total_nodes,
    })
}

impl RouteSolver for RemoteSolver {
    /// Delegate the plan and rebuild an [`OptimalRoute`] from the answer.
    ///
    /// A 404 from the backend means no complete route exists and maps to
    /// [`SolveError::NoRouteFound`]; every other failure is
    /// [`SolveError::Backend`].
    fn solve(&self, plan: &TripPlan) -> Result<OptimalRoute, SolveError> {
        let response = block_on_bridged(&self.runtime, self.solve_async(plan))?;
        let order = visiting_order(plan, &response.segments)?;
        into_route(order, response.segments)
    }
}
