//! HTTP-backed [`DistanceOracle`] for the shortest-path backend.
//!
//! The [`DistanceOracle`] trait is synchronous so the core library stays
//! embeddable in synchronous contexts. This client bridges async HTTP calls
//! to that interface by blocking on a Tokio runtime internally, and fans a
//! batch of pair queries out over a bounded number of concurrent requests.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

use futures_util::FutureExt;
use futures_util::future::{BoxFuture, Shared};
use futures_util::stream::{self, StreamExt};
use geo::Coord;
use log::{debug, warn};
use reqwest::{Client, StatusCode};
use thiserror::Error;
use tokio::runtime::{Handle, Runtime, RuntimeFlavor};

use stopover_core::{DistanceOracle, Leg, LegQuery, OracleError, PairKey};

use crate::wire::{ErrorResponse, GraphResponse, GraphStats, HealthResponse, PathRequest, PathResponse};

/// Error type for [`HttpDistanceOracle`] construction failures.
#[derive(Debug, Error)]
pub enum OracleBuildError {
    /// Failed to build the HTTP client.
    #[error("failed to build HTTP client: {0}")]
    HttpClient(#[source] reqwest::Error),
    /// Failed to build the Tokio runtime.
    #[error("failed to build Tokio runtime: {0}")]
    Runtime(#[source] std::io::Error),
}

/// Error type for the informational endpoints (`/api/graph`, `/health`).
///
/// Pair pricing is fail-soft and never surfaces these; the metadata
/// endpoints have no sentinel to fall back to, so failures propagate.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BackendError {
    /// The request exceeded the configured timeout.
    #[error("request to {url} timed out after {timeout_secs}s")]
    Timeout {
        /// Requested URL.
        url: String,
        /// Configured timeout in seconds.
        timeout_secs: u64,
    },
    /// The request failed below the HTTP layer.
    #[error("request to {url} failed: {message}")]
    Transport {
        /// Requested URL.
        url: String,
        /// Underlying error description.
        message: String,
    },
    /// The backend answered with a non-success status.
    #[error("{url} returned HTTP {status}")]
    Status {
        /// Requested URL.
        url: String,
        /// HTTP status code.
        status: u16,
    },
    /// The response body did not match the expected shape.
    #[error("could not parse response from {url}: {message}")]
    Parse {
        /// Requested URL.
        url: String,
        /// Underlying error description.
        message: String,
    },
}

/// Default user agent for backend requests.
pub const DEFAULT_USER_AGENT: &str = "stopover-oracle/0.1";

/// Default request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Default number of concurrent pair requests in flight.
const DEFAULT_CONCURRENCY: usize = 8;

/// Configuration for [`HttpDistanceOracle`].
#[derive(Debug, Clone)]
pub struct HttpDistanceOracleConfig {
    /// Base URL for the backend (e.g., `"http://localhost:8000"`).
    pub base_url: String,
    /// Request timeout duration.
    pub timeout: Duration,
    /// User agent string for requests.
    pub user_agent: String,
    /// Upper bound on concurrent pair requests per batch.
    pub concurrency: usize,
}

impl Default for HttpDistanceOracleConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000".to_owned(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            user_agent: DEFAULT_USER_AGENT.to_owned(),
            concurrency: DEFAULT_CONCURRENCY,
        }
    }
}

impl HttpDistanceOracleConfig {
    /// Create a new configuration with the given base URL.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }

    /// Set the request timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the user agent string.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Set the concurrent-request bound. A bound of zero is clamped to one.
    #[must_use]
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }
}

/// A pair request that callers can await more than once.
type SharedLeg = Shared<BoxFuture<'static, Leg>>;

/// HTTP client implementing [`DistanceOracle`] against the path backend.
///
/// Each queried pair becomes one `POST /api/find-path` request; a batch is
/// fanned out with bounded concurrency, and identical in-flight pairs are
/// coalesced onto a single shared request. Pair pricing is fail-soft: a
/// transport failure, timeout, bad status or unparseable body yields the
/// unreachable sentinel leg rather than an error, so one broken pair cannot
/// take down a whole batch.
///
/// # Runtime behaviour
///
/// When called from outside any Tokio runtime, the client blocks on its own
/// stored runtime. When called from within a multi-threaded Tokio runtime
/// (detected via [`Handle::try_current()`] and
/// [`RuntimeFlavor::MultiThread`]), it uses that runtime's handle with
/// [`tokio::task::block_in_place`] to avoid nested runtime panics. From
/// within a `current_thread` runtime it falls back to its own runtime,
/// which avoids the `block_in_place` panic but can deadlock if the caller's
/// runtime is driving IO this request depends on.
pub struct HttpDistanceOracle {
    client: Client,
    config: HttpDistanceOracleConfig,
    runtime: Runtime,
    in_flight: Mutex<HashMap<PairKey, SharedLeg>>,
}

impl std::fmt::Debug for HttpDistanceOracle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpDistanceOracle")
            .field("client", &self.client)
            .field("config", &self.config)
            .field("runtime", &"<tokio::runtime::Runtime>")
            .finish_non_exhaustive()
    }
}

/// Block the current thread on `future`, borrowing an ambient multi-thread
/// runtime when one exists and falling back to `runtime` otherwise.
pub(crate) fn block_on_bridged<F: std::future::Future>(runtime: &Runtime, future: F) -> F::Output {
    match Handle::try_current() {
        Ok(handle) if handle.runtime_flavor() == RuntimeFlavor::MultiThread => {
            tokio::task::block_in_place(|| handle.block_on(future))
        }
        // No runtime detected, or current_thread runtime: use our own.
        _ => runtime.block_on(future),
    }
}

/// Build the HTTP client and current-thread runtime shared by this crate's
/// blocking facades.
pub(crate) fn build_transport(
    config: &HttpDistanceOracleConfig,
) -> Result<(Client, Runtime), OracleBuildError> {
    let client = Client::builder()
        .user_agent(&config.user_agent)
        .connect_timeout(config.timeout)
        .timeout(config.timeout)
        .build()
        .map_err(OracleBuildError::HttpClient)?;
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(OracleBuildError::Runtime)?;
    Ok((client, runtime))
}

/// Join `base_url` and an absolute path without doubling slashes.
pub(crate) fn endpoint(base_url: &str, path: &str) -> String {
    format!("{}{path}", base_url.trim_end_matches('/'))
}

impl HttpDistanceOracle {
    /// Create a new client with default configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client or Tokio runtime fails to build.
    pub fn new(base_url: impl Into<String>) -> Result<Self, OracleBuildError> {
        Self::with_config(HttpDistanceOracleConfig::new(base_url))
    }

    /// Create a new client with explicit configuration.
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
            in_flight: Mutex::new(HashMap::new()),
        })
    }

    /// Fetch the graph size counters from `GET /api/graph`.
    ///
    /// # Errors
    ///
    /// Returns a [`BackendError`] when the backend is unreachable, answers
    /// with a non-success status or sends an unparseable body.
    pub fn graph_stats(&self) -> Result<GraphStats, BackendError> {
        let url = endpoint(&self.config.base_url, "/api/graph");
        let response: GraphResponse =
            block_on_bridged(&self.runtime, self.get_json(url))?;
        Ok(response.stats)
    }

    /// Probe `GET /health`.
    ///
    /// # Errors
    ///
    /// Returns a [`BackendError`] when the backend is unreachable, answers
    /// with a non-success status or sends an unparseable body.
    pub fn health(&self) -> Result<HealthResponse, BackendError> {
        let url = endpoint(&self.config.base_url, "/health");
        block_on_bridged(&self.runtime, self.get_json(url))
    }

    async fn get_json<T: serde::de::DeserializeOwned>(&self, url: String) -> Result<T, BackendError> {
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|err| convert_reqwest_error(&err, &url, self.config.timeout))?;
        let status = response.status();
        if !status.is_success() {
            return Err(BackendError::Status {
                url,
                status: status.as_u16(),
            });
        }
        response.json().await.map_err(|err| BackendError::Parse {
            url,
            message: err.to_string(),
        })
    }

    /// Resolve the whole batch, preserving input order in the output.
    async fn fetch_legs_async(&self, pairs: &[LegQuery]) -> Vec<Leg> {
        let requests = pairs.iter().enumerate().map(|(slot, &(from, to))| {
            let key = PairKey::new(from, to);
            let shared = self.leg_request(key, from, to);
            async move {
                let leg = shared.await;
                self.release(key);
                (slot, leg)
            }
        });

        let mut legs: Vec<Option<Leg>> = vec![None; pairs.len()];
        let mut resolved = stream::iter(requests).buffer_unordered(self.config.concurrency);
        while let Some((slot, leg)) = resolved.next().await {
            legs[slot] = Some(leg);
        }
        legs.into_iter().flatten().collect()
    }

    /// Look up or start the shared request for a directed pair.
    fn leg_request(&self, key: PairKey, from: Coord<f64>, to: Coord<f64>) -> SharedLeg {
        let mut in_flight = lock_in_flight(&self.in_flight);
        if let Some(existing) = in_flight.get(&key) {
            return existing.clone();
        }
        let request = fetch_leg(
            self.client.clone(),
            self.config.base_url.clone(),
            self.config.timeout,
            from,
            to,
        )
        .boxed()
        .shared();
        in_flight.insert(key, request.clone());
        request
    }

    /// Drop the in-flight entry for a completed pair.
    ///
    /// Waiters keep their own handles to the shared future; removing the
    /// entry only stops new queries from coalescing onto a finished one.
    fn release(&self, key: PairKey) {
        lock_in_flight(&self.in_flight).remove(&key);
    }
}

fn lock_in_flight(
    in_flight: &Mutex<HashMap<PairKey, SharedLeg>>,
) -> std::sync::MutexGuard<'_, HashMap<PairKey, SharedLeg>> {
    match in_flight.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    }
}

/// Convert a reqwest error to a [`BackendError`].
pub(crate) fn convert_reqwest_error(
    error: &reqwest::Error,
    url: &str,
    timeout: Duration,
) -> BackendError {
    if error.is_timeout() {
        return BackendError::Timeout {
            url: url.to_owned(),
            timeout_secs: timeout.as_secs(),
        };
    }
    if let Some(status) = error.status() {
        return BackendError::Status {
            url: url.to_owned(),
            status: status.as_u16(),
        };
    }
    BackendError::Transport {
        url: url.to_owned(),
        message: error.to_string(),
    }
}

/// Price one directed pair via `POST /api/find-path`.
///
/// Owns everything it touches so the future is `'static` and can be shared
/// between coalesced callers. Every failure mode resolves to the sentinel
/// leg; a genuine no-path answer (HTTP 404) logs at `debug` while transport
/// and protocol failures log at `warn`, keeping the two distinguishable.
async fn fetch_leg(
    client: Client,
    base_url: String,
    timeout: Duration,
    from: Coord<f64>,
    to: Coord<f64>,
) -> Leg {
    let url = endpoint(&base_url, "/api/find-path");
    let request = PathRequest::new(from, to);

    let response = match client.post(&url).json(&request).send().await {
        Ok(response) => response,
        Err(err) => {
            warn!(
                "pair ({}, {}) -> ({}, {}): {}",
                from.y,
                from.x,
                to.y,
                to.x,
                convert_reqwest_error(&err, &url, timeout)
            );
            return Leg::unreachable(from, to);
        }
    };

    let status = response.status();
    if status == StatusCode::NOT_FOUND {
        // The backend's way of saying the pair is disconnected.
        let detail = response
            .json::<ErrorResponse>()
            .await
            .ok()
            .and_then(|body| body.message)
            .unwrap_or_else(|| "no path between the points".to_owned());
        debug!(
            "no path for pair ({}, {}) -> ({}, {}): {detail}",
            from.y, from.x, to.y, to.x
        );
        return Leg::unreachable(from, to);
    }
    if !status.is_success() {
        warn!(
            "pair ({}, {}) -> ({}, {}): {url} returned HTTP {}",
            from.y,
            from.x,
            to.y,
            to.x,
            status.as_u16()
        );
        return Leg::unreachable(from, to);
    }

    match response.json::<PathResponse>().await {
        Ok(body) => body.into_leg(from, to),
        Err(err) => {
            warn!(
                "pair ({}, {}) -> ({}, {}): unparseable body: {err}",
                from.y, from.x, to.y, to.x
            );
            Leg::unreachable(from, to)
        }
    }
}

impl DistanceOracle for HttpDistanceOracle {
    /// Price every directed pair in the batch.
    ///
    /// # Runtime requirements
    ///
    /// When called from within an existing Tokio runtime, the runtime must
    /// be multi-threaded (`flavor = "multi_thread"`). From a
    /// `current_thread` runtime the method falls back to its own internal
    /// runtime, which may block the caller's runtime.
    fn fetch_legs(&self, pairs: &[LegQuery]) -> Result<Vec<Leg>, OracleError> {
        if pairs.is_empty() {
            return Err(OracleError::EmptyInput);
        }
        Ok(block_on_bridged(&self.runtime, self.fetch_legs_async(pairs)))
    }
}
