//! HTTP client crate for the shortest-path backend.
//!
//! Two blocking facades sit over the backend's JSON API:
//!
//! - [`HttpDistanceOracle`] implements [`stopover_core::DistanceOracle`] by
//!   pricing each directed pair through `POST /api/find-path`, with bounded
//!   concurrency and coalescing of identical in-flight pairs.
//! - [`RemoteSolver`] implements [`stopover_core::RouteSolver`] by handing
//!   the whole plan to `POST /api/find-optimal-route`.
//!
//! Both bridge async reqwest calls to the synchronous core traits by
//! blocking on an internally owned Tokio runtime, so callers need no
//! runtime of their own.
//!
//! # Example
//!
//! ```no_run
//! use std::time::Duration;
//! use stopover_oracle::{HttpDistanceOracle, HttpDistanceOracleConfig};
//! use stopover_core::DistanceOracle;
//! use geo::Coord;
//!
//! let config = HttpDistanceOracleConfig::new("http://localhost:8000")
//!     .with_timeout(Duration::from_secs(10));
//! let oracle = HttpDistanceOracle::with_config(config)?;
//!
//! let legs = oracle.fetch_legs(&[(
//!     Coord { x: 28.36, y: 37.21 },
//!     Coord { x: 28.40, y: 37.25 },
//! )])?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod client;
pub mod remote;
pub mod wire;

pub use client::{
    BackendError, DEFAULT_USER_AGENT, HttpDistanceOracle, HttpDistanceOracleConfig,
    OracleBuildError,
};
pub use remote::RemoteSolver;
pub use wire::{GraphStats, HealthResponse};
