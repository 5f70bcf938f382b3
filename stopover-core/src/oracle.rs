//! Pricing legs through an external shortest-path service.
//!
//! The [`DistanceOracle`] trait abstracts the service that prices a single
//! point-to-point shortest path. Callers hand over the full deduplicated
//! batch of ordered pairs a search needs, which lets implementations issue
//! the underlying requests concurrently and coalesce identical in-flight
//! queries. Per-pair failures never surface as errors: an unreachable or
//! failed pair resolves to the [`Leg::unreachable`](crate::Leg::unreachable)
//! sentinel instead.

use geo::Coord;
use thiserror::Error;

use crate::Leg;

/// An ordered coordinate pair to price, origin first.
pub type LegQuery = (Coord<f64>, Coord<f64>);

/// Errors from [`DistanceOracle::fetch_legs`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OracleError {
    /// No coordinate pairs were provided. Searches always need at least the
    /// direct start-to-end leg, so an empty batch is a caller bug.
    #[error("at least one coordinate pair is required")]
    EmptyInput,
}

/// Price a batch of ordered coordinate pairs.
///
/// Implementations return one [`Leg`] per query, in the same order as the
/// input. Pairs the backing service cannot connect, and pairs whose request
/// fails at the transport level, resolve to the unreachable sentinel.
///
/// # Examples
///
/// ```
/// use geo::Coord;
/// use stopover_core::{DistanceOracle, Leg, LegQuery, OracleError};
///
/// /// Prices every pair at one kilometre.
/// struct UnitOracle;
///
/// impl DistanceOracle for UnitOracle {
///     fn fetch_legs(&self, pairs: &[LegQuery]) -> Result<Vec<Leg>, OracleError> {
///         if pairs.is_empty() {
///             return Err(OracleError::EmptyInput);
///         }
///         Ok(pairs
///             .iter()
///             .map(|&(from, to)| Leg::new(from, to, 1.0, vec![from, to], 2))
///             .collect())
///     }
/// }
///
/// let a = Coord { x: 0.0, y: 0.0 };
/// let b = Coord { x: 1.0, y: 1.0 };
/// let legs = UnitOracle.fetch_legs(&[(a, b)])?;
/// assert_eq!(legs.len(), 1);
/// # Ok::<(), OracleError>(())
/// ```
pub trait DistanceOracle: Send + Sync {
    /// Price each ordered pair in `pairs`, preserving input order.
    ///
    /// Implementations must return `Err(OracleError::EmptyInput)` for an
    /// empty batch.
    fn fetch_legs(&self, pairs: &[LegQuery]) -> Result<Vec<Leg>, OracleError>;
}
