//! Deterministic oracles for tests.
//!
//! [`ScriptedOracle`] prices exactly the pairs a test scripts and resolves
//! everything else to the unreachable sentinel, while recording every query
//! it receives so tests can assert on query counts and deduplication.

use std::collections::HashMap;
use std::sync::Mutex;

use geo::Coord;

use crate::{DistanceOracle, Leg, LegQuery, OracleError, PairKey};

/// Scripted [`DistanceOracle`] test double.
///
/// # Examples
///
/// ```
/// use geo::Coord;
/// use stopover_core::DistanceOracle;
/// use stopover_core::test_support::ScriptedOracle;
///
/// let a = Coord { x: 0.0, y: 0.0 };
/// let b = Coord { x: 1.0, y: 0.0 };
/// let oracle = ScriptedOracle::new().leg(a, b, 3.0);
///
/// let legs = oracle.fetch_legs(&[(a, b)]).expect("non-empty batch");
/// assert_eq!(legs[0].distance_km, 3.0);
/// assert_eq!(oracle.queries().len(), 1);
/// ```
#[derive(Debug, Default)]
pub struct ScriptedOracle {
    distances: HashMap<PairKey, f64>,
    queries: Mutex<Vec<LegQuery>>,
}

impl ScriptedOracle {
    /// An oracle with no reachable pairs.
    pub fn new() -> Self {
        Self::default()
    }

    /// Script the ordered pair `from -> to` at the given distance.
    ///
    /// Directional: script both directions explicitly when a test needs a
    /// symmetric leg.
    #[must_use]
    pub fn leg(mut self, from: Coord<f64>, to: Coord<f64>, distance_km: f64) -> Self {
        self.distances.insert(PairKey::new(from, to), distance_km);
        self
    }

    /// Every query received so far, in arrival order.
    pub fn queries(&self) -> Vec<LegQuery> {
        match self.queries.lock() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}

impl DistanceOracle for ScriptedOracle {
    fn fetch_legs(&self, pairs: &[LegQuery]) -> Result<Vec<Leg>, OracleError> {
        if pairs.is_empty() {
            return Err(OracleError::EmptyInput);
        }
        if let Ok(mut queries) = self.queries.lock() {
            queries.extend_from_slice(pairs);
        }
        Ok(pairs
            .iter()
            .map(|&(from, to)| {
                self.distances
                    .get(&PairKey::new(from, to))
                    .map_or_else(
                        || Leg::unreachable(from, to),
                        |&km| Leg::new(from, to, km, vec![from, to], 2),
                    )
            })
            .collect())
    }
}

/// Oracle pricing every pair at one kilometre with a two-point polyline.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnitOracle;

impl DistanceOracle for UnitOracle {
    fn fetch_legs(&self, pairs: &[LegQuery]) -> Result<Vec<Leg>, OracleError> {
        if pairs.is_empty() {
            return Err(OracleError::EmptyInput);
        }
        Ok(pairs
            .iter()
            .map(|&(from, to)| Leg::new(from, to, 1.0, vec![from, to], 2))
            .collect())
    }
}
