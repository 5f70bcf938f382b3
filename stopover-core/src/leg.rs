//! Priced legs between two coordinates.

use geo::Coord;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// One priced point-to-point leg as returned by the shortest-path oracle.
///
/// A leg is directional; the oracle is not assumed symmetric. An unreachable
/// pair is represented by the [`Leg::unreachable`] sentinel (infinite
/// distance, empty polyline, zero nodes) rather than an error, so search code
/// can treat every pair uniformly.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use stopover_core::Leg;
///
/// let a = Coord { x: 0.0, y: 0.0 };
/// let b = Coord { x: 1.0, y: 1.0 };
/// let leg = Leg::unreachable(a, b);
/// assert!(!leg.is_reachable());
/// assert!(leg.polyline.is_empty());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Leg {
    /// Leg origin.
    pub from: Coord<f64>,
    /// Leg destination.
    pub to: Coord<f64>,
    /// Shortest-path distance in kilometres; `f64::INFINITY` when no path
    /// exists between the pair.
    pub distance_km: f64,
    /// Coordinates of the shortest path, origin first.
    pub polyline: Vec<Coord<f64>>,
    /// Number of graph nodes on the path.
    pub node_count: u32,
}

impl Leg {
    /// Construct a priced leg.
    pub fn new(
        from: Coord<f64>,
        to: Coord<f64>,
        distance_km: f64,
        polyline: Vec<Coord<f64>>,
        node_count: u32,
    ) -> Self {
        Self {
            from,
            to,
            distance_km,
            polyline,
            node_count,
        }
    }

    /// Sentinel leg for a pair with no path between it.
    pub fn unreachable(from: Coord<f64>, to: Coord<f64>) -> Self {
        Self::new(from, to, f64::INFINITY, Vec::new(), 0)
    }

    /// Whether the oracle found a path for this pair.
    pub fn is_reachable(&self) -> bool {
        self.distance_km.is_finite()
    }
}

/// Hashable identity of an ordered coordinate pair.
///
/// Built from the exact IEEE-754 bits of both coordinates, so two queries
/// for the same on-screen points compare equal while `(a, b)` and `(b, a)`
/// stay distinct.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PairKey {
    from: (u64, u64),
    to: (u64, u64),
}

impl PairKey {
    /// Key for the ordered pair `from -> to`.
    pub fn new(from: Coord<f64>, to: Coord<f64>) -> Self {
        Self {
            from: (from.x.to_bits(), from.y.to_bits()),
            to: (to.x.to_bits(), to.y.to_bits()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const A: Coord<f64> = Coord { x: 28.36, y: 37.21 };
    const B: Coord<f64> = Coord { x: 28.37, y: 37.22 };

    #[test]
    fn sentinel_is_unreachable() {
        let leg = Leg::unreachable(A, B);
        assert_eq!(leg.distance_km, f64::INFINITY);
        assert_eq!(leg.node_count, 0);
        assert!(!leg.is_reachable());
    }

    #[test]
    fn finite_leg_is_reachable() {
        let leg = Leg::new(A, B, 1.25, vec![A, B], 2);
        assert!(leg.is_reachable());
    }

    #[test]
    fn pair_key_is_directional() {
        assert_ne!(PairKey::new(A, B), PairKey::new(B, A));
        assert_eq!(PairKey::new(A, B), PairKey::new(A, B));
    }
}
