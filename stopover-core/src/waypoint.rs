//! Waypoints picked by the user on the map.

use geo::Coord;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A user-selected coordinate with a display label and a list position.
///
/// Coordinates are WGS84 with `x = longitude` and `y = latitude`. The label
/// is fixed at insertion time and is purely cosmetic; the functional role of
/// a waypoint (start, middle or end) is derived from its position in the
/// current selection list whenever a search runs, so removing or appending
/// points can change a waypoint's role without touching its label.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use stopover_core::Waypoint;
///
/// let wp = Waypoint::new(0, Coord { x: 28.3638, y: 37.2156 }, "start");
/// assert_eq!(wp.index, 0);
/// assert_eq!(wp.label, "start");
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Waypoint {
    /// Position in the selection list at insertion time.
    pub index: usize,
    /// Geospatial position.
    pub location: Coord<f64>,
    /// Cosmetic caption assigned when the point was added.
    pub label: String,
}

impl Waypoint {
    /// Construct a waypoint with the given label.
    pub fn new(index: usize, location: Coord<f64>, label: impl Into<String>) -> Self {
        Self {
            index,
            location,
            label: label.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn waypoint_keeps_insertion_index() {
        let wp = Waypoint::new(3, Coord { x: 1.0, y: 2.0 }, "stop 3");
        assert_eq!(wp.index, 3);
        assert_eq!(wp.location, Coord { x: 1.0, y: 2.0 });
    }
}
