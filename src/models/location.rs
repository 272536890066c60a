//! Location type.

use serde::{Deserialize, Serialize};

/// A point in the plane that a tour must visit.
///
/// # Examples
///
/// ```
/// use u_tsp::models::Location;
///
/// let a = Location::new(0.0, 0.0);
/// let b = Location::new(3.0, 4.0);
/// assert!((a.distance_to(&b) - 5.0).abs() < 1e-10);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Location {
    /// Horizontal coordinate.
    pub x: f64,
    /// Vertical coordinate.
    pub y: f64,
}

impl Location {
    /// Creates a location at `(x, y)`.
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another location.
    pub fn distance_to(&self, other: &Location) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

impl From<(f64, f64)> for Location {
    fn from((x, y): (f64, f64)) -> Self {
        Self::new(x, y)
    }
}

impl From<[f64; 2]> for Location {
    fn from([x, y]: [f64; 2]) -> Self {
        Self::new(x, y)
    }
}
