//! Location set with its derived distance matrix.

use std::f64::consts::TAU;

use rand::seq::SliceRandom;
use rand::Rng;

use crate::distance::DistanceMatrix;
use crate::error::{Result, TspError};

use super::{is_permutation, Location};

/// An immutable set of locations and the Euclidean distances between them.
///
/// The distance matrix is computed once at construction and shared
/// read-only by every solver run against this atlas.
///
/// # Examples
///
/// ```
/// use u_tsp::models::Atlas;
///
/// let atlas = Atlas::from_coords(vec![(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)]);
/// assert_eq!(atlas.size(), 4);
/// assert_eq!(atlas.bounds(), (0.0, 1.0));
/// assert!((atlas.distance(&[0, 1, 2, 3]).unwrap() - 4.0).abs() < 1e-10);
/// ```
#[derive(Debug, Clone)]
pub struct Atlas {
    locations: Vec<Location>,
    lo: f64,
    hi: f64,
    distances: DistanceMatrix,
}

impl Atlas {
    /// Samples `n` locations uniformly from the square `[lo, hi)²`.
    pub fn random<R: Rng>(n: usize, lo: f64, hi: f64, rng: &mut R) -> Self {
        let span = hi - lo;
        let locations = (0..n)
            .map(|_| {
                Location::new(
                    lo + span * rng.random::<f64>(),
                    lo + span * rng.random::<f64>(),
                )
            })
            .collect();
        Self::with_bounds(locations, lo, hi)
    }

    /// Places `n` locations at evenly spaced angles on a circle inscribed in
    /// the square `[lo, hi]²`.
    ///
    /// The angles are shuffled so the identity order is not already optimal.
    /// The optimal tour length is the perimeter of the inscribed polygon.
    pub fn circle<R: Rng>(n: usize, lo: f64, hi: f64, rng: &mut R) -> Self {
        let mut angles: Vec<f64> = (0..n).map(|k| TAU * k as f64 / n as f64).collect();
        angles.shuffle(rng);

        let center = (lo + hi) / 2.0;
        let radius = (hi - lo) / 2.0;
        let locations = angles
            .into_iter()
            .map(|a| Location::new(center + radius * a.cos(), center + radius * a.sin()))
            .collect();
        Self::with_bounds(locations, lo, hi)
    }

    /// Builds an atlas from externally supplied coordinates.
    ///
    /// Bounds are the minimum and maximum over both axes. An empty list has
    /// bounds `(0.0, 0.0)`.
    pub fn from_coords<I, P>(coords: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<Location>,
    {
        let locations: Vec<Location> = coords.into_iter().map(Into::into).collect();
        let (lo, hi) = locations
            .iter()
            .flat_map(|l| [l.x, l.y])
            .fold(None, |acc: Option<(f64, f64)>, v| match acc {
                None => Some((v, v)),
                Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
            })
            .unwrap_or((0.0, 0.0));
        Self::with_bounds(locations, lo, hi)
    }

    fn with_bounds(locations: Vec<Location>, lo: f64, hi: f64) -> Self {
        let distances = DistanceMatrix::from_locations(&locations);
        Self {
            locations,
            lo,
            hi,
            distances,
        }
    }

    /// Number of locations.
    pub fn size(&self) -> usize {
        self.locations.len()
    }

    /// Returns `true` if the atlas has no locations.
    pub fn is_empty(&self) -> bool {
        self.locations.is_empty()
    }

    /// All locations in index order.
    pub fn coords(&self) -> &[Location] {
        &self.locations
    }

    /// The location at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of bounds.
    pub fn location(&self, index: usize) -> Location {
        self.locations[index]
    }

    /// Coordinate bounds `(lo, hi)`.
    pub fn bounds(&self) -> (f64, f64) {
        (self.lo, self.hi)
    }

    /// The pairwise distance matrix.
    pub fn matrix(&self) -> &DistanceMatrix {
        &self.distances
    }

    /// Total length of the closed tour.
    ///
    /// Returns `0.0` for an empty atlas regardless of `tour`.
    ///
    /// # Errors
    ///
    /// - [`TspError::InvalidTour`] if the tour length differs from [`size`](Self::size)
    /// - [`TspError::NotAPermutation`] if the tour repeats a location or
    ///   names one out of range
    pub fn distance(&self, tour: &[usize]) -> Result<f64> {
        let n = self.size();
        if n == 0 {
            return Ok(0.0);
        }
        if tour.len() != n {
            return Err(TspError::InvalidTour {
                expected: n,
                actual: tour.len(),
            });
        }
        if !is_permutation(tour, n) {
            return Err(TspError::NotAPermutation { size: n });
        }
        Ok(self.distances.tour_length(tour))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::create_rng;

    fn unit_square() -> Atlas {
        Atlas::from_coords(vec![(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)])
    }

    #[test]
    fn test_random_within_bounds() {
        let mut rng = create_rng(Some(42));
        let atlas = Atlas::random(50, -5.0, 5.0, &mut rng);
        assert_eq!(atlas.size(), 50);
        assert_eq!(atlas.bounds(), (-5.0, 5.0));
        for l in atlas.coords() {
            assert!((-5.0..5.0).contains(&l.x));
            assert!((-5.0..5.0).contains(&l.y));
        }
    }

    #[test]
    fn test_random_degenerate_bounds() {
        let mut rng = create_rng(Some(1));
        let atlas = Atlas::random(3, 2.0, 2.0, &mut rng);
        assert!(atlas.coords().iter().all(|l| l.x == 2.0 && l.y == 2.0));
    }

    #[test]
    fn test_circle_on_radius() {
        let mut rng = create_rng(Some(7));
        let atlas = Atlas::circle(12, 0.0, 10.0, &mut rng);
        for l in atlas.coords() {
            let r = ((l.x - 5.0).powi(2) + (l.y - 5.0).powi(2)).sqrt();
            assert!((r - 5.0).abs() < 1e-9);
        }
    }

    #[test]
    fn test_circle_is_shuffled_polygon() {
        let mut rng = create_rng(Some(3));
        let n = 8;
        let atlas = Atlas::circle(n, 0.0, 2.0, &mut rng);
        // Sort indices by angle to recover the polygon order.
        let mut order: Vec<usize> = (0..n).collect();
        order.sort_by(|&a, &b| {
            let la = atlas.location(a);
            let lb = atlas.location(b);
            let ta = (la.y - 1.0).atan2(la.x - 1.0);
            let tb = (lb.y - 1.0).atan2(lb.x - 1.0);
            ta.partial_cmp(&tb).expect("finite")
        });
        assert!(is_permutation(&order, n));
        let perimeter = 2.0 * n as f64 * (std::f64::consts::PI / n as f64).sin();
        assert!((atlas.distance(&order).expect("valid") - perimeter).abs() < 1e-9);
    }

    #[test]
    fn test_from_coords_bounds() {
        let atlas = Atlas::from_coords(vec![[3.0, -1.0], [7.5, 2.0]]);
        assert_eq!(atlas.bounds(), (-1.0, 7.5));
        assert_eq!(Atlas::from_coords(Vec::<Location>::new()).bounds(), (0.0, 0.0));
    }

    #[test]
    fn test_distance_square() {
        let atlas = unit_square();
        assert!((atlas.distance(&[0, 1, 2, 3]).expect("valid") - 4.0).abs() < 1e-10);
        let crossed = atlas.distance(&[0, 2, 1, 3]).expect("valid");
        assert!((crossed - (2.0 + 2.0 * 2f64.sqrt())).abs() < 1e-10);
    }

    #[test]
    fn test_distance_rejects_repeats_and_out_of_range() {
        let atlas = Atlas::from_coords(vec![(0.0, 0.0), (1.0, 0.0), (0.0, 1.0)]);
        assert_eq!(atlas.distance(&[0, 1, 7]), Err(TspError::NotAPermutation { size: 3 }));
        assert_eq!(atlas.distance(&[0, 1, 1]), Err(TspError::NotAPermutation { size: 3 }));
    }

    #[test]
    fn test_distance_with_huge_coordinates_stays_finite() {
        let atlas = Atlas::from_coords(vec![(0.0, 0.0), (1e200, 0.0), (2e200, 0.0), (3e200, 1.0)]);
        assert_eq!(atlas.matrix().get(0, 1), 1e200);
        let d = atlas.distance(&[0, 1, 2, 3]).expect("valid");
        assert!(d.is_finite());
    }

    #[test]
    fn test_distance_invalid_tour() {
        let atlas = unit_square();
        assert_eq!(
            atlas.distance(&[0, 1]),
            Err(TspError::InvalidTour {
                expected: 4,
                actual: 2
            })
        );
    }

    #[test]
    fn test_distance_degenerate_sizes() {
        let empty = Atlas::from_coords(Vec::<Location>::new());
        assert_eq!(empty.distance(&[]), Ok(0.0));
        let single = Atlas::from_coords(vec![(4.0, 4.0)]);
        assert_eq!(single.distance(&[0]), Ok(0.0));
    }
}
