//! Nearest-neighbor constructive heuristic.
//!
//! Builds a tour greedily: starting from `start`, always step to the closest
//! city not yet visited. Visited cities are masked out with +∞ so they can
//! never be the argmin again.
//!
//! # Complexity
//!
//! O(n²) where n = number of locations.
//!
//! # Reference
//!
//! The simplest TSP construction heuristic. Tours are typically 20-25%
//! above optimal, which makes it a fast baseline and a good seed for local
//! search.

use crate::distance::DistanceMatrix;
use crate::models::Tour;

/// Constructs a tour using the nearest-neighbor heuristic.
///
/// Ties are broken by the lowest city index.
///
/// # Panics
///
/// Panics if `start` is out of range for a non-empty matrix.
///
/// # Examples
///
/// ```
/// use u_tsp::models::Atlas;
/// use u_tsp::constructive::nearest_neighbor;
///
/// let atlas = Atlas::from_coords(vec![(0.0, 0.0), (3.0, 0.0), (1.0, 0.0), (2.0, 0.0)]);
/// assert_eq!(nearest_neighbor(atlas.matrix(), 0), vec![0, 2, 3, 1]);
/// ```
pub fn nearest_neighbor(distances: &DistanceMatrix, start: usize) -> Tour {
    let n = distances.size();
    if n == 0 {
        return Vec::new();
    }
    assert!(start < n, "start city {start} out of range for {n} locations");

    let mut visited = vec![false; n];
    let mut tour = Vec::with_capacity(n);
    let mut current = start;
    tour.push(current);

    for _ in 1..n {
        visited[current] = true;
        // The first unvisited city is taken even at infinite distance.
        let mut next = None;
        let mut best = f64::INFINITY;
        for (city, &d) in distances.row(current).iter().enumerate() {
            if !visited[city] && (next.is_none() || d < best) {
                best = d;
                next = Some(city);
            }
        }
        let Some(next) = next else { break };
        current = next;
        tour.push(current);
    }
    tour
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{is_permutation, Atlas, Location};
    use crate::random::create_rng;

    #[test]
    fn test_nn_line_from_middle() {
        let atlas = Atlas::from_coords(vec![(0.0, 0.0), (1.0, 0.0), (2.0, 0.0), (10.0, 0.0)]);
        assert_eq!(nearest_neighbor(atlas.matrix(), 1), vec![1, 0, 2, 3]);
    }

    #[test]
    fn test_nn_degenerate_sizes() {
        let empty = Atlas::from_coords(Vec::<Location>::new());
        assert!(nearest_neighbor(empty.matrix(), 0).is_empty());
        let single = Atlas::from_coords(vec![(1.0, 1.0)]);
        assert_eq!(nearest_neighbor(single.matrix(), 0), vec![0]);
    }

    #[test]
    fn test_nn_duplicate_points() {
        let atlas = Atlas::from_coords(vec![(1.0, 1.0), (1.0, 1.0), (1.0, 1.0)]);
        let tour = nearest_neighbor(atlas.matrix(), 2);
        assert_eq!(tour, vec![2, 0, 1]);
    }

    #[test]
    fn test_nn_is_permutation() {
        let mut rng = create_rng(Some(42));
        let atlas = Atlas::random(40, 0.0, 100.0, &mut rng);
        for start in [0, 17, 39] {
            let tour = nearest_neighbor(atlas.matrix(), start);
            assert_eq!(tour[0], start);
            assert!(is_permutation(&tour, 40));
        }
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn test_nn_bad_start() {
        let atlas = Atlas::from_coords(vec![(0.0, 0.0), (1.0, 0.0)]);
        nearest_neighbor(atlas.matrix(), 5);
    }

    /// Coordinates whose pairwise distances overflow between cities 1 and 2.
    fn overflowing() -> Atlas {
        Atlas::from_coords(vec![(0.0, 0.0), (f64::MAX, 0.0), (-f64::MAX, 0.0), (0.0, 1.0)])
    }

    #[test]
    fn test_infinite_distances_still_visit_every_city() {
        let atlas = overflowing();
        assert_eq!(atlas.matrix().get(1, 2), f64::INFINITY);
        let tour = nearest_neighbor(atlas.matrix(), 0);
        assert_eq!(tour, vec![0, 3, 1, 2]);
    }
}
