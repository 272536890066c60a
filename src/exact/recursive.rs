//! Unmemoized recursive search.
//!
//! Explores every ordering of the remaining cities depth-first from city 0.
//! Exponentially slower than [`held_karp`](super::held_karp) but trivially
//! correct, which makes it a useful reference.

use crate::distance::DistanceMatrix;
use crate::models::Tour;

/// Finds an optimal tour by plain depth-first recursion.
///
/// # Examples
///
/// ```
/// use u_tsp::models::Atlas;
/// use u_tsp::exact::{brute_force, recursive};
///
/// let atlas = Atlas::from_coords(vec![(0.0, 0.0), (2.0, 1.0), (1.0, 3.0), (4.0, 0.0), (3.0, 3.0)]);
/// let a = atlas.distance(&recursive(atlas.matrix())).unwrap();
/// let b = atlas.distance(&brute_force(atlas.matrix())).unwrap();
/// assert!((a - b).abs() < 1e-8);
/// ```
pub fn recursive(distances: &DistanceMatrix) -> Tour {
    let n = distances.size();
    if n < 2 {
        return (0..n).collect();
    }

    let remaining: Vec<usize> = (1..n).collect();
    let (_, mut rest) = search(distances, 0, &remaining);
    // `search` builds the completion back to front.
    rest.push(0);
    rest.reverse();
    rest
}

/// Returns the cheapest cost of visiting `remaining` from `current` and
/// closing back to city 0, with the visiting order reversed.
fn search(distances: &DistanceMatrix, current: usize, remaining: &[usize]) -> (f64, Vec<usize>) {
    if remaining.is_empty() {
        return (distances.get(current, 0), Vec::with_capacity(distances.size()));
    }

    let mut best_cost = f64::INFINITY;
    let mut best_path = Vec::new();
    for (idx, &next) in remaining.iter().enumerate() {
        let rest: Vec<usize> = remaining
            .iter()
            .enumerate()
            .filter(|&(k, _)| k != idx)
            .map(|(_, &c)| c)
            .collect();
        let (cost, mut path) = search(distances, next, &rest);
        let cost = cost + distances.get(current, next);
        if idx == 0 || cost < best_cost {
            path.push(next);
            best_cost = cost;
            best_path = path;
        }
    }
    (best_cost, best_path)
}
