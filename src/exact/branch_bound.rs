//! Branch-and-bound search.
//!
//! # Algorithm
//!
//! Every city owns two tour-edge "slots". The initial lower bound charges
//! each slot half of the city's cheapest (first slot) or second-cheapest
//! (second slot) edge, i.e. `½ · Σ (first_min + second_min)`. Fixing an edge
//! `last → city` releases one slot on each end: the bound loses the average
//! of the released estimates and the real edge cost is added instead.
//! Partial tours whose `bound + cost` cannot beat the best tour found so far
//! are pruned. Self-loops are excluded by treating the diagonal as +∞.
//!
//! The search is a depth-first traversal driven by an explicit work stack,
//! seeded with a nearest-neighbor tour as the first incumbent.
//!
//! # Complexity
//!
//! Exact; O(n!) in the worst case, typically far less.

use crate::constructive::nearest_neighbor;
use crate::distance::DistanceMatrix;
use crate::models::Tour;

/// Pending expansion of the last city on the current partial path.
struct Frame {
    /// Next candidate city to try.
    next: usize,
    bound: f64,
    cost: f64,
}

/// Finds an optimal tour with branch-and-bound.
///
/// The returned tour starts at city 0.
///
/// # Examples
///
/// ```
/// use u_tsp::models::Atlas;
/// use u_tsp::exact::branch_and_bound;
///
/// let atlas = Atlas::from_coords(vec![(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)]);
/// let tour = branch_and_bound(atlas.matrix());
/// assert!((atlas.distance(&tour).unwrap() - 4.0).abs() < 1e-10);
/// ```
pub fn branch_and_bound(distances: &DistanceMatrix) -> Tour {
    let n = distances.size();
    if n < 3 {
        return (0..n).collect();
    }

    let (first, second) = two_smallest_edges(distances);
    let initial_bound = 0.5 * first.iter().zip(&second).map(|(a, b)| a + b).sum::<f64>();

    let mut best = nearest_neighbor(distances, 0);
    let mut best_cost = distances.tour_length(&best);

    let mut path = Vec::with_capacity(n);
    path.push(0);
    let mut visited = vec![false; n];
    visited[0] = true;
    let mut stack = vec![Frame {
        next: 1,
        bound: initial_bound,
        cost: 0.0,
    }];

    let (mut expanded, mut pruned) = (0u64, 0u64);
    while let Some(frame) = stack.last_mut() {
        let last = path[path.len() - 1];

        if path.len() == n {
            let total = frame.cost + distances.get(last, 0);
            if total < best_cost {
                best_cost = total;
                best.copy_from_slice(&path);
            }
            stack.pop();
            visited[last] = false;
            path.pop();
            continue;
        }

        let Some(city) = (frame.next..n).find(|&c| !visited[c]) else {
            stack.pop();
            visited[last] = false;
            path.pop();
            continue;
        };
        frame.next = city + 1;

        // City 0 still has both slots open, so its second slot is released
        // first; afterwards the path end always has exactly one open slot.
        let released = if path.len() == 1 {
            second[last] + second[city]
        } else {
            first[last] + second[city]
        };
        let bound = frame.bound - released / 2.0;
        let cost = frame.cost + distances.get(last, city);

        if bound + cost < best_cost {
            expanded += 1;
            visited[city] = true;
            path.push(city);
            stack.push(Frame {
                next: 1,
                bound,
                cost,
            });
        } else {
            pruned += 1;
        }
    }

    tracing::debug!(n, expanded, pruned, best = best_cost, "branch and bound finished");
    best
}

/// Cheapest and second-cheapest off-diagonal edge of every city.
fn two_smallest_edges(distances: &DistanceMatrix) -> (Vec<f64>, Vec<f64>) {
    let n = distances.size();
    let mut first = vec![f64::INFINITY; n];
    let mut second = vec![f64::INFINITY; n];
    for i in 0..n {
        for (j, &d) in distances.row(i).iter().enumerate() {
            if i == j {
                continue;
            }
            if d < first[i] {
                second[i] = first[i];
                first[i] = d;
            } else if d < second[i] {
                second[i] = d;
            }
        }
    }
    (first, second)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::exact::held_karp;
    use crate::models::{is_permutation, Atlas, Location};
    use crate::random::create_rng;

    #[test]
    fn test_trivial_sizes() {
        let empty = Atlas::from_coords(Vec::<Location>::new());
        assert!(branch_and_bound(empty.matrix()).is_empty());
        let pair = Atlas::from_coords(vec![(0.0, 0.0), (0.0, 2.0)]);
        assert_eq!(branch_and_bound(pair.matrix()), vec![0, 1]);
        let triangle = Atlas::from_coords(vec![(0.0, 0.0), (0.0, 2.0), (2.0, 0.0)]);
        assert!(is_permutation(&branch_and_bound(triangle.matrix()), 3));
    }

    #[test]
    fn test_two_smallest_edges_skip_diagonal() {
        let atlas = Atlas::from_coords(vec![(0.0, 0.0), (1.0, 0.0), (3.0, 0.0)]);
        let (first, second) = two_smallest_edges(atlas.matrix());
        assert_eq!(first, vec![1.0, 1.0, 2.0]);
        assert_eq!(second, vec![3.0, 2.0, 3.0]);
    }

    #[test]
    fn test_matches_held_karp_on_random_instances() {
        let mut rng = create_rng(Some(5));
        for n in 3..=10 {
            let atlas = Atlas::random(n, 0.0, 1000.0, &mut rng);
            let bb = branch_and_bound(atlas.matrix());
            assert!(is_permutation(&bb, n));
            let a = atlas.distance(&bb).expect("valid");
            let b = atlas.distance(&held_karp(atlas.matrix())).expect("valid");
            assert!((a - b).abs() < 1e-8, "n={n}: {a} vs {b}");
        }
    }

    #[test]
    fn test_circle_optimum_is_polygon() {
        let mut rng = create_rng(Some(9));
        let n = 10;
        let atlas = Atlas::circle(n, 0.0, 2.0, &mut rng);
        let perimeter = 2.0 * n as f64 * (std::f64::consts::PI / n as f64).sin();
        let tour = branch_and_bound(atlas.matrix());
        assert!((atlas.distance(&tour).expect("valid") - perimeter).abs() < 1e-9);
    }

    /// Coordinates whose pairwise distances overflow between cities 1 and 2.
    fn overflowing() -> Atlas {
        Atlas::from_coords(vec![(0.0, 0.0), (f64::MAX, 0.0), (-f64::MAX, 0.0), (0.0, 1.0)])
    }

    #[test]
    fn test_infinite_costs_keep_incumbent() {
        assert!(is_permutation(&branch_and_bound(overflowing().matrix()), 4));
    }
}
