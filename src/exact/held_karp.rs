//! Held–Karp bitmask dynamic programming.
//!
//! # Algorithm
//!
//! `cost(city, visited)` is the cheapest way to visit every city outside the
//! `visited` bitmask starting from `city` and return to city 0. It is
//! evaluated depth-first and memoized in a dense table indexed by
//! `visited · n + city`; the state with every bit set closes back to 0.
//!
//! # Complexity
//!
//! O(n² · 2ⁿ) time, O(n · 2ⁿ) memory.
//!
//! # Reference
//!
//! Held, M. & Karp, R.M. (1962). "A dynamic programming approach to
//! sequencing problems", *J. SIAM* 10(1), 196-210.

use crate::distance::DistanceMatrix;
use crate::models::Tour;

const UNSET: u8 = u8::MAX;

/// Finds an optimal tour with Held–Karp dynamic programming.
///
/// The returned tour starts at city 0.
///
/// # Panics
///
/// Panics if the table would not fit in memory; callers bound `n` (see
/// [`Registry`](crate::controller::Registry)).
///
/// # Examples
///
/// ```
/// use u_tsp::models::Atlas;
/// use u_tsp::exact::held_karp;
///
/// let atlas = Atlas::from_coords(vec![(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)]);
/// let tour = held_karp(atlas.matrix());
/// assert_eq!(tour[0], 0);
/// assert!((atlas.distance(&tour).unwrap() - 4.0).abs() < 1e-10);
/// ```
pub fn held_karp(distances: &DistanceMatrix) -> Tour {
    let n = distances.size();
    if n < 2 {
        return (0..n).collect();
    }

    let mut table = Table::new(distances);
    let best = table.cost(0, 1);
    tracing::debug!(n, states = table.filled, best, "held-karp finished");
    table.reconstruct()
}

struct Table<'a> {
    distances: &'a DistanceMatrix,
    n: usize,
    full: usize,
    memo: Vec<f64>,
    choice: Vec<u8>,
    filled: usize,
}

impl<'a> Table<'a> {
    fn new(distances: &'a DistanceMatrix) -> Self {
        let n = distances.size();
        let states = n << n;
        Self {
            distances,
            n,
            full: (1usize << n) - 1,
            memo: vec![f64::NAN; states],
            choice: vec![UNSET; states],
            filled: 0,
        }
    }

    fn cost(&mut self, city: usize, visited: usize) -> f64 {
        if visited == self.full {
            return self.distances.get(city, 0);
        }
        let key = visited * self.n + city;
        if !self.memo[key].is_nan() {
            return self.memo[key];
        }

        let mut best = f64::INFINITY;
        let mut best_next = UNSET;
        for next in 0..self.n {
            if visited & (1 << next) != 0 {
                continue;
            }
            let c = self.distances.get(city, next) + self.cost(next, visited | (1 << next));
            if best_next == UNSET || c < best {
                best = c;
                best_next = next as u8;
            }
        }

        self.memo[key] = best;
        self.choice[key] = best_next;
        self.filled += 1;
        best
    }

    fn reconstruct(&self) -> Tour {
        let mut tour = Vec::with_capacity(self.n);
        tour.push(0);
        let (mut city, mut visited) = (0usize, 1usize);
        while visited != self.full {
            let next = self.choice[visited * self.n + city] as usize;
            tour.push(next);
            visited |= 1 << next;
            city = next;
        }
        tour
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::exact::brute_force;
    use crate::models::{is_permutation, Atlas, Location};
    use crate::random::create_rng;

    #[test]
    fn test_trivial_sizes() {
        let empty = Atlas::from_coords(Vec::<Location>::new());
        assert!(held_karp(empty.matrix()).is_empty());
        let single = Atlas::from_coords(vec![(1.0, 1.0)]);
        assert_eq!(held_karp(single.matrix()), vec![0]);
        let pair = Atlas::from_coords(vec![(0.0, 0.0), (0.0, 2.0)]);
        assert_eq!(held_karp(pair.matrix()), vec![0, 1]);
    }

    #[test]
    fn test_matches_brute_force() {
        let mut rng = create_rng(Some(11));
        for n in 3..=8 {
            let atlas = Atlas::random(n, 0.0, 100.0, &mut rng);
            let dp = held_karp(atlas.matrix());
            assert!(is_permutation(&dp, n));
            let a = atlas.distance(&dp).expect("valid");
            let b = atlas.distance(&brute_force(atlas.matrix())).expect("valid");
            assert!((a - b).abs() < 1e-8, "n={n}: {a} vs {b}");
        }
    }

    #[test]
    fn test_memo_is_dense() {
        let atlas = Atlas::from_coords(vec![(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)]);
        let table = Table::new(atlas.matrix());
        assert_eq!(table.memo.len(), 4 * 16);
    }

    /// Coordinates whose pairwise distances overflow between cities 1 and 2.
    fn overflowing() -> Atlas {
        Atlas::from_coords(vec![(0.0, 0.0), (f64::MAX, 0.0), (-f64::MAX, 0.0), (0.0, 1.0)])
    }

    #[test]
    fn test_infinite_costs_still_reconstruct() {
        let tour = held_karp(overflowing().matrix());
        assert_eq!(tour[0], 0);
        assert!(is_permutation(&tour, 4));
    }
}
