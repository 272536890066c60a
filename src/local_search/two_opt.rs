//! Anytime 2-opt.
//!
//! # Algorithm
//!
//! Cut positions `(i, j)` with `1 ≤ i`, `i + 2 ≤ j ≤ n` are visited in a
//! fixed cyclic order. Reversing `tour[i..j]` replaces the edges
//! `(t[i-1], t[i])` and `(t[j-1], t[j])` with `(t[i-1], t[j-1])` and
//! `(t[i], t[j])` (indices mod n), so a move improves the tour when
//!
//! ```text
//! d(t[i-1], t[j-1]) + d(t[i], t[j]) < d(t[i-1], t[i]) + d(t[j-1], t[j])
//! ```
//!
//! The first improving move found is applied and the scan continues with
//! the next pair. The current tour is yielded before every test, so the
//! sequence never ends; callers bound it externally.
//!
//! # Reference
//!
//! Croes, G.A. (1958). "A method for solving traveling salesman problems",
//! *Operations Research* 6(6), 791-812.

use crate::distance::DistanceMatrix;
use crate::models::Tour;

use super::LocalSearchConfig;

/// Minimum gain for a move to count as an improvement.
const EPS: f64 = 1e-10;

/// A 2-opt search that yields its current tour before every move test.
///
/// # Examples
///
/// ```
/// use u_tsp::models::Atlas;
/// use u_tsp::local_search::{LocalSearchConfig, TwoOpt};
///
/// // Identity order crosses the square's diagonals.
/// let atlas = Atlas::from_coords(vec![(0.0, 0.0), (1.0, 1.0), (1.0, 0.0), (0.0, 1.0)]);
/// let mut search = TwoOpt::new(atlas.matrix(), &LocalSearchConfig::default());
/// let last = search.by_ref().take(10).last().unwrap();
/// assert!((atlas.distance(&last).unwrap() - 4.0).abs() < 1e-10);
/// ```
#[derive(Debug, Clone)]
pub struct TwoOpt<'a> {
    distances: &'a DistanceMatrix,
    tour: Tour,
    i: usize,
    j: usize,
    moves: u64,
}

impl<'a> TwoOpt<'a> {
    /// Creates a search starting from the configured initial tour.
    pub fn new(distances: &'a DistanceMatrix, config: &LocalSearchConfig) -> Self {
        Self::from_tour(distances, config.initial.build(distances))
    }

    /// Creates a search starting from `tour`.
    pub fn from_tour(distances: &'a DistanceMatrix, tour: Tour) -> Self {
        Self {
            distances,
            tour,
            i: 1,
            j: 3,
            moves: 0,
        }
    }

    /// The current tour.
    pub fn tour(&self) -> &[usize] {
        &self.tour
    }

    /// Number of improving moves applied so far.
    pub fn moves(&self) -> u64 {
        self.moves
    }

    /// Tests the current cut pair and applies it if it improves the tour.
    fn test(&mut self) -> bool {
        let n = self.tour.len();
        let t = &self.tour;
        let (i, j) = (self.i, self.j);
        let (a, b, c, d) = (t[i - 1], t[i], t[j - 1], t[j % n]);

        let dm = self.distances;
        let old = dm.get(a, b) + dm.get(c, d);
        let new = dm.get(a, c) + dm.get(b, d);
        if new < old - EPS {
            self.tour[i..j].reverse();
            self.moves += 1;
            true
        } else {
            false
        }
    }

    fn advance(&mut self) {
        let n = self.tour.len();
        self.j += 1;
        if self.j > n {
            self.i += 1;
            self.j = self.i + 2;
            if self.j > n {
                self.i = 1;
                self.j = 3;
            }
        }
    }
}

impl Iterator for TwoOpt<'_> {
    type Item = Tour;

    fn next(&mut self) -> Option<Tour> {
        let current = self.tour.clone();
        if self.tour.len() >= 4 {
            if self.test() {
                tracing::trace!(i = self.i, j = self.j, moves = self.moves, "2-opt move applied");
            }
            self.advance();
        }
        Some(current)
    }
}
