//! Anytime 3-opt.
//!
//! # Algorithm
//!
//! Cut positions `1 ≤ i < j < k ≤ n` split the tour into
//! `A = t[..i]`, `B = t[i..j]`, `C = t[j..k]`, `D = t[k..]`. With the
//! endpoints `a = t[i-1]`, `b = t[i]`, `c = t[j-1]`, `d = t[j]`,
//! `e = t[k-1]`, `f = t[k mod n]`, four reconnections are tried in order:
//!
//! | Move | Result | New edges |
//! |---|---|---|
//! | reverse B | A B' C D | (a,c) (b,d) (e,f) |
//! | reverse C | A B C' D | (a,b) (c,e) (d,f) |
//! | reverse B∪C | A (BC)' D | (a,e) (c,d) (b,f) |
//! | swap B, C | A C B D | (a,d) (e,b) (c,f) |
//!
//! The first improving reconnection is applied. This is a sequential subset
//! of the seven non-trivial 3-opt reconnections, not the full neighborhood.
//! The current tour is yielded before every test.
//!
//! # Reference
//!
//! Lin, S. (1965). "Computer Solutions of the Traveling Salesman Problem",
//! *Bell System Technical Journal* 44(10), 2245-2269.

use crate::distance::DistanceMatrix;
use crate::models::Tour;

use super::LocalSearchConfig;

const EPS: f64 = 1e-10;

/// Reconnection applied by a 3-opt move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Reconnection {
    ReverseFirst,
    ReverseSecond,
    ReverseBoth,
    Swap,
}

/// A 3-opt search that yields its current tour before every move test.
///
/// # Examples
///
/// ```
/// use u_tsp::models::Atlas;
/// use u_tsp::local_search::{LocalSearchConfig, ThreeOpt};
///
/// let atlas = Atlas::from_coords(vec![(0.0, 0.0), (1.0, 1.0), (1.0, 0.0), (0.0, 1.0)]);
/// let best = ThreeOpt::new(atlas.matrix(), &LocalSearchConfig::default())
///     .take(50)
///     .map(|t| atlas.distance(&t).unwrap())
///     .fold(f64::INFINITY, f64::min);
/// assert!((best - 4.0).abs() < 1e-10);
/// ```
#[derive(Debug, Clone)]
pub struct ThreeOpt<'a> {
    distances: &'a DistanceMatrix,
    tour: Tour,
    i: usize,
    j: usize,
    k: usize,
    moves: u64,
}

impl<'a> ThreeOpt<'a> {
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
            j: 2,
            k: 3,
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

    fn find_move(&self) -> Option<Reconnection> {
        let t = &self.tour;
        let n = t.len();
        let (i, j, k) = (self.i, self.j, self.k);
        let (a, b, c, d, e, f) = (t[i - 1], t[i], t[j - 1], t[j], t[k - 1], t[k % n]);
        let dm = |x: usize, y: usize| self.distances.get(x, y);

        let base = dm(a, b) + dm(c, d) + dm(e, f);
        let candidates = [
            (Reconnection::ReverseFirst, dm(a, c) + dm(b, d) + dm(e, f)),
            (Reconnection::ReverseSecond, dm(a, b) + dm(c, e) + dm(d, f)),
            (Reconnection::ReverseBoth, dm(a, e) + dm(c, d) + dm(b, f)),
            (Reconnection::Swap, dm(a, d) + dm(e, b) + dm(c, f)),
        ];
        candidates
            .into_iter()
            .find(|&(_, cost)| cost < base - EPS)
            .map(|(r, _)| r)
    }

    fn apply(&mut self, reconnection: Reconnection) {
        let (i, j, k) = (self.i, self.j, self.k);
        match reconnection {
            Reconnection::ReverseFirst => self.tour[i..j].reverse(),
            Reconnection::ReverseSecond => self.tour[j..k].reverse(),
            Reconnection::ReverseBoth => self.tour[i..k].reverse(),
            Reconnection::Swap => self.tour[i..k].rotate_left(j - i),
        }
        self.moves += 1;
    }

    fn advance(&mut self) {
        let n = self.tour.len();
        self.k += 1;
        if self.k <= n {
            return;
        }
        self.j += 1;
        self.k = self.j + 1;
        if self.k <= n {
            return;
        }
        self.i += 1;
        self.j = self.i + 1;
        self.k = self.j + 1;
        if self.k > n {
            self.i = 1;
            self.j = 2;
            self.k = 3;
        }
    }
}

impl Iterator for ThreeOpt<'_> {
    type Item = Tour;

    fn next(&mut self) -> Option<Tour> {
        let current = self.tour.clone();
        if self.tour.len() >= 3 {
            if let Some(reconnection) = self.find_move() {
                self.apply(reconnection);
                tracing::trace!(?reconnection, moves = self.moves, "3-opt move applied");
            }
            self.advance();
        }
        Some(current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::local_search::InitialTour;
    use crate::models::{is_permutation, Atlas};
    use crate::random::create_rng;

    fn line() -> Atlas {
        Atlas::from_coords(vec![
            (0.0, 0.0),
            (1.0, 0.0),
            (2.0, 0.0),
            (3.0, 0.0),
            (4.0, 0.0),
            (5.0, 0.0),
        ])
    }

    #[test]
    fn test_swap_reconnection() {
        let atlas = line();
        // A = [0], B = [3, 4], C = [1, 2], D = [5]: swapping B and C sorts the line.
        let mut search = ThreeOpt::from_tour(atlas.matrix(), vec![0, 3, 4, 1, 2, 5]);
        search.i = 1;
        search.j = 3;
        search.k = 5;
        search.apply(Reconnection::Swap);
        assert_eq!(search.tour(), &[0, 1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_first_improving_reconnection_wins() {
        let atlas = line();
        let mut search = ThreeOpt::from_tour(atlas.matrix(), vec![0, 3, 4, 1, 2, 5]);
        search.i = 1;
        search.j = 3;
        search.k = 5;
        // Reversing B∪C (9 → 7) is tested before swapping (9 → 3).
        assert_eq!(search.find_move(), Some(Reconnection::ReverseBoth));
    }

    #[test]
    fn test_reverse_first_reconnection() {
        let atlas = line();
        let mut search = ThreeOpt::from_tour(atlas.matrix(), vec![0, 2, 1, 3, 4, 5]);
        search.i = 1;
        search.j = 3;
        search.k = 4;
        assert_eq!(search.find_move(), Some(Reconnection::ReverseFirst));
        search.apply(Reconnection::ReverseFirst);
        assert_eq!(search.tour(), &[0, 1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_advance_cycles_through_all_triples() {
        let atlas = line();
        let mut search = ThreeOpt::from_tour(atlas.matrix(), (0..6).collect());
        let mut triples = Vec::new();
        loop {
            triples.push((search.i, search.j, search.k));
            search.advance();
            if (search.i, search.j, search.k) == (1, 2, 3) {
                break;
            }
        }
        // C(6, 3) choices of 1 ≤ i < j < k ≤ 6 with i ≥ 1.
        assert_eq!(triples.len(), 20);
        assert!(triples.iter().all(|&(i, j, k)| 1 <= i && i < j && j < k && k <= 6));
    }

    #[test]
    fn test_never_worsens_and_stays_permutation() {
        let mut rng = create_rng(Some(23));
        let atlas = Atlas::random(15, 0.0, 100.0, &mut rng);
        let config = LocalSearchConfig::default().with_initial(InitialTour::NearestNeighbor);
        let mut previous = f64::INFINITY;
        for tour in ThreeOpt::new(atlas.matrix(), &config).take(5000) {
            assert!(is_permutation(&tour, 15));
            let d = atlas.distance(&tour).expect("valid");
            assert!(d <= previous + 1e-9);
            previous = d;
        }
    }
}
