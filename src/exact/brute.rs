//! Brute-force permutation search.
//!
//! # Algorithm
//!
//! Enumerates permutations of `0..n` in lexicographic order and keeps the
//! shortest. A tour and its mirror image have equal length, so only the
//! first `n!/2` permutations are examined; the first `(n-1)!` of those
//! already start at city 0 and therefore cover every cyclic tour.
//!
//! # Complexity
//!
//! O(n · n!) time, O(n) memory.

use crate::distance::DistanceMatrix;
use crate::models::Tour;

/// Finds an optimal tour by exhaustive enumeration.
///
/// Fewer than two locations yield the trivial tour. The first strict
/// minimum in lexicographic order wins ties.
///
/// # Examples
///
/// ```
/// use u_tsp::models::Atlas;
/// use u_tsp::exact::brute_force;
///
/// let atlas = Atlas::from_coords(vec![(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)]);
/// let tour = brute_force(atlas.matrix());
/// assert!((atlas.distance(&tour).unwrap() - 4.0).abs() < 1e-10);
/// ```
pub fn brute_force(distances: &DistanceMatrix) -> Tour {
    let n = distances.size();
    let mut perm: Tour = (0..n).collect();
    if n < 2 {
        return perm;
    }

    let budget = factorial(n) / 2;
    let mut best = perm.clone();
    let mut best_dist = distances.tour_length(&perm);

    let mut examined = 1u64;
    while examined < budget && next_permutation(&mut perm) {
        examined += 1;
        let dist = distances.tour_length(&perm);
        if dist < best_dist {
            best_dist = dist;
            best.copy_from_slice(&perm);
        }
    }

    tracing::trace!(n, examined, best = best_dist, "brute force finished");
    best
}

fn factorial(n: usize) -> u64 {
    (1..=n as u64).fold(1u64, |acc, k| acc.saturating_mul(k))
}

/// Advances `perm` to the next lexicographic permutation.
///
/// Returns `false` (and resets to ascending order) after the last one.
pub(crate) fn next_permutation(perm: &mut [usize]) -> bool {
    let n = perm.len();
    if n < 2 {
        return false;
    }
    let mut i = n - 1;
    while i > 0 && perm[i - 1] >= perm[i] {
        i -= 1;
    }
    if i == 0 {
        perm.reverse();
        return false;
    }
    let mut j = n - 1;
    while perm[j] <= perm[i - 1] {
        j -= 1;
    }
    perm.swap(i - 1, j);
    perm[i..].reverse();
    true
}
