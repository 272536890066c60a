//! Sequential constructive crossover and swap mutation.
//!
//! # Algorithm
//!
//! The child starts at a random city. From the last placed city, each
//! parent offers its "legitimate" successor: the first unplaced city after
//! the current one in that parent's order, or the lowest-index unplaced city
//! if the parent has none left. The candidate with the shorter edge from the
//! last placed city is appended (ties favor the first parent).
//!
//! # Reference
//!
//! Ahmed, Z.H. (2010). "Genetic algorithm for the traveling salesman problem
//! using sequential constructive crossover operator", *IJBB* 3(6), 96-105.

use rand::Rng;

use crate::distance::DistanceMatrix;
use crate::models::Tour;

/// Breeds a child tour from two parent tours.
///
/// Both parents must be permutations of `0..n`.
///
/// # Examples
///
/// ```
/// use u_tsp::models::{is_permutation, Atlas};
/// use u_tsp::ga::sequential_constructive_crossover;
/// use u_tsp::random::create_rng;
///
/// let atlas = Atlas::from_coords(vec![(0.0, 0.0), (1.0, 0.0), (2.0, 0.0), (3.0, 0.0)]);
/// let mut rng = create_rng(Some(42));
/// let child = sequential_constructive_crossover(atlas.matrix(), &[0, 1, 2, 3], &[3, 1, 0, 2], &mut rng);
/// assert!(is_permutation(&child, 4));
/// ```
pub fn sequential_constructive_crossover<R: Rng>(
    distances: &DistanceMatrix,
    parent1: &[usize],
    parent2: &[usize],
    rng: &mut R,
) -> Tour {
    let n = parent1.len();
    if n == 0 {
        return Vec::new();
    }

    let pos1 = positions(parent1);
    let pos2 = positions(parent2);
    let mut used = vec![false; n];
    let mut lowest_unused = 0;

    let mut current = rng.random_range(0..n);
    used[current] = true;
    let mut child = Vec::with_capacity(n);
    child.push(current);

    for _ in 1..n {
        while used[lowest_unused] {
            lowest_unused += 1;
        }
        let a = successor(parent1, &pos1, current, &used).unwrap_or(lowest_unused);
        let b = successor(parent2, &pos2, current, &used).unwrap_or(lowest_unused);
        current = if distances.get(current, a) <= distances.get(current, b) {
            a
        } else {
            b
        };
        used[current] = true;
        child.push(current);
    }
    child
}

/// Swaps two distinct random positions.
///
/// Tours with fewer than two cities are left untouched.
pub fn swap_mutation<R: Rng>(tour: &mut [usize], rng: &mut R) {
    let n = tour.len();
    if n < 2 {
        return;
    }
    let i = rng.random_range(0..n);
    let mut j = rng.random_range(0..n - 1);
    if j >= i {
        j += 1;
    }
    tour.swap(i, j);
}

fn positions(tour: &[usize]) -> Vec<usize> {
    let mut pos = vec![0; tour.len()];
    for (idx, &city) in tour.iter().enumerate() {
        pos[city] = idx;
    }
    pos
}

/// First unused city after `current` in `parent`.
fn successor(parent: &[usize], pos: &[usize], current: usize, used: &[bool]) -> Option<usize> {
    parent[pos[current] + 1..].iter().copied().find(|&c| !used[c])
}
