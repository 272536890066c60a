//! Christofides approximation.
//!
//! # Algorithm
//!
//! 1. Build a minimum spanning tree.
//! 2. Collect the vertices of odd degree (always an even number of them).
//! 3. Compute a minimum-weight perfect matching over the odd vertices.
//! 4. Union tree and matching edges into a multigraph where every vertex has
//!    even degree.
//! 5. Extract an Eulerian circuit from city 0 (Hierholzer, depth-first edge
//!    consumption with an explicit stack).
//! 6. Shortcut repeated cities to obtain a Hamiltonian tour.
//!
//! # Complexity
//!
//! O(n²) plus the matching; exact matching is O(2ᵏ · k) over the k odd
//! vertices (see [`EXACT_LIMIT`](super::matching::EXACT_LIMIT)).
//!
//! # Reference
//!
//! Christofides, N. (1976). "Worst-case analysis of a new heuristic for the
//! travelling salesman problem", Report 388, Carnegie-Mellon University.

use serde::{Deserialize, Serialize};

use crate::distance::DistanceMatrix;
use crate::models::Tour;

use super::matching::perfect_matching;
use super::mst::minimum_spanning_tree;

/// How repeated cities in the Eulerian circuit are removed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Shortcut {
    /// Keep each city where it first appears.
    #[default]
    FirstOccurrence,
    /// Keep the occurrence whose detour `d(prev, v) + d(v, next) - d(prev, next)`
    /// is smallest.
    CheapestOccurrence,
}

/// Parameters for [`christofides`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChristofidesConfig {
    /// Shortcutting strategy.
    pub shortcut: Shortcut,
}

impl ChristofidesConfig {
    /// Sets the shortcutting strategy.
    pub fn with_shortcut(mut self, shortcut: Shortcut) -> Self {
        self.shortcut = shortcut;
        self
    }
}

/// Constructs a tour with the Christofides heuristic.
///
/// # Examples
///
/// ```
/// use u_tsp::models::{is_permutation, Atlas};
/// use u_tsp::constructive::{christofides, ChristofidesConfig};
///
/// let atlas = Atlas::from_coords(vec![(0.0, 0.0), (4.0, 0.0), (4.0, 3.0), (0.0, 3.0), (2.0, 5.0)]);
/// let tour = christofides(atlas.matrix(), &ChristofidesConfig::default());
/// assert!(is_permutation(&tour, 5));
/// ```
pub fn christofides(distances: &DistanceMatrix, config: &ChristofidesConfig) -> Tour {
    let n = distances.size();
    if n < 2 {
        return (0..n).collect();
    }

    let mut edges = minimum_spanning_tree(distances);

    let mut degree = vec![0usize; n];
    for &(a, b) in &edges {
        degree[a] += 1;
        degree[b] += 1;
    }
    let odd: Vec<usize> = (0..n).filter(|&v| degree[v] % 2 == 1).collect();
    let matching = perfect_matching(distances, &odd);
    tracing::debug!(n, odd = odd.len(), "christofides matching computed");
    edges.extend(matching);

    let circuit = eulerian_circuit(n, &edges);
    match config.shortcut {
        Shortcut::FirstOccurrence => shortcut_first(n, &circuit),
        Shortcut::CheapestOccurrence => shortcut_cheapest(distances, circuit),
    }
}

/// Extracts an Eulerian circuit starting at city 0.
///
/// Every vertex must have even degree and the graph must be connected. The
/// circuit is returned as a closed walk (first vertex repeated at the end).
pub(crate) fn eulerian_circuit(n: usize, edges: &[(usize, usize)]) -> Vec<usize> {
    let mut adj: Vec<Vec<(usize, usize)>> = vec![Vec::new(); n];
    for (id, &(a, b)) in edges.iter().enumerate() {
        adj[a].push((b, id));
        adj[b].push((a, id));
    }
    for list in &mut adj {
        list.sort_unstable();
    }

    let mut used = vec![false; edges.len()];
    let mut cursor = vec![0usize; n];
    let mut stack = vec![0usize];
    let mut circuit = Vec::with_capacity(edges.len() + 1);

    while let Some(&v) = stack.last() {
        while cursor[v] < adj[v].len() && used[adj[v][cursor[v]].1] {
            cursor[v] += 1;
        }
        match adj[v].get(cursor[v]) {
            Some(&(u, id)) => {
                used[id] = true;
                stack.push(u);
            }
            None => {
                circuit.push(v);
                stack.pop();
            }
        }
    }
    circuit.reverse();
    circuit
}

fn shortcut_first(n: usize, circuit: &[usize]) -> Tour {
    let mut seen = vec![false; n];
    circuit
        .iter()
        .copied()
        .filter(|&v| !std::mem::replace(&mut seen[v], true))
        .collect()
}

fn shortcut_cheapest(distances: &DistanceMatrix, mut walk: Vec<usize>) -> Tour {
    if walk.len() > 1 && walk.first() == walk.last() {
        walk.pop();
    }

    // Repeated cities, in order of first appearance.
    let mut counts = vec![0usize; distances.size()];
    let mut repeated = Vec::new();
    for &v in &walk {
        counts[v] += 1;
        if counts[v] == 2 {
            repeated.push(v);
        }
    }
    repeated.sort_by_key(|&v| walk.iter().position(|&c| c == v));

    for v in repeated {
        let len = walk.len();
        let detour = |p: usize| {
            let prev = walk[(p + len - 1) % len];
            let next = walk[(p + 1) % len];
            distances.get(prev, v) + distances.get(v, next) - distances.get(prev, next)
        };
        let keep = (0..len)
            .filter(|&p| walk[p] == v)
            .min_by(|&a, &b| detour(a).total_cmp(&detour(b)));
        if let Some(keep) = keep {
            walk = walk
                .iter()
                .enumerate()
                .filter(|&(p, &c)| c != v || p == keep)
                .map(|(_, &c)| c)
                .collect();
        }
    }
    walk
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::exact::held_karp;
    use crate::models::{is_permutation, Atlas, Location};
    use crate::random::create_rng;

    #[test]
    fn test_euler_circuit_uses_every_edge() {
        // Two triangles sharing vertex 0.
        let edges = vec![(0, 1), (1, 2), (2, 0), (0, 3), (3, 4), (4, 0)];
        let circuit = eulerian_circuit(5, &edges);
        assert_eq!(circuit.len(), edges.len() + 1);
        assert_eq!(circuit.first(), Some(&0));
        assert_eq!(circuit.last(), Some(&0));
        assert_eq!(circuit.iter().filter(|&&v| v == 0).count(), 3);
    }

    #[test]
    fn test_degenerate_sizes() {
        let config = ChristofidesConfig::default();
        let empty = Atlas::from_coords(Vec::<Location>::new());
        assert!(christofides(empty.matrix(), &config).is_empty());
        let single = Atlas::from_coords(vec![(1.0, 1.0)]);
        assert_eq!(christofides(single.matrix(), &config), vec![0]);
        let pair = Atlas::from_coords(vec![(0.0, 0.0), (1.0, 1.0)]);
        assert_eq!(christofides(pair.matrix(), &config), vec![0, 1]);
    }

    #[test]
    fn test_shortcut_cheapest_keeps_one_of_each() {
        let atlas = Atlas::from_coords(vec![(0.0, 0.0), (1.0, 0.0), (2.0, 0.0), (1.0, 5.0)]);
        let tour = shortcut_cheapest(atlas.matrix(), vec![0, 1, 2, 1, 3, 0]);
        assert!(is_permutation(&tour, 4));
        // City 1 between 0 and 2 costs nothing extra on the line.
        assert_eq!(tour, vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_within_three_halves_of_optimum() {
        let mut rng = create_rng(Some(4));
        for n in [6, 8, 10] {
            let atlas = Atlas::random(n, 0.0, 100.0, &mut rng);
            let optimum = atlas.distance(&held_karp(atlas.matrix())).expect("valid");
            for shortcut in [Shortcut::FirstOccurrence, Shortcut::CheapestOccurrence] {
                let config = ChristofidesConfig::default().with_shortcut(shortcut);
                let tour = christofides(atlas.matrix(), &config);
                assert!(is_permutation(&tour, n));
                let d = atlas.distance(&tour).expect("valid");
                assert!(d <= 1.5 * optimum + 1e-9, "{shortcut:?}: {d} vs {optimum}");
            }
        }
    }
}
