//! Minimum spanning tree and its preorder walk.
//!
//! # Algorithm
//!
//! Prim's algorithm over the dense distance matrix builds the MST. A
//! depth-first preorder traversal from city 0, visiting children in
//! ascending index order, lists every city once; closing the walk gives a
//! tour at most twice the optimum on metric instances.
//!
//! # Complexity
//!
//! O(n²) for Prim on a dense graph, O(n) for the traversal.

use crate::distance::DistanceMatrix;
use crate::models::Tour;

/// Computes a minimum spanning tree as a list of `(parent, child)` edges.
///
/// The tree is rooted at city 0. Ties are broken by the lowest index.
///
/// # Examples
///
/// ```
/// use u_tsp::models::Atlas;
/// use u_tsp::constructive::minimum_spanning_tree;
///
/// let atlas = Atlas::from_coords(vec![(0.0, 0.0), (5.0, 0.0), (1.0, 0.0)]);
/// let edges = minimum_spanning_tree(atlas.matrix());
/// assert_eq!(edges, vec![(0, 2), (2, 1)]);
/// ```
pub fn minimum_spanning_tree(distances: &DistanceMatrix) -> Vec<(usize, usize)> {
    let n = distances.size();
    let mut edges = Vec::with_capacity(n.saturating_sub(1));
    if n < 2 {
        return edges;
    }

    let mut in_tree = vec![false; n];
    let mut key = vec![f64::INFINITY; n];
    let mut parent = vec![0usize; n];
    key[0] = 0.0;

    for _ in 0..n {
        let mut u = usize::MAX;
        let mut best = f64::INFINITY;
        for v in 0..n {
            if !in_tree[v] && (u == usize::MAX || key[v] < best) {
                best = key[v];
                u = v;
            }
        }
        in_tree[u] = true;
        if u != 0 {
            edges.push((parent[u], u));
        }
        for (v, &d) in distances.row(u).iter().enumerate() {
            if !in_tree[v] && d < key[v] {
                key[v] = d;
                parent[v] = u;
            }
        }
    }
    edges
}

/// Converts an edge list into sorted adjacency lists over `n` vertices.
pub(crate) fn adjacency(n: usize, edges: &[(usize, usize)]) -> Vec<Vec<usize>> {
    let mut adj = vec![Vec::new(); n];
    for &(a, b) in edges {
        adj[a].push(b);
        adj[b].push(a);
    }
    for list in &mut adj {
        list.sort_unstable();
    }
    adj
}

/// Constructs a tour from the preorder walk of the minimum spanning tree.
///
/// # Examples
///
/// ```
/// use u_tsp::models::Atlas;
/// use u_tsp::constructive::mst_preorder;
///
/// let atlas = Atlas::from_coords(vec![(0.0, 0.0), (5.0, 0.0), (1.0, 0.0), (2.0, 1.0)]);
/// let tour = mst_preorder(atlas.matrix());
/// assert_eq!(tour[0], 0);
/// assert_eq!(tour.len(), 4);
/// ```
pub fn mst_preorder(distances: &DistanceMatrix) -> Tour {
    let n = distances.size();
    if n == 0 {
        return Vec::new();
    }

    let adj = adjacency(n, &minimum_spanning_tree(distances));
    let mut placed = vec![false; n];
    let mut tour = Vec::with_capacity(n);
    let mut stack = vec![0usize];

    while let Some(city) = stack.pop() {
        if placed[city] {
            continue;
        }
        placed[city] = true;
        tour.push(city);
        // Reversed so the smallest neighbor is expanded first.
        stack.extend(adj[city].iter().rev().filter(|&&c| !placed[c]));
    }
    tour
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{is_permutation, Atlas, Location};
    use crate::random::create_rng;

    #[test]
    fn test_mst_weight_line() {
        let atlas = Atlas::from_coords(vec![(0.0, 0.0), (3.0, 0.0), (1.0, 0.0), (2.0, 0.0)]);
        let edges = minimum_spanning_tree(atlas.matrix());
        assert_eq!(edges.len(), 3);
        let weight: f64 = edges.iter().map(|&(a, b)| atlas.matrix().get(a, b)).sum();
        assert!((weight - 3.0).abs() < 1e-10);
    }

    #[test]
    fn test_preorder_star() {
        // City 0 at the center; leaves visited in index order.
        let atlas = Atlas::from_coords(vec![(0.0, 0.0), (1.0, 0.0), (0.0, 1.0), (-1.0, 0.0)]);
        assert_eq!(mst_preorder(atlas.matrix()), vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_preorder_depth_first() {
        // Path 0 - 2 - 1 plus a branch 0 - 3.
        let atlas = Atlas::from_coords(vec![(0.0, 0.0), (2.0, 0.0), (1.0, 0.0), (0.0, -1.5)]);
        assert_eq!(mst_preorder(atlas.matrix()), vec![0, 2, 1, 3]);
    }

    #[test]
    fn test_preorder_degenerate() {
        let empty = Atlas::from_coords(Vec::<Location>::new());
        assert!(mst_preorder(empty.matrix()).is_empty());
        let single = Atlas::from_coords(vec![(1.0, 1.0)]);
        assert_eq!(mst_preorder(single.matrix()), vec![0]);
    }

    #[test]
    fn test_preorder_within_twice_tree_weight() {
        let mut rng = create_rng(Some(8));
        let atlas = Atlas::random(30, 0.0, 100.0, &mut rng);
        let edges = minimum_spanning_tree(atlas.matrix());
        let weight: f64 = edges.iter().map(|&(a, b)| atlas.matrix().get(a, b)).sum();
        let tour = mst_preorder(atlas.matrix());
        assert!(is_permutation(&tour, 30));
        assert!(atlas.distance(&tour).expect("valid") <= 2.0 * weight + 1e-9);
    }
}
