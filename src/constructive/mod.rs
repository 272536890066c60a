//! Constructive heuristics that build a single tour directly.
//!
//! - [`nearest_neighbor`] — Greedy nearest unvisited city, O(n²)
//! - [`mst_preorder`] — Preorder walk of the minimum spanning tree, O(n²)
//! - [`christofides`] — MST + odd-vertex matching + Eulerian shortcut (Christofides, 1976)

mod christofides;
mod matching;
mod mst;
mod nearest_neighbor;

pub use christofides::{christofides, ChristofidesConfig, Shortcut};
pub use matching::{perfect_matching, EXACT_LIMIT};
pub use mst::{minimum_spanning_tree, mst_preorder};
pub use nearest_neighbor::nearest_neighbor;
