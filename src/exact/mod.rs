//! Exact solvers, tractable only for small instances.
//!
//! - [`brute_force`] — Lexicographic permutation enumeration, O(n · n!)
//! - [`recursive`] — Unmemoized depth-first search, O(n!)
//! - [`held_karp`] — Bitmask dynamic programming, O(n² · 2ⁿ)
//! - [`branch_and_bound`] — Lower-bound pruned depth-first search
//!
//! All four return an optimal tour; they serve as cross-validation for the
//! heuristics.

mod branch_bound;
mod brute;
mod held_karp;
mod recursive;

pub use branch_bound::branch_and_bound;
pub use brute::brute_force;
pub use held_karp::held_karp;
pub use recursive::recursive;
