//! # u-tsp
//!
//! Traveling salesman solvers over points in the plane: exact search,
//! constructive heuristics, and anytime metaheuristics driven by a shared
//! convergence controller.
//!
//! ## Modules
//!
//! - [`models`] — Locations, tours, and the [`Atlas`](models::Atlas) problem instance
//! - [`distance`] — Symmetric Euclidean distance matrix
//! - [`exact`] — Brute force, recursive search, Held–Karp, branch and bound
//! - [`constructive`] — Nearest neighbor, MST preorder, Christofides
//! - [`local_search`] — 2-opt and 3-opt as anytime iterators
//! - [`aco`] — Ant colony optimization
//! - [`ga`] — Genetic algorithm with sequential constructive crossover
//! - [`pso`] — Permutation particle swarm
//! - [`controller`] — Stopping policies, solver registry, profiling
//! - [`error`] — Error type shared by every fallible operation
//! - [`random`] — Seeded random number generation
//!
//! ## Example
//!
//! ```
//! use u_tsp::controller::{Registry, ReturnKind, StoppingPolicy};
//! use u_tsp::models::Atlas;
//! use u_tsp::random::create_rng;
//!
//! let atlas = Atlas::random(15, 0.0, 100.0, &mut create_rng(Some(42)));
//! let registry = Registry::builtin();
//! let exact = registry.run(&atlas, "dynamic", StoppingPolicy::Adaptive, ReturnKind::Distance).unwrap();
//! let local = registry.run(&atlas, "two_opt", StoppingPolicy::Adaptive, ReturnKind::Distance).unwrap();
//! assert!(exact.distance().unwrap() <= local.distance().unwrap() + 1e-9);
//! ```

pub mod aco;
pub mod constructive;
pub mod controller;
pub mod distance;
pub mod error;
pub mod exact;
pub mod ga;
pub mod local_search;
pub mod models;
pub mod pso;
pub mod random;

pub use error::{Result, TspError};
