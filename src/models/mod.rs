//! Domain model types for the traveling salesman problem.
//!
//! Provides locations in the plane, the immutable [`Atlas`] that owns a
//! location set together with its distance matrix, and the [`Tour`]
//! representation shared by every solver.

mod atlas;
mod location;
mod tour;

pub use atlas::Atlas;
pub use location::Location;
pub use tour::{is_permutation, rotate_to, Tour};
