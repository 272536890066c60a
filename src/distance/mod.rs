//! Distance matrix shared by all solvers.

mod matrix;

pub use matrix::DistanceMatrix;
