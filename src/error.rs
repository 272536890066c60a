//! Error types.

use thiserror::Error;

/// Errors reported by solvers, the registry, and the convergence controller.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TspError {
    /// A tour does not cover the location set.
    #[error("invalid tour: expected {expected} locations, got {actual}")]
    InvalidTour {
        /// Number of locations in the atlas.
        expected: usize,
        /// Length of the supplied tour.
        actual: usize,
    },

    /// A tour of the right length repeats or skips a location.
    #[error("tour is not a permutation of 0..{size}")]
    NotAPermutation {
        /// Number of locations in the atlas.
        size: usize,
    },

    /// A solver returned something other than a permutation of the atlas.
    #[error("{algorithm} returned a malformed tour for {size} locations")]
    MalformedTour {
        /// Registered algorithm name.
        algorithm: String,
        /// Number of locations in the atlas.
        size: usize,
    },

    /// A stopping policy token could not be parsed.
    #[error("unrecognized stopping policy: {0:?} (expected a positive count or \"exp\")")]
    UnrecognizedStoppingPolicy(String),

    /// No algorithm with this name is registered.
    #[error("unknown algorithm: {0}")]
    UnknownAlgorithm(String),

    /// An exact solver was asked to handle more locations than it can.
    #[error("{algorithm} is intractable for {size} locations (limit {limit})")]
    Intractable {
        /// Registered algorithm name.
        algorithm: String,
        /// Requested instance size.
        size: usize,
        /// Largest size the algorithm accepts.
        limit: usize,
    },

    /// A solver parameter is out of range.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),
}

/// Result alias for this crate.
pub type Result<T> = std::result::Result<T, TspError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        let e = TspError::InvalidTour {
            expected: 5,
            actual: 3,
        };
        assert_eq!(e.to_string(), "invalid tour: expected 5 locations, got 3");

        let e = TspError::Intractable {
            algorithm: "brute".into(),
            size: 30,
            limit: 12,
        };
        assert!(e.to_string().contains("limit 12"));

        let e = TspError::NotAPermutation { size: 3 };
        assert_eq!(e.to_string(), "tour is not a permutation of 0..3");

        let e = TspError::MalformedTour {
            algorithm: "greedy".into(),
            size: 4,
        };
        assert_eq!(e.to_string(), "greedy returned a malformed tour for 4 locations");
    }
}
