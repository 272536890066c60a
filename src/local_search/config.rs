//! Local search configuration.

use serde::{Deserialize, Serialize};

use crate::constructive::nearest_neighbor;
use crate::distance::DistanceMatrix;
use crate::models::Tour;

/// Starting tour for edge-exchange local search.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InitialTour {
    /// Visit cities in index order.
    #[default]
    Identity,
    /// Nearest-neighbor tour from city 0.
    NearestNeighbor,
}

impl InitialTour {
    /// Builds the starting tour.
    pub fn build(self, distances: &DistanceMatrix) -> Tour {
        match self {
            InitialTour::Identity => (0..distances.size()).collect(),
            InitialTour::NearestNeighbor => nearest_neighbor(distances, 0),
        }
    }
}

/// Parameters for [`TwoOpt`](super::TwoOpt) and [`ThreeOpt`](super::ThreeOpt).
///
/// # Examples
///
/// ```
/// use u_tsp::local_search::{InitialTour, LocalSearchConfig};
///
/// let config = LocalSearchConfig::default().with_initial(InitialTour::NearestNeighbor);
/// assert_eq!(config.initial, InitialTour::NearestNeighbor);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LocalSearchConfig {
    /// Starting tour.
    pub initial: InitialTour,
}

impl LocalSearchConfig {
    /// Sets the starting tour.
    pub fn with_initial(mut self, initial: InitialTour) -> Self {
        self.initial = initial;
        self
    }
}
