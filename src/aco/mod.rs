//! Ant colony optimization.
//!
//! - [`AntColony`] — Endless iterator yielding each round's best tour
//! - [`AcoConfig`] — Ants per round, pheromone factor, decay, seed
//! - [`PheromoneMatrix`] — Symmetric pheromone levels owned by one colony

mod colony;
mod config;
mod pheromone;

pub use colony::AntColony;
pub use config::AcoConfig;
pub use pheromone::PheromoneMatrix;
