//! Genetic algorithm with sequential constructive crossover.
//!
//! - [`GeneticSearch`] — Endless iterator yielding each generation's best tour
//! - [`sequential_constructive_crossover`] — SCX breeding operator (Ahmed, 2010)
//! - [`swap_mutation`] — Single random transposition

mod config;
mod crossover;
mod search;

pub use config::GaConfig;
pub use crossover::{sequential_constructive_crossover, swap_mutation};
pub use search::GeneticSearch;
