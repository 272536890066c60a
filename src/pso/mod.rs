//! Permutation particle swarm optimization.
//!
//! - [`ParticleSwarm`] — Endless iterator yielding the global best every epoch
//! - [`transpositions`] — Swap sequence between two permutations

mod config;
mod swarm;

pub use config::PsoConfig;
pub use swarm::{transpositions, ParticleSwarm};
