//! Particle swarm configuration.

use serde::{Deserialize, Serialize};

use crate::error::{Result, TspError};

/// Parameters for [`ParticleSwarm`](super::ParticleSwarm).
///
/// # Examples
///
/// ```
/// use u_tsp::pso::PsoConfig;
///
/// let config = PsoConfig::default().with_particles(16).with_rates(0.9, 0.1);
/// assert!(config.validate().is_ok());
/// assert!(PsoConfig::default().with_rates(1.5, 0.1).validate().is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PsoConfig {
    /// Number of particles.
    pub particles: usize,
    /// Probability of keeping each transposition toward the personal best.
    pub personal_rate: f64,
    /// Probability of keeping each transposition toward the global best.
    pub global_rate: f64,
    /// Random seed (None for random).
    pub seed: Option<u64>,
}

impl Default for PsoConfig {
    fn default() -> Self {
        Self {
            particles: 32,
            personal_rate: 0.7,
            global_rate: 0.3,
            seed: None,
        }
    }
}

impl PsoConfig {
    /// Sets the number of particles.
    pub fn with_particles(mut self, particles: usize) -> Self {
        self.particles = particles;
        self
    }

    /// Sets the personal-best and global-best retention probabilities.
    pub fn with_rates(mut self, personal: f64, global: f64) -> Self {
        self.personal_rate = personal;
        self.global_rate = global;
        self
    }

    /// Sets the random seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Checks that the swarm is non-empty and both rates are probabilities.
    pub fn validate(&self) -> Result<()> {
        if self.particles == 0 {
            return Err(TspError::InvalidParameter("particles must be at least 1".into()));
        }
        for (name, rate) in [("personal_rate", self.personal_rate), ("global_rate", self.global_rate)] {
            if !(0.0..=1.0).contains(&rate) {
                return Err(TspError::InvalidParameter(format!(
                    "{name} must be within [0, 1], got {rate}"
                )));
            }
        }
        Ok(())
    }
}
