//! Ant colony configuration.

use serde::{Deserialize, Serialize};

use crate::error::{Result, TspError};

/// Parameters for [`AntColony`](super::AntColony).
///
/// # Examples
///
/// ```
/// use u_tsp::aco::AcoConfig;
///
/// let config = AcoConfig::default()
///     .with_ants(32)
///     .with_decay(0.5)
///     .with_seed(42);
/// assert_eq!(config.ants, 32);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AcoConfig {
    /// Ants simulated per round.
    pub ants: usize,
    /// Initial pheromone level and deposit numerator (must be > 0).
    pub factor: f64,
    /// Fraction of pheromone retained between rounds, in `[0, 1]`.
    pub decay: f64,
    /// Random seed (None for random).
    pub seed: Option<u64>,
}

impl Default for AcoConfig {
    fn default() -> Self {
        Self {
            ants: 16,
            factor: 0.1,
            decay: 0.9,
            seed: None,
        }
    }
}

impl AcoConfig {
    /// Sets the number of ants per round.
    pub fn with_ants(mut self, ants: usize) -> Self {
        self.ants = ants;
        self
    }

    /// Sets the pheromone factor.
    pub fn with_factor(mut self, factor: f64) -> Self {
        self.factor = factor;
        self
    }

    /// Sets the pheromone decay.
    pub fn with_decay(mut self, decay: f64) -> Self {
        self.decay = decay;
        self
    }

    /// Sets the random seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Checks that every parameter is in range.
    pub fn validate(&self) -> Result<()> {
        if self.ants == 0 {
            return Err(TspError::InvalidParameter("ants must be at least 1".into()));
        }
        if !(self.factor.is_finite() && self.factor > 0.0) {
            return Err(TspError::InvalidParameter(format!(
                "pheromone factor must be positive, got {}",
                self.factor
            )));
        }
        if !(0.0..=1.0).contains(&self.decay) {
            return Err(TspError::InvalidParameter(format!(
                "decay must be within [0, 1], got {}",
                self.decay
            )));
        }
        Ok(())
    }
}
