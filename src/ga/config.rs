//! Genetic algorithm configuration.

use serde::{Deserialize, Serialize};

use crate::error::{Result, TspError};

/// Parameters for [`GeneticSearch`](super::GeneticSearch).
///
/// # Examples
///
/// ```
/// use u_tsp::ga::GaConfig;
///
/// let config = GaConfig::default().with_population(40).with_select(10);
/// assert!(config.validate().is_ok());
/// assert!(GaConfig::default().with_select(1000).validate().is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GaConfig {
    /// Individuals per generation.
    pub population: usize,
    /// Top-ranked individuals kept as the breeding pool.
    pub select: usize,
    /// Random seed (None for random).
    pub seed: Option<u64>,
}

impl Default for GaConfig {
    fn default() -> Self {
        Self {
            population: 64,
            select: 16,
            seed: None,
        }
    }
}

impl GaConfig {
    /// Sets the population size.
    pub fn with_population(mut self, population: usize) -> Self {
        self.population = population;
        self
    }

    /// Sets the breeding pool size.
    pub fn with_select(mut self, select: usize) -> Self {
        self.select = select;
        self
    }

    /// Sets the random seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Checks that `1 ≤ select ≤ population`.
    pub fn validate(&self) -> Result<()> {
        if self.select == 0 || self.select > self.population {
            return Err(TspError::InvalidParameter(format!(
                "select must be within [1, population = {}], got {}",
                self.population, self.select
            )));
        }
        Ok(())
    }
}
