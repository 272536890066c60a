//! Generational genetic search.
//!
//! Each call to `next` ranks the current population by tour length, yields
//! its best individual, and breeds the following generation: parents are
//! drawn with replacement from the top `select` individuals, combined with
//! [`sequential_constructive_crossover`], and every child receives exactly
//! one [`swap_mutation`].

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::Rng;

use crate::distance::DistanceMatrix;
use crate::error::Result;
use crate::models::Tour;
use crate::random::create_rng;

use super::crossover::{sequential_constructive_crossover, swap_mutation};
use super::GaConfig;

/// A genetic algorithm that yields the best individual of each generation.
///
/// # Examples
///
/// ```
/// use u_tsp::models::Atlas;
/// use u_tsp::ga::{GaConfig, GeneticSearch};
/// use u_tsp::random::create_rng;
///
/// let atlas = Atlas::random(12, 0.0, 100.0, &mut create_rng(Some(1)));
/// let search = GeneticSearch::new(atlas.matrix(), &GaConfig::default().with_seed(7)).unwrap();
/// let best = search
///     .take(30)
///     .map(|t| atlas.distance(&t).unwrap())
///     .fold(f64::INFINITY, f64::min);
/// assert!(best.is_finite());
/// ```
#[derive(Debug, Clone)]
pub struct GeneticSearch<'a> {
    distances: &'a DistanceMatrix,
    config: GaConfig,
    population: Vec<Tour>,
    rng: StdRng,
    generation: u64,
}

impl<'a> GeneticSearch<'a> {
    /// Creates a search with a population of random permutations.
    ///
    /// # Errors
    ///
    /// [`TspError::InvalidParameter`](crate::error::TspError::InvalidParameter)
    /// if the configuration is out of range.
    pub fn new(distances: &'a DistanceMatrix, config: &GaConfig) -> Result<Self> {
        config.validate()?;
        let mut rng = create_rng(config.seed);
        let n = distances.size();
        let population = (0..config.population)
            .map(|_| {
                let mut tour: Tour = (0..n).collect();
                tour.shuffle(&mut rng);
                tour
            })
            .collect();
        Ok(Self {
            distances,
            config: config.clone(),
            population,
            rng,
            generation: 0,
        })
    }

    /// The current population.
    pub fn population(&self) -> &[Tour] {
        &self.population
    }

    /// Number of generations bred so far.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    fn breed(&mut self, pool: &[Tour]) -> Vec<Tour> {
        let distances = self.distances;
        let rng = &mut self.rng;
        (0..self.config.population)
            .map(|_| {
                let p1 = &pool[rng.random_range(0..pool.len())];
                let p2 = &pool[rng.random_range(0..pool.len())];
                let mut child = sequential_constructive_crossover(distances, p1, p2, rng);
                swap_mutation(&mut child, rng);
                child
            })
            .collect()
    }
}

impl Iterator for GeneticSearch<'_> {
    type Item = Tour;

    fn next(&mut self) -> Option<Tour> {
        let distances = self.distances;
        let mut ranked: Vec<(f64, Tour)> = self
            .population
            .drain(..)
            .map(|t| (distances.tour_length(&t), t))
            .collect();
        ranked.sort_by(|a, b| a.0.total_cmp(&b.0));

        let (best_length, best) = ranked.first().cloned()?;
        ranked.truncate(self.config.select);
        let pool: Vec<Tour> = ranked.into_iter().map(|(_, t)| t).collect();

        self.population = self.breed(&pool);
        self.generation += 1;
        tracing::trace!(generation = self.generation, best = best_length, "generation bred");
        Some(best)
    }
}
