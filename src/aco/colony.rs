//! Ant colony optimization.
//!
//! # Algorithm
//!
//! Each round, every ant builds a tour from city 0 by roulette-wheel
//! selection: the next city is drawn with probability proportional to
//! `pheromone(current, city) / distance(current, city)`, by inverting the
//! cumulative attraction against one uniform draw. Every ant deposits
//! `factor / length` on each edge of its tour (closing edge included) into
//! a per-round delta matrix. After the round
//!
//! ```text
//! pheromone = pheromone · decay + delta + deltaᵗ
//! ```
//!
//! keeps the matrix symmetric. The best tour of the round (not the best
//! seen overall) is yielded.
//!
//! # Reference
//!
//! Dorigo, M., Maniezzo, V. & Colorni, A. (1996). "Ant system: optimization
//! by a colony of cooperating agents", *IEEE Trans. SMC-B* 26(1), 29-41.

use rand::rngs::StdRng;
use rand::Rng;

use crate::distance::DistanceMatrix;
use crate::error::Result;
use crate::models::Tour;
use crate::random::create_rng;

use super::{AcoConfig, PheromoneMatrix};

/// Floor applied to distances so coincident locations stay selectable.
const MIN_DISTANCE: f64 = 1e-12;

/// An ant colony that yields the best tour of each round.
///
/// # Examples
///
/// ```
/// use u_tsp::models::{is_permutation, Atlas};
/// use u_tsp::aco::{AcoConfig, AntColony};
///
/// let atlas = Atlas::from_coords(vec![(0.0, 0.0), (4.0, 0.0), (4.0, 3.0), (0.0, 3.0), (2.0, 5.0)]);
/// let colony = AntColony::new(atlas.matrix(), &AcoConfig::default().with_seed(1)).unwrap();
/// for tour in colony.take(10) {
///     assert!(is_permutation(&tour, 5));
/// }
/// ```
#[derive(Debug, Clone)]
pub struct AntColony<'a> {
    distances: &'a DistanceMatrix,
    config: AcoConfig,
    pheromone: PheromoneMatrix,
    delta: PheromoneMatrix,
    rng: StdRng,
    round: u64,
}

impl<'a> AntColony<'a> {
    /// Creates a colony with uniform pheromone equal to `config.factor`.
    ///
    /// # Errors
    ///
    /// [`TspError::InvalidParameter`](crate::error::TspError::InvalidParameter)
    /// if the configuration is out of range.
    pub fn new(distances: &'a DistanceMatrix, config: &AcoConfig) -> Result<Self> {
        config.validate()?;
        let n = distances.size();
        Ok(Self {
            distances,
            config: config.clone(),
            pheromone: PheromoneMatrix::uniform(n, config.factor),
            delta: PheromoneMatrix::uniform(n, 0.0),
            rng: create_rng(config.seed),
            round: 0,
        })
    }

    /// Current pheromone levels.
    pub fn pheromone(&self) -> &PheromoneMatrix {
        &self.pheromone
    }

    /// Number of completed rounds.
    pub fn round(&self) -> u64 {
        self.round
    }

    fn construct(&mut self, cumulative: &mut Vec<f64>) -> Tour {
        let n = self.distances.size();
        let mut tour = Vec::with_capacity(n);
        let mut todo: Vec<usize> = (1..n).collect();
        let mut current = 0;
        tour.push(current);

        while !todo.is_empty() {
            cumulative.clear();
            let mut total = 0.0;
            for &city in &todo {
                let d = self.distances.get(current, city).max(MIN_DISTANCE);
                total += self.pheromone.get(current, city) / d;
                cumulative.push(total);
            }
            let draw = self.rng.random::<f64>() * total;
            let pick = cumulative.partition_point(|&c| c < draw).min(todo.len() - 1);
            current = todo.remove(pick);
            tour.push(current);
        }
        tour
    }

    fn lay_pheromone(&mut self, tour: &[usize], length: f64) {
        if length <= 0.0 {
            return;
        }
        let amount = self.config.factor / length;
        let closing = tour.last().zip(tour.first()).map(|(&a, &b)| (a, b));
        for (a, b) in tour.windows(2).map(|w| (w[0], w[1])).chain(closing) {
            self.delta.deposit(a, b, amount);
        }
    }
}

impl Iterator for AntColony<'_> {
    type Item = Tour;

    fn next(&mut self) -> Option<Tour> {
        let n = self.distances.size();
        if n == 0 {
            return Some(Vec::new());
        }

        self.delta.fill(0.0);
        let mut cumulative = Vec::with_capacity(n);
        let mut best: Option<(f64, Tour)> = None;
        for _ in 0..self.config.ants {
            let tour = self.construct(&mut cumulative);
            let length = self.distances.tour_length(&tour);
            self.lay_pheromone(&tour, length);
            if best.as_ref().map_or(true, |(d, _)| length < *d) {
                best = Some((length, tour));
            }
        }

        self.pheromone.evaporate(self.config.decay, &self.delta);
        self.round += 1;

        let (length, tour) = best?;
        tracing::trace!(round = self.round, length, "ant colony round finished");
        Some(tour)
    }
}
