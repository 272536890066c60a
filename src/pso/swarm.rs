//! Permutation particle swarm.
//!
//! # Algorithm
//!
//! A particle's position is a tour. Its "velocity" toward another tour is
//! the transposition sequence that sorts the position into that tour. Every
//! epoch each particle computes the sequences toward its personal best and
//! toward the global best of the previous epoch, keeps each personal-best
//! transposition with probability `personal_rate` and each global-best one
//! with probability `global_rate`, and applies the kept swaps in order.
//! Personal bests are updated on improvement; the global best is refreshed
//! at the end of the epoch and yielded.
//!
//! # Reference
//!
//! Clerc, M. (2004). "Discrete particle swarm optimization, illustrated by
//! the traveling salesman problem", *New Optimization Techniques in
//! Engineering*, 219-239.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::Rng;

use crate::distance::DistanceMatrix;
use crate::error::Result;
use crate::models::Tour;
use crate::random::create_rng;

use super::PsoConfig;

#[derive(Debug, Clone)]
struct Particle {
    position: Tour,
    best: Tour,
    best_length: f64,
}

/// A particle swarm that yields the global best tour every epoch.
///
/// # Examples
///
/// ```
/// use u_tsp::models::{is_permutation, Atlas};
/// use u_tsp::pso::{ParticleSwarm, PsoConfig};
/// use u_tsp::random::create_rng;
///
/// let atlas = Atlas::random(10, 0.0, 100.0, &mut create_rng(Some(2)));
/// let swarm = ParticleSwarm::new(atlas.matrix(), &PsoConfig::default().with_seed(3)).unwrap();
/// for tour in swarm.take(5) {
///     assert!(is_permutation(&tour, 10));
/// }
/// ```
#[derive(Debug, Clone)]
pub struct ParticleSwarm<'a> {
    distances: &'a DistanceMatrix,
    config: PsoConfig,
    particles: Vec<Particle>,
    global_best: Tour,
    global_best_length: f64,
    rng: StdRng,
    epoch: u64,
}

impl<'a> ParticleSwarm<'a> {
    /// Creates a swarm of particles at random permutations.
    ///
    /// # Errors
    ///
    /// [`TspError::InvalidParameter`](crate::error::TspError::InvalidParameter)
    /// if the configuration is out of range.
    pub fn new(distances: &'a DistanceMatrix, config: &PsoConfig) -> Result<Self> {
        config.validate()?;
        let mut rng = create_rng(config.seed);
        let n = distances.size();

        let particles: Vec<Particle> = (0..config.particles)
            .map(|_| {
                let mut position: Tour = (0..n).collect();
                position.shuffle(&mut rng);
                let best_length = distances.tour_length(&position);
                Particle {
                    best: position.clone(),
                    position,
                    best_length,
                }
            })
            .collect();

        let (global_best, global_best_length) = particles
            .iter()
            .min_by(|a, b| a.best_length.total_cmp(&b.best_length))
            .map(|p| (p.best.clone(), p.best_length))
            .unwrap_or_default();

        Ok(Self {
            distances,
            config: config.clone(),
            particles,
            global_best,
            global_best_length,
            rng,
            epoch: 0,
        })
    }

    /// Global best tour found so far.
    pub fn global_best(&self) -> &[usize] {
        &self.global_best
    }

    /// Length of the global best tour.
    pub fn global_best_length(&self) -> f64 {
        self.global_best_length
    }

    /// Number of completed epochs.
    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    fn step(&mut self) {
        let distances = self.distances;
        let (personal_rate, global_rate) = (self.config.personal_rate, self.config.global_rate);
        let rng = &mut self.rng;

        for particle in &mut self.particles {
            let toward_personal = transpositions(&particle.position, &particle.best);
            let toward_global = transpositions(&particle.position, &self.global_best);
            let mut kept = Vec::with_capacity(toward_personal.len() + toward_global.len());
            for swap in toward_personal {
                if rng.random_bool(personal_rate) {
                    kept.push(swap);
                }
            }
            for swap in toward_global {
                if rng.random_bool(global_rate) {
                    kept.push(swap);
                }
            }
            for (i, j) in kept {
                particle.position.swap(i, j);
            }

            let length = distances.tour_length(&particle.position);
            if length < particle.best_length {
                particle.best_length = length;
                particle.best.clone_from(&particle.position);
            }
        }

        if let Some(best) = self
            .particles
            .iter()
            .min_by(|a, b| a.best_length.total_cmp(&b.best_length))
        {
            if best.best_length < self.global_best_length {
                self.global_best_length = best.best_length;
                self.global_best.clone_from(&best.best);
            }
        }
        self.epoch += 1;
    }
}

/// Transpositions that, applied in order to `from`, produce `to`.
///
/// # Examples
///
/// ```
/// use u_tsp::pso::transpositions;
///
/// let mut tour = vec![2, 0, 1];
/// for (i, j) in transpositions(&tour, &[0, 1, 2]) {
///     tour.swap(i, j);
/// }
/// assert_eq!(tour, vec![0, 1, 2]);
/// ```
pub fn transpositions(from: &[usize], to: &[usize]) -> Vec<(usize, usize)> {
    let mut work = from.to_vec();
    let mut pos = vec![0; work.len()];
    for (idx, &city) in work.iter().enumerate() {
        pos[city] = idx;
    }

    let mut swaps = Vec::new();
    for idx in 0..work.len() {
        let wanted = to[idx];
        if work[idx] == wanted {
            continue;
        }
        let at = pos[wanted];
        let displaced = work[idx];
        work.swap(idx, at);
        pos[displaced] = at;
        pos[wanted] = idx;
        swaps.push((idx, at));
    }
    swaps
}

impl Iterator for ParticleSwarm<'_> {
    type Item = Tour;

    fn next(&mut self) -> Option<Tour> {
        self.step();
        tracing::trace!(epoch = self.epoch, best = self.global_best_length, "swarm epoch finished");
        Some(self.global_best.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TspError;
    use crate::models::{is_permutation, Atlas, Location};
    use crate::random::create_rng;

    fn random_atlas(n: usize, seed: u64) -> Atlas {
        Atlas::random(n, 0.0, 100.0, &mut create_rng(Some(seed)))
    }

    #[test]
    fn test_transpositions_reach_target() {
        let from = vec![3, 1, 4, 0, 2];
        let to = vec![0, 1, 2, 3, 4];
        let swaps = transpositions(&from, &to);
        assert!(swaps.len() <= 4);
        let mut work = from.clone();
        for (i, j) in swaps {
            work.swap(i, j);
        }
        assert_eq!(work, to);
        assert!(transpositions(&to, &to).is_empty());
    }

    #[test]
    fn test_invalid_config_rejected() {
        let atlas = random_atlas(5, 1);
        let config = PsoConfig::default().with_particles(0);
        assert!(matches!(
            ParticleSwarm::new(atlas.matrix(), &config),
            Err(TspError::InvalidParameter(_))
        ));
    }

    #[test]
    fn test_global_best_never_worsens() {
        let atlas = random_atlas(15, 2);
        let swarm = ParticleSwarm::new(atlas.matrix(), &PsoConfig::default().with_seed(4)).expect("valid");
        let mut previous = f64::INFINITY;
        for tour in swarm.take(30) {
            assert!(is_permutation(&tour, 15));
            let d = atlas.distance(&tour).expect("valid");
            assert!(d <= previous + 1e-12);
            previous = d;
        }
    }

    #[test]
    fn test_full_rates_collapse_onto_bests() {
        // Personal bests start at the particles' own positions, so with both
        // rates at 1 every particle lands exactly on the global best.
        let atlas = random_atlas(8, 3);
        let config = PsoConfig::default().with_particles(6).with_rates(1.0, 1.0).with_seed(5);
        let mut swarm = ParticleSwarm::new(atlas.matrix(), &config).expect("valid");
        let initial_best = swarm.global_best().to_vec();
        swarm.next();
        for p in &swarm.particles {
            assert_eq!(p.position, initial_best);
        }
        assert_eq!(swarm.epoch(), 1);
    }

    #[test]
    fn test_same_seed_same_sequence() {
        let atlas = random_atlas(10, 6);
        let config = PsoConfig::default().with_seed(11);
        let a: Vec<Tour> = ParticleSwarm::new(atlas.matrix(), &config).expect("valid").take(5).collect();
        let b: Vec<Tour> = ParticleSwarm::new(atlas.matrix(), &config).expect("valid").take(5).collect();
        assert_eq!(a, b);
    }

    #[test]
    fn test_empty_atlas() {
        let empty = Atlas::from_coords(Vec::<Location>::new());
        let mut swarm = ParticleSwarm::new(empty.matrix(), &PsoConfig::default()).expect("valid");
        assert_eq!(swarm.next(), Some(Vec::new()));
    }
}
