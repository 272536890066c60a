//! Wall-clock comparison of registered solvers.

use std::time::Instant;

use serde::Serialize;
use tracing::{info, warn};

use crate::error::Result;
use crate::models::Atlas;
use crate::random::create_rng;

use super::{run_with, Registry, ReturnKind, StoppingPolicy};

/// Side length of the square profiled atlases are drawn from.
pub const PROFILE_EXTENT: f64 = 1000.0;

/// One solver run on one random atlas.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Timing {
    /// Registered algorithm name.
    pub algorithm: String,
    /// Number of locations.
    pub size: usize,
    /// Wall-clock time of the run.
    pub seconds: f64,
    /// Length of the returned tour.
    pub distance: f64,
}

/// Times every named solver on a random atlas of each size.
///
/// All solvers at a given size see the same atlas, drawn from
/// `[0, PROFILE_EXTENT]²` with `seed`. Sizes above a solver's limit are
/// skipped. Stochastic solvers keep the seeds of their default parameters.
///
/// # Errors
///
/// [`TspError::UnknownAlgorithm`](crate::error::TspError::UnknownAlgorithm)
/// for an unregistered name, or any error from the run itself.
///
/// # Examples
///
/// ```
/// use u_tsp::controller::{profile, Registry, StoppingPolicy};
///
/// let timings = profile(&Registry::builtin(), &["greedy", "brute"], [5, 20], StoppingPolicy::Adaptive, 7).unwrap();
/// // brute is skipped at 20 cities.
/// assert_eq!(timings.len(), 3);
/// ```
pub fn profile<S>(
    registry: &Registry,
    names: &[&str],
    sizes: S,
    policy: StoppingPolicy,
    seed: u64,
) -> Result<Vec<Timing>>
where
    S: IntoIterator<Item = usize>,
{
    let algorithms = names.iter().map(|&name| registry.get(name)).collect::<Result<Vec<_>>>()?;
    let mut rng = create_rng(Some(seed));
    let mut timings = Vec::new();

    for size in sizes {
        let atlas = Atlas::random(size, 0.0, PROFILE_EXTENT, &mut rng);
        for algorithm in &algorithms {
            if algorithm.check_size(size).is_err() {
                warn!(algorithm = algorithm.name(), size, "skipped: over size limit");
                continue;
            }
            let started = Instant::now();
            let outcome = run_with(&atlas, algorithm, algorithm.defaults(), policy, ReturnKind::Distance)?;
            let seconds = started.elapsed().as_secs_f64();
            let distance = outcome.distance().unwrap_or_default();
            info!(event = "profile", algorithm = algorithm.name(), size, seconds, distance);
            timings.push(Timing {
                algorithm: algorithm.name().to_string(),
                size,
                seconds,
                distance,
            });
        }
    }
    Ok(timings)
}
