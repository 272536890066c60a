//! Running a registered solver to completion.

use std::time::Instant;

use tracing::info;

use crate::error::{Result, TspError};
use crate::models::{is_permutation, rotate_to, Atlas, Location};

use super::{Algorithm, Convergence, Outcome, Registry, ReturnKind, Solver, SolverParams, StoppingPolicy};

/// Runs `algorithm` on `atlas` with its default parameters.
///
/// See [`run_with`].
pub fn run(atlas: &Atlas, algorithm: &Algorithm, policy: StoppingPolicy, return_kind: ReturnKind) -> Result<Outcome> {
    run_with(atlas, algorithm, algorithm.defaults(), policy, return_kind)
}

/// Runs `algorithm` on `atlas` with explicit parameters.
///
/// One-shot solvers are called once and `policy` is ignored. Anytime solvers
/// are driven by a [`Convergence`] under `policy`. Returned paths start at
/// city 0.
///
/// # Errors
///
/// - [`TspError::Intractable`] if the atlas exceeds the algorithm's size limit
/// - [`TspError::InvalidParameter`] for a bad start city, solver parameter,
///   or a fixed policy of zero iterations
/// - [`TspError::MalformedTour`] if the solver's answer is not a permutation
pub fn run_with(
    atlas: &Atlas,
    algorithm: &Algorithm,
    params: &SolverParams,
    policy: StoppingPolicy,
    return_kind: ReturnKind,
) -> Result<Outcome> {
    let n = atlas.size();
    algorithm.check_size(n)?;
    policy.validate()?;
    params.validate(n)?;

    info!(
        event = "solve_start",
        algorithm = algorithm.name(),
        kind = ?algorithm.kind(),
        size = n,
        policy = %policy,
    );
    let started = Instant::now();

    let (mut tour, iterations) = match algorithm.solver() {
        Solver::OneShot(solve) => (solve(atlas, params)?, 1),
        Solver::Anytime(start) => {
            let mut control = Convergence::new(atlas.matrix(), start(atlas, params)?);
            let iterations = control.run(policy);
            let tour = control.into_best().map(|(tour, _)| tour).unwrap_or_default();
            (tour, iterations)
        }
    };

    if !is_permutation(&tour, n) {
        return Err(TspError::MalformedTour {
            algorithm: algorithm.name().to_string(),
            size: n,
        });
    }
    rotate_to(&mut tour, 0);
    let distance = atlas.distance(&tour)?;

    info!(
        event = "solve_end",
        algorithm = algorithm.name(),
        iterations,
        distance,
        duration_ms = started.elapsed().as_millis() as u64,
    );

    Ok(match return_kind {
        ReturnKind::Path => Outcome::Path(tour),
        ReturnKind::Distance => Outcome::Distance(distance),
        ReturnKind::None => Outcome::Nothing,
    })
}

/// Builds an atlas from coordinates and runs the named solver on it.
///
/// # Examples
///
/// ```
/// use u_tsp::controller::{solve, Registry, ReturnKind, StoppingPolicy};
///
/// let outcome = solve(
///     &Registry::builtin(),
///     [(0.0, 0.0), (0.0, 2.0), (2.0, 2.0), (2.0, 0.0)],
///     "brute",
///     StoppingPolicy::Adaptive,
///     ReturnKind::Distance,
/// )
/// .unwrap();
/// assert_eq!(outcome.distance(), Some(8.0));
/// ```
pub fn solve<I, P>(
    registry: &Registry,
    coords: I,
    name: &str,
    policy: StoppingPolicy,
    return_kind: ReturnKind,
) -> Result<Outcome>
where
    I: IntoIterator<Item = P>,
    P: Into<Location>,
{
    let atlas = Atlas::from_coords(coords);
    registry.run(&atlas, name, policy, return_kind)
}
