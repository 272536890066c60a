//! Named solver registry.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::aco::{AcoConfig, AntColony};
use crate::constructive::{christofides, mst_preorder, nearest_neighbor, ChristofidesConfig, Shortcut};
use crate::error::{Result, TspError};
use crate::exact::{branch_and_bound, brute_force, held_karp, recursive};
use crate::ga::{GaConfig, GeneticSearch};
use crate::local_search::{InitialTour, LocalSearchConfig, ThreeOpt, TwoOpt};
use crate::models::{Atlas, Tour};
use crate::pso::{ParticleSwarm, PsoConfig};

use super::{run_with, Outcome, ReturnKind, StoppingPolicy};

/// Whether a solver answers once or streams improving candidates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SolverKind {
    /// Returns a single tour.
    OneShot,
    /// Yields an endless sequence of candidate tours.
    Anytime,
}

/// Parameters shared by every registered solver.
///
/// Each solver reads only the section it needs.
///
/// # Examples
///
/// ```
/// use u_tsp::controller::SolverParams;
///
/// let params: SolverParams = serde_json::from_str(r#"{"aco": {"ants": 4}}"#).unwrap();
/// assert_eq!(params.aco.ants, 4);
/// assert_eq!(params.start, 0);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverParams {
    /// Start city for nearest neighbor.
    pub start: usize,
    /// Christofides shortcutting.
    pub christofides: ChristofidesConfig,
    /// 2-opt / 3-opt starting tour.
    pub local_search: LocalSearchConfig,
    /// Ant colony parameters.
    pub aco: AcoConfig,
    /// Genetic algorithm parameters.
    pub ga: GaConfig,
    /// Particle swarm parameters.
    pub pso: PsoConfig,
}

impl SolverParams {
    /// Sets the start city.
    pub fn with_start(mut self, start: usize) -> Self {
        self.start = start;
        self
    }

    /// Seeds every stochastic solver.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.aco.seed = Some(seed);
        self.ga.seed = Some(seed);
        self.pso.seed = Some(seed);
        self
    }

    /// Checks every section plus the start city against `size` locations.
    pub fn validate(&self, size: usize) -> Result<()> {
        if size > 0 && self.start >= size {
            return Err(TspError::InvalidParameter(format!(
                "start city {} out of range for {size} locations",
                self.start
            )));
        }
        self.aco.validate()?;
        self.ga.validate()?;
        self.pso.validate()
    }
}

/// A solver that returns one tour.
pub type OneShotFn = fn(&Atlas, &SolverParams) -> Result<Tour>;

/// A solver that returns an endless candidate stream borrowing the atlas.
pub type AnytimeFn = for<'a> fn(&'a Atlas, &SolverParams) -> Result<Box<dyn Iterator<Item = Tour> + 'a>>;

/// Entry point of a registered solver.
#[derive(Clone, Copy)]
pub enum Solver {
    /// One-shot solver.
    OneShot(OneShotFn),
    /// Anytime solver.
    Anytime(AnytimeFn),
}

impl Solver {
    /// The solver's kind.
    pub fn kind(&self) -> SolverKind {
        match self {
            Solver::OneShot(_) => SolverKind::OneShot,
            Solver::Anytime(_) => SolverKind::Anytime,
        }
    }
}

impl fmt::Debug for Solver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Solver").field(&self.kind()).finish()
    }
}

/// A named solver with default parameters and an optional size limit.
#[derive(Debug, Clone)]
pub struct Algorithm {
    name: String,
    solver: Solver,
    defaults: SolverParams,
    size_limit: Option<usize>,
}

impl Algorithm {
    /// Creates an entry with default parameters and no size limit.
    pub fn new(name: impl Into<String>, solver: Solver) -> Self {
        Self {
            name: name.into(),
            solver,
            defaults: SolverParams::default(),
            size_limit: None,
        }
    }

    /// Sets the parameters used by [`Registry::run`].
    pub fn with_defaults(mut self, defaults: SolverParams) -> Self {
        self.defaults = defaults;
        self
    }

    /// Refuses atlases larger than `limit`.
    pub fn with_size_limit(mut self, limit: usize) -> Self {
        self.size_limit = Some(limit);
        self
    }

    /// Registered name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Entry point.
    pub fn solver(&self) -> Solver {
        self.solver
    }

    /// One-shot or anytime.
    pub fn kind(&self) -> SolverKind {
        self.solver.kind()
    }

    /// Parameters used when run by name.
    pub fn defaults(&self) -> &SolverParams {
        &self.defaults
    }

    /// Largest accepted atlas, if bounded.
    pub fn size_limit(&self) -> Option<usize> {
        self.size_limit
    }

    /// Fails with [`TspError::Intractable`] if `size` exceeds the limit.
    pub fn check_size(&self, size: usize) -> Result<()> {
        match self.size_limit {
            Some(limit) if size > limit => Err(TspError::Intractable {
                algorithm: self.name.clone(),
                size,
                limit,
            }),
            _ => Ok(()),
        }
    }
}

/// Solvers addressable by name.
///
/// # Examples
///
/// ```
/// use u_tsp::controller::{Outcome, Registry, ReturnKind, SolverKind, StoppingPolicy};
/// use u_tsp::models::Atlas;
///
/// let registry = Registry::builtin();
/// assert_eq!(registry.get("aco").unwrap().kind(), SolverKind::Anytime);
///
/// let atlas = Atlas::from_coords(vec![(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)]);
/// let outcome = registry
///     .run(&atlas, "dynamic", StoppingPolicy::Adaptive, ReturnKind::Distance)
///     .unwrap();
/// assert_eq!(outcome, Outcome::Distance(4.0));
/// ```
#[derive(Debug, Clone, Default)]
pub struct Registry {
    algorithms: Vec<Algorithm>,
}

impl Registry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Every solver in the crate under its conventional name.
    ///
    /// | name | kind | limit |
    /// |------|------|-------|
    /// | `brute` | one-shot | 11 |
    /// | `recursive` | one-shot | 11 |
    /// | `dynamic` | one-shot | 18 |
    /// | `branch_bound` | one-shot | 25 |
    /// | `greedy` | one-shot | |
    /// | `mst` | one-shot | |
    /// | `christofides` | one-shot | |
    /// | `christofides_cheapest` | one-shot | |
    /// | `aco` | anytime | |
    /// | `genetic` | anytime | |
    /// | `two_opt` | anytime | |
    /// | `two_opt_greedy` | anytime | |
    /// | `three_opt` | anytime | |
    /// | `pso` | anytime | |
    pub fn builtin() -> Self {
        let mut registry = Self::new();
        let one_shot = |name: &str, f: OneShotFn| Algorithm::new(name, Solver::OneShot(f));
        let anytime = |name: &str, f: AnytimeFn| Algorithm::new(name, Solver::Anytime(f));

        registry.register(one_shot("brute", run_brute).with_size_limit(11));
        registry.register(one_shot("recursive", run_recursive).with_size_limit(11));
        registry.register(one_shot("dynamic", run_held_karp).with_size_limit(18));
        registry.register(one_shot("branch_bound", run_branch_bound).with_size_limit(25));
        registry.register(one_shot("greedy", run_greedy));
        registry.register(one_shot("mst", run_mst));
        registry.register(one_shot("christofides", run_christofides));
        registry.register(one_shot("christofides_cheapest", run_christofides).with_defaults(SolverParams {
            christofides: ChristofidesConfig::default().with_shortcut(Shortcut::CheapestOccurrence),
            ..SolverParams::default()
        }));
        registry.register(anytime("aco", run_aco));
        registry.register(anytime("genetic", run_genetic));
        registry.register(anytime("two_opt", run_two_opt));
        registry.register(anytime("two_opt_greedy", run_two_opt).with_defaults(SolverParams {
            local_search: LocalSearchConfig::default().with_initial(InitialTour::NearestNeighbor),
            ..SolverParams::default()
        }));
        registry.register(anytime("three_opt", run_three_opt));
        registry.register(anytime("pso", run_pso));
        registry
    }

    /// Adds `algorithm`, replacing and returning any entry with the same name.
    pub fn register(&mut self, algorithm: Algorithm) -> Option<Algorithm> {
        match self.algorithms.iter_mut().find(|a| a.name == algorithm.name) {
            Some(slot) => Some(std::mem::replace(slot, algorithm)),
            None => {
                self.algorithms.push(algorithm);
                None
            }
        }
    }

    /// Looks up a solver by name.
    ///
    /// # Errors
    ///
    /// [`TspError::UnknownAlgorithm`] if nothing is registered under `name`.
    pub fn get(&self, name: &str) -> Result<&Algorithm> {
        self.algorithms
            .iter()
            .find(|a| a.name == name)
            .ok_or_else(|| TspError::UnknownAlgorithm(name.to_string()))
    }

    /// Registered names in registration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.algorithms.iter().map(|a| a.name.as_str())
    }

    /// Registered algorithms in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &Algorithm> {
        self.algorithms.iter()
    }

    /// Number of registered algorithms.
    pub fn len(&self) -> usize {
        self.algorithms.len()
    }

    /// Returns `true` if nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.algorithms.is_empty()
    }

    /// Runs the solver registered as `name` with its default parameters.
    pub fn run(
        &self,
        atlas: &Atlas,
        name: &str,
        policy: StoppingPolicy,
        return_kind: ReturnKind,
    ) -> Result<Outcome> {
        let algorithm = self.get(name)?;
        run_with(atlas, algorithm, algorithm.defaults(), policy, return_kind)
    }
}

fn run_brute(atlas: &Atlas, _: &SolverParams) -> Result<Tour> {
    Ok(brute_force(atlas.matrix()))
}

fn run_recursive(atlas: &Atlas, _: &SolverParams) -> Result<Tour> {
    Ok(recursive(atlas.matrix()))
}

fn run_held_karp(atlas: &Atlas, _: &SolverParams) -> Result<Tour> {
    Ok(held_karp(atlas.matrix()))
}

fn run_branch_bound(atlas: &Atlas, _: &SolverParams) -> Result<Tour> {
    Ok(branch_and_bound(atlas.matrix()))
}

fn run_greedy(atlas: &Atlas, params: &SolverParams) -> Result<Tour> {
    params.validate(atlas.size())?;
    Ok(nearest_neighbor(atlas.matrix(), params.start))
}

fn run_mst(atlas: &Atlas, _: &SolverParams) -> Result<Tour> {
    Ok(mst_preorder(atlas.matrix()))
}

fn run_christofides(atlas: &Atlas, params: &SolverParams) -> Result<Tour> {
    Ok(christofides(atlas.matrix(), &params.christofides))
}

fn run_aco<'a>(atlas: &'a Atlas, params: &SolverParams) -> Result<Box<dyn Iterator<Item = Tour> + 'a>> {
    Ok(Box::new(AntColony::new(atlas.matrix(), &params.aco)?))
}

fn run_genetic<'a>(atlas: &'a Atlas, params: &SolverParams) -> Result<Box<dyn Iterator<Item = Tour> + 'a>> {
    Ok(Box::new(GeneticSearch::new(atlas.matrix(), &params.ga)?))
}

fn run_two_opt<'a>(atlas: &'a Atlas, params: &SolverParams) -> Result<Box<dyn Iterator<Item = Tour> + 'a>> {
    Ok(Box::new(TwoOpt::new(atlas.matrix(), &params.local_search)))
}

fn run_three_opt<'a>(atlas: &'a Atlas, params: &SolverParams) -> Result<Box<dyn Iterator<Item = Tour> + 'a>> {
    Ok(Box::new(ThreeOpt::new(atlas.matrix(), &params.local_search)))
}

fn run_pso<'a>(atlas: &'a Atlas, params: &SolverParams) -> Result<Box<dyn Iterator<Item = Tour> + 'a>> {
    Ok(Box::new(ParticleSwarm::new(atlas.matrix(), &params.pso)?))
}
