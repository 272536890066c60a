//! Running solvers by name under a stopping policy.
//!
//! - [`StoppingPolicy`] — Fixed iteration count or adaptive stopping
//! - [`Convergence`] — Best-so-far tracking over an anytime solver
//! - [`Registry`] — Solvers addressable by name, with defaults and size limits
//! - [`run`] / [`run_with`] / [`solve`] — Run one solver and shape the result
//! - [`profile`] — Time several solvers across atlas sizes

mod convergence;
mod policy;
mod profile;
mod registry;
mod run;

pub use convergence::{Convergence, Progress};
pub use policy::{Outcome, Report, ReturnKind, StoppingPolicy};
pub use profile::{profile, Timing, PROFILE_EXTENT};
pub use registry::{Algorithm, AnytimeFn, OneShotFn, Registry, Solver, SolverKind, SolverParams};
pub use run::{run, run_with, solve};
