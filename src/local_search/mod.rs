//! Anytime edge-exchange local search.
//!
//! - [`TwoOpt`] — Segment reversal, first improvement in fixed cyclic order
//! - [`ThreeOpt`] — Four sequential 3-opt reconnections, first improvement
//!
//! Both are endless iterators that yield the current tour before every move
//! test.

mod config;
mod three_opt;
mod two_opt;

pub use config::{InitialTour, LocalSearchConfig};
pub use three_opt::ThreeOpt;
pub use two_opt::TwoOpt;
