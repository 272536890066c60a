//! Best-so-far tracking over an anytime solver.

use tracing::debug;

use crate::distance::DistanceMatrix;
use crate::models::Tour;

use super::{Report, StoppingPolicy};

/// A progress event handed to an observer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Progress<'t> {
    /// 1-based index of the candidate just pulled.
    pub iteration: usize,
    /// The candidate itself.
    pub tour: &'t [usize],
    /// Length of the candidate.
    pub distance: f64,
    /// Best length seen so far, including this candidate.
    pub best_distance: f64,
    /// Whether this candidate became the new best.
    pub improved: bool,
}

/// Pulls tours from an anytime solver and keeps the shortest one.
///
/// A candidate replaces the incumbent only if it is strictly shorter, so
/// among equal lengths the earliest wins. The first candidate is always
/// kept, even at infinite length.
///
/// # Examples
///
/// ```
/// use u_tsp::controller::{Convergence, StoppingPolicy};
/// use u_tsp::local_search::{LocalSearchConfig, TwoOpt};
/// use u_tsp::models::Atlas;
/// use u_tsp::random::create_rng;
///
/// let atlas = Atlas::random(12, 0.0, 100.0, &mut create_rng(Some(1)));
/// let search = TwoOpt::new(atlas.matrix(), &LocalSearchConfig::default());
/// let mut control = Convergence::new(atlas.matrix(), search);
/// control.run(StoppingPolicy::Adaptive);
/// assert!(control.iteration() >= 100);
/// assert!(control.best_tour().is_some());
/// ```
#[derive(Debug, Clone)]
pub struct Convergence<'a, I> {
    distances: &'a DistanceMatrix,
    candidates: I,
    best_tour: Option<Tour>,
    best_distance: f64,
    iteration: usize,
    last_improvement: usize,
}

impl<'a, I> Convergence<'a, I>
where
    I: Iterator<Item = Tour>,
{
    /// Wraps a candidate stream; nothing is pulled until [`step`](Self::step)
    /// or [`run`](Self::run).
    pub fn new(distances: &'a DistanceMatrix, candidates: I) -> Self {
        Self {
            distances,
            candidates,
            best_tour: None,
            best_distance: f64::INFINITY,
            iteration: 0,
            last_improvement: 0,
        }
    }

    /// Pulls one candidate. Returns whether it improved the incumbent, or
    /// `None` if the stream ended.
    pub fn step(&mut self) -> Option<bool> {
        self.advance(Report::Never, &mut |_: &Progress<'_>| {})
    }

    /// Pulls candidates until `policy` says stop or the stream ends.
    /// Returns the number of candidates pulled by this call.
    pub fn run(&mut self, policy: StoppingPolicy) -> usize {
        self.run_observed(policy, Report::Never, |_| {})
    }

    /// Like [`run`](Self::run), additionally passing the events selected by
    /// `report` to `observer`.
    pub fn run_observed<F>(&mut self, policy: StoppingPolicy, report: Report, mut observer: F) -> usize
    where
        F: FnMut(&Progress<'_>),
    {
        let started_at = self.iteration;
        loop {
            // Fixed counts are relative to this call; the adaptive rule looks
            // at the whole history.
            let keep_going = match policy {
                StoppingPolicy::Fixed(_) => policy.should_continue(self.iteration - started_at, 0),
                StoppingPolicy::Adaptive => policy.should_continue(self.iteration, self.last_improvement),
            };
            if !keep_going || self.advance(report, &mut observer).is_none() {
                break;
            }
        }
        self.iteration - started_at
    }

    fn advance(&mut self, report: Report, observer: &mut dyn FnMut(&Progress<'_>)) -> Option<bool> {
        let tour = self.candidates.next()?;
        self.iteration += 1;
        let distance = self.distances.tour_length(&tour);
        let improved = self.best_tour.is_none() || distance < self.best_distance;
        if improved {
            self.best_distance = distance;
            self.last_improvement = self.iteration;
            debug!(iteration = self.iteration, distance, "improved");
        }
        if report.wants(self.iteration, improved) {
            observer(&Progress {
                iteration: self.iteration,
                tour: &tour,
                distance,
                best_distance: self.best_distance,
                improved,
            });
        }
        if improved {
            self.best_tour = Some(tour);
        }
        Some(improved)
    }

    /// Shortest tour seen so far.
    pub fn best_tour(&self) -> Option<&[usize]> {
        self.best_tour.as_deref()
    }

    /// Length of [`best_tour`](Self::best_tour); `+∞` before the first pull.
    pub fn best_distance(&self) -> f64 {
        self.best_distance
    }

    /// Total candidates pulled.
    pub fn iteration(&self) -> usize {
        self.iteration
    }

    /// Iteration of the latest improvement (0 if none yet).
    pub fn last_improvement(&self) -> usize {
        self.last_improvement
    }

    /// Consumes the controller, returning the best tour and its length.
    pub fn into_best(self) -> Option<(Tour, f64)> {
        let distance = self.best_distance;
        self.best_tour.map(|tour| (tour, distance))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Atlas, Location};

    fn square() -> Atlas {
        Atlas::from_coords(vec![(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)])
    }

    #[test]
    fn test_fixed_pulls_exactly_n() {
        let atlas = square();
        let mut control = Convergence::new(atlas.matrix(), std::iter::repeat(vec![0, 1, 2, 3]));
        assert_eq!(control.run(StoppingPolicy::Fixed(7)), 7);
        assert_eq!(control.iteration(), 7);
        assert_eq!(control.run(StoppingPolicy::Fixed(3)), 3);
        assert_eq!(control.iteration(), 10);
    }

    #[test]
    fn test_adaptive_without_improvements_runs_floor() {
        let atlas = square();
        let mut control = Convergence::new(atlas.matrix(), std::iter::repeat(vec![0, 2, 1, 3]));
        control.run(StoppingPolicy::Adaptive);
        assert_eq!(control.iteration(), 100);
        assert_eq!(control.last_improvement(), 1);
    }

    #[test]
    fn test_adaptive_extends_after_late_improvement() {
        let atlas = square();
        // Crossed tours until iteration 80, then the optimal square.
        let candidates = (1..).map(|i| if i < 80 { vec![0, 2, 1, 3] } else { vec![0, 1, 2, 3] });
        let mut control = Convergence::new(atlas.matrix(), candidates);
        control.run(StoppingPolicy::Adaptive);
        assert_eq!(control.last_improvement(), 80);
        assert_eq!(control.iteration(), 161);
        assert!((control.best_distance() - 4.0).abs() < 1e-12);
    }

    #[test]
    fn test_earliest_of_equal_lengths_kept() {
        let atlas = square();
        let candidates = vec![vec![0, 1, 2, 3], vec![1, 2, 3, 0]].into_iter();
        let mut control = Convergence::new(atlas.matrix(), candidates);
        control.run(StoppingPolicy::Fixed(2));
        assert_eq!(control.best_tour(), Some(&[0, 1, 2, 3][..]));
    }

    #[test]
    fn test_stream_end_stops_run() {
        let atlas = square();
        let mut control = Convergence::new(atlas.matrix(), vec![vec![0, 1, 2, 3]].into_iter());
        assert_eq!(control.run(StoppingPolicy::Fixed(5)), 1);
        assert_eq!(control.step(), None);
    }

    #[test]
    fn test_observer_sees_selected_events() {
        let atlas = square();
        let candidates = vec![vec![0, 2, 1, 3], vec![0, 2, 1, 3], vec![0, 1, 2, 3], vec![0, 1, 2, 3]];
        let mut control = Convergence::new(atlas.matrix(), candidates.clone().into_iter());
        let mut seen = Vec::new();
        control.run_observed(StoppingPolicy::Fixed(4), Report::Improvements, |p| {
            seen.push((p.iteration, p.improved));
        });
        assert_eq!(seen, vec![(1, true), (3, true)]);

        let mut control = Convergence::new(atlas.matrix(), candidates.into_iter());
        let mut count = 0;
        control.run_observed(StoppingPolicy::Fixed(4), Report::Every(2), |_| count += 1);
        assert_eq!(count, 2);
    }

    #[test]
    fn test_first_candidate_kept_at_infinite_length() {
        let atlas = Atlas::from_coords(vec![(0.0, 0.0), (f64::MAX, 0.0), (-f64::MAX, 0.0)]);
        let mut control = Convergence::new(atlas.matrix(), std::iter::repeat(vec![0, 1, 2]));
        assert_eq!(control.step(), Some(true));
        assert_eq!(control.step(), Some(false));
        assert_eq!(control.best_tour(), Some(&[0, 1, 2][..]));
        assert_eq!(control.best_distance(), f64::INFINITY);
    }

    #[test]
    fn test_empty_tours_are_finite() {
        let empty = Atlas::from_coords(Vec::<Location>::new());
        let mut control = Convergence::new(empty.matrix(), std::iter::repeat(Vec::new()));
        control.run(StoppingPolicy::Fixed(1));
        assert_eq!(control.into_best(), Some((Vec::new(), 0.0)));
    }
}
