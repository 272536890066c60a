//! Stopping policies and result selection.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Result, TspError};
use crate::models::Tour;

/// When the controller stops pulling candidates from an anytime solver.
///
/// Parsed from a token: a positive decimal count gives [`Fixed`](Self::Fixed),
/// `"exp"` gives [`Adaptive`](Self::Adaptive). Anything else is rejected.
///
/// # Examples
///
/// ```
/// use u_tsp::controller::StoppingPolicy;
///
/// assert_eq!("250".parse::<StoppingPolicy>().unwrap(), StoppingPolicy::Fixed(250));
/// assert_eq!("exp".parse::<StoppingPolicy>().unwrap(), StoppingPolicy::Adaptive);
/// assert!("forever".parse::<StoppingPolicy>().is_err());
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum StoppingPolicy {
    /// Pull exactly this many candidates.
    Fixed(usize),
    /// Keep going while `2 · last_improvement ≥ iteration` or
    /// `iteration < 100`.
    #[default]
    Adaptive,
}

impl StoppingPolicy {
    /// Minimum number of iterations the adaptive policy always runs.
    pub const ADAPTIVE_FLOOR: usize = 100;

    /// Returns `true` if another candidate should be pulled.
    ///
    /// `iteration` counts candidates pulled so far (1-based once started);
    /// `last_improvement` is the iteration of the latest improvement, 0 if none.
    /// For [`Fixed`](Self::Fixed) the count is relative to zero.
    pub fn should_continue(&self, iteration: usize, last_improvement: usize) -> bool {
        match *self {
            StoppingPolicy::Fixed(count) => iteration < count,
            StoppingPolicy::Adaptive => {
                2 * last_improvement >= iteration || iteration < Self::ADAPTIVE_FLOOR
            }
        }
    }

    /// Rejects a fixed count of zero, which would produce no tour at all.
    pub fn validate(&self) -> Result<()> {
        match self {
            StoppingPolicy::Fixed(0) => Err(TspError::InvalidParameter(
                "fixed stopping policy needs at least one iteration".into(),
            )),
            _ => Ok(()),
        }
    }
}

impl FromStr for StoppingPolicy {
    type Err = TspError;

    fn from_str(token: &str) -> Result<Self> {
        let token = token.trim();
        if token == "exp" {
            return Ok(StoppingPolicy::Adaptive);
        }
        if !token.is_empty() && token.bytes().all(|b| b.is_ascii_digit()) {
            if let Ok(count) = token.parse::<usize>() {
                if count > 0 {
                    return Ok(StoppingPolicy::Fixed(count));
                }
            }
        }
        Err(TspError::UnrecognizedStoppingPolicy(token.to_string()))
    }
}

impl TryFrom<String> for StoppingPolicy {
    type Error = TspError;

    fn try_from(token: String) -> Result<Self> {
        token.parse()
    }
}

impl From<StoppingPolicy> for String {
    fn from(policy: StoppingPolicy) -> Self {
        policy.to_string()
    }
}

impl fmt::Display for StoppingPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoppingPolicy::Fixed(count) => write!(f, "{count}"),
            StoppingPolicy::Adaptive => f.write_str("exp"),
        }
    }
}

/// What [`run`](super::run) hands back.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReturnKind {
    /// The best tour.
    #[default]
    Path,
    /// The best tour's length.
    Distance,
    /// Nothing; useful for timing runs.
    None,
}

/// Result of a controller run, shaped by [`ReturnKind`].
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// Best tour found.
    Path(Tour),
    /// Length of the best tour found.
    Distance(f64),
    /// No value requested.
    Nothing,
}

impl Outcome {
    /// The tour, if one was requested.
    pub fn tour(&self) -> Option<&[usize]> {
        match self {
            Outcome::Path(tour) => Some(tour),
            _ => None,
        }
    }

    /// The distance, if one was requested.
    pub fn distance(&self) -> Option<f64> {
        match self {
            Outcome::Distance(d) => Some(*d),
            _ => None,
        }
    }
}

/// Which progress events reach an observer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Report {
    /// No events.
    #[default]
    Never,
    /// Only iterations that improved the best tour.
    Improvements,
    /// Every k-th iteration (k = 0 reports nothing).
    Every(usize),
    /// Every iteration.
    All,
}

impl Report {
    /// Returns `true` if the event for `iteration` should be reported.
    pub fn wants(&self, iteration: usize, improved: bool) -> bool {
        match *self {
            Report::Never => false,
            Report::Improvements => improved,
            Report::Every(0) => false,
            Report::Every(k) => iteration % k == 0,
            Report::All => true,
        }
    }
}
