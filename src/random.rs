//! Random number generation helpers.

use rand::rngs::StdRng;
use rand::SeedableRng;

/// Creates the RNG used by every randomized solver.
///
/// A fixed seed makes runs reproducible; `None` seeds from the thread RNG.
///
/// # Examples
///
/// ```
/// use rand::Rng;
/// use u_tsp::random::create_rng;
///
/// let a: u64 = create_rng(Some(7)).random();
/// let b: u64 = create_rng(Some(7)).random();
/// assert_eq!(a, b);
/// ```
pub fn create_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_rng(&mut rand::rng()),
    }
}
