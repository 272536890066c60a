//! Tour type and helpers.

/// A closed visiting order: a permutation of `0..n`.
///
/// The last location implicitly connects back to the first.
pub type Tour = Vec<usize>;

/// Returns `true` if `tour` visits every index in `0..n` exactly once.
///
/// # Examples
///
/// ```
/// use u_tsp::models::is_permutation;
///
/// assert!(is_permutation(&[2, 0, 1], 3));
/// assert!(!is_permutation(&[0, 0, 1], 3));
/// assert!(!is_permutation(&[0, 1], 3));
/// assert!(is_permutation(&[], 0));
/// ```
pub fn is_permutation(tour: &[usize], n: usize) -> bool {
    if tour.len() != n {
        return false;
    }
    let mut seen = vec![false; n];
    for &city in tour {
        if city >= n || seen[city] {
            return false;
        }
        seen[city] = true;
    }
    true
}

/// Rotates `tour` in place so that it starts at `city`.
///
/// Leaves the tour untouched if `city` is absent.
pub fn rotate_to(tour: &mut [usize], city: usize) {
    if let Some(pos) = tour.iter().position(|&c| c == city) {
        tour.rotate_left(pos);
    }
}
