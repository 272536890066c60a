//! Dense distance matrix.

use crate::models::Location;

/// A dense n×n distance matrix stored in row-major order.
///
/// # Examples
///
/// ```
/// use u_tsp::models::Location;
/// use u_tsp::distance::DistanceMatrix;
///
/// let locations = vec![
///     Location::new(0.0, 0.0),
///     Location::new(3.0, 4.0),
///     Location::new(6.0, 8.0),
/// ];
/// let dm = DistanceMatrix::from_locations(&locations);
/// assert!((dm.get(0, 1) - 5.0).abs() < 1e-10);
/// assert_eq!(dm.size(), 3);
/// ```
#[derive(Debug, Clone)]
pub struct DistanceMatrix {
    data: Vec<f64>,
    size: usize,
}

impl DistanceMatrix {
    /// Computes the Euclidean distance matrix of the given locations.
    pub fn from_locations(locations: &[Location]) -> Self {
        let n = locations.len();
        let mut data = vec![0.0; n * n];
        for i in 0..n {
            for j in (i + 1)..n {
                let d = locations[i].distance_to(&locations[j]);
                data[i * n + j] = d;
                data[j * n + i] = d;
            }
        }
        Self { data, size: n }
    }

    /// Returns the distance from location `from` to location `to`.
    ///
    /// # Panics
    ///
    /// Panics if either index is out of bounds.
    #[inline]
    pub fn get(&self, from: usize, to: usize) -> f64 {
        self.data[from * self.size + to]
    }

    /// Distances from `from` to every location.
    pub fn row(&self, from: usize) -> &[f64] {
        &self.data[from * self.size..(from + 1) * self.size]
    }

    /// Number of locations in this matrix.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Returns `true` if the matrix is symmetric within the given tolerance.
    pub fn is_symmetric(&self, tol: f64) -> bool {
        for i in 0..self.size {
            for j in (i + 1)..self.size {
                if (self.get(i, j) - self.get(j, i)).abs() > tol {
                    return false;
                }
            }
        }
        true
    }

    /// Length of the closed tour `tour[0] → … → tour[n-1] → tour[0]`.
    ///
    /// Does not check that `tour` is a permutation; an empty tour has length 0.
    pub fn tour_length(&self, tour: &[usize]) -> f64 {
        match (tour.first(), tour.last()) {
            (Some(&first), Some(&last)) => {
                tour.windows(2).map(|w| self.get(w[0], w[1])).sum::<f64>() + self.get(last, first)
            }
            _ => 0.0,
        }
    }
}
