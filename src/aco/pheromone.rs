//! Dense pheromone matrix.

/// An n×n pheromone matrix stored in row-major order.
#[derive(Debug, Clone, PartialEq)]
pub struct PheromoneMatrix {
    data: Vec<f64>,
    size: usize,
}

impl PheromoneMatrix {
    /// Creates a matrix with every entry set to `level`.
    pub fn uniform(size: usize, level: f64) -> Self {
        Self {
            data: vec![level; size * size],
            size,
        }
    }

    /// Pheromone on the edge `from → to`.
    #[inline]
    pub fn get(&self, from: usize, to: usize) -> f64 {
        self.data[from * self.size + to]
    }

    /// Number of locations.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Adds `amount` to the edge `from → to`.
    pub(crate) fn deposit(&mut self, from: usize, to: usize, amount: f64) {
        self.data[from * self.size + to] += amount;
    }

    /// Resets every entry to `level`.
    pub(crate) fn fill(&mut self, level: f64) {
        self.data.fill(level);
    }

    /// Applies `self = self · decay + delta + deltaᵗ`.
    pub(crate) fn evaporate(&mut self, decay: f64, delta: &PheromoneMatrix) {
        let n = self.size;
        for i in 0..n {
            for j in 0..n {
                self.data[i * n + j] = self.data[i * n + j] * decay + delta.get(i, j) + delta.get(j, i);
            }
        }
    }

    /// Returns `true` if the matrix is symmetric within the given tolerance.
    pub fn is_symmetric(&self, tol: f64) -> bool {
        (0..self.size).all(|i| ((i + 1)..self.size).all(|j| (self.get(i, j) - self.get(j, i)).abs() <= tol))
    }
}
