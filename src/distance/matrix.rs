//! Dense distance matrix.

use crate::models::Node;

/// A dense n×n distance matrix stored in row-major order.
///
/// # Examples
///
/// ```
/// use u_hybrid_vrptw::models::Node;
/// use u_hybrid_vrptw::distance::DistanceMatrix;
///
/// let nodes = vec![
///     Node::depot(0.0, 0.0, 100.0),
///     Node::new(1, 3.0, 4.0, 10.0, 5.0),
///     Node::new(2, 6.0, 8.0, 20.0, 5.0),
/// ];
/// let dm = DistanceMatrix::from_nodes(&nodes);
/// assert!((dm.get(0, 1) - 5.0).abs() < 1e-10);
/// assert_eq!(dm.size(), 3);
/// ```
#[derive(Debug, Clone)]
pub struct DistanceMatrix {
    data: Vec<f64>,
    size: usize,
}

impl DistanceMatrix {
    /// Creates a distance matrix of the given size, initialized to zero.
    pub fn new(size: usize) -> Self {
        Self {
            data: vec![0.0; size * size],
            size,
        }
    }

    /// Computes the Euclidean distance matrix from node coordinates.
    pub fn from_nodes(nodes: &[Node]) -> Self {
        let n = nodes.len();
        let mut dm = Self::new(n);
        for i in 0..n {
            for j in (i + 1)..n {
                let d = nodes[i].distance_to(&nodes[j]);
                dm.set(i, j, d);
                dm.set(j, i, d);
            }
        }
        dm
    }

    /// Returns the distance from `from` to `to`.
    ///
    /// # Panics
    ///
    /// Panics if either index is out of bounds.
    pub fn get(&self, from: usize, to: usize) -> f64 {
        self.data[from * self.size + to]
    }

    fn set(&mut self, from: usize, to: usize, distance: f64) {
        self.data[from * self.size + to] = distance;
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
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_nodes() -> Vec<Node> {
        vec![
            Node::depot(0.0, 0.0, 100.0),
            Node::new(1, 3.0, 4.0, 10.0, 5.0),
            Node::new(2, 0.0, 8.0, 20.0, 5.0),
        ]
    }

    #[test]
    fn test_from_nodes() {
        let dm = DistanceMatrix::from_nodes(&sample_nodes());
        assert_eq!(dm.size(), 3);
        assert!((dm.get(0, 1) - 5.0).abs() < 1e-10);
        assert!((dm.get(0, 2) - 8.0).abs() < 1e-10);
        assert!((dm.get(1, 2) - 5.0).abs() < 1e-10);
    }

    #[test]
    fn test_zero_diagonal_and_symmetric() {
        let dm = DistanceMatrix::from_nodes(&sample_nodes());
        for i in 0..dm.size() {
            assert_eq!(dm.get(i, i), 0.0);
        }
        assert!(dm.is_symmetric(1e-10));
    }

    #[test]
    fn test_triangle_inequality() {
        let dm = DistanceMatrix::from_nodes(&sample_nodes());
        for i in 0..3 {
            for j in 0..3 {
                for k in 0..3 {
                    assert!(dm.get(i, k) <= dm.get(i, j) + dm.get(j, k) + 1e-10);
                }
            }
        }
    }
}
