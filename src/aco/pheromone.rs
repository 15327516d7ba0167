//! Pheromone trail matrix.

/// Learned edge desirability, one non-negative value per directed node pair.
///
/// Starts uniform at 1.0. Each round first evaporates (multiplicative decay)
/// and then reinforces edges used by good solutions (additive deposit).
///
/// # Examples
///
/// ```
/// use u_hybrid_vrptw::aco::PheromoneTrail;
///
/// let mut trail = PheromoneTrail::new(3);
/// trail.evaporate(0.5);
/// trail.deposit(0, 1, 0.25);
/// assert_eq!(trail.get(0, 1), 0.75);
/// assert_eq!(trail.get(1, 0), 0.5);
/// ```
#[derive(Debug, Clone)]
pub struct PheromoneTrail {
    data: Vec<f64>,
    size: usize,
}

impl PheromoneTrail {
    /// Initial value of every entry.
    pub const INITIAL: f64 = 1.0;

    /// Creates a `size × size` trail filled with [`INITIAL`](Self::INITIAL).
    pub fn new(size: usize) -> Self {
        Self {
            data: vec![Self::INITIAL; size * size],
            size,
        }
    }

    /// Trail value on edge `from → to`.
    pub fn get(&self, from: usize, to: usize) -> f64 {
        self.data[from * self.size + to]
    }

    /// Multiplies every entry by `1 − rho`.
    ///
    /// `rho` is clamped to `[0, 1]` so entries stay non-negative.
    pub fn evaporate(&mut self, rho: f64) {
        let keep = 1.0 - rho.clamp(0.0, 1.0);
        for v in &mut self.data {
            *v *= keep;
        }
    }

    /// Adds a non-negative `amount` to edge `from → to`.
    pub fn deposit(&mut self, from: usize, to: usize, amount: f64) {
        self.data[from * self.size + to] += amount.max(0.0);
    }

    /// Number of nodes covered.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Smallest entry (used to check non-negativity).
    pub fn min_value(&self) -> f64 {
        self.data.iter().copied().fold(f64::INFINITY, f64::min)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_initial_uniform() {
        let trail = PheromoneTrail::new(4);
        assert_eq!(trail.size(), 4);
        for i in 0..4 {
            for j in 0..4 {
                assert_eq!(trail.get(i, j), 1.0);
            }
        }
    }

    #[test]
    fn test_deposit_is_directed() {
        let mut trail = PheromoneTrail::new(2);
        trail.deposit(0, 1, 2.0);
        assert_eq!(trail.get(0, 1), 3.0);
        assert_eq!(trail.get(1, 0), 1.0);
    }

    #[test]
    fn test_full_evaporation() {
        let mut trail = PheromoneTrail::new(2);
        trail.evaporate(1.0);
        assert_eq!(trail.min_value(), 0.0);
        assert_eq!(trail.get(1, 1), 0.0);
    }

    proptest! {
        #[test]
        fn prop_trail_stays_non_negative(
            rounds in proptest::collection::vec(
                (0.0f64..=1.0, 0usize..3, 0usize..3, -5.0f64..5.0), 0..50)
        ) {
            let mut trail = PheromoneTrail::new(3);
            for (rho, u, v, amount) in rounds {
                trail.evaporate(rho);
                trail.deposit(u, v, amount);
                prop_assert!(trail.min_value() >= 0.0);
            }
        }
    }
}
