//! Candidate solution type.

use serde::Serialize;

use crate::evaluation::Violation;

use super::{Instance, Route};

/// A complete candidate solution: a set of routes and their aggregate
/// metrics.
///
/// Aggregates are computed once at construction. Stages never mutate a
/// solution in place; each operator builds a fresh one.
///
/// # Examples
///
/// ```
/// use u_hybrid_vrptw::models::{Instance, Node, Solution};
///
/// let nodes = vec![
///     Node::depot(0.0, 0.0, 100.0),
///     Node::new(1, 3.0, 4.0, 10.0, 0.0),
///     Node::new(2, 6.0, 8.0, 10.0, 0.0),
/// ];
/// let instance = Instance::new(nodes, 15.0).unwrap();
///
/// let sol = Solution::from_sequences(&[vec![1], vec![2]], &instance);
/// assert_eq!(sol.num_routes(), 2);
/// assert!(sol.is_feasible());
/// assert!((sol.fitness() - 30.0).abs() < 1e-10);
///
/// let overloaded = Solution::from_sequences(&[vec![1, 2]], &instance);
/// assert!(!overloaded.is_feasible());
/// assert_eq!(overloaded.fitness(), f64::INFINITY);
/// ```
#[derive(Debug, Clone, Serialize)]
pub struct Solution {
    routes: Vec<Route>,
    total_distance: f64,
    total_wait: f64,
    is_feasible: bool,
}

impl Solution {
    /// Aggregates the given routes.
    pub fn new(routes: Vec<Route>) -> Self {
        let total_distance = routes.iter().map(Route::total_distance).sum();
        let total_wait = routes.iter().map(Route::total_wait).sum();
        let is_feasible = routes.iter().all(Route::is_feasible);
        Self {
            routes,
            total_distance,
            total_wait,
            is_feasible,
        }
    }

    /// Builds one route per customer sequence (depot endpoints implied).
    pub fn from_sequences(sequences: &[Vec<usize>], instance: &Instance) -> Self {
        Self::new(
            sequences
                .iter()
                .map(|seq| Route::from_customers(seq, instance))
                .collect(),
        )
    }

    /// Routes in this solution.
    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    /// Number of routes (vehicles used).
    pub fn num_routes(&self) -> usize {
        self.routes.len()
    }

    /// Number of customer visits across all routes.
    pub fn num_served(&self) -> usize {
        self.routes.iter().map(Route::len).sum()
    }

    /// Sum of route distances.
    pub fn total_distance(&self) -> f64 {
        self.total_distance
    }

    /// Sum of waiting times over every stop.
    pub fn total_wait(&self) -> f64 {
        self.total_wait
    }

    /// Returns `true` if every route is feasible.
    pub fn is_feasible(&self) -> bool {
        self.is_feasible
    }

    /// Scalar cost: total distance when feasible, `+∞` otherwise.
    pub fn fitness(&self) -> f64 {
        if self.is_feasible {
            self.total_distance
        } else {
            f64::INFINITY
        }
    }

    /// All customer ids in route order, depot stops removed.
    pub fn customer_sequence(&self) -> Vec<usize> {
        self.routes
            .iter()
            .flat_map(|r| r.customers().iter().copied())
            .collect()
    }

    /// Violations across all routes.
    pub fn violations(&self) -> Vec<Violation> {
        self.routes
            .iter()
            .flat_map(|r| r.violations().iter().cloned())
            .collect()
    }

    /// Returns `true` if every customer of `instance` is visited exactly once
    /// and the depot appears only at route endpoints.
    pub fn covers(&self, instance: &Instance) -> bool {
        let mut seen = vec![false; instance.num_nodes()];
        for route in &self.routes {
            let stops = route.stops();
            if stops.len() < 2 || stops[0] != 0 || stops[stops.len() - 1] != 0 {
                return false;
            }
            for &id in route.customers() {
                if id == 0 || id >= seen.len() || seen[id] {
                    return false;
                }
                seen[id] = true;
            }
        }
        seen[1..].iter().all(|&s| s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Node;

    fn setup() -> Instance {
        let nodes = vec![
            Node::depot(0.0, 0.0, 100.0),
            Node::new(1, 1.0, 0.0, 10.0, 0.0),
            Node::new(2, 2.0, 0.0, 10.0, 0.0),
            Node::new(3, 3.0, 0.0, 10.0, 0.0),
        ];
        Instance::new(nodes, 20.0).expect("valid")
    }

    #[test]
    fn test_empty_solution() {
        let sol = Solution::new(vec![]);
        assert_eq!(sol.num_routes(), 0);
        assert_eq!(sol.num_served(), 0);
        assert!(sol.is_feasible());
        assert_eq!(sol.fitness(), 0.0);
    }

    #[test]
    fn test_aggregates() {
        let instance = setup();
        let sol = Solution::from_sequences(&[vec![1, 2], vec![3]], &instance);
        assert_eq!(sol.num_served(), 3);
        assert!((sol.total_distance() - 10.0).abs() < 1e-10);
        assert_eq!(sol.total_wait(), 0.0);
        assert_eq!(sol.customer_sequence(), vec![1, 2, 3]);
        assert!(sol.covers(&instance));
    }

    #[test]
    fn test_fitness_matches_feasibility() {
        let instance = setup();
        let bad = Solution::from_sequences(&[vec![1, 2, 3]], &instance);
        assert!(!bad.is_feasible());
        assert_eq!(bad.fitness(), f64::INFINITY);
        assert_eq!(bad.violations().len(), 1);

        let good = Solution::from_sequences(&[vec![1], vec![2, 3]], &instance);
        assert!(good.is_feasible());
        assert!(good.fitness().is_finite());
        assert!(good.violations().is_empty());
    }

    #[test]
    fn test_covers_detects_missing_and_duplicates() {
        let instance = setup();
        let missing = Solution::from_sequences(&[vec![1, 2]], &instance);
        assert!(!missing.covers(&instance));

        let duplicate = Solution::from_sequences(&[vec![1, 2], vec![2, 3]], &instance);
        assert!(!duplicate.covers(&instance));

        let inner_depot = Solution::from_sequences(&[vec![1, 0, 2], vec![3]], &instance);
        assert!(!inner_depot.covers(&instance));
    }
}
