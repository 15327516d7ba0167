//! # u-hybrid-vrptw
//!
//! Hybrid metaheuristic solver for the capacitated vehicle routing problem
//! with time windows (CVRPTW). A single depot serves customers with a
//! homogeneous fleet; the objective is total Euclidean distance.
//!
//! The solve runs three stages in order, each seeded by the previous one:
//!
//! 1. [`aco`]: ant colony construction of a pool of feasible solutions
//! 2. [`ga`]: genetic refinement of that pool over giant-tour permutations
//! 3. [`tabu`]: tabu local search around the best refined solution
//!
//! ## Modules
//!
//! - [`models`]: nodes, instances, routes, and solutions
//! - [`distance`]: Euclidean distance matrix
//! - [`evaluation`]: route simulation and constraint violations
//! - [`stage`]: the [`SolverStage`](stage::SolverStage) contract and termination
//! - [`hybrid`]: pipeline orchestration, results, and observers
//! - [`config`]: serde/TOML configuration
//! - [`random`]: seedable random streams
//! - [`error`]: error types
//!
//! ## Example
//!
//! ```
//! use u_hybrid_vrptw::config::HybridConfig;
//! use u_hybrid_vrptw::hybrid::HybridSolver;
//! use u_hybrid_vrptw::models::{Instance, Node, TimeWindow};
//!
//! let nodes = vec![
//!     Node::depot(0.0, 0.0, 200.0),
//!     Node::new(1, 10.0, 0.0, 5.0, 1.0),
//!     Node::new(2, 0.0, 10.0, 5.0, 1.0).with_window(TimeWindow::new(0.0, 50.0).unwrap()),
//!     Node::new(3, -10.0, 0.0, 5.0, 1.0),
//! ];
//! let instance = Instance::new(nodes, 10.0).unwrap();
//!
//! let solution = HybridSolver::new(&instance, HybridConfig::default().with_seed(7))
//!     .solve()
//!     .unwrap();
//! assert!(solution.is_feasible());
//! assert!(solution.covers(&instance));
//! ```

pub mod aco;
pub mod config;
pub mod distance;
pub mod error;
pub mod evaluation;
pub mod ga;
pub mod hybrid;
pub mod models;
pub mod random;
pub mod stage;
pub mod tabu;

#[cfg(test)]
mod test_utils;
