//! Error types for instance construction, configuration, and solving.

use thiserror::Error;

use crate::evaluation::Violation;

/// Malformed instance data, rejected before any solver stage runs.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InstanceError {
    /// The node list is empty (no depot).
    #[error("instance has no nodes")]
    Empty,

    /// Node ids must equal their position in the node list.
    #[error("node at position {position} has id {id}; ids must be contiguous from 0")]
    NonContiguousId {
        /// Position in the supplied node list.
        position: usize,
        /// Id found at that position.
        id: usize,
    },

    /// The depot (id 0) carries demand.
    #[error("depot must have zero demand, found {0}")]
    DepotDemand(f64),

    /// A coordinate, demand, or time value is NaN or infinite.
    #[error("node {0} has a non-finite field")]
    NonFinite(usize),

    /// Demand or service time is negative.
    #[error("node {0} has negative demand or service time")]
    Negative(usize),

    /// The time window closes before it opens.
    #[error("node {id} has ready time {ready} after due date {due}")]
    InvertedWindow {
        /// Node id.
        id: usize,
        /// Ready time.
        ready: f64,
        /// Due date.
        due: f64,
    },

    /// Vehicle capacity is zero, negative, or not finite.
    #[error("invalid vehicle capacity {0}")]
    Capacity(f64),
}

/// Solver configuration error.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Terminal failure of a hybrid solve.
#[derive(Debug, Error)]
pub enum SolveError {
    /// Configuration rejected before the pipeline started.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Every stage finished, but the best solution still violates
    /// capacity or time windows.
    #[error("no feasible solution found ({} violations in best candidate)", .violations.len())]
    NoFeasibleSolution {
        /// Violations of the best (infeasible) candidate.
        violations: Vec<Violation>,
    },

    /// The cancel flag was raised while solving.
    #[error("solve was cancelled")]
    Cancelled,
}
