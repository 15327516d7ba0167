//! Hybrid pipeline orchestration.
//!
//! - [`HybridSolver`]: runs construction, refinement, and local search in order
//! - [`HybridResult`]: final solution, tagged history, and [`SolveStatus`]
//! - [`SolveObserver`]: progress callbacks ([`NoopObserver`], [`TracingObserver`])

mod observer;
mod result;
mod solver;

pub use observer::{NoopObserver, SolveObserver, TracingObserver};
pub use result::{HistoryEntry, HybridResult, SolveStatus};
pub use solver::HybridSolver;
