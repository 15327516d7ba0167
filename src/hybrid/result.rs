//! Pipeline output types.

use serde::Serialize;

use crate::error::SolveError;
use crate::models::Solution;
use crate::stage::Stage;

/// One recorded best-so-far fitness, tagged with its stage and the
/// stage-local step index.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HistoryEntry {
    /// Stage that recorded the entry.
    pub stage: Stage,
    /// Step index within that stage, starting at 0.
    pub step: usize,
    /// Best-known fitness after the step (`+∞` if nothing feasible yet).
    pub fitness: f64,
}

/// Whether the returned solution satisfies every constraint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SolveStatus {
    /// The solution meets every capacity and time-window constraint.
    Feasible,
    /// Even the best candidate violates a constraint.
    NoFeasibleSolution,
}

/// Final solution, merged stage histories, and status.
#[derive(Debug, Clone, Serialize)]
pub struct HybridResult {
    /// Best solution after local search.
    pub solution: Solution,
    /// Stage histories in pipeline order.
    pub history: Vec<HistoryEntry>,
    /// Feasibility of `solution`.
    pub status: SolveStatus,
}

impl HybridResult {
    /// Builds a result, deriving the status from the solution.
    pub fn new(solution: Solution, history: Vec<HistoryEntry>) -> Self {
        let status = if solution.is_feasible() {
            SolveStatus::Feasible
        } else {
            SolveStatus::NoFeasibleSolution
        };
        Self {
            solution,
            history,
            status,
        }
    }

    /// History entries recorded by `stage`, in step order.
    pub fn stage_history(&self, stage: Stage) -> impl Iterator<Item = &HistoryEntry> {
        self.history.iter().filter(move |h| h.stage == stage)
    }

    /// Best fitness `stage` reported at its last step.
    pub fn stage_best(&self, stage: Stage) -> Option<f64> {
        self.stage_history(stage).last().map(|h| h.fitness)
    }

    /// The solution if feasible, otherwise the violations of the best
    /// candidate.
    pub fn into_feasible(self) -> Result<Solution, SolveError> {
        match self.status {
            SolveStatus::Feasible => Ok(self.solution),
            SolveStatus::NoFeasibleSolution => Err(SolveError::NoFeasibleSolution {
                violations: self.solution.violations(),
            }),
        }
    }
}
