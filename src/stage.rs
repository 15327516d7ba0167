//! The shared solver-stage contract and cooperative termination.

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use rand::Rng;
use serde::Serialize;

/// Pipeline position. Transitions only move forward:
/// `Construction → Refinement → LocalSearch → Done`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    /// Ant colony construction.
    Construction,
    /// Genetic refinement.
    Refinement,
    /// Tabu local search.
    LocalSearch,
    /// Pipeline finished.
    Done,
}

impl Stage {
    /// The stage that follows this one (`Done` is terminal).
    pub fn next(self) -> Stage {
        match self {
            Stage::Construction => Stage::Refinement,
            Stage::Refinement => Stage::LocalSearch,
            Stage::LocalSearch | Stage::Done => Stage::Done,
        }
    }

    /// Short label used in histories and logs.
    pub fn name(self) -> &'static str {
        match self {
            Stage::Construction => "ACO",
            Stage::Refinement => "GA",
            Stage::LocalSearch => "Tabu",
            Stage::Done => "Done",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// What a stage hands back: its primary output plus the best-so-far
/// fitness recorded at each of its steps.
#[derive(Debug, Clone)]
pub struct StageOutput<T> {
    /// Primary output passed on to the next stage.
    pub output: T,
    /// Best-known fitness per step (`+∞` while nothing feasible is known).
    pub history: Vec<f64>,
    /// `true` if the stage returned early because of [`Termination`].
    pub interrupted: bool,
}

/// One metaheuristic stage of the hybrid pipeline.
///
/// Exactly three implementors exist: [`AntColony`](crate::aco::AntColony),
/// [`GeneticRefiner`](crate::ga::GeneticRefiner), and
/// [`TabuSearch`](crate::tabu::TabuSearch).
pub trait SolverStage {
    /// What the stage consumes from its predecessor.
    type Input;
    /// What the stage produces for its successor.
    type Output;

    /// Which pipeline position this stage occupies.
    const STAGE: Stage;

    /// Runs the stage to completion (or until `termination` fires).
    fn solve<R: Rng>(
        &mut self,
        input: Self::Input,
        rng: &mut R,
        termination: &Termination,
    ) -> StageOutput<Self::Output>;
}

/// Cooperative stop conditions, checked once per round, generation, or step.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use u_hybrid_vrptw::stage::Termination;
///
/// let termination = Termination::new().with_time_limit(Duration::from_secs(60));
/// assert!(!termination.should_stop());
///
/// let flag = termination.cancel_flag();
/// flag.store(true, std::sync::atomic::Ordering::Relaxed);
/// assert!(termination.is_cancelled());
/// assert!(termination.should_stop());
/// ```
#[derive(Debug, Clone, Default)]
pub struct Termination {
    deadline: Option<Instant>,
    cancel: Arc<AtomicBool>,
}

impl Termination {
    /// No time limit, not cancelled.
    pub fn new() -> Self {
        Self::default()
    }

    /// Stops once `limit` has elapsed from now.
    pub fn with_time_limit(mut self, limit: Duration) -> Self {
        self.deadline = Instant::now().checked_add(limit);
        self
    }

    /// Adds a limit of `limit` from now, keeping any earlier deadline
    /// already set.
    pub fn with_earliest_deadline(mut self, limit: Duration) -> Self {
        let candidate = Instant::now().checked_add(limit);
        self.deadline = match (self.deadline, candidate) {
            (Some(current), Some(candidate)) => Some(current.min(candidate)),
            (current, candidate) => current.or(candidate),
        };
        self
    }

    /// Shares an externally owned cancel flag.
    pub fn with_cancel_flag(mut self, flag: Arc<AtomicBool>) -> Self {
        self.cancel = flag;
        self
    }

    /// Handle that can be raised from another thread to cancel the solve.
    pub fn cancel_flag(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.cancel)
    }

    /// Returns `true` if cancellation was requested.
    pub fn is_cancelled(&self) -> bool {
        self.cancel.load(Ordering::Relaxed)
    }

    /// Returns `true` if the deadline has passed.
    pub fn is_expired(&self) -> bool {
        self.deadline.is_some_and(|d| Instant::now() >= d)
    }

    /// Returns `true` if the current stage should return now.
    pub fn should_stop(&self) -> bool {
        self.is_cancelled() || self.is_expired()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_earliest_deadline_keeps_tighter_limit() {
        let termination = Termination::new()
            .with_time_limit(Duration::ZERO)
            .with_earliest_deadline(Duration::from_secs(3600));
        assert!(termination.is_expired());

        let termination = Termination::new()
            .with_time_limit(Duration::from_secs(3600))
            .with_earliest_deadline(Duration::ZERO);
        assert!(termination.is_expired());
    }

    #[test]
    fn test_earliest_deadline_on_unbounded() {
        let termination = Termination::new().with_earliest_deadline(Duration::ZERO);
        assert!(termination.should_stop());
        let termination = Termination::new().with_earliest_deadline(Duration::from_secs(3600));
        assert!(!termination.should_stop());
    }

    #[test]
    fn test_stage_order() {
        assert_eq!(Stage::Construction.next(), Stage::Refinement);
        assert_eq!(Stage::Refinement.next(), Stage::LocalSearch);
        assert_eq!(Stage::LocalSearch.next(), Stage::Done);
        assert_eq!(Stage::Done.next(), Stage::Done);
    }

    #[test]
    fn test_stage_names() {
        assert_eq!(Stage::Construction.to_string(), "ACO");
        assert_eq!(Stage::Refinement.to_string(), "GA");
        assert_eq!(Stage::LocalSearch.to_string(), "Tabu");
    }

    #[test]
    fn test_default_termination_never_stops() {
        let t = Termination::new();
        assert!(!t.should_stop());
    }

    #[test]
    fn test_zero_time_limit_expires() {
        let t = Termination::new().with_time_limit(Duration::ZERO);
        assert!(t.is_expired());
        assert!(!t.is_cancelled());
    }

    #[test]
    fn test_shared_cancel_flag() {
        let flag = Arc::new(AtomicBool::new(false));
        let t = Termination::new().with_cancel_flag(Arc::clone(&flag));
        assert!(!t.should_stop());
        flag.store(true, Ordering::Relaxed);
        assert!(t.should_stop());
    }
}
