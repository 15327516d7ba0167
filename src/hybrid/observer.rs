//! Progress callbacks for the hybrid pipeline.

use tracing::info;

use crate::stage::Stage;

use super::HybridResult;

/// Receives pipeline progress. Every method defaults to a no-op.
///
/// # Examples
///
/// ```
/// use u_hybrid_vrptw::hybrid::SolveObserver;
/// use u_hybrid_vrptw::stage::Stage;
///
/// #[derive(Default)]
/// struct Stages(Vec<Stage>);
///
/// impl SolveObserver for Stages {
///     fn on_stage_start(&mut self, stage: Stage) {
///         self.0.push(stage);
///     }
/// }
/// ```
pub trait SolveObserver {
    /// A stage is about to run.
    fn on_stage_start(&mut self, _stage: Stage) {}

    /// A stage returned; `best_fitness` is the last entry of its history
    /// (`+∞` if it recorded nothing feasible).
    fn on_stage_end(&mut self, _stage: Stage, _best_fitness: f64) {}

    /// The pipeline reached [`Stage::Done`].
    fn on_finish(&mut self, _result: &HybridResult) {}
}

impl<O: SolveObserver + ?Sized> SolveObserver for &mut O {
    fn on_stage_start(&mut self, stage: Stage) {
        (**self).on_stage_start(stage);
    }

    fn on_stage_end(&mut self, stage: Stage, best_fitness: f64) {
        (**self).on_stage_end(stage, best_fitness);
    }

    fn on_finish(&mut self, result: &HybridResult) {
        (**self).on_finish(result);
    }
}

/// Ignores every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl SolveObserver for NoopObserver {}

/// Forwards events to `tracing` at `INFO` level.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl SolveObserver for TracingObserver {
    fn on_stage_start(&mut self, stage: Stage) {
        info!(%stage, "stage started");
    }

    fn on_stage_end(&mut self, stage: Stage, best_fitness: f64) {
        info!(%stage, best_fitness, "stage finished");
    }

    fn on_finish(&mut self, result: &HybridResult) {
        info!(
            status = ?result.status,
            routes = result.solution.num_routes(),
            distance = result.solution.total_distance(),
            "hybrid solve finished"
        );
    }
}
