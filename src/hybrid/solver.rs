//! Three-stage pipeline: ant colony, then genetic refinement, then tabu
//! search.

use rand::Rng;
use tracing::{debug, warn};

use crate::aco::AntColony;
use crate::config::HybridConfig;
use crate::error::SolveError;
use crate::ga::GeneticRefiner;
use crate::models::{Instance, Solution};
use crate::random::rng_from_seed;
use crate::stage::{SolverStage, Stage, Termination};
use crate::tabu::TabuSearch;

use super::{HistoryEntry, HybridResult, NoopObserver, SolveObserver};

/// Runs the construction, refinement, and local-search stages in order,
/// feeding each stage's output into the next.
///
/// # Examples
///
/// ```
/// use u_hybrid_vrptw::config::HybridConfig;
/// use u_hybrid_vrptw::hybrid::{HybridSolver, SolveStatus};
/// use u_hybrid_vrptw::models::{Instance, Node};
///
/// let nodes = vec![
///     Node::depot(50.0, 50.0, 1000.0),
///     Node::new(1, 10.0, 10.0, 10.0, 0.0),
///     Node::new(2, 90.0, 10.0, 10.0, 0.0),
///     Node::new(3, 10.0, 90.0, 10.0, 0.0),
///     Node::new(4, 90.0, 90.0, 10.0, 0.0),
/// ];
/// let instance = Instance::new(nodes, 25.0).unwrap();
///
/// let config = HybridConfig::default().with_seed(42);
/// let result = HybridSolver::new(&instance, config).run().unwrap();
/// assert_eq!(result.status, SolveStatus::Feasible);
/// assert!(result.solution.num_routes() >= 2);
/// ```
pub struct HybridSolver<'a, O: SolveObserver = NoopObserver> {
    instance: &'a Instance,
    config: HybridConfig,
    termination: Termination,
    observer: O,
}

impl<'a> HybridSolver<'a> {
    /// Creates a solver with no observer and no external termination.
    pub fn new(instance: &'a Instance, config: HybridConfig) -> Self {
        Self {
            instance,
            config,
            termination: Termination::new(),
            observer: NoopObserver,
        }
    }
}

impl<'a, O: SolveObserver> HybridSolver<'a, O> {
    /// Replaces the observer.
    pub fn with_observer<P: SolveObserver>(self, observer: P) -> HybridSolver<'a, P> {
        HybridSolver {
            instance: self.instance,
            config: self.config,
            termination: self.termination,
            observer,
        }
    }

    /// Replaces the termination conditions. A `time_limit_secs` in the
    /// config still applies on top of these; whichever deadline comes
    /// first stops the run.
    pub fn with_termination(mut self, termination: Termination) -> Self {
        self.termination = termination;
        self
    }

    /// Caller-supplied termination conditions.
    pub fn termination(&self) -> &Termination {
        &self.termination
    }

    /// Pipeline configuration.
    pub fn config(&self) -> &HybridConfig {
        &self.config
    }

    /// The installed observer.
    pub fn observer(&self) -> &O {
        &self.observer
    }

    /// Runs the pipeline with an RNG seeded from the config.
    pub fn run(&mut self) -> Result<HybridResult, SolveError> {
        let mut rng = rng_from_seed(self.config.seed);
        self.run_with_rng(&mut rng)
    }

    /// Runs the pipeline and insists on a feasible answer.
    pub fn solve(&mut self) -> Result<Solution, SolveError> {
        self.run()?.into_feasible()
    }

    /// Runs the pipeline on the given random stream.
    ///
    /// An infeasible final solution is reported through
    /// [`HybridResult::status`], not as an error. Returns
    /// [`SolveError::Cancelled`] if the cancel flag is raised at any point.
    pub fn run_with_rng<R: Rng>(&mut self, rng: &mut R) -> Result<HybridResult, SolveError> {
        self.config.validate()?;

        let termination = match self.config.time_limit() {
            Some(limit) => self.termination.clone().with_earliest_deadline(limit),
            None => self.termination.clone(),
        };
        let instance = self.instance;
        let mut history = Vec::new();

        debug!(
            customers = instance.num_customers(),
            capacity = instance.vehicle_capacity(),
            "starting hybrid solve"
        );

        let mut stage = Stage::Construction;
        check_cancelled(&termination)?;

        let mut colony = AntColony::new(instance, self.config.aco.clone());
        let pool = self.run_stage(&mut colony, (), rng, &termination, &mut history);
        stage = advance(stage);
        check_cancelled(&termination)?;

        let mut refiner = GeneticRefiner::new(instance, self.config.ga.clone());
        let refined = self.run_stage(&mut refiner, pool, rng, &termination, &mut history);
        stage = advance(stage);
        check_cancelled(&termination)?;

        let mut search = TabuSearch::new(instance, self.config.tabu.clone());
        let solution = self.run_stage(&mut search, refined, rng, &termination, &mut history);
        stage = advance(stage);
        check_cancelled(&termination)?;
        debug_assert_eq!(stage, Stage::Done);

        let result = HybridResult::new(solution, history);
        if !result.solution.is_feasible() {
            warn!(
                violations = result.solution.violations().len(),
                "no feasible solution found"
            );
        }
        self.observer.on_finish(&result);
        Ok(result)
    }

    fn run_stage<S: SolverStage, R: Rng>(
        &mut self,
        stage: &mut S,
        input: S::Input,
        rng: &mut R,
        termination: &Termination,
        history: &mut Vec<HistoryEntry>,
    ) -> S::Output {
        self.observer.on_stage_start(S::STAGE);
        let out = stage.solve(input, rng, termination);

        if out.interrupted {
            debug!(stage = S::STAGE.name(), steps = out.history.len(), "stage interrupted");
        }
        let best = out.history.last().copied().unwrap_or(f64::INFINITY);
        history.extend(
            out.history
                .iter()
                .enumerate()
                .map(|(step, &fitness)| HistoryEntry {
                    stage: S::STAGE,
                    step,
                    fitness,
                }),
        );

        self.observer.on_stage_end(S::STAGE, best);
        out.output
    }
}

fn advance(stage: Stage) -> Stage {
    let next = stage.next();
    debug!(from = %stage, to = %next, "stage transition");
    next
}

fn check_cancelled(termination: &Termination) -> Result<(), SolveError> {
    if termination.is_cancelled() {
        Err(SolveError::Cancelled)
    } else {
        Ok(())
    }
}
