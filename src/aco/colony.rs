//! Ant colony construction stage.

use std::collections::BTreeSet;

use rand::Rng;
use tracing::debug;

use crate::config::AcoConfig;
use crate::models::{Instance, Route, Solution};
use crate::random::roulette;
use crate::stage::{SolverStage, Stage, StageOutput, Termination};

use super::PheromoneTrail;

/// Keeps inverse distances and deposits finite.
const EPSILON: f64 = 1e-6;

/// Pheromone-guided probabilistic route builder.
///
/// Each round, `n_ants` ants independently build complete solutions; the
/// trail then evaporates and every feasible solution of the round deposits
/// `1 / (distance + ε)` on each edge it used. The stage output is the pool
/// of all feasible solutions found across rounds.
///
/// # Examples
///
/// ```
/// use u_hybrid_vrptw::aco::AntColony;
/// use u_hybrid_vrptw::config::AcoConfig;
/// use u_hybrid_vrptw::models::{Instance, Node};
/// use u_hybrid_vrptw::random::create_rng;
/// use u_hybrid_vrptw::stage::{SolverStage, Termination};
///
/// let nodes = vec![
///     Node::depot(0.0, 0.0, 1000.0),
///     Node::new(1, 1.0, 0.0, 10.0, 0.0),
///     Node::new(2, 2.0, 0.0, 10.0, 0.0),
///     Node::new(3, 3.0, 0.0, 10.0, 0.0),
/// ];
/// let instance = Instance::new(nodes, 30.0).unwrap();
///
/// let mut colony = AntColony::new(&instance, AcoConfig::default());
/// let mut rng = create_rng(42);
/// let out = colony.solve((), &mut rng, &Termination::new());
/// assert_eq!(out.history.len(), 5);
/// assert!(out.output.iter().all(|s| s.is_feasible()));
/// ```
pub struct AntColony<'a> {
    instance: &'a Instance,
    config: AcoConfig,
    trail: PheromoneTrail,
}

impl<'a> AntColony<'a> {
    /// Creates a colony with a uniform trail.
    pub fn new(instance: &'a Instance, config: AcoConfig) -> Self {
        Self {
            instance,
            config,
            trail: PheromoneTrail::new(instance.num_nodes()),
        }
    }

    /// Current pheromone trail.
    pub fn trail(&self) -> &PheromoneTrail {
        &self.trail
    }

    /// Builds one complete solution by probabilistic greedy extension.
    ///
    /// Routes are extended with customers that fit the remaining capacity
    /// and can start service by their due date; a route is closed when no
    /// such customer remains. Customers that cannot be reached even from a
    /// fresh route are each placed alone, which leaves the solution
    /// infeasible.
    pub fn construct<R: Rng>(&self, rng: &mut R) -> Solution {
        let instance = self.instance;
        let capacity = instance.vehicle_capacity();
        let mut unvisited: BTreeSet<usize> = instance.customer_ids().into_iter().collect();
        let mut routes = Vec::new();

        while !unvisited.is_empty() {
            let mut sequence = Vec::new();
            let mut current = 0;
            let mut load = 0.0;
            let mut time = 0.0;

            loop {
                let candidates: Vec<usize> = unvisited
                    .iter()
                    .copied()
                    .filter(|&c| {
                        let node = instance.node(c);
                        if load + node.demand() > capacity {
                            return false;
                        }
                        let arrival = time + instance.distance(current, c);
                        arrival + node.window().waiting_time(arrival) <= node.due_date()
                    })
                    .collect();

                let Some(next) = self.select_next(current, &candidates, rng) else {
                    break;
                };

                let node = instance.node(next);
                let arrival = time + instance.distance(current, next);
                time = arrival + node.window().waiting_time(arrival) + node.service_time();
                load += node.demand();
                unvisited.remove(&next);
                sequence.push(next);
                current = next;
            }

            if sequence.is_empty() {
                debug!(
                    unreachable = unvisited.len(),
                    "customers cannot be served from the depot"
                );
                routes.extend(
                    unvisited
                        .iter()
                        .map(|&c| Route::from_customers(&[c], instance)),
                );
                break;
            }
            routes.push(Route::from_customers(&sequence, instance));
        }

        Solution::new(routes)
    }

    /// Samples the next stop with weight `tau^alpha * (1 / d)^beta`.
    fn select_next<R: Rng>(&self, current: usize, candidates: &[usize], rng: &mut R) -> Option<usize> {
        let weights: Vec<f64> = candidates
            .iter()
            .map(|&c| {
                let tau = self.trail.get(current, c);
                let eta = 1.0 / (self.instance.distance(current, c) + EPSILON);
                tau.powf(self.config.alpha) * eta.powf(self.config.beta)
            })
            .collect();
        roulette(&weights, rng).map(|i| candidates[i])
    }

    /// Evaporates the trail, then reinforces the edges of `solutions`.
    fn update_trail(&mut self, solutions: &[Solution]) {
        self.trail.evaporate(self.config.rho);
        for solution in solutions {
            let contribution = 1.0 / (solution.total_distance() + EPSILON);
            for route in solution.routes() {
                for edge in route.stops().windows(2) {
                    self.trail.deposit(edge[0], edge[1], contribution);
                }
            }
        }
    }
}

impl SolverStage for AntColony<'_> {
    type Input = ();
    type Output = Vec<Solution>;

    const STAGE: Stage = Stage::Construction;

    fn solve<R: Rng>(
        &mut self,
        _input: (),
        rng: &mut R,
        termination: &Termination,
    ) -> StageOutput<Vec<Solution>> {
        let mut pool = Vec::new();
        let mut history = Vec::with_capacity(self.config.iterations);
        let mut best = f64::INFINITY;
        let mut interrupted = false;

        for round in 0..self.config.iterations {
            if termination.should_stop() {
                interrupted = true;
                break;
            }

            let solutions: Vec<Solution> = (0..self.config.n_ants)
                .map(|_| self.construct(rng))
                .filter(Solution::is_feasible)
                .collect();

            self.update_trail(&solutions);

            let round_best = solutions
                .iter()
                .map(Solution::fitness)
                .fold(f64::INFINITY, f64::min);
            best = best.min(round_best);
            history.push(best);

            debug!(
                round,
                feasible = solutions.len(),
                best,
                "ACO round {}/{}",
                round + 1,
                self.config.iterations
            );
            pool.extend(solutions);
        }

        StageOutput {
            output: pool,
            history,
            interrupted,
        }
    }
}
