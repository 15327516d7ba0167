//! Tabu local-search stage.
//!
//! # Algorithm
//!
//! Each step samples up to `neighborhood_size` random relocate or swap
//! neighbors of the current solution, discards infeasible ones, and drops
//! tabu neighbors unless they beat the best-known fitness (aspiration).
//! The lowest-fitness survivor becomes the current solution even if it is
//! worse, and its move becomes tabu for `tabu_tenure` steps.

use rand::Rng;
use tracing::debug;

use crate::config::TabuConfig;
use crate::models::{Instance, Solution};
use crate::stage::{SolverStage, Stage, StageOutput, Termination};

use super::moves::{random_relocate, random_swap, Move};
use super::tabu_list::TabuList;

/// A feasible neighbor together with the move that produced it.
#[derive(Debug, Clone)]
pub struct Candidate {
    /// The neighboring solution, already simulated.
    pub solution: Solution,
    /// Move that turned the current solution into `solution`.
    pub mv: Move,
}

/// Short-term-memory local search over route sequences.
///
/// # Examples
///
/// ```
/// use u_hybrid_vrptw::config::TabuConfig;
/// use u_hybrid_vrptw::models::{Instance, Node, Solution};
/// use u_hybrid_vrptw::random::create_rng;
/// use u_hybrid_vrptw::stage::{SolverStage, Termination};
/// use u_hybrid_vrptw::tabu::TabuSearch;
///
/// let nodes = vec![
///     Node::depot(0.0, 0.0, 1000.0),
///     Node::new(1, 1.0, 0.0, 10.0, 0.0),
///     Node::new(2, 2.0, 0.0, 10.0, 0.0),
///     Node::new(3, 3.0, 0.0, 10.0, 0.0),
/// ];
/// let instance = Instance::new(nodes, 30.0).unwrap();
/// let start = Solution::from_sequences(&[vec![3, 1, 2]], &instance);
///
/// let mut search = TabuSearch::new(&instance, TabuConfig::default());
/// let mut rng = create_rng(42);
/// let out = search.solve(start.clone(), &mut rng, &Termination::new());
/// assert!(out.output.fitness() <= start.fitness());
/// assert_eq!(out.history.len(), 51);
/// ```
pub struct TabuSearch<'a> {
    instance: &'a Instance,
    config: TabuConfig,
    tabu: TabuList,
}

impl<'a> TabuSearch<'a> {
    /// Creates a search with an empty tabu list of `config.tabu_tenure`.
    pub fn new(instance: &'a Instance, config: TabuConfig) -> Self {
        let tabu = TabuList::new(config.tabu_tenure);
        Self {
            instance,
            config,
            tabu,
        }
    }

    /// Moves applied most recently, oldest first.
    pub fn tabu_list(&self) -> &TabuList {
        &self.tabu
    }

    /// Samples feasible neighbors of `current`. Attempts that hit an empty
    /// route or produce an infeasible solution are skipped.
    pub fn neighborhood<R: Rng>(&self, current: &Solution, rng: &mut R) -> Vec<Candidate> {
        let routes: Vec<Vec<usize>> = current
            .routes()
            .iter()
            .map(|r| r.customers().to_vec())
            .collect();

        (0..self.config.neighborhood_size)
            .filter_map(|_| {
                if rng.random_bool(0.5) {
                    random_relocate(&routes, rng)
                } else {
                    random_swap(&routes, rng)
                }
            })
            .map(|(sequences, mv)| Candidate {
                solution: Solution::from_sequences(&sequences, self.instance),
                mv,
            })
            .filter(|c| c.solution.is_feasible())
            .collect()
    }

    /// Lowest-fitness candidate that is not tabu, or is tabu but improves
    /// on `best_fitness`.
    pub fn select(&self, candidates: Vec<Candidate>, best_fitness: f64) -> Option<Candidate> {
        candidates
            .into_iter()
            .filter(|c| !self.tabu.contains(&c.mv) || c.solution.fitness() < best_fitness)
            .min_by(|a, b| a.solution.fitness().total_cmp(&b.solution.fitness()))
    }
}

impl SolverStage for TabuSearch<'_> {
    type Input = Solution;
    type Output = Solution;

    const STAGE: Stage = Stage::LocalSearch;

    fn solve<R: Rng>(
        &mut self,
        initial: Solution,
        rng: &mut R,
        termination: &Termination,
    ) -> StageOutput<Solution> {
        let mut current = initial.clone();
        let mut best = initial;
        let mut history = Vec::with_capacity(self.config.max_steps + 1);
        history.push(best.fitness());
        let mut interrupted = false;

        for step in 0..self.config.max_steps {
            if termination.should_stop() {
                interrupted = true;
                break;
            }

            let candidates = self.neighborhood(&current, rng);
            let sampled = candidates.len();
            if let Some(chosen) = self.select(candidates, best.fitness()) {
                self.tabu.push(chosen.mv);
                current = chosen.solution;
                if current.fitness() < best.fitness() {
                    best = current.clone();
                }
            }
            history.push(best.fitness());

            if step % 10 == 0 {
                debug!(
                    step,
                    feasible_neighbors = sampled,
                    current = current.fitness(),
                    best = best.fitness(),
                    "tabu step"
                );
            }
        }

        StageOutput {
            output: best,
            history,
            interrupted,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ga::GiantTour;
    use crate::random::create_rng;
    use crate::test_utils::{clustered_instance, corner_instance, line_instance, unreachable_instance};

    #[test]
    fn test_neighbors_are_feasible_and_cover() {
        let instance = clustered_instance();
        let search = TabuSearch::new(&instance, TabuConfig::default());
        let start = GiantTour::new((1..=12).collect()).decode(&instance);
        let mut rng = create_rng(4);
        let neighbors = search.neighborhood(&start, &mut rng);
        assert!(!neighbors.is_empty());
        for c in &neighbors {
            assert!(c.solution.is_feasible());
            assert!(c.solution.covers(&instance));
            assert!(c.solution.routes().iter().all(|r| !r.is_empty()));
        }
    }

    #[test]
    fn test_tabu_candidate_rejected_without_aspiration() {
        let instance = line_instance();
        let mut search = TabuSearch::new(&instance, TabuConfig::default());
        let mv = Move::Swap { a: 1, b: 3 };
        search.tabu.push(mv);
        let candidates = vec![Candidate {
            solution: Solution::from_sequences(&[vec![1, 2, 3]], &instance),
            mv,
        }];
        // fitness 6 does not beat best-known 6
        assert!(search.select(candidates, 6.0).is_none());
    }

    #[test]
    fn test_aspiration_admits_improving_tabu_move() {
        let instance = line_instance();
        let mut search = TabuSearch::new(&instance, TabuConfig::default());
        let mv = Move::Swap { a: 1, b: 3 };
        search.tabu.push(mv);
        let candidates = vec![
            Candidate {
                solution: Solution::from_sequences(&[vec![1, 2, 3]], &instance),
                mv,
            },
            Candidate {
                solution: Solution::from_sequences(&[vec![2, 1, 3]], &instance),
                mv: Move::Swap { a: 2, b: 1 },
            },
        ];
        let chosen = search.select(candidates, 8.0).expect("aspiration");
        assert_eq!(chosen.mv, mv);
        assert!((chosen.solution.fitness() - 6.0).abs() < 1e-10);
    }

    #[test]
    fn test_select_prefers_lowest_fitness() {
        let instance = line_instance();
        let search = TabuSearch::new(&instance, TabuConfig::default());
        let candidates = vec![
            Candidate {
                solution: Solution::from_sequences(&[vec![3, 1, 2]], &instance),
                mv: Move::Swap { a: 3, b: 1 },
            },
            Candidate {
                solution: Solution::from_sequences(&[vec![1, 2, 3]], &instance),
                mv: Move::Swap { a: 1, b: 2 },
            },
        ];
        let chosen = search.select(candidates, f64::INFINITY).expect("non-empty");
        assert_eq!(chosen.mv, Move::Swap { a: 1, b: 2 });
    }

    #[test]
    fn test_best_never_worsens() {
        let instance = clustered_instance();
        let start = GiantTour::new((1..=12).rev().collect()).decode(&instance);
        let config = TabuConfig::default().with_max_steps(60).with_tabu_tenure(5);
        let mut search = TabuSearch::new(&instance, config);
        let mut rng = create_rng(21);
        let out = search.solve(start.clone(), &mut rng, &Termination::new());
        assert_eq!(out.history.len(), 61);
        assert_eq!(out.history[0], start.fitness());
        assert!(out.history.windows(2).all(|w| w[1] <= w[0]));
        assert!(out.output.fitness() <= start.fitness());
        assert!(out.output.covers(&instance));
        assert!(search.tabu_list().len() <= 5);
    }

    #[test]
    fn test_finds_optimum_on_line() {
        let instance = line_instance();
        let start = Solution::from_sequences(&[vec![3, 1, 2]], &instance);
        let mut search = TabuSearch::new(&instance, TabuConfig::default());
        let mut rng = create_rng(8);
        let out = search.solve(start, &mut rng, &Termination::new());
        assert!((out.output.fitness() - 6.0).abs() < 1e-10);
    }

    #[test]
    fn test_infeasible_start_without_feasible_neighbors() {
        let instance = unreachable_instance();
        let start = Solution::from_sequences(&[vec![1], vec![2]], &instance);
        let mut search = TabuSearch::new(&instance, TabuConfig::default().with_max_steps(5));
        let mut rng = create_rng(8);
        let out = search.solve(start, &mut rng, &Termination::new());
        assert!(!out.output.is_feasible());
        assert_eq!(out.history.len(), 6);
        assert!(search.tabu_list().is_empty());
    }

    #[test]
    fn test_single_route_corner_search() {
        let instance = corner_instance();
        let start = Solution::from_sequences(&[vec![1, 2], vec![3, 4]], &instance);
        let mut search = TabuSearch::new(&instance, TabuConfig::default().with_max_steps(20));
        let mut rng = create_rng(2);
        let out = search.solve(start.clone(), &mut rng, &Termination::new());
        assert!(out.output.is_feasible());
        assert!(out.output.fitness() <= start.fitness());
    }
}
