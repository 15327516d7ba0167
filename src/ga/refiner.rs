//! Genetic refinement stage.
//!
//! Evolves a population of solutions encoded as giant tours.
//!
//! # Operators
//!
//! - **Selection**: tournament of three
//! - **Crossover**: order crossover (OX), preserving relative customer order
//! - **Mutation**: swap of two positions
//! - **Decoding**: greedy capacity / time-window split
//!
//! The best-known solution is always carried into the next generation, so
//! the recorded best fitness never increases.

use rand::Rng;
use tracing::debug;

use crate::config::GaConfig;
use crate::models::{Instance, Solution};
use crate::stage::{SolverStage, Stage, StageOutput, Termination};

use super::chromosome::GiantTour;
use super::operators::{order_crossover, swap_mutation, tournament_select, TOURNAMENT_SIZE};
use super::split::split_into_routes;

/// Population-based refinement over flattened customer permutations.
///
/// # Examples
///
/// ```
/// use u_hybrid_vrptw::config::GaConfig;
/// use u_hybrid_vrptw::ga::GeneticRefiner;
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
/// let config = GaConfig::default().with_population_size(20).with_generations(30);
/// let mut refiner = GeneticRefiner::new(&instance, config);
/// let mut rng = create_rng(42);
/// let out = refiner.solve(Vec::new(), &mut rng, &Termination::new());
/// assert!((out.output.fitness() - 6.0).abs() < 1e-10);
/// assert_eq!(out.history.len(), 31);
/// ```
pub struct GeneticRefiner<'a> {
    instance: &'a Instance,
    config: GaConfig,
}

impl<'a> GeneticRefiner<'a> {
    /// Creates a refiner for the given instance.
    pub fn new(instance: &'a Instance, config: GaConfig) -> Self {
        Self { instance, config }
    }

    /// Seeds the population from `seeds` (fittest first) and pads it with
    /// random permutations.
    pub fn initial_population<R: Rng>(&self, mut seeds: Vec<Solution>, rng: &mut R) -> Vec<Solution> {
        let size = self.config.population_size.max(1);
        seeds.sort_by(|a, b| a.fitness().total_cmp(&b.fitness()));
        seeds.truncate(size);

        let padding = size - seeds.len();
        if padding > 0 {
            debug!(seeded = seeds.len(), padding, "padding GA population with random tours");
        }
        while seeds.len() < size {
            seeds.push(GiantTour::random(self.instance, rng).decode(self.instance));
        }
        seeds
    }

    /// Builds one child: two tournaments, OX, optional swap mutation, split.
    pub fn breed<R: Rng>(&self, population: &[Solution], rng: &mut R) -> Solution {
        let p1 = GiantTour::from_solution(tournament_select(population, TOURNAMENT_SIZE, rng));
        let p2 = GiantTour::from_solution(tournament_select(population, TOURNAMENT_SIZE, rng));

        let mut child = order_crossover(p1.customers(), p2.customers(), rng);
        if rng.random::<f64>() < self.config.mutation_rate {
            swap_mutation(&mut child, rng);
        }
        split_into_routes(&child, self.instance)
    }

    /// Best-known solution first, then the next `elitism_size - 1` fittest
    /// members of `population`.
    fn elites(&self, best: &Solution, population: &[Solution]) -> Vec<Solution> {
        let mut elites = vec![best.clone()];
        let extra = self.config.elitism_size.saturating_sub(1);
        if extra > 0 {
            let mut ranked: Vec<&Solution> = population.iter().collect();
            ranked.sort_by(|a, b| a.fitness().total_cmp(&b.fitness()));
            elites.extend(ranked.into_iter().take(extra).cloned());
        }
        elites
    }
}

fn fittest(population: &[Solution]) -> Option<&Solution> {
    population
        .iter()
        .min_by(|a, b| a.fitness().total_cmp(&b.fitness()))
}

impl SolverStage for GeneticRefiner<'_> {
    type Input = Vec<Solution>;
    type Output = Solution;

    const STAGE: Stage = Stage::Refinement;

    fn solve<R: Rng>(
        &mut self,
        seeds: Vec<Solution>,
        rng: &mut R,
        termination: &Termination,
    ) -> StageOutput<Solution> {
        let size = self.config.population_size.max(1);
        let mut population = self.initial_population(seeds, rng);
        let mut best = match fittest(&population) {
            Some(s) => s.clone(),
            None => Solution::new(Vec::new()),
        };

        let mut history = Vec::with_capacity(self.config.generations + 1);
        history.push(best.fitness());
        let mut interrupted = false;

        for generation in 0..self.config.generations {
            if termination.should_stop() {
                interrupted = true;
                break;
            }

            let mut next = self.elites(&best, &population);
            next.truncate(size);
            while next.len() < size {
                next.push(self.breed(&population, rng));
            }
            population = next;

            if let Some(candidate) = fittest(&population) {
                if candidate.fitness() < best.fitness() {
                    best = candidate.clone();
                }
            }
            history.push(best.fitness());

            if generation % 10 == 0 {
                debug!(generation, best = best.fitness(), "GA generation");
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
    use crate::random::create_rng;
    use crate::test_utils::{clustered_instance, corner_instance, unreachable_instance};

    #[test]
    fn test_initial_population_pads_with_random() {
        let instance = corner_instance();
        let refiner = GeneticRefiner::new(&instance, GaConfig::default().with_population_size(8));
        let mut rng = create_rng(1);
        let population = refiner.initial_population(Vec::new(), &mut rng);
        assert_eq!(population.len(), 8);
        assert!(population.iter().all(|s| s.covers(&instance)));
    }

    #[test]
    fn test_initial_population_keeps_fittest_seeds() {
        let instance = corner_instance();
        let refiner = GeneticRefiner::new(&instance, GaConfig::default().with_population_size(2));
        let seeds = vec![
            Solution::from_sequences(&[vec![1, 4], vec![2, 3]], &instance),
            Solution::from_sequences(&[vec![1, 2], vec![3, 4]], &instance),
            Solution::from_sequences(&[vec![1], vec![2], vec![3], vec![4]], &instance),
        ];
        let best = seeds
            .iter()
            .map(Solution::fitness)
            .fold(f64::INFINITY, f64::min);
        let mut rng = create_rng(1);
        let population = refiner.initial_population(seeds, &mut rng);
        assert_eq!(population.len(), 2);
        assert_eq!(population[0].fitness(), best);
    }

    #[test]
    fn test_breed_yields_full_coverage() {
        let instance = clustered_instance();
        let refiner = GeneticRefiner::new(&instance, GaConfig::default().with_mutation_rate(1.0));
        let mut rng = create_rng(3);
        let population = refiner.initial_population(Vec::new(), &mut rng);
        for _ in 0..50 {
            let child = refiner.breed(&population, &mut rng);
            assert!(child.covers(&instance));
        }
    }

    #[test]
    fn test_elitism_carries_extra_members() {
        let instance = corner_instance();
        let config = GaConfig::default().with_population_size(4).with_elitism_size(3);
        let refiner = GeneticRefiner::new(&instance, config);
        let mut rng = create_rng(5);
        let population = refiner.initial_population(Vec::new(), &mut rng);
        let best = fittest(&population).expect("non-empty").clone();
        let elites = refiner.elites(&best, &population);
        assert_eq!(elites.len(), 3);
        assert_eq!(elites[0].fitness(), best.fitness());
    }

    #[test]
    fn test_history_is_non_increasing() {
        let instance = clustered_instance();
        let config = GaConfig::default().with_population_size(20).with_generations(40);
        let mut refiner = GeneticRefiner::new(&instance, config);
        let mut rng = create_rng(11);
        let out = refiner.solve(Vec::new(), &mut rng, &Termination::new());
        assert_eq!(out.history.len(), 41);
        assert!(out.history.windows(2).all(|w| w[1] <= w[0]));
        assert_eq!(*out.history.last().expect("non-empty"), out.output.fitness());
        assert!(out.output.covers(&instance));
    }

    #[test]
    fn test_never_worse_than_best_seed() {
        let instance = clustered_instance();
        let mut rng = create_rng(2);
        let seed = GiantTour::new((1..=12).collect()).decode(&instance);
        let seed_fitness = seed.fitness();
        let config = GaConfig::default().with_population_size(10).with_generations(10);
        let mut refiner = GeneticRefiner::new(&instance, config);
        let out = refiner.solve(vec![seed], &mut rng, &Termination::new());
        assert!(out.output.fitness() <= seed_fitness);
    }

    #[test]
    fn test_unreachable_instance_stays_infeasible() {
        let instance = unreachable_instance();
        let config = GaConfig::default().with_population_size(6).with_generations(5);
        let mut refiner = GeneticRefiner::new(&instance, config);
        let mut rng = create_rng(2);
        let out = refiner.solve(Vec::new(), &mut rng, &Termination::new());
        assert!(!out.output.is_feasible());
        assert!(out.output.covers(&instance));
        assert!(out.history.iter().all(|h| h.is_infinite()));
    }

    #[test]
    fn test_expired_termination_returns_initial_best() {
        let instance = corner_instance();
        let mut refiner = GeneticRefiner::new(&instance, GaConfig::default());
        let termination = Termination::new().with_time_limit(std::time::Duration::ZERO);
        let mut rng = create_rng(2);
        let out = refiner.solve(Vec::new(), &mut rng, &termination);
        assert!(out.interrupted);
        assert_eq!(out.history.len(), 1);
        assert!(out.output.covers(&instance));
    }
}
