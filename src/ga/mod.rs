//! Genetic refinement over giant-tour chromosomes.
//!
//! - [`GiantTour`]: permutation chromosome encoding all customers
//! - [`split_into_routes`]: greedy capacity / time-window split into routes
//! - [`order_crossover`], [`swap_mutation`], [`tournament_select`]: variation and selection
//! - [`GeneticRefiner`]: the refinement stage

mod chromosome;
mod operators;
mod refiner;
pub mod split;

pub use chromosome::GiantTour;
pub use operators::{
    order_crossover, order_crossover_with_cuts, swap_mutation, tournament_select, TOURNAMENT_SIZE,
};
pub use refiner::GeneticRefiner;
pub use split::{split_into_routes, split_sequences};
