//! Ant colony construction.
//!
//! - [`PheromoneTrail`]: dense directed trail matrix, one entry per ordered node pair
//! - [`AntColony`]: the construction stage

mod colony;
mod pheromone;

pub use colony::AntColony;
pub use pheromone::PheromoneTrail;
