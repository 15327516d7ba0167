//! Tabu local search.
//!
//! - [`Move`]: relocate / swap descriptors
//! - [`TabuList`]: bounded FIFO of recent moves
//! - [`TabuSearch`]: the local-search stage

mod moves;
mod search;
mod tabu_list;

pub use moves::{random_relocate, random_swap, Move};
pub use search::{Candidate, TabuSearch};
pub use tabu_list::TabuList;
