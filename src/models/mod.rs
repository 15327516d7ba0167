//! Domain model types for the CVRPTW.
//!
//! Provides the core abstractions: nodes with demands and time windows, the
//! validated problem instance, routes as simulated stop sequences, and
//! candidate solutions with a single scalar fitness.

mod instance;
mod node;
mod route;
mod solution;

pub use instance::Instance;
pub use node::{Node, TimeWindow};
pub use route::Route;
pub use solution::Solution;
