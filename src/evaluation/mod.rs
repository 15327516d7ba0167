//! Route simulation and feasibility checking.
//!
//! Every route change is re-simulated from scratch; schedules are never
//! patched incrementally.

mod simulator;

pub use simulator::{simulate, RouteSchedule, ScheduleEntry, Violation};
