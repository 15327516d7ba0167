//! Route simulator that computes timing, load, and feasibility.

use serde::Serialize;

use crate::models::Instance;

/// Timing of one stop in a simulated route.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct ScheduleEntry {
    /// Arrival time at the stop.
    pub arrival: f64,
    /// Time spent waiting for the window to open.
    pub wait: f64,
    /// Start of service (`arrival + wait`).
    pub start_service: f64,
    /// Departure time (`start_service + service_time`).
    pub departure: f64,
}

/// A constraint violated by a simulated route.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Violation {
    /// Total load exceeds the vehicle capacity.
    CapacityExceeded {
        /// Load carried by the route.
        load: f64,
        /// Vehicle capacity.
        capacity: f64,
    },
    /// Service starts after the node's due date.
    TimeWindowViolated {
        /// Node where service starts late.
        node_id: usize,
        /// Actual start of service.
        start_service: f64,
        /// Due date of the node.
        due: f64,
    },
}

/// Result of simulating an ordered stop sequence.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RouteSchedule {
    /// One entry per stop, index-aligned with the simulated sequence.
    pub entries: Vec<ScheduleEntry>,
    /// Sum of travelled edge lengths.
    pub total_distance: f64,
    /// Sum of demands of all stops.
    pub total_load: f64,
    /// Constraint violations; empty iff the route is feasible.
    pub violations: Vec<Violation>,
}

impl RouteSchedule {
    /// Returns `true` if no capacity or time-window constraint is violated.
    pub fn is_feasible(&self) -> bool {
        self.violations.is_empty()
    }

    /// Total waiting time along the route.
    pub fn total_wait(&self) -> f64 {
        self.entries.iter().map(|e| e.wait).sum()
    }
}

/// Simulates a stop sequence (normally `[0, c1, …, cn, 0]`).
///
/// The first stop starts at time zero with an all-zero entry. For each
/// consecutive pair `(u, v)`:
///
/// ```text
/// arrival(v)   = departure(u) + d(u, v)
/// wait(v)      = max(0, ready(v) - arrival(v))
/// start(v)     = arrival(v) + wait(v)
/// departure(v) = start(v) + service(v)
/// ```
///
/// The route is feasible iff every `start(v) <= due(v)` and the summed
/// demand fits the vehicle capacity. This is a pure function of its inputs.
///
/// # Examples
///
/// ```
/// use u_hybrid_vrptw::models::{Instance, Node};
/// use u_hybrid_vrptw::evaluation::simulate;
///
/// let nodes = vec![
///     Node::depot(0.0, 0.0, 100.0),
///     Node::new(1, 3.0, 4.0, 10.0, 5.0),
/// ];
/// let instance = Instance::new(nodes, 50.0).unwrap();
/// let sim = simulate(&[0, 1, 0], &instance);
/// assert_eq!(sim.entries.len(), 3);
/// assert!((sim.total_distance - 10.0).abs() < 1e-10);
/// assert!((sim.entries[2].arrival - 15.0).abs() < 1e-10);
/// assert!(sim.is_feasible());
/// ```
pub fn simulate(stops: &[usize], instance: &Instance) -> RouteSchedule {
    let mut entries = Vec::with_capacity(stops.len());
    let mut violations = Vec::new();
    let mut total_distance = 0.0;
    let mut total_load = 0.0;

    let Some(&first) = stops.first() else {
        return RouteSchedule {
            entries,
            total_distance,
            total_load,
            violations,
        };
    };
    entries.push(ScheduleEntry::default());
    total_load += instance.node(first).demand();

    let mut prev = first;
    let mut departure = 0.0;
    for &id in &stops[1..] {
        let node = instance.node(id);
        let travel = instance.distance(prev, id);
        total_distance += travel;

        let arrival = departure + travel;
        let wait = node.window().waiting_time(arrival);
        let start_service = arrival + wait;
        departure = start_service + node.service_time();

        if start_service > node.due_date() {
            violations.push(Violation::TimeWindowViolated {
                node_id: id,
                start_service,
                due: node.due_date(),
            });
        }

        entries.push(ScheduleEntry {
            arrival,
            wait,
            start_service,
            departure,
        });
        total_load += node.demand();
        prev = id;
    }

    if total_load > instance.vehicle_capacity() {
        violations.push(Violation::CapacityExceeded {
            load: total_load,
            capacity: instance.vehicle_capacity(),
        });
    }

    RouteSchedule {
        entries,
        total_distance,
        total_load,
        violations,
    }
}
