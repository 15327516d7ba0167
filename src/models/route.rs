//! Vehicle route type.

use serde::Serialize;

use crate::evaluation::{simulate, RouteSchedule, ScheduleEntry, Violation};

use super::Instance;

/// An ordered stop sequence `[depot, c1, …, cn, depot]` served by one
/// vehicle, together with its simulated schedule.
///
/// Routes are only built through constructors that run the simulator, so
/// the derived metrics always match the stop sequence.
///
/// # Examples
///
/// ```
/// use u_hybrid_vrptw::models::{Instance, Node, Route};
///
/// let nodes = vec![
///     Node::depot(0.0, 0.0, 100.0),
///     Node::new(1, 3.0, 4.0, 10.0, 0.0),
///     Node::new(2, 6.0, 8.0, 10.0, 0.0),
/// ];
/// let instance = Instance::new(nodes, 25.0).unwrap();
/// let route = Route::from_customers(&[1, 2], &instance);
/// assert_eq!(route.stops(), &[0, 1, 2, 0]);
/// assert_eq!(route.customers(), &[1, 2]);
/// assert_eq!(route.schedule().len(), 4);
/// assert!((route.total_distance() - 20.0).abs() < 1e-10);
/// assert!(route.is_feasible());
/// ```
#[derive(Debug, Clone, Serialize)]
pub struct Route {
    stops: Vec<usize>,
    #[serde(flatten)]
    simulation: RouteSchedule,
}

impl Route {
    /// Builds a route visiting `customers` in order, framed by the depot.
    pub fn from_customers(customers: &[usize], instance: &Instance) -> Self {
        let mut stops = Vec::with_capacity(customers.len() + 2);
        stops.push(0);
        stops.extend_from_slice(customers);
        stops.push(0);
        Self::from_stops(stops, instance)
    }

    /// Builds a route from a full stop sequence (depot endpoints included).
    pub fn from_stops(stops: Vec<usize>, instance: &Instance) -> Self {
        let simulation = simulate(&stops, instance);
        Self { stops, simulation }
    }

    /// Full stop sequence, depot endpoints included.
    pub fn stops(&self) -> &[usize] {
        &self.stops
    }

    /// Customer ids between the depot endpoints.
    pub fn customers(&self) -> &[usize] {
        if self.stops.len() < 2 {
            return &[];
        }
        &self.stops[1..self.stops.len() - 1]
    }

    /// Number of customers served.
    pub fn len(&self) -> usize {
        self.customers().len()
    }

    /// Returns `true` if the route serves no customer.
    pub fn is_empty(&self) -> bool {
        self.customers().is_empty()
    }

    /// Per-stop timing, index-aligned with [`stops`](Self::stops).
    pub fn schedule(&self) -> &[ScheduleEntry] {
        &self.simulation.entries
    }

    /// Total travelled distance.
    pub fn total_distance(&self) -> f64 {
        self.simulation.total_distance
    }

    /// Total delivered load.
    pub fn total_load(&self) -> f64 {
        self.simulation.total_load
    }

    /// Total waiting time.
    pub fn total_wait(&self) -> f64 {
        self.simulation.total_wait()
    }

    /// Capacity and time-window violations.
    pub fn violations(&self) -> &[Violation] {
        &self.simulation.violations
    }

    /// Returns `true` if load fits and every service starts on time.
    pub fn is_feasible(&self) -> bool {
        self.simulation.is_feasible()
    }
}
