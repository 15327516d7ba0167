//! Node (customer or depot) and time window types.

use crate::error::InstanceError;

/// A service time window at a node.
///
/// Service may not *start* after `due`; arriving before `ready` means the
/// vehicle waits.
///
/// # Examples
///
/// ```
/// use u_hybrid_vrptw::models::TimeWindow;
///
/// let tw = TimeWindow::new(100.0, 200.0).unwrap();
/// assert!(tw.contains(150.0));
/// assert!(!tw.contains(250.0));
/// assert!(TimeWindow::new(200.0, 100.0).is_none());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeWindow {
    ready: f64,
    due: f64,
}

impl TimeWindow {
    /// Creates a new time window.
    ///
    /// Returns `None` if `ready > due`, `ready` is not finite, or `due` is
    /// NaN. An infinite `due` is allowed and means "never closes".
    pub fn new(ready: f64, due: f64) -> Option<Self> {
        if !ready.is_finite() || due.is_nan() || ready > due {
            return None;
        }
        Some(Self { ready, due })
    }

    /// A window open from time zero that never closes.
    pub fn unbounded() -> Self {
        Self {
            ready: 0.0,
            due: f64::INFINITY,
        }
    }

    /// Earliest service start.
    pub fn ready(&self) -> f64 {
        self.ready
    }

    /// Latest service start.
    pub fn due(&self) -> f64 {
        self.due
    }

    /// Returns `true` if the given time falls within this window.
    pub fn contains(&self, time: f64) -> bool {
        time >= self.ready && time <= self.due
    }

    /// Waiting time incurred when arriving at `arrival`.
    pub fn waiting_time(&self, arrival: f64) -> f64 {
        (self.ready - arrival).max(0.0)
    }
}

/// A customer or the depot.
///
/// Node 0 is the depot. Nodes are immutable once built and identified by
/// `id`, which is also their index in the [`Instance`](super::Instance).
///
/// # Examples
///
/// ```
/// use u_hybrid_vrptw::models::{Node, TimeWindow};
///
/// let depot = Node::depot(50.0, 50.0, 1000.0);
/// assert_eq!(depot.id(), 0);
/// assert_eq!(depot.due_date(), 1000.0);
///
/// let c = Node::new(1, 10.0, 10.0, 10.0, 5.0)
///     .with_window(TimeWindow::new(0.0, 300.0).unwrap());
/// assert_eq!(c.demand(), 10.0);
/// assert_eq!(c.ready_time(), 0.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    id: usize,
    x: f64,
    y: f64,
    demand: f64,
    service_time: f64,
    window: TimeWindow,
}

impl Node {
    /// Creates a node with an unbounded time window.
    pub fn new(id: usize, x: f64, y: f64, demand: f64, service_time: f64) -> Self {
        Self {
            id,
            x,
            y,
            demand,
            service_time,
            window: TimeWindow::unbounded(),
        }
    }

    /// Creates the depot (id 0, no demand, no service) open over `[0, horizon]`.
    pub fn depot(x: f64, y: f64, horizon: f64) -> Self {
        let window = TimeWindow::new(0.0, horizon).unwrap_or_else(TimeWindow::unbounded);
        Self::new(0, x, y, 0.0, 0.0).with_window(window)
    }

    /// Builds a node from a flat `id x y demand ready due service` record.
    pub fn from_record(
        id: usize,
        x: f64,
        y: f64,
        demand: f64,
        ready_time: f64,
        due_date: f64,
        service_time: f64,
    ) -> Result<Self, InstanceError> {
        let window = TimeWindow::new(ready_time, due_date).ok_or(InstanceError::InvertedWindow {
            id,
            ready: ready_time,
            due: due_date,
        })?;
        Ok(Self::new(id, x, y, demand, service_time).with_window(window))
    }

    /// Sets the time window.
    pub fn with_window(mut self, window: TimeWindow) -> Self {
        self.window = window;
        self
    }

    /// Node id (0 = depot).
    pub fn id(&self) -> usize {
        self.id
    }

    /// X-coordinate.
    pub fn x(&self) -> f64 {
        self.x
    }

    /// Y-coordinate.
    pub fn y(&self) -> f64 {
        self.y
    }

    /// Units to deliver.
    pub fn demand(&self) -> f64 {
        self.demand
    }

    /// Time spent serving this node.
    pub fn service_time(&self) -> f64 {
        self.service_time
    }

    /// The time window.
    pub fn window(&self) -> &TimeWindow {
        &self.window
    }

    /// Earliest service start.
    pub fn ready_time(&self) -> f64 {
        self.window.ready()
    }

    /// Latest service start.
    pub fn due_date(&self) -> f64 {
        self.window.due()
    }

    /// Returns `true` for the depot.
    pub fn is_depot(&self) -> bool {
        self.id == 0
    }

    /// Euclidean distance to another node.
    pub fn distance_to(&self, other: &Node) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}
