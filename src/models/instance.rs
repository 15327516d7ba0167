//! CVRPTW problem instance.

use crate::distance::DistanceMatrix;
use crate::error::InstanceError;

use super::Node;

/// A validated CVRPTW instance: depot + customers, their distance matrix,
/// and the (homogeneous) vehicle capacity.
///
/// The instance is immutable and shared by reference across every solver
/// stage.
///
/// # Examples
///
/// ```
/// use u_hybrid_vrptw::models::{Instance, Node};
///
/// let nodes = vec![
///     Node::depot(0.0, 0.0, 100.0),
///     Node::new(1, 3.0, 4.0, 10.0, 0.0),
///     Node::new(2, 6.0, 8.0, 20.0, 0.0),
/// ];
/// let instance = Instance::new(nodes, 25.0).unwrap();
/// assert_eq!(instance.num_customers(), 2);
/// assert_eq!(instance.customer_ids(), vec![1, 2]);
/// assert!((instance.distance(0, 2) - 10.0).abs() < 1e-10);
/// ```
#[derive(Debug, Clone)]
pub struct Instance {
    nodes: Vec<Node>,
    distances: DistanceMatrix,
    vehicle_capacity: f64,
}

impl Instance {
    /// Validates the nodes and precomputes the Euclidean distance matrix.
    ///
    /// `nodes[i]` must have id `i`; node 0 is the depot.
    pub fn new(nodes: Vec<Node>, vehicle_capacity: f64) -> Result<Self, InstanceError> {
        if nodes.is_empty() {
            return Err(InstanceError::Empty);
        }
        if !vehicle_capacity.is_finite() || vehicle_capacity <= 0.0 {
            return Err(InstanceError::Capacity(vehicle_capacity));
        }
        for (position, node) in nodes.iter().enumerate() {
            if node.id() != position {
                return Err(InstanceError::NonContiguousId {
                    position,
                    id: node.id(),
                });
            }
            let finite = [
                node.x(),
                node.y(),
                node.demand(),
                node.service_time(),
                node.ready_time(),
            ]
            .iter()
            .all(|v| v.is_finite());
            if !finite {
                return Err(InstanceError::NonFinite(node.id()));
            }
            if node.demand() < 0.0 || node.service_time() < 0.0 {
                return Err(InstanceError::Negative(node.id()));
            }
        }
        if nodes[0].demand() != 0.0 {
            return Err(InstanceError::DepotDemand(nodes[0].demand()));
        }

        let distances = DistanceMatrix::from_nodes(&nodes);
        Ok(Self {
            nodes,
            distances,
            vehicle_capacity,
        })
    }

    /// All nodes, indexed by id.
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// The node with the given id.
    ///
    /// # Panics
    ///
    /// Panics if `id` is out of range.
    pub fn node(&self, id: usize) -> &Node {
        &self.nodes[id]
    }

    /// The depot (node 0).
    pub fn depot(&self) -> &Node {
        &self.nodes[0]
    }

    /// Customer nodes (everything but the depot).
    pub fn customers(&self) -> &[Node] {
        &self.nodes[1..]
    }

    /// Customer ids in ascending order.
    pub fn customer_ids(&self) -> Vec<usize> {
        (1..self.nodes.len()).collect()
    }

    /// Number of customers (excluding the depot).
    pub fn num_customers(&self) -> usize {
        self.nodes.len() - 1
    }

    /// Number of nodes (including the depot).
    pub fn num_nodes(&self) -> usize {
        self.nodes.len()
    }

    /// Travel distance (and time) between two nodes.
    pub fn distance(&self, from: usize, to: usize) -> f64 {
        self.distances.get(from, to)
    }

    /// The precomputed distance matrix.
    pub fn distances(&self) -> &DistanceMatrix {
        &self.distances
    }

    /// Capacity of every vehicle.
    pub fn vehicle_capacity(&self) -> f64 {
        self.vehicle_capacity
    }

    /// Planning horizon (the depot's due date).
    pub fn horizon(&self) -> f64 {
        self.depot().due_date()
    }

    /// Sum of all customer demands.
    pub fn total_demand(&self) -> f64 {
        self.customers().iter().map(Node::demand).sum()
    }
}
