//! Greedy split of a flattened customer sequence into routes.
//!
//! # Algorithm
//!
//! Walks the sequence once, simulating time and load of the open route.
//! Before appending a customer it checks that the load still fits and that
//! service could start by the customer's due date; if either check fails the
//! open route is closed and the customer starts a new one from the depot.
//!
//! Unlike the Prins DP split this is not optimal, but it is deterministic,
//! O(n), and never reorders customers, so the GA's permutation operators
//! keep full control of visiting order.

use crate::models::{Instance, Solution};

/// Partitions `sequence` into consecutive customer runs, one per route.
///
/// A customer that is infeasible even as the first stop of a fresh route
/// still opens one; the decoded [`Solution`] then reports infeasibility.
/// Empty runs are never produced.
pub fn split_sequences(sequence: &[usize], instance: &Instance) -> Vec<Vec<usize>> {
    let capacity = instance.vehicle_capacity();
    let mut routes = Vec::new();
    let mut open: Vec<usize> = Vec::new();
    let mut load = 0.0;
    let mut time = 0.0;
    let mut last = 0;

    for &cid in sequence {
        let node = instance.node(cid);
        let arrival = time + instance.distance(last, cid);
        let start = arrival + node.window().waiting_time(arrival);

        if open.is_empty() || (load + node.demand() <= capacity && start <= node.due_date()) {
            open.push(cid);
            load += node.demand();
            time = start + node.service_time();
        } else {
            routes.push(std::mem::take(&mut open));
            let arrival = instance.distance(0, cid);
            let start = arrival + node.window().waiting_time(arrival);
            open.push(cid);
            load = node.demand();
            time = start + node.service_time();
        }
        last = cid;
    }

    if !open.is_empty() {
        routes.push(open);
    }
    routes
}

/// Decodes a flattened customer sequence into a [`Solution`].
///
/// # Examples
///
/// ```
/// use u_hybrid_vrptw::models::{Instance, Node};
/// use u_hybrid_vrptw::ga::split_into_routes;
///
/// let nodes = vec![
///     Node::depot(0.0, 0.0, 1000.0),
///     Node::new(1, 1.0, 0.0, 15.0, 0.0),
///     Node::new(2, 2.0, 0.0, 15.0, 0.0),
///     Node::new(3, 3.0, 0.0, 15.0, 0.0),
/// ];
/// let instance = Instance::new(nodes, 30.0).unwrap();
///
/// let sol = split_into_routes(&[1, 2, 3], &instance);
/// assert_eq!(sol.num_routes(), 2); // 15 + 15 fills the first vehicle
/// assert_eq!(sol.customer_sequence(), vec![1, 2, 3]);
/// assert!(sol.is_feasible());
/// ```
pub fn split_into_routes(sequence: &[usize], instance: &Instance) -> Solution {
    Solution::from_sequences(&split_sequences(sequence, instance), instance)
}
