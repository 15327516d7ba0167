//! Shared instances for unit tests.

use crate::models::{Instance, Node};

fn record(id: usize, x: f64, y: f64, demand: f64, ready: f64, due: f64, service: f64) -> Node {
    Node::from_record(id, x, y, demand, ready, due, service).expect("valid node")
}

/// Depot in the middle, one customer per corner; two fit per vehicle.
pub fn corner_instance() -> Instance {
    let nodes = vec![
        Node::depot(50.0, 50.0, 1000.0),
        record(1, 10.0, 10.0, 10.0, 0.0, 1000.0, 0.0),
        record(2, 90.0, 10.0, 10.0, 0.0, 1000.0, 0.0),
        record(3, 10.0, 90.0, 10.0, 0.0, 1000.0, 0.0),
        record(4, 90.0, 90.0, 10.0, 0.0, 1000.0, 0.0),
    ];
    Instance::new(nodes, 25.0).expect("valid instance")
}

/// Customer 2 lies 50 away but closes at 20, so no route can serve it.
pub fn unreachable_instance() -> Instance {
    let nodes = vec![
        Node::depot(0.0, 0.0, 1000.0),
        record(1, 10.0, 0.0, 1.0, 0.0, 1000.0, 0.0),
        record(2, 50.0, 0.0, 1.0, 0.0, 20.0, 0.0),
    ];
    Instance::new(nodes, 100.0).expect("valid instance")
}

/// Three customers on the x axis; `[1, 2, 3]` costs 6, `[3, 1, 2]` costs 8.
pub fn line_instance() -> Instance {
    let nodes = vec![
        Node::depot(0.0, 0.0, 1000.0),
        Node::new(1, 1.0, 0.0, 10.0, 0.0),
        Node::new(2, 2.0, 0.0, 10.0, 0.0),
        Node::new(3, 3.0, 0.0, 10.0, 0.0),
    ];
    Instance::new(nodes, 30.0).expect("valid instance")
}

/// Twelve scattered customers with staggered windows; every customer is
/// reachable on its own and at most a handful fit per vehicle.
pub fn clustered_instance() -> Instance {
    let mut nodes = vec![Node::depot(50.0, 50.0, 400.0)];
    for i in 1..=12usize {
        let ready = ((i * 13) % 50) as f64;
        nodes.push(record(
            i,
            ((i * 37) % 100) as f64,
            ((i * 61) % 100) as f64,
            1.0 + ((i % 5) * 2) as f64,
            ready,
            ready + 150.0,
            2.0,
        ));
    }
    Instance::new(nodes, 20.0).expect("valid instance")
}
