//! Neighborhood moves over route customer sequences.
//!
//! Moves are applied to copies of the current routes; untouched routes keep
//! their relative order and the rebuilt routes are appended after them.
//! A route emptied by a relocate is dropped.

use rand::Rng;
use serde::Serialize;

/// Descriptor of an applied move, stored in the tabu list.
///
/// Relocates carry route indices as they were before the move, so two
/// relocates of the same customer between differently numbered routes are
/// distinct entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Move {
    /// `customer` moved from route `from_route` to route `to_route`.
    Relocate {
        /// Customer that moved.
        customer: usize,
        /// Index of the route it left.
        from_route: usize,
        /// Index of the route it joined.
        to_route: usize,
    },
    /// Customers `a` and `b` exchanged positions.
    Swap {
        /// Customer taken from the first picked route.
        a: usize,
        /// Customer taken from the second picked route.
        b: usize,
    },
}

/// Random relocate: removes a random customer of route `r1` and inserts it
/// at a random position of route `r2` (the two may coincide).
///
/// Returns `None` if either picked route has no customers.
pub fn random_relocate<R: Rng>(routes: &[Vec<usize>], rng: &mut R) -> Option<(Vec<Vec<usize>>, Move)> {
    if routes.is_empty() {
        return None;
    }
    let r1 = rng.random_range(0..routes.len());
    let r2 = rng.random_range(0..routes.len());
    if routes[r1].is_empty() || routes[r2].is_empty() {
        return None;
    }

    let mut source = routes[r1].clone();
    let customer = source.remove(rng.random_range(0..source.len()));

    let mut rebuilt = Vec::with_capacity(2);
    if r1 == r2 {
        let pos = rng.random_range(0..=source.len());
        source.insert(pos, customer);
        rebuilt.push(source);
    } else {
        let mut target = routes[r2].clone();
        let pos = rng.random_range(0..=target.len());
        target.insert(pos, customer);
        if !source.is_empty() {
            rebuilt.push(source);
        }
        rebuilt.push(target);
    }

    let mv = Move::Relocate {
        customer,
        from_route: r1,
        to_route: r2,
    };
    Some((reassemble(routes, &[r1, r2], rebuilt), mv))
}

/// Random swap: exchanges one random customer of route `r1` with one of
/// route `r2` (the two may coincide).
///
/// Returns `None` if either route has no customers.
pub fn random_swap<R: Rng>(routes: &[Vec<usize>], rng: &mut R) -> Option<(Vec<Vec<usize>>, Move)> {
    if routes.is_empty() {
        return None;
    }
    let r1 = rng.random_range(0..routes.len());
    let r2 = rng.random_range(0..routes.len());
    if routes[r1].is_empty() || routes[r2].is_empty() {
        return None;
    }
    let i = rng.random_range(0..routes[r1].len());
    let j = rng.random_range(0..routes[r2].len());
    let (a, b) = (routes[r1][i], routes[r2][j]);

    let rebuilt = if r1 == r2 {
        let mut route = routes[r1].clone();
        route.swap(i, j);
        vec![route]
    } else {
        let mut first = routes[r1].clone();
        let mut second = routes[r2].clone();
        first[i] = b;
        second[j] = a;
        vec![first, second]
    };

    Some((reassemble(routes, &[r1, r2], rebuilt), Move::Swap { a, b }))
}

/// Untouched routes in their original order, followed by `rebuilt`.
fn reassemble(routes: &[Vec<usize>], touched: &[usize], rebuilt: Vec<Vec<usize>>) -> Vec<Vec<usize>> {
    routes
        .iter()
        .enumerate()
        .filter(|(idx, _)| !touched.contains(idx))
        .map(|(_, r)| r.clone())
        .chain(rebuilt)
        .collect()
}
