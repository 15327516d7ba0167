//! Giant tour chromosome.
//!
//! A giant tour encodes a solution as a single permutation of all customer
//! ids; route boundaries are not stored and are re-derived by
//! [`split_into_routes`](super::split_into_routes) on every decode.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::models::{Instance, Solution};

use super::split::split_into_routes;

/// A permutation of customer ids.
///
/// # Examples
///
/// ```
/// use u_hybrid_vrptw::ga::GiantTour;
///
/// let tour = GiantTour::new(vec![3, 1, 2]);
/// assert_eq!(tour.customers(), &[3, 1, 2]);
/// assert_eq!(tour.len(), 3);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GiantTour {
    customers: Vec<usize>,
}

impl GiantTour {
    /// Wraps a customer permutation.
    pub fn new(customers: Vec<usize>) -> Self {
        Self { customers }
    }

    /// Flattens a solution's routes, dropping depot stops.
    pub fn from_solution(solution: &Solution) -> Self {
        Self::new(solution.customer_sequence())
    }

    /// A uniformly random permutation of the instance's customers.
    pub fn random<R: Rng>(instance: &Instance, rng: &mut R) -> Self {
        let mut customers = instance.customer_ids();
        customers.shuffle(rng);
        Self::new(customers)
    }

    /// Returns the customer permutation.
    pub fn customers(&self) -> &[usize] {
        &self.customers
    }

    /// Returns a mutable reference to the customer permutation.
    pub fn customers_mut(&mut self) -> &mut Vec<usize> {
        &mut self.customers
    }

    /// Number of customers in this tour.
    pub fn len(&self) -> usize {
        self.customers.len()
    }

    /// Returns true if the tour has no customers.
    pub fn is_empty(&self) -> bool {
        self.customers.is_empty()
    }

    /// Splits the tour into routes and evaluates them.
    pub fn decode(&self, instance: &Instance) -> Solution {
        split_into_routes(&self.customers, instance)
    }
}
