//! Distance matrix between instance nodes.

mod matrix;

pub use matrix::DistanceMatrix;
