//! Seedable random number generation.
//!
//! Every stochastic operation in the crate takes an explicit `&mut R: Rng`.
//! All draws of one solve come from a single stream, so a fixed seed
//! reproduces a run exactly.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// The generator used by [`HybridSolver`](crate::hybrid::HybridSolver).
pub type SolverRng = ChaCha8Rng;

/// Creates a deterministic generator from a seed.
///
/// # Examples
///
/// ```
/// use rand::Rng;
/// use u_hybrid_vrptw::random::create_rng;
///
/// let a: u64 = create_rng(7).random();
/// let b: u64 = create_rng(7).random();
/// assert_eq!(a, b);
/// ```
pub fn create_rng(seed: u64) -> SolverRng {
    ChaCha8Rng::seed_from_u64(seed)
}

/// Creates a generator from `seed`, or from fresh entropy when `None`.
pub fn rng_from_seed(seed: Option<u64>) -> SolverRng {
    create_rng(seed.unwrap_or_else(|| rand::rng().random()))
}

/// Samples an index with probability proportional to `weights`.
///
/// Falls back to a uniform choice when the weights sum to zero (or are not
/// finite). Returns `None` for an empty slice.
pub fn roulette<R: Rng>(weights: &[f64], rng: &mut R) -> Option<usize> {
    if weights.is_empty() {
        return None;
    }
    let total: f64 = weights.iter().sum();
    if total <= 0.0 || !total.is_finite() {
        return Some(rng.random_range(0..weights.len()));
    }

    // pick lies in [0, total); a bucket owns [start, start + w)
    let mut pick = rng.random::<f64>() * total;
    for (i, &w) in weights.iter().enumerate() {
        if pick < w {
            return Some(i);
        }
        pick -= w;
    }
    // Rounding left a sliver past the last bucket.
    weights.iter().rposition(|&w| w > 0.0)
}
