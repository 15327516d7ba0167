//! Selection, crossover, and mutation operators over customer permutations.

use rand::seq::index;
use rand::Rng;

use crate::models::Solution;

/// Number of contenders drawn per tournament.
pub const TOURNAMENT_SIZE: usize = 3;

/// Tournament selection: draws `min(k, len)` distinct individuals uniformly
/// and returns the one with the lowest fitness.
///
/// # Panics
///
/// Panics if `population` is empty.
pub fn tournament_select<'p, R: Rng>(
    population: &'p [Solution],
    k: usize,
    rng: &mut R,
) -> &'p Solution {
    let amount = k.clamp(1, population.len());
    index::sample(rng, population.len(), amount)
        .iter()
        .map(|i| &population[i])
        .min_by(|a, b| a.fitness().total_cmp(&b.fitness()))
        .unwrap_or(&population[0])
}

/// Order crossover (OX) with random cut points.
///
/// Draws two distinct positions, sorts them into `start < end`, and
/// delegates to [`order_crossover_with_cuts`]. Sequences shorter than two
/// (or parents of different lengths) yield a copy of `parent1`.
///
/// # Examples
///
/// ```
/// use u_hybrid_vrptw::ga::order_crossover;
/// use u_hybrid_vrptw::random::create_rng;
///
/// let mut rng = create_rng(42);
/// let mut child = order_crossover(&[1, 2, 3, 4, 5, 6], &[6, 5, 4, 3, 2, 1], &mut rng);
/// child.sort_unstable();
/// assert_eq!(child, vec![1, 2, 3, 4, 5, 6]);
/// ```
pub fn order_crossover<R: Rng>(parent1: &[usize], parent2: &[usize], rng: &mut R) -> Vec<usize> {
    let size = parent1.len();
    if size < 2 || parent2.len() != size {
        return parent1.to_vec();
    }
    let cuts = index::sample(rng, size, 2);
    let (a, b) = (cuts.index(0), cuts.index(1));
    order_crossover_with_cuts(parent1, parent2, a.min(b), a.max(b))
}

/// Order crossover (OX) with explicit cut points.
///
/// The child copies `parent1[start..end]` in place, then fills the remaining
/// positions with `parent2`'s genes in `parent2` order, skipping genes
/// already placed. Filling begins at `end` and wraps around to position 0.
///
/// ```
/// use u_hybrid_vrptw::ga::order_crossover_with_cuts;
///
/// let child = order_crossover_with_cuts(&[1, 2, 3, 4, 5, 6], &[6, 5, 4, 3, 2, 1], 2, 4);
/// assert_eq!(child, vec![2, 1, 3, 4, 6, 5]);
/// ```
///
/// # Panics
///
/// Panics if `start > end` or `end > parent1.len()`.
pub fn order_crossover_with_cuts(
    parent1: &[usize],
    parent2: &[usize],
    start: usize,
    end: usize,
) -> Vec<usize> {
    let size = parent1.len();
    let segment = &parent1[start..end];
    let mut child: Vec<Option<usize>> = vec![None; size];
    for (slot, &gene) in child[start..end].iter_mut().zip(segment) {
        *slot = Some(gene);
    }

    let mut pos = end;
    for &gene in parent2 {
        if segment.contains(&gene) {
            continue;
        }
        if pos >= size {
            pos = 0;
        }
        child[pos] = Some(gene);
        pos += 1;
    }

    child
        .into_iter()
        .zip(parent1)
        .map(|(gene, &fallback)| gene.unwrap_or(fallback))
        .collect()
}

/// Swaps two distinct, uniformly chosen positions. No-op below two genes.
pub fn swap_mutation<R: Rng>(genes: &mut [usize], rng: &mut R) {
    if genes.len() < 2 {
        return;
    }
    let picks = index::sample(rng, genes.len(), 2);
    genes.swap(picks.index(0), picks.index(1));
}
