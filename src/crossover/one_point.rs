//! One-point crossover for fixed-length strings.

use crate::chromosome::{Chromosome, LabelChromosome};
use rand::Rng;

/// Picks a cut in `[1, L−1]` and swaps the tails of the two gene strings.
/// Returns the cut position.
pub fn one_point_genes<T, R: Rng>(a: &mut [T], b: &mut [T], rng: &mut R) -> usize {
    debug_assert_eq!(a.len(), b.len());
    debug_assert!(a.len() >= 2);
    let cut = rng.gen_range(1..a.len());
    a[cut..].swap_with_slice(&mut b[cut..]);
    cut
}

/// One-point crossover of two label chromosomes in place. The active `k` of
/// each child covers every label it may now carry.
pub fn one_point<R: Rng>(a: &mut LabelChromosome, b: &mut LabelChromosome, rng: &mut R) {
    one_point_genes(&mut a.labels, &mut b.labels, rng);
    let k = a.num_clusters.max(b.num_clusters);
    a.num_clusters = k;
    b.num_clusters = k;
    a.reset_evaluation();
    b.reset_evaluation();
}
