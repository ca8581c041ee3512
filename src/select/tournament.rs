//! Tournament selection.

use crate::chromosome::Chromosome;
use rand::Rng;

/// Draws `order` contestants uniformly with replacement and returns the
/// index of the best by fitness.
pub fn tournament<C: Chromosome, R: Rng>(
    chromosomes: &[C],
    order: usize,
    rng: &mut R,
) -> usize {
    debug_assert!(!chromosomes.is_empty());
    debug_assert!(order >= 1);
    let mut best = rng.gen_range(0..chromosomes.len());
    for _ in 1..order {
        let contender = rng.gen_range(0..chromosomes.len());
        if chromosomes[contender].fitness() > chromosomes[best].fitness() {
            best = contender;
        }
    }
    best
}
