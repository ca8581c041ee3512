//! One-point crossover for variable-length centroid strings, with cuts at
//! centroid boundaries.

use crate::chromosome::CentroidChromosome;
use rand::Rng;

/// Each cluster center is an indivisible gene: the cut positions `c1` and
/// `c2` are chosen at centroid boundaries, `c2` constrained so both children
/// keep at least two and at most `k_max` centroids, and whole centroid rows
/// are spliced.
pub fn one_point_indivisible<R: Rng>(
    parent1: &CentroidChromosome,
    parent2: &CentroidChromosome,
    k_max: usize,
    rng: &mut R,
) -> (CentroidChromosome, CentroidChromosome) {
    let dim = parent1.dim;
    debug_assert_eq!(dim, parent2.dim);
    let k1 = parent1.genes.len() / dim;
    let k2 = parent2.genes.len() / dim;
    debug_assert!(k1 >= 2 && k2 >= 2);
    debug_assert!(k1 <= k_max && k2 <= k_max);

    let c1 = rng.gen_range(0..k1);
    // child1 gets c1 + (k2 − c2) rows, child2 gets c2 + (k1 − c1) rows;
    // both must land in [2, k_max]
    let lower = (c1 + 2).saturating_sub(k1).max((c1 + k2).saturating_sub(k_max));
    let upper = k2.min(c1 + k2 - 2).min((k_max + c1).saturating_sub(k1));
    let c2 = if lower >= upper {
        lower
    } else {
        rng.gen_range(lower..=upper)
    };

    let mut genes1 = Vec::with_capacity((c1 + k2 - c2) * dim);
    genes1.extend_from_slice(&parent1.genes[..c1 * dim]);
    genes1.extend_from_slice(&parent2.genes[c2 * dim..]);

    let mut genes2 = Vec::with_capacity((c2 + k1 - c1) * dim);
    genes2.extend_from_slice(&parent2.genes[..c2 * dim]);
    genes2.extend_from_slice(&parent1.genes[c1 * dim..]);

    (
        CentroidChromosome::new(genes1, dim),
        CentroidChromosome::new(genes2, dim),
    )
}
