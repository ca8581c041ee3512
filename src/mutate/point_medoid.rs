//! Point mutation on medoid index strings.

use crate::chromosome::{Chromosome, MedoidChromosome};
use rand::Rng;

/// Replaces one uniformly chosen position with a uniformly random dataset
/// index that is not already a medoid of the chromosome.
pub fn point_mutation<R: Rng>(
    chromosome: &mut MedoidChromosome,
    num_instances: usize,
    rng: &mut R,
) {
    debug_assert!(chromosome.medoids.len() < num_instances);
    let mut replacement = rng.gen_range(0..num_instances);
    while chromosome.medoids.contains(&replacement) {
        replacement = rng.gen_range(0..num_instances);
    }
    let position = rng.gen_range(0..chromosome.medoids.len());
    chromosome.medoids[position] = replacement;
    chromosome.reset_evaluation();
}
