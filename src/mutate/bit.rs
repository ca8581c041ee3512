//! Bit mutation of crisp partition matrices.

use crate::chromosome::{Chromosome, CrispChromosome};
use rand::Rng;

/// Per column, with probability `pm`, moves the single set bit to a
/// uniformly chosen other row. Columns stay crisp; a row emptied this way is
/// a degenerate cluster the evaluation step absorbs.
pub fn bit_mutation<R: Rng>(chromosome: &mut CrispChromosome, pm: f64, rng: &mut R) {
    let k = chromosome.num_clusters();
    if k < 2 {
        return;
    }
    for c in 0..chromosome.num_instances() {
        if rng.gen::<f64>() < pm {
            let current = chromosome
                .matrix
                .column_one(c)
                .expect("crisp column carries exactly one set bit");
            let mut target = rng.gen_range(0..k - 1);
            if target >= current {
                target += 1;
            }
            chromosome.matrix.assign_column(c, target);
        }
    }
    chromosome.reset_evaluation();
}
