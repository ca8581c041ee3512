//! Random-δ centroid mutation.

use crate::chromosome::{CentroidChromosome, Chromosome};
use rand::Rng;

/// Draws one `sign ∈ {+1, −1}` and one `δ ∈ [0, 1]` for the chromosome and
/// rescales every centroid element: `g·(1 + 2·sign·δ)`, or `±2δ` where the
/// element is zero.
pub fn random_delta_mutation<R: Rng>(chromosome: &mut CentroidChromosome, rng: &mut R) {
    let sign = if rng.gen::<f64>() < 0.5 { 1.0 } else { -1.0 };
    let delta = rng.gen::<f64>();
    let sign2delta = 2.0 * sign * delta;
    for gene in chromosome.genes.iter_mut() {
        *gene = if *gene != 0.0 {
            *gene * (1.0 + sign2delta)
        } else {
            sign2delta
        };
    }
    chromosome.reset_evaluation();
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    #[test]
    fn all_elements_share_the_same_factor() {
        let mut chromosome = CentroidChromosome::new(vec![1.0, 2.0, 4.0, 0.0], 2);
        let mut rng = SmallRng::seed_from_u64(3);
        random_delta_mutation(&mut chromosome, &mut rng);
        let factor = chromosome.genes[0];
        assert!((chromosome.genes[1] - 2.0 * factor).abs() < 1e-12);
        assert!((chromosome.genes[2] - 4.0 * factor).abs() < 1e-12);
        // the zero element becomes the shared 2·sign·δ offset
        assert!((chromosome.genes[3] - (factor - 1.0)).abs() < 1e-12);
    }
}
