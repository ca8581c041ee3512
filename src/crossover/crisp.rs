//! Column-swap crossover for crisp partition matrices.

use crate::chromosome::{Chromosome, CrispChromosome};
use rand::Rng;

/// Picks two cut columns `c1 < c2` and swaps the column range `[c1, c2)`
/// between the two matrices. Column sums stay exactly one, so both children
/// remain crisp; a row emptied by the swap is a degenerate cluster the
/// evaluation step absorbs.
pub fn crisp_column_crossover<R: Rng>(
    a: &mut CrispChromosome,
    b: &mut CrispChromosome,
    rng: &mut R,
) {
    let n = a.num_instances();
    debug_assert_eq!(n, b.num_instances());
    debug_assert!(n >= 2);
    let c1 = rng.gen_range(1..n);
    let c2 = rng.gen_range(1..n);
    let (from, to) = if c1 <= c2 { (c1, c2) } else { (c2, c1) };
    a.matrix.swap_column_range(&mut b.matrix, from, to);
    a.reset_evaluation();
    b.reset_evaluation();
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    #[test]
    fn columns_stay_crisp() {
        let mut a = CrispChromosome::from_labels(&[0, 0, 1, 1, 0, 1], 2);
        let mut b = CrispChromosome::from_labels(&[1, 1, 0, 0, 1, 0], 2);
        let mut rng = SmallRng::seed_from_u64(6);
        crisp_column_crossover(&mut a, &mut b, &mut rng);
        for c in 0..6 {
            assert!(a.matrix.column_one(c).is_some());
            assert!(b.matrix.column_one(c).is_some());
        }
    }
}
