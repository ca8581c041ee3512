//! Merge crossover over label encodings (the grouping GA recombination).

use crate::chromosome::label::compact_labels;
use crate::chromosome::LabelChromosome;
use rand::Rng;

const UNSET: usize = usize::MAX;

fn random_ordered_pair<R: Rng>(k: usize, rng: &mut R) -> (usize, usize) {
    if k <= 1 {
        return (0, 0);
    }
    let first = rng.gen_range(0..k);
    let mut second = rng.gen_range(0..k);
    while second == first {
        second = rng.gen_range(0..k);
    }
    if second < first {
        (second, first)
    } else {
        (first, second)
    }
}

/// Copies a contiguous cluster-index range from each parent into one child:
/// instances of parent 1's range keep their (shifted) labels, instances of
/// parent 2's range fill the still-unset positions, and every remaining
/// position gets a uniformly random cluster. Unused labels are compacted
/// away.
pub fn merge_crossover<R: Rng>(
    parent1: &LabelChromosome,
    parent2: &LabelChromosome,
    rng: &mut R,
) -> LabelChromosome {
    let n = parent1.len();
    debug_assert_eq!(n, parent2.len());

    let (a1, b1) = random_ordered_pair(parent1.num_clusters, rng);
    let (a2, b2) = random_ordered_pair(parent2.num_clusters, rng);
    let k_offspring = (b1 - a1) + (b2 - a2) + 2;

    let mut labels = vec![UNSET; n];
    for (child, &gene) in labels.iter_mut().zip(&parent1.labels) {
        if (a1..=b1).contains(&gene) {
            *child = gene - a1;
        }
    }
    let base2 = b1 - a1 + 1;
    for (child, &gene) in labels.iter_mut().zip(&parent2.labels) {
        if *child == UNSET && (a2..=b2).contains(&gene) {
            *child = gene - a2 + base2;
        }
    }
    for child in labels.iter_mut() {
        if *child == UNSET {
            *child = rng.gen_range(0..k_offspring);
        }
    }

    let k = compact_labels(&mut labels);
    LabelChromosome::new(labels, k)
}
