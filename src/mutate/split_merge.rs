//! Cluster split and merge mutations over label encodings.

use crate::chromosome::{Chromosome, LabelChromosome};
use crate::select::CumulativeDistribution;
use rand::Rng;

/// Picks a cluster weighted by size; when it has at least two members,
/// alternate members move to a fresh cluster and `k` grows by one.
pub fn splitting_mutation<R: Rng>(chromosome: &mut LabelChromosome, rng: &mut R) {
    let k = chromosome.num_clusters;
    let sizes: Vec<f64> = {
        let mut sizes = vec![0.0; k];
        for &label in &chromosome.labels {
            sizes[label] += 1.0;
        }
        sizes
    };
    let chosen = CumulativeDistribution::from_weights(&sizes).sample(rng);
    if sizes[chosen] < 2.0 {
        return;
    }
    let mut move_this_one = false;
    for label in chromosome.labels.iter_mut() {
        if *label == chosen {
            if move_this_one {
                *label = k;
            }
            move_this_one = !move_this_one;
        }
    }
    chromosome.num_clusters = k + 1;
    chromosome.reset_evaluation();
}

/// Picks two distinct clusters weighted by inverse size and merges the
/// higher-indexed into the lower; labels above the removed index contract.
/// Requires `k ≥ 3` to leave a valid clustering.
pub fn merge_mutation<R: Rng>(chromosome: &mut LabelChromosome, rng: &mut R) {
    let k = chromosome.num_clusters;
    if k <= 2 {
        return;
    }
    let mut sizes = vec![0.0; k];
    for &label in &chromosome.labels {
        sizes[label] += 1.0;
    }
    let weights: Vec<f64> = sizes
        .iter()
        .map(|&s| if s > 0.0 { 1.0 / s } else { 0.0 })
        .collect();
    let distribution = CumulativeDistribution::from_weights(&weights);
    let first = distribution.sample(rng);
    let mut second = distribution.sample(rng);
    while second == first {
        second = distribution.sample(rng);
    }
    let (lo, hi) = if first < second {
        (first, second)
    } else {
        (second, first)
    };

    for label in chromosome.labels.iter_mut() {
        if *label == hi {
            *label = lo;
        } else if *label > hi {
            *label -= 1;
        }
    }
    chromosome.num_clusters = k - 1;
    chromosome.reset_evaluation();
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    #[test]
    fn splitting_grows_k_and_keeps_both_halves() {
        let mut chromosome = LabelChromosome::new(vec![0, 0, 0, 0, 1, 1], 2);
        let mut rng = SmallRng::seed_from_u64(19);
        splitting_mutation(&mut chromosome, &mut rng);
        assert_eq!(chromosome.num_clusters, 3);
        let sizes = {
            let mut sizes = vec![0usize; 3];
            for &label in &chromosome.labels {
                sizes[label] += 1;
            }
            sizes
        };
        assert!(sizes.iter().all(|&s| s > 0));
    }

    #[test]
    fn merging_contracts_labels() {
        let mut chromosome = LabelChromosome::new(vec![0, 1, 2, 0, 1, 2], 3);
        let mut rng = SmallRng::seed_from_u64(23);
        merge_mutation(&mut chromosome, &mut rng);
        assert_eq!(chromosome.num_clusters, 2);
        assert!(chromosome.labels.iter().all(|&l| l < 2));
    }

    #[test]
    fn merging_is_disabled_at_k2() {
        let mut chromosome = LabelChromosome::new(vec![0, 1, 0, 1], 2);
        let before = chromosome.labels.clone();
        let mut rng = SmallRng::seed_from_u64(23);
        merge_mutation(&mut chromosome, &mut rng);
        assert_eq!(chromosome.labels, before);
    }
}
