//! Codebook crossover through pairwise-nearest-neighbor reduction.

use crate::chromosome::CentroidChromosome;
use crate::cluster::centroids::{assign_to_centroids, recompute};
use crate::cluster::pnn::pnn_reduce;
use crate::distance::Distance;
use crate::instance::Dataset;
use crate::matrix::RowMatrix;

/// Concatenates the two parent codebooks to `2k` entries, reassigns every
/// instance to its nearest entry, recomputes the occupied entries as their
/// cluster means, and PNN-merges the cheapest pairs until `target_k` entries
/// remain.
pub fn pnn_crossover<D: Distance>(
    parent1: &CentroidChromosome,
    parent2: &CentroidChromosome,
    dataset: &Dataset,
    target_k: usize,
    dist: &D,
) -> CentroidChromosome {
    let dim = parent1.dim;
    debug_assert_eq!(dim, parent2.dim);

    let mut combined = parent1.genes.clone();
    combined.extend_from_slice(&parent2.genes);
    let mut codebook = RowMatrix::from_vec(dim, combined);

    let labels = assign_to_centroids(&codebook, dataset, dist);
    let (means, _, mut counts) = recompute(&labels, codebook.num_rows(), dataset);
    for (j, row) in means.live_rows() {
        codebook.copy_row_from(j, row);
    }

    pnn_reduce(&mut codebook, &mut counts, target_k, dist);
    CentroidChromosome::from_matrix(&codebook)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chromosome::Chromosome;
    use crate::distance::SquaredEuclidean;

    #[test]
    fn near_duplicate_codebooks_average() {
        let dataset = Dataset::from_rows(&[
            vec![1.0],
            vec![1.1],
            vec![2.0],
            vec![2.1],
            vec![3.0],
            vec![3.1],
        ])
        .unwrap();
        let parent1 = CentroidChromosome::new(vec![1.0, 2.0, 3.0], 1);
        let parent2 = CentroidChromosome::new(vec![1.1, 2.1, 3.1], 1);
        let child = pnn_crossover(&parent1, &parent2, &dataset, 3, &SquaredEuclidean);
        assert_eq!(child.num_clusters(), 3);
        let mut values: Vec<f64> = child.centroids().map(|c| c[0]).collect();
        values.sort_by(|a, b| a.total_cmp(b));
        assert!((values[0] - 1.05).abs() < 0.1);
        assert!((values[1] - 2.05).abs() < 0.1);
        assert!((values[2] - 3.05).abs() < 0.1);
    }
}
