//! Cluster-transplant crossover over label strings with an active k.

use crate::chromosome::LabelChromosome;
use crate::cluster::centroids::assign_to_centroids;
use crate::distance::Distance;
use crate::instance::Dataset;
use crate::kernel;
use crate::matrix::RowMatrix;
use rand::Rng;

const UNSET: usize = usize::MAX;

/// Transplants `c` whole clusters from parent A onto a copy of parent B.
///
/// `c ∈ [1, k_A]` distinct cluster labels of A are chosen; every B-cluster
/// touched by a transplanted instance is first dissolved (its genes go to a
/// sentinel), the transplanted instances take A's labels, the surviving
/// labels are renumbered in order of first appearance, centroids are
/// recomputed from the labeled genes and finally every instance is
/// reassigned to its nearest centroid.
///
/// Returns the child plus the recomputed `(centroids, sums, counts)`.
pub fn cga_crossover<D: Distance, R: Rng>(
    parent_a: &LabelChromosome,
    parent_b: &LabelChromosome,
    dataset: &Dataset,
    dist: &D,
    rng: &mut R,
) -> (LabelChromosome, RowMatrix, RowMatrix, Vec<u64>) {
    let n = parent_a.len();
    let k_a = parent_a.num_clusters;
    let mut child_labels = parent_b.labels.clone();

    let c = rng.gen_range(1..=k_a);
    let mut chosen: Vec<usize> = Vec::with_capacity(c);
    while chosen.len() < c {
        let candidate = rng.gen_range(0..k_a);
        if !chosen.contains(&candidate) {
            chosen.push(candidate);
        }
    }

    // clusters of B hit by any transplanted instance dissolve entirely
    let mut affected: Vec<usize> = Vec::new();
    for i in 0..n {
        if chosen.contains(&parent_a.labels[i]) && !affected.contains(&child_labels[i]) {
            affected.push(child_labels[i]);
        }
    }
    for label in child_labels.iter_mut() {
        if affected.contains(label) {
            *label = UNSET;
        }
    }
    for i in 0..n {
        if chosen.contains(&parent_a.labels[i]) {
            child_labels[i] = parent_a.labels[i];
        }
    }

    // renumber surviving labels by first appearance, leaving the sentinel
    let mut mapping: Vec<(usize, usize)> = Vec::new();
    let mut next = 0;
    for label in child_labels.iter_mut() {
        if *label == UNSET {
            continue;
        }
        let mapped = match mapping.iter().find(|(old, _)| *old == *label) {
            Some(&(_, new)) => new,
            None => {
                mapping.push((*label, next));
                next += 1;
                next - 1
            }
        };
        *label = mapped;
    }
    let k = next;

    // centroids from the labeled genes only
    let dim = dataset.dim();
    let mut sums = RowMatrix::zeroed(k, dim);
    let mut counts = vec![0u64; k];
    for (i, &label) in child_labels.iter().enumerate() {
        if label != UNSET {
            kernel::axpy(sums.row_mut(label), 1.0, dataset.features(i));
            counts[label] += 1;
        }
    }
    let mut centroids = RowMatrix::zeroed(k, dim);
    for j in 0..k {
        centroids.copy_row_from(j, sums.row(j));
        if counts[j] > 0 {
            kernel::scal_inv(centroids.row_mut(j), counts[j] as f64);
        }
    }

    // the sentinel genes (and everything else) follow the nearest centroid
    let assigned = assign_to_centroids(&centroids, dataset, dist);
    let child = LabelChromosome::new(assigned, k);
    (child, centroids, sums, counts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chromosome::Chromosome;
    use crate::distance::Euclidean;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    #[test]
    fn child_is_a_valid_labeling() {
        let dataset = Dataset::from_rows(&[
            vec![0.0],
            vec![1.0],
            vec![5.0],
            vec![6.0],
            vec![10.0],
            vec![11.0],
        ])
        .unwrap();
        let parent_a = LabelChromosome::new(vec![0, 0, 1, 1, 2, 2], 3);
        let parent_b = LabelChromosome::new(vec![0, 1, 0, 1, 0, 1], 2);
        let mut rng = SmallRng::seed_from_u64(17);
        for _ in 0..30 {
            let (child, centroids, _, counts) =
                cga_crossover(&parent_a, &parent_b, &dataset, &Euclidean, &mut rng);
            let k = child.num_clusters();
            assert!(k >= 1 && k <= 5);
            assert_eq!(centroids.num_rows(), k);
            assert_eq!(counts.len(), k);
            assert!(child.labels.iter().all(|&l| l < k));
        }
    }
}
