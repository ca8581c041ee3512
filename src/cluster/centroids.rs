//! Centroid construction: random initialization, recomputation from a label
//! array, and nearest-centroid label assignment.

use crate::cluster::nearest::{nearest_centroid, nearest_live_centroid};
use crate::distance::Distance;
use crate::error::{Error, Result};
use crate::instance::Dataset;
use crate::kernel;
use crate::matrix::{NullableRowMatrix, RowMatrix};
use rand::Rng;

/// Picks `k` distinct instances uniformly without replacement as initial
/// centroids.
pub fn random_centroids<R: Rng>(k: usize, dataset: &Dataset, rng: &mut R) -> RowMatrix {
    let mut centroids = RowMatrix::zeroed(k, dataset.dim());
    let picks = rand::seq::index::sample(rng, dataset.num_instances(), k);
    for (row, i) in picks.iter().enumerate() {
        centroids.copy_row_from(row, dataset.features(i));
    }
    centroids
}

/// Recomputes centroids from a label array: sum then divide per cluster.
///
/// Returns `(centroids, sums, counts)`. A cluster with no members gets a dead
/// centroid row and a zero count; downstream operators skip or compact it.
pub fn recompute(
    labels: &[usize],
    k: usize,
    dataset: &Dataset,
) -> (NullableRowMatrix, RowMatrix, Vec<u64>) {
    let dim = dataset.dim();
    let mut centroids = NullableRowMatrix::zeroed(k, dim);
    let mut sums = RowMatrix::zeroed(k, dim);
    let mut counts = vec![0u64; k];

    for (i, &label) in labels.iter().enumerate() {
        kernel::axpy(sums.row_mut(label), 1.0, dataset.features(i));
        counts[label] += 1;
    }
    for j in 0..k {
        if counts[j] == 0 {
            centroids.kill_row(j);
        } else {
            centroids.copy_row_from(j, sums.row(j));
            kernel::scal_inv(centroids.row_mut(j), counts[j] as f64);
        }
    }
    (centroids, sums, counts)
}

/// Assigns every instance to its nearest centroid, writing a label array.
pub fn assign_to_centroids<D: Distance>(
    centroids: &RowMatrix,
    dataset: &Dataset,
    dist: &D,
) -> Vec<usize> {
    (0..dataset.num_instances())
        .map(|i| nearest_centroid(dataset.features(i), centroids, dist).0)
        .collect()
}

/// Assigns every instance to its nearest live centroid. Fails with
/// [`Error::DegenerateCluster`] when every row is dead.
pub fn assign_to_live_centroids<D: Distance>(
    centroids: &NullableRowMatrix,
    dataset: &Dataset,
    dist: &D,
) -> Result<Vec<usize>> {
    (0..dataset.num_instances())
        .map(|i| {
            nearest_live_centroid(dataset.features(i), centroids, dist)
                .map(|(k, _)| k)
                .ok_or(Error::DegenerateCluster)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::distance::Euclidean;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    fn dataset() -> Dataset {
        Dataset::from_rows(&[vec![0.0, 0.0], vec![0.0, 2.0], vec![10.0, 10.0]]).unwrap()
    }

    #[test]
    fn random_centroids_are_distinct_instances() {
        let dataset = dataset();
        let mut rng = SmallRng::seed_from_u64(3);
        let centroids = random_centroids(3, &dataset, &mut rng);
        let mut seen: Vec<&[f64]> = centroids.rows().collect();
        seen.sort_by(|a, b| a.partial_cmp(b).unwrap());
        seen.dedup();
        assert_eq!(seen.len(), 3);
    }

    #[test]
    fn recompute_marks_empty_clusters_dead() {
        let dataset = dataset();
        let labels = vec![0, 0, 2];
        let (centroids, _, counts) = recompute(&labels, 3, &dataset);
        assert_eq!(counts, vec![2, 0, 1]);
        assert!(!centroids.is_live(1));
        assert_eq!(centroids.row(0), &[0.0, 1.0]);
    }

    #[test]
    fn assignment_then_recompute_is_stable_on_converged_labels() {
        let dataset = dataset();
        let labels = vec![0, 0, 1];
        let (centroids, _, _) = recompute(&labels, 2, &dataset);
        let reassigned =
            assign_to_live_centroids(&centroids, &dataset, &Euclidean).unwrap();
        assert_eq!(reassigned, labels);
    }
}
