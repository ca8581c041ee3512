//! Simplified silhouette: silhouette width with centroid-based distances.
//! Maximization objective in `[-1, 1]`.

use super::Evaluation;
use crate::distance::Distance;
use crate::instance::Dataset;
use crate::matrix::NullableRowMatrix;

/// Per instance `i`: `a_i = d(x_i, c_assigned)`, `b_i` the distance to the
/// nearest other live centroid, `s_i = (b_i − a_i) / max(a_i, b_i)`.
/// Cluster partials are the mean `s_i` over members; the objective is the
/// mean of the partials. Members of singleton clusters contribute `s_i = 0`.
pub fn simplified_silhouette<D: Distance>(
    centroids: &NullableRowMatrix,
    labels: &[usize],
    counts: &[u64],
    dataset: &Dataset,
    dist: &D,
) -> Evaluation {
    let k = centroids.num_rows();
    let mut sums = vec![0.0; k];

    for (i, &assigned) in labels.iter().enumerate() {
        if counts[assigned] <= 1 {
            continue; // singleton: s_i = 0
        }
        let x = dataset.features(i);
        let a = dist.distance(x, centroids.row(assigned));
        let mut b = f64::INFINITY;
        for (j, c) in centroids.live_rows() {
            if j != assigned {
                b = b.min(dist.distance(x, c));
            }
        }
        if b.is_finite() {
            let denom = a.max(b);
            if denom > 0.0 {
                sums[assigned] += (b - a) / denom;
            }
        }
    }

    let partials = (0..k)
        .map(|j| {
            if counts[j] == 0 {
                0.0
            } else {
                sums[j] / counts[j] as f64
            }
        })
        .collect();
    Evaluation::from_partial_means(partials)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cluster::centroids::recompute;
    use crate::distance::Euclidean;

    #[test]
    fn separated_blobs_score_high() {
        let dataset = Dataset::from_rows(&[
            vec![0.0],
            vec![1.0],
            vec![10.0],
            vec![11.0],
        ])
        .unwrap();
        let labels = vec![0, 0, 1, 1];
        let (centroids, _, counts) = recompute(&labels, 2, &dataset);
        let evaluation =
            simplified_silhouette(&centroids, &labels, &counts, &dataset, &Euclidean);
        assert!(evaluation.objective > 0.9);
        assert_eq!(evaluation.partials.len(), 2);
    }

    #[test]
    fn singleton_cluster_contributes_zero() {
        let dataset =
            Dataset::from_rows(&[vec![0.0], vec![1.0], vec![10.0]]).unwrap();
        let labels = vec![0, 0, 1];
        let (centroids, _, counts) = recompute(&labels, 2, &dataset);
        let evaluation =
            simplified_silhouette(&centroids, &labels, &counts, &dataset, &Euclidean);
        assert_eq!(evaluation.partials[1], 0.0);
        assert!(evaluation.objective.is_finite());
    }
}
