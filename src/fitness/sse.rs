//! Within-cluster sum of distances to the centroid (J1 when the distance is
//! squared Euclidean). Minimization objective.

use super::Evaluation;
use crate::distance::Distance;
use crate::instance::Dataset;
use crate::matrix::RowMatrix;

/// Accumulates per-cluster sums of `d(x_i, c_assigned)`.
///
/// The objective is the total over clusters. A sum that leaves the finite
/// range comes back as the maximum real, so selection culls the chromosome
/// instead of propagating a non-finite score.
pub fn sse<D: Distance>(
    labels: &[usize],
    centroids: &RowMatrix,
    dataset: &Dataset,
    dist: &D,
) -> Evaluation {
    let mut partials = vec![0.0; centroids.num_rows()];
    for (i, &label) in labels.iter().enumerate() {
        partials[label] += dist.distance(dataset.features(i), centroids.row(label));
    }
    let mut objective: f64 = partials.iter().sum();
    if !objective.is_finite() {
        objective = f64::MAX;
    }
    Evaluation {
        objective,
        partials,
    }
}
