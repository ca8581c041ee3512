//! Nearest-representative scans.

use crate::distance::{Distance, DissimilarityMatrix};
use crate::instance::Dataset;
use crate::matrix::{NullableRowMatrix, RowMatrix};

/// Nearest centroid to `x` by linear scan; ties resolve to the lower index.
pub fn nearest_centroid<D: Distance>(x: &[f64], centroids: &RowMatrix, dist: &D) -> (usize, f64) {
    let mut best = 0;
    let mut best_dist = dist.distance(x, centroids.row(0));
    for (k, c) in centroids.rows().enumerate().skip(1) {
        let d = dist.distance(x, c);
        if d < best_dist {
            best = k;
            best_dist = d;
        }
    }
    (best, best_dist)
}

/// Nearest live centroid to `x`, or `None` when every row is dead.
pub fn nearest_live_centroid<D: Distance>(
    x: &[f64],
    centroids: &NullableRowMatrix,
    dist: &D,
) -> Option<(usize, f64)> {
    let mut best: Option<(usize, f64)> = None;
    for (k, c) in centroids.live_rows() {
        let d = dist.distance(x, c);
        match best {
            Some((_, bd)) if d >= bd => {}
            _ => best = Some((k, d)),
        }
    }
    best
}

/// Among the live centroids, the one nearest to centroid `s` (excluding `s`
/// itself). Used when a cluster is eliminated and its mass reassigned.
pub fn nearest_other_centroid<D: Distance>(
    s: usize,
    centroids: &NullableRowMatrix,
    dist: &D,
) -> Option<usize> {
    let cs = centroids.row(s);
    let mut best: Option<(usize, f64)> = None;
    for (k, c) in centroids.live_rows() {
        if k == s {
            continue;
        }
        let d = dist.distance(cs, c);
        match best {
            Some((_, bd)) if d >= bd => {}
            _ => best = Some((k, d)),
        }
    }
    best.map(|(k, _)| k)
}

/// Nearest medoid to instance `i`, through the precomputed dissimilarity
/// matrix. Returns the position within `medoids` and the distance.
pub fn nearest_medoid(
    i: usize,
    medoids: &[usize],
    dissimilarity: &DissimilarityMatrix,
) -> (usize, f64) {
    let mut best = 0;
    let mut best_dist = dissimilarity.get(i, medoids[0]);
    for (k, &m) in medoids.iter().enumerate().skip(1) {
        let d = dissimilarity.get(i, m);
        if d < best_dist {
            best = k;
            best_dist = d;
        }
    }
    (best, best_dist)
}

/// The member of cluster `cluster` farthest from instance `s1`.
pub fn farthest_member_from<D: Distance>(
    s1: usize,
    labels: &[usize],
    cluster: usize,
    dataset: &Dataset,
    dist: &D,
) -> usize {
    let x1 = dataset.features(s1);
    let mut best = s1;
    let mut best_dist = -1.0;
    for (i, &label) in labels.iter().enumerate() {
        if label != cluster {
            continue;
        }
        let d = dist.distance(x1, dataset.features(i));
        if d > best_dist {
            best = i;
            best_dist = d;
        }
    }
    best
}
