//! The k-means local search applied to label-plus-centroids chromosomes
//! every generation of the F-EAC family.
//!
//! The loop is incremental: when an instance moves between clusters only the
//! per-cluster sums and counts are touched, and only the affected centroids
//! are recomputed. A cluster whose count drops to zero is eliminated; after
//! the loop the chromosome compacts its dead clusters and is marked
//! non-viable when fewer than two survive.

use crate::chromosome::feac::FeacChromosome;
use crate::cluster::nearest::nearest_live_centroid;
use crate::distance::Distance;
use crate::error::{Error, Result};
use crate::instance::Dataset;
use crate::kernel;
use crate::matrix::RowMatrix;
use fixedbitset::FixedBitSet;

pub fn kmeans_local_search<D: Distance>(
    chromosome: &mut FeacChromosome,
    dataset: &Dataset,
    dist: &D,
    max_iter: usize,
    eps: f64,
) -> Result<()> {
    let k = chromosome.centroids.num_rows();
    let dim = dataset.dim();
    let mut iterations_left = max_iter;
    let mut iterate = iterations_left > 0;

    while iterate {
        iterate = false;

        let mut diff_sums = RowMatrix::zeroed(k, dim);
        let mut diff_counts = vec![0i64; k];
        let mut recompute = FixedBitSet::with_capacity(k);
        let old_centroids = chromosome.centroids.clone();

        for i in 0..dataset.num_instances() {
            let x = dataset.features(i);
            let (nearest, _) = nearest_live_centroid(x, &chromosome.centroids, dist)
                .ok_or(Error::DegenerateCluster)?;
            let assigned = chromosome.labels[i];
            if nearest != assigned {
                kernel::axpy(diff_sums.row_mut(assigned), -1.0, x);
                diff_counts[assigned] -= 1;
                recompute.insert(assigned);

                chromosome.labels[i] = nearest;
                kernel::axpy(diff_sums.row_mut(nearest), 1.0, x);
                diff_counts[nearest] += 1;
                recompute.insert(nearest);
            }
        }

        for j in recompute.ones() {
            let old_count = chromosome.counts[j];
            kernel::scal(chromosome.centroids.row_mut(j), old_count as f64);
            kernel::axpy(chromosome.centroids.row_mut(j), 1.0, diff_sums.row(j));
            let new_count = (old_count as i64 + diff_counts[j]) as u64;
            chromosome.counts[j] = new_count;
            if new_count == 0 {
                chromosome.centroids.kill_row(j);
            } else {
                kernel::scal_inv(chromosome.centroids.row_mut(j), new_count as f64);
            }
        }

        for j in 0..k {
            if chromosome.centroids.is_live(j)
                && old_centroids.is_live(j)
                && dist.distance(chromosome.centroids.row(j), old_centroids.row(j)) > eps
            {
                iterate = true;
            }
        }

        iterations_left -= 1;
        if iterations_left == 0 {
            iterate = false;
        }
    }

    if chromosome.centroids.num_live() < chromosome.centroids.num_rows() {
        chromosome.compact();
    }
    Ok(())
}
