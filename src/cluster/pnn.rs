//! Pairwise-nearest-neighbor codebook reduction.

use crate::distance::Distance;
use crate::kernel;
use crate::matrix::RowMatrix;

/// Cost of merging two clusters: the count-weighted distance between their
/// representatives, `n_a·n_b/(n_a+n_b) · d(c_a, c_b)`.
pub fn merge_cost<D: Distance>(ca: &[f64], cb: &[f64], na: u64, nb: u64, dist: &D) -> f64 {
    if na + nb == 0 {
        return 0.0;
    }
    (na as f64 * nb as f64) / (na + nb) as f64 * dist.distance(ca, cb)
}

/// Iteratively merges the minimum-cost pair of codebook entries until
/// `target_k` remain. Counts merge additively; the merged representative is
/// the count-weighted average.
pub fn pnn_reduce<D: Distance>(
    codebook: &mut RowMatrix,
    counts: &mut Vec<u64>,
    target_k: usize,
    dist: &D,
) {
    while codebook.num_rows() > target_k {
        let rows = codebook.num_rows();
        let mut best = (0, 1);
        let mut best_cost = f64::INFINITY;
        for a in 0..rows {
            for b in (a + 1)..rows {
                let cost = merge_cost(codebook.row(a), codebook.row(b), counts[a], counts[b], dist);
                if cost < best_cost {
                    best_cost = cost;
                    best = (a, b);
                }
            }
        }
        let (a, b) = best;
        let (na, nb) = (counts[a], counts[b]);
        let total = na + nb;
        if total > 0 {
            let merged: Vec<f64> = codebook.row(b).to_vec();
            kernel::scal(codebook.row_mut(a), na as f64);
            kernel::axpy(codebook.row_mut(a), nb as f64, &merged);
            kernel::scal_inv(codebook.row_mut(a), total as f64);
        }
        counts[a] = total;
        counts.remove(b);
        let keep: Vec<usize> = (0..rows).filter(|&r| r != b).collect();
        codebook.keep_rows(&keep);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::distance::SquaredEuclidean;
    use approx::assert_relative_eq;

    #[test]
    fn merges_closest_weighted_pair() {
        let mut codebook = RowMatrix::from_vec(1, vec![0.0, 0.1, 10.0]);
        let mut counts = vec![1, 1, 2];
        pnn_reduce(&mut codebook, &mut counts, 2, &SquaredEuclidean);
        assert_eq!(codebook.num_rows(), 2);
        assert_relative_eq!(codebook.row(0)[0], 0.05);
        assert_eq!(counts, vec![2, 2]);
    }

    #[test]
    fn paired_codebooks_average() {
        // two interleaved codebooks on a line reduce to their midpoints
        let mut codebook =
            RowMatrix::from_vec(1, vec![1.0, 2.0, 3.0, 1.1, 2.1, 3.1]);
        let mut counts = vec![1; 6];
        pnn_reduce(&mut codebook, &mut counts, 3, &SquaredEuclidean);
        let mut values: Vec<f64> = codebook.rows().map(|r| r[0]).collect();
        values.sort_by(|a, b| a.total_cmp(b));
        assert_relative_eq!(values[0], 1.05, epsilon = 1e-9);
        assert_relative_eq!(values[1], 2.05, epsilon = 1e-9);
        assert_relative_eq!(values[2], 3.05, epsilon = 1e-9);
    }
}
