//! Rearranges a centroid matrix to align row-by-row with a reference.
//!
//! After recombination, equivalent clusterings can encode their centroids in
//! different row orders; aligning children to the generation's best
//! chromosome before crossover keeps row positions comparable.

use crate::distance::Distance;
use crate::matrix::RowMatrix;
use fixedbitset::FixedBitSet;

/// Iteratively swaps the nearest unmatched row of `rearranged` into each
/// position of `reference`, restarting the scan whenever a swap occurs.
/// Returns whether any rearrangement was necessary.
pub fn rearrange_to_reference<D: Distance>(
    rearranged: &mut RowMatrix,
    reference: &RowMatrix,
    dist: &D,
) -> bool {
    debug_assert_eq!(rearranged.num_rows(), reference.num_rows());
    let k = reference.num_rows();
    let mut matched = FixedBitSet::with_capacity(k);
    let mut was_rearranged = false;

    let mut i = 0;
    while i < k {
        if !matched.contains(i) {
            let mut nearest = None;
            for j in 0..k {
                if matched.contains(j) {
                    continue;
                }
                let d = dist.distance(rearranged.row(i), reference.row(j));
                match nearest {
                    Some((_, best)) if d >= best => {}
                    _ => nearest = Some((j, d)),
                }
            }
            if let Some((j, _)) = nearest {
                if i != j {
                    rearranged.swap_rows(i, j);
                    matched.insert(j);
                    was_rearranged = true;
                    i = 0;
                }
            }
        }
        i += 1;
    }
    was_rearranged
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::distance::Euclidean;

    #[test]
    fn reversed_rows_align_to_reference() {
        let reference =
            RowMatrix::from_vec(2, vec![0.0, 0.0, 5.0, 5.0, 10.0, 10.0]);
        let mut candidate =
            RowMatrix::from_vec(2, vec![10.0, 10.0, 5.0, 5.0, 0.0, 0.0]);
        assert!(rearrange_to_reference(&mut candidate, &reference, &Euclidean));
        assert_eq!(candidate, reference);
    }

    #[test]
    fn rearrangement_is_idempotent() {
        let reference =
            RowMatrix::from_vec(2, vec![0.0, 0.0, 5.0, 5.0, 10.0, 10.0]);
        let mut candidate =
            RowMatrix::from_vec(2, vec![10.0, 10.0, 0.0, 0.0, 5.0, 5.0]);
        rearrange_to_reference(&mut candidate, &reference, &Euclidean);
        let aligned = candidate.clone();
        assert!(!rearrange_to_reference(&mut candidate, &reference, &Euclidean));
        assert_eq!(candidate, aligned);
    }
}
