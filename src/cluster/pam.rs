//! PAM-style medoid cost and swap improvement.

use crate::distance::DissimilarityMatrix;
use crate::cluster::nearest::nearest_medoid;

/// Total configuration cost: every instance contributes its dissimilarity to
/// the nearest medoid.
pub fn total_medoid_cost(medoids: &[usize], dissimilarity: &DissimilarityMatrix) -> f64 {
    (0..dissimilarity.num_instances())
        .map(|i| nearest_medoid(i, medoids, dissimilarity).1)
        .sum()
}

/// Cost change of replacing the medoid at `position` with non-medoid `h`.
/// Negative means the swap improves the configuration.
pub fn swap_cost(
    medoids: &[usize],
    position: usize,
    h: usize,
    dissimilarity: &DissimilarityMatrix,
) -> f64 {
    let current = total_medoid_cost(medoids, dissimilarity);
    let mut swapped = medoids.to_vec();
    swapped[position] = h;
    total_medoid_cost(&swapped, dissimilarity) - current
}

/// One greedy improvement pass: each medoid slot takes the best improving
/// replacement among the non-medoids. Returns the final total cost.
pub fn pam_improve(medoids: &mut [usize], dissimilarity: &DissimilarityMatrix) -> f64 {
    let n = dissimilarity.num_instances();
    let mut current = total_medoid_cost(medoids, dissimilarity);
    for position in 0..medoids.len() {
        let mut best_h = None;
        let mut best_cost = current;
        for h in 0..n {
            if medoids.contains(&h) {
                continue;
            }
            let old = medoids[position];
            medoids[position] = h;
            let cost = total_medoid_cost(medoids, dissimilarity);
            medoids[position] = old;
            if cost < best_cost {
                best_cost = cost;
                best_h = Some(h);
            }
        }
        if let Some(h) = best_h {
            medoids[position] = h;
            current = best_cost;
        }
    }
    current
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::distance::{DissimilarityMatrix, Euclidean};
    use crate::instance::Dataset;

    fn line_dissimilarity() -> DissimilarityMatrix {
        let dataset = Dataset::from_rows(&[
            vec![0.0],
            vec![1.0],
            vec![2.0],
            vec![10.0],
            vec![11.0],
        ])
        .unwrap();
        DissimilarityMatrix::compute(&dataset, &Euclidean)
    }

    #[test]
    fn swap_toward_cluster_center_improves() {
        let dissimilarity = line_dissimilarity();
        let medoids = vec![0, 3];
        // moving the first medoid to the middle of its cluster lowers cost
        assert!(swap_cost(&medoids, 0, 1, &dissimilarity) < 0.0);
        assert!(swap_cost(&medoids, 0, 4, &dissimilarity) > 0.0);
    }

    #[test]
    fn improvement_pass_finds_cluster_medoids() {
        let dissimilarity = line_dissimilarity();
        let mut medoids = vec![0, 4];
        let cost = pam_improve(&mut medoids, &dissimilarity);
        medoids.sort_unstable();
        assert_eq!(medoids, vec![1, 3]);
        assert_eq!(cost, total_medoid_cost(&medoids, &dissimilarity));
    }
}
