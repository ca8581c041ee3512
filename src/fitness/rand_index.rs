//! Pair-counting agreement against known class labels.

use super::Evaluation;
use crate::instance::Dataset;

/// Class-by-cluster confusion matrix: entry `[class][cluster]` counts the
/// instances of that class assigned to that cluster (weighted by instance
/// frequency). Instances without a class label are skipped.
pub fn confusion_matrix(
    labels: &[usize],
    num_clusters: usize,
    num_classes: usize,
    dataset: &Dataset,
) -> Vec<Vec<u64>> {
    let mut matrix = vec![vec![0u64; num_clusters]; num_classes];
    for (i, &cluster) in labels.iter().enumerate() {
        if let Some(class) = dataset.instance(i).class_idx() {
            matrix[class][cluster] += dataset.instance(i).frequency();
        }
    }
    matrix
}

fn pairs(n: u64) -> f64 {
    (n * n.saturating_sub(1)) as f64 / 2.0
}

/// Per-cluster pair agreement from the confusion matrix: the fraction of
/// within-cluster pairs whose members share a class. Clusters with fewer
/// than two labeled members score 0. Maximization objective; the scalar is
/// the mean of the partials.
pub fn partial_rand_index(confusion: &[Vec<u64>]) -> Evaluation {
    let num_clusters = confusion.first().map_or(0, Vec::len);
    let partials = (0..num_clusters)
        .map(|j| {
            let cluster_total: u64 = confusion.iter().map(|row| row[j]).sum();
            let total_pairs = pairs(cluster_total);
            if total_pairs == 0.0 {
                return 0.0;
            }
            let agreeing: f64 = confusion.iter().map(|row| pairs(row[j])).sum();
            agreeing / total_pairs
        })
        .collect();
    Evaluation::from_partial_means(partials)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::instance::Instance;

    fn labeled_dataset() -> Dataset {
        Dataset::new(vec![
            Instance::new(vec![0.0]).with_class_idx(0),
            Instance::new(vec![1.0]).with_class_idx(0),
            Instance::new(vec![10.0]).with_class_idx(1),
            Instance::new(vec![11.0]).with_class_idx(1),
        ])
        .unwrap()
    }

    #[test]
    fn pure_clusters_score_one() {
        let dataset = labeled_dataset();
        let labels = vec![0, 0, 1, 1];
        let confusion = confusion_matrix(&labels, 2, 2, &dataset);
        let evaluation = partial_rand_index(&confusion);
        assert_eq!(evaluation.partials, vec![1.0, 1.0]);
        assert_eq!(evaluation.objective, 1.0);
    }

    #[test]
    fn mixed_cluster_scores_below_one() {
        let dataset = labeled_dataset();
        let labels = vec![0, 1, 1, 1];
        let confusion = confusion_matrix(&labels, 2, 2, &dataset);
        let evaluation = partial_rand_index(&confusion);
        assert_eq!(evaluation.partials[0], 0.0);
        assert!(evaluation.partials[1] < 1.0);
    }
}
