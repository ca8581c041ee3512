mod support;

#[cfg(test)]
mod partition_tests {
    use crate::support::*;
    use genetic_clustering::cluster::centroids::{assign_to_live_centroids, recompute};
    use genetic_clustering::distance::Euclidean;
    use genetic_clustering::partition::{
        labels_to_crisp, labels_to_disjoint_sets, CentroidPartition, CrispPartition,
        DisjointSetsPartition, LabelPartition, Partition,
    };

    #[test]
    fn labels_survive_every_view() {
        let labels = vec![0, 0, 0, 1, 1, 1, 0, 1, 0, 1];
        let k = 2;

        let crisp = labels_to_crisp(&labels, k);
        assert_eq!(CrispPartition::new(&crisp).to_labels(), labels);

        let sets = labels_to_disjoint_sets(&labels, k);
        assert_eq!(DisjointSetsPartition::new(&sets).to_labels(), labels);

        let view = LabelPartition::new(&labels, k);
        assert_eq!(view.to_labels(), labels);
        assert_eq!(view.num_clusters(), k);
    }

    #[test]
    fn centroid_view_reproduces_converged_labels() {
        let dataset = two_blob_squares();
        let labels = vec![0, 0, 0, 0, 0, 1, 1, 1, 1, 1];
        let (centroids, _, _) = recompute(&labels, 2, &dataset);
        let view =
            CentroidPartition::assign(centroids.as_row_matrix(), &dataset, &Euclidean);
        assert_eq!(view.to_labels(), labels);
    }

    #[test]
    fn recompute_then_assign_is_idempotent_on_converged_labels() {
        let dataset = two_blob_squares();
        let labels = vec![0, 0, 0, 0, 0, 1, 1, 1, 1, 1];
        let (centroids, _, _) = recompute(&labels, 2, &dataset);
        let reassigned = assign_to_live_centroids(&centroids, &dataset, &Euclidean).unwrap();
        assert_eq!(reassigned, labels);

        let (centroids_again, _, counts) = recompute(&reassigned, 2, &dataset);
        assert_eq!(centroids.as_row_matrix(), centroids_again.as_row_matrix());
        assert_eq!(counts, vec![5, 5]);
    }

    #[test]
    fn views_agree_on_members_and_sizes() {
        let labels = vec![0, 1, 2, 1, 0, 2, 2];
        let crisp = labels_to_crisp(&labels, 3);
        let crisp_view = CrispPartition::new(&crisp);
        let label_view = LabelPartition::new(&labels, 3);
        for cluster in 0..3 {
            assert_eq!(crisp_view.members(cluster), label_view.members(cluster));
        }
        assert_eq!(crisp_view.cluster_sizes(), label_view.cluster_sizes());
    }
}
