mod support;

#[cfg(test)]
mod operator_tests {
    use crate::support::*;
    use genetic_clustering::chromosome::feac::FeacChromosome;
    use genetic_clustering::chromosome::{Chromosome, LabelChromosome, MedoidChromosome};
    use genetic_clustering::crossover::{dmx_crossover, merge_crossover};
    use genetic_clustering::distance::Euclidean;
    use genetic_clustering::fitness::{simplified_silhouette, Evaluation};
    use genetic_clustering::instance::Dataset;
    use genetic_clustering::mutate::{
        merge_mutation, mo1, mo2, splitting_mutation, ClusterWeighting,
    };
    use rand::rngs::SmallRng;
    use rand::{Rng, SeedableRng};

    fn assert_valid_labeling(chromosome: &LabelChromosome) {
        let k = chromosome.num_clusters;
        let mut sizes = vec![0usize; k];
        for &label in &chromosome.labels {
            assert!(label < k, "label {label} outside 0..{k}");
            sizes[label] += 1;
        }
        assert!(sizes.iter().all(|&s| s > 0), "empty cluster in {sizes:?}");
    }

    fn silhouette_evaluator() -> impl Fn(&FeacChromosome, &Dataset) -> Evaluation {
        |chromosome: &FeacChromosome, dataset: &Dataset| {
            simplified_silhouette(
                &chromosome.centroids,
                &chromosome.labels,
                &chromosome.counts,
                dataset,
                &Euclidean,
            )
        }
    }

    #[test]
    fn merge_crossover_children_stay_valid_under_many_seeds() {
        let parent1 = LabelChromosome::new(vec![0, 0, 1, 1, 2, 2, 3, 3, 4, 4], 5);
        let parent2 = LabelChromosome::new(vec![4, 3, 2, 1, 0, 4, 3, 2, 1, 0], 5);
        for seed in 0..100 {
            let mut rng = SmallRng::seed_from_u64(seed);
            let child = merge_crossover(&parent1, &parent2, &mut rng);
            assert_eq!(child.len(), 10);
            assert_valid_labeling(&child);
            assert_eq!(child.fitness(), f64::NEG_INFINITY);
        }
    }

    #[test]
    fn split_then_merge_restores_k() {
        for seed in 0..50 {
            let mut rng = SmallRng::seed_from_u64(seed);
            let mut chromosome =
                LabelChromosome::new(vec![0, 0, 0, 1, 1, 1, 2, 2, 2], 3);
            splitting_mutation(&mut chromosome, &mut rng);
            if chromosome.num_clusters == 4 {
                merge_mutation(&mut chromosome, &mut rng);
                assert_eq!(chromosome.num_clusters, 3);
            }
            assert_valid_labeling(&chromosome);
        }
    }

    #[test]
    fn mo_operators_preserve_chromosome_consistency() {
        let dataset = two_gaussians();
        let evaluate = silhouette_evaluator();
        for seed in 0..30 {
            let mut rng = SmallRng::seed_from_u64(seed);
            let k = rng.gen_range(3..=6);
            let mut chromosome = FeacChromosome::random(k, &dataset, &Euclidean, &mut rng);
            chromosome.compact();
            if !chromosome.is_viable() {
                continue;
            }
            mo1(
                &mut chromosome,
                &dataset,
                &Euclidean,
                ClusterWeighting::LinearRank,
                &evaluate,
                &mut rng,
            );
            mo2(
                &mut chromosome,
                &dataset,
                &Euclidean,
                ClusterWeighting::LinearRank,
                8,
                &evaluate,
                &mut rng,
            );
            let k_now = chromosome.num_clusters();
            assert!(k_now >= 2 && k_now <= 8);
            assert_eq!(chromosome.counts.len(), k_now);
            assert_eq!(chromosome.partial_fc.len(), k_now);
            assert_eq!(chromosome.counts.iter().sum::<u64>(), 20);
            assert!(chromosome.labels.iter().all(|&l| l < k_now));
            let mut recounted = vec![0u64; k_now];
            for &label in &chromosome.labels {
                recounted[label] += 1;
            }
            assert_eq!(recounted, chromosome.counts);
        }
    }

    #[test]
    fn dmx_respects_the_dataset_bounds() {
        let parent1 = MedoidChromosome::new(vec![0, 4, 9]);
        let parent2 = MedoidChromosome::new(vec![2, 5, 7]);
        for seed in 0..100 {
            let mut rng = SmallRng::seed_from_u64(seed);
            let (c1, c2) = dmx_crossover(&parent1, &parent2, 12, 0.5, &mut rng);
            for child in [c1, c2] {
                assert_eq!(child.medoids.len(), 3);
                assert!(child.medoids.iter().all(|&m| m < 12));
                let mut sorted = child.medoids.clone();
                sorted.sort_unstable();
                sorted.dedup();
                assert_eq!(sorted.len(), 3);
            }
        }
    }
}
