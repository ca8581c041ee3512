mod support;

#[cfg(test)]
mod scenarios_tests {
    use crate::support::*;
    use genetic_clustering::chromosome::feac::FeacChromosome;
    use genetic_clustering::chromosome::{CentroidChromosome, Chromosome};
    use genetic_clustering::cluster::kmeans::kmeans_local_search;
    use genetic_clustering::cluster::rearrange::rearrange_to_reference;
    use genetic_clustering::crossover::pnn_crossover;
    use genetic_clustering::distance::{Euclidean, SquaredEuclidean};
    use genetic_clustering::matrix::RowMatrix;
    use genetic_clustering::select::CumulativeDistribution;
    use genetic_clustering::strategy::crisp::CrispGa;
    use genetic_clustering::strategy::feac::{Feac, FeacVariant};
    use genetic_clustering::strategy::gga::Gga;
    use genetic_clustering::strategy::EvolveConfig;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    #[test]
    fn two_separable_blobs_are_recovered() {
        let dataset = two_blob_squares();
        let config = EvolveConfig::builder()
            .with_size_population(40)
            .with_size_mating_pool(20)
            .with_k(2)
            .with_pc(0.8)
            .with_pm(0.05)
            .with_max_generations(100)
            .with_random_seed(5)
            .build()
            .unwrap();
        let outcome = CrispGa::new(config)
            .run(&dataset, &SquaredEuclidean)
            .unwrap();

        // optimal J1 is 2.0 per quintuple
        assert!(outcome.summary.metric_func_run <= 4.0 + 1e-9);
        let labels = outcome.best.decode(&dataset, &SquaredEuclidean);
        assert!(labels[..5].iter().all(|&l| l == labels[0]));
        assert!(labels[5..].iter().all(|&l| l == labels[5]));
        assert_ne!(labels[0], labels[5]);
    }

    #[test]
    fn redundant_clusters_collapse_to_two() {
        let dataset = two_gaussians();
        let config = EvolveConfig::builder()
            .with_size_population(30)
            .with_k_range(2, 8)
            .with_max_generations(50)
            .with_random_seed(11)
            .build()
            .unwrap();
        let outcome = Feac::new(FeacVariant::Feac, config)
            .run(&dataset, &Euclidean)
            .unwrap();

        assert_eq!(outcome.summary.num_cluster_k, 2);
        assert!(outcome.summary.metric_func_run >= 0.5);
    }

    #[test]
    fn degenerate_seeds_collapse_and_get_culled() {
        let dataset = two_blob_squares();
        let rows: Vec<f64> = std::iter::repeat([5.0, 5.0]).take(4).flatten().collect();
        let seeds = RowMatrix::from_vec(2, rows);
        let mut degenerate = FeacChromosome::from_centroids(&seeds, &dataset, &Euclidean);
        kmeans_local_search(&mut degenerate, &dataset, &Euclidean, 5, 1e-3).unwrap();

        assert_eq!(degenerate.num_clusters(), 1);
        assert!(!degenerate.is_viable());
        assert_eq!(degenerate.fitness(), f64::MIN);

        // selection never hands the culled chromosome back
        let weights = [degenerate.fitness().max(0.0), 1.0, 1.0, 1.0];
        let distribution = CumulativeDistribution::from_weights(&weights);
        let mut rng = SmallRng::seed_from_u64(0);
        for _ in 0..500 {
            assert_ne!(distribution.sample(&mut rng), 0);
        }
    }

    #[test]
    fn reversed_centroids_rearrange_onto_reference() {
        let reference = RowMatrix::from_vec(2, vec![0.0, 0.0, 5.0, 5.0, 10.0, 10.0]);
        let mut candidate = RowMatrix::from_vec(2, vec![10.0, 10.0, 5.0, 5.0, 0.0, 0.0]);
        let needed = rearrange_to_reference(&mut candidate, &reference, &Euclidean);
        assert!(needed);
        assert_eq!(candidate, reference);
    }

    #[test]
    fn pnn_merges_paired_codebooks_to_midpoints() {
        let dataset = genetic_clustering::instance::Dataset::from_rows(&[
            vec![1.0],
            vec![1.1],
            vec![2.0],
            vec![2.1],
            vec![3.0],
            vec![3.1],
        ])
        .unwrap();
        let parent1 = CentroidChromosome::new(vec![1.0, 2.0, 3.0], 1);
        let parent2 = CentroidChromosome::new(vec![1.1, 2.1, 3.1], 1);
        let child = pnn_crossover(&parent1, &parent2, &dataset, 3, &SquaredEuclidean);
        let mut values: Vec<f64> = child.centroids().map(|c| c[0]).collect();
        values.sort_by(|a, b| a.total_cmp(b));
        assert!((values[0] - 1.05).abs() < 0.1);
        assert!((values[1] - 2.05).abs() < 0.1);
        assert!((values[2] - 3.05).abs() < 0.1);
    }

    #[test]
    fn island_bests_converge_to_the_global_best() {
        let dataset = two_blob_squares();
        let config = EvolveConfig::builder()
            .with_size_population(20)
            .with_num_islands(4)
            .with_pe(0.1)
            .with_k_range(2, 4)
            .with_pc_range(0.8, 0.8)
            .with_pm_range(0.4, 0.4)
            .with_pb_range(0.5, 0.5)
            .with_max_generations(100)
            .with_random_seed(29)
            .build()
            .unwrap();
        let gga_run = Gga::new(config).run(&dataset, &Euclidean).unwrap();

        let global = gga_run.outcome.summary.metric_func_run;
        assert!(global > 0.8);
        for island_best in &gga_run.island_best_objectives {
            assert!(
                (island_best - global).abs() < 1e-6,
                "island best {island_best} diverges from global best {global}"
            );
        }
    }
}
