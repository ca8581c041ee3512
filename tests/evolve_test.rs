mod support;

#[cfg(test)]
mod evolve_tests {
    use crate::support::*;
    use genetic_clustering::chromosome::Chromosome;
    use genetic_clustering::distance::{Euclidean, SquaredEuclidean};
    use genetic_clustering::error::Error;
    use genetic_clustering::strategy::cbga::Cbga;
    use genetic_clustering::strategy::centroid_ga::{CentroidGa, CentroidVariant};
    use genetic_clustering::strategy::cga::Cga;
    use genetic_clustering::strategy::crisp::CrispGa;
    use genetic_clustering::strategy::feac::{Feac, FeacVariant};
    use genetic_clustering::strategy::gka::Gka;
    use genetic_clustering::strategy::label_ga::LabelGa;
    use genetic_clustering::strategy::medoid::{MedoidGa, MedoidVariant};
    use genetic_clustering::strategy::EvolveConfig;

    fn feac_config(seed: u64) -> EvolveConfig {
        EvolveConfig::builder()
            .with_size_population(20)
            .with_k_range(2, 5)
            .with_max_generations(25)
            .with_random_seed(seed)
            .build()
            .unwrap()
    }

    #[test]
    fn same_seed_reproduces_the_run_bit_for_bit() {
        let dataset = two_gaussians();
        let first = Feac::new(FeacVariant::Feac, feac_config(3))
            .run(&dataset, &Euclidean)
            .unwrap();
        let second = Feac::new(FeacVariant::Feac, feac_config(3))
            .run(&dataset, &Euclidean)
            .unwrap();
        assert_eq!(first.best, second.best);
        assert_eq!(first.log, second.log);
        assert_eq!(
            first.summary.iteration_gets_best,
            second.summary.iteration_gets_best
        );
    }

    #[test]
    fn different_seeds_may_walk_different_paths() {
        let dataset = two_gaussians();
        let first = Feac::new(FeacVariant::Feac, feac_config(3))
            .run(&dataset, &Euclidean)
            .unwrap();
        let second = Feac::new(FeacVariant::Feac, feac_config(4))
            .run(&dataset, &Euclidean)
            .unwrap();
        // both still converge on the same two-cluster structure
        assert_eq!(first.best.num_clusters(), second.best.num_clusters());
    }

    #[test]
    fn best_objective_is_monotonic_in_the_log() {
        let dataset = two_gaussians();
        let outcome = Feac::new(FeacVariant::EacII, feac_config(7))
            .run(&dataset, &Euclidean)
            .unwrap();
        for window in outcome.log.samples().windows(2) {
            assert!(window[1].best_objective >= window[0].best_objective);
        }

        let config = EvolveConfig::builder()
            .with_size_population(20)
            .with_size_mating_pool(10)
            .with_k(2)
            .with_max_generations(30)
            .with_random_seed(7)
            .build()
            .unwrap();
        let crisp = CrispGa::new(config)
            .run(&two_blob_squares(), &SquaredEuclidean)
            .unwrap();
        for window in crisp.log.samples().windows(2) {
            assert!(window[1].best_objective <= window[0].best_objective);
        }
    }

    #[test]
    fn every_eac_variant_yields_a_valid_partition() {
        let dataset = two_gaussians();
        for (seed, variant) in [
            (1, FeacVariant::Eac),
            (2, FeacVariant::EacI),
            (3, FeacVariant::EacII),
            (4, FeacVariant::EacIII),
            (5, FeacVariant::Feac),
        ] {
            let outcome = Feac::new(variant, feac_config(seed))
                .run(&dataset, &Euclidean)
                .unwrap();
            let best = &outcome.best;
            let k = best.num_clusters();
            assert!((2..=5).contains(&k));
            assert!(best.labels.iter().all(|&l| l < k));
            assert!(best.counts.iter().all(|&c| c > 0));
            assert_eq!(best.counts.iter().sum::<u64>(), 20);
            assert_eq!(best.partial_fc.len(), k);
        }
    }

    #[test]
    fn crisp_best_stays_well_formed() {
        let config = EvolveConfig::builder()
            .with_size_population(24)
            .with_size_mating_pool(12)
            .with_k(2)
            .with_pm(0.2)
            .with_max_generations(40)
            .with_random_seed(13)
            .build()
            .unwrap();
        let outcome = CrispGa::new(config)
            .run(&two_blob_squares(), &SquaredEuclidean)
            .unwrap();
        assert!(outcome.best.is_well_formed());
    }

    #[test]
    fn gka_reaches_the_line_optimum() {
        let dataset = genetic_clustering::instance::Dataset::from_rows(&[
            vec![0.0],
            vec![1.0],
            vec![9.0],
            vec![10.0],
        ])
        .unwrap();
        let config = EvolveConfig::builder()
            .with_size_population(20)
            .with_k(2)
            .with_pm(0.3)
            .with_max_generations(50)
            .with_random_seed(2)
            .build()
            .unwrap();
        let outcome = Gka::new(config).run(&dataset, &SquaredEuclidean).unwrap();
        assert!(outcome.summary.metric_func_run <= 1.0 + 1e-9);
    }

    #[test]
    fn medoid_variants_agree_on_the_line() {
        let dataset = line_five();
        for variant in [MedoidVariant::Gca, MedoidVariant::Hka] {
            let config = EvolveConfig::builder()
                .with_size_population(20)
                .with_k(2)
                .with_pc(0.9)
                .with_pm(0.2)
                .with_max_generations(50)
                .with_random_seed(3)
                .build()
                .unwrap();
            let outcome = MedoidGa::new(variant, config)
                .run(&dataset, &Euclidean)
                .unwrap();
            // medoid 1 plus either of {3, 4} costs |0-1| + |2-1| + 1 = 3
            assert!(
                (outcome.summary.metric_func_run - 3.0).abs() < 1e-9,
                "{variant:?} missed the optimum"
            );
            let mut medoids = outcome.best.medoids.clone();
            medoids.sort_unstable();
            assert_eq!(medoids[0], 1);
            assert!(medoids[1] == 3 || medoids[1] == 4);
        }
    }

    #[test]
    fn label_ga_groups_the_blobs() {
        let config = EvolveConfig::builder()
            .with_size_population(30)
            .with_k(2)
            .with_pc(0.8)
            .with_pm(0.02)
            .with_max_generations(150)
            .with_random_seed(17)
            .build()
            .unwrap();
        let outcome = LabelGa::new(config)
            .run(&two_blob_squares(), &SquaredEuclidean)
            .unwrap();
        assert!(outcome.summary.metric_func_run <= 4.0 + 1e-9);
    }

    #[test]
    fn centroid_variants_all_find_seed_quality_solutions() {
        let dataset = six_points();
        for (seed, variant) in [
            (1, CentroidVariant::Gcuk),
            (2, CentroidVariant::Tgca),
            (3, CentroidVariant::Kga),
        ] {
            let config = EvolveConfig::builder()
                .with_size_population(30)
                .with_k_range(2, 3)
                .with_pc(0.7)
                .with_pm(0.3)
                .with_max_generations(60)
                .with_random_seed(seed)
                .build()
                .unwrap();
            let outcome = CentroidGa::new(variant, config)
                .run(&dataset, &SquaredEuclidean)
                .unwrap();
            // an instance-seeded centroid pair scores J1 = 4 on this data
            assert!(
                outcome.summary.metric_func_run <= 4.0 + 1e-9,
                "{variant:?} stayed above the seed-quality bound"
            );
        }
    }

    #[test]
    fn cbga_polishes_codebooks_to_blob_means() {
        let dataset = six_points();
        let config = EvolveConfig::builder()
            .with_size_population(16)
            .with_size_mating_pool(8)
            .with_k(2)
            .with_pm(0.1)
            .with_max_generations(30)
            .with_random_seed(19)
            .build()
            .unwrap();
        let outcome = Cbga::new(config)
            .run(&dataset, &SquaredEuclidean)
            .unwrap();
        // blob means give J1 = 2 * (2/9 + 5/9 + 5/9) = 8/3
        assert!(outcome.summary.metric_func_run <= 8.0 / 3.0 + 1e-6);
        assert_eq!(outcome.best.num_clusters(), 2);
    }

    #[test]
    fn cga_settles_on_two_clusters() {
        let config = EvolveConfig::builder()
            .with_size_population(30)
            .with_k_range(2, 4)
            .with_pc(0.7)
            .with_pm(0.4)
            .with_max_generations(100)
            .with_random_seed(23)
            .build()
            .unwrap();
        let outcome = Cga::new(config)
            .run(&two_blob_squares(), &Euclidean)
            .unwrap();
        assert_eq!(outcome.best.num_clusters(), 2);
        assert!(outcome.summary.metric_func_run >= 0.5);
    }

    #[test]
    fn fixed_k_drivers_reject_a_missing_k() {
        let config = EvolveConfig::builder()
            .with_size_population(10)
            .with_max_generations(5)
            .build()
            .unwrap();
        let dataset = six_points();
        assert!(matches!(
            CrispGa::new(config.clone()).run(&dataset, &Euclidean),
            Err(Error::ConfigurationInvalid(_))
        ));
        assert!(matches!(
            Gka::new(config).run(&dataset, &Euclidean),
            Err(Error::ConfigurationInvalid(_))
        ));
    }

    #[test]
    fn k_beyond_the_dataset_is_rejected() {
        let config = EvolveConfig::builder()
            .with_size_population(10)
            .with_k_range(10, 12)
            .with_max_generations(5)
            .build()
            .unwrap();
        let outcome = Feac::new(FeacVariant::Feac, config).run(&six_points(), &Euclidean);
        assert!(matches!(outcome, Err(Error::ConfigurationInvalid(_))));
    }

    #[test]
    fn stop_on_desirable_objective_ends_the_run_early() {
        let dataset = two_gaussians();
        let config = EvolveConfig::builder()
            .with_size_population(20)
            .with_k_range(2, 5)
            .with_max_generations(50)
            .with_desirable_objective(0.2)
            .with_random_seed(3)
            .build()
            .unwrap();
        let outcome = Feac::new(FeacVariant::Feac, config)
            .run(&dataset, &Euclidean)
            .unwrap();
        assert!(outcome.summary.num_total_generations < 50);
        assert!(outcome.summary.metric_func_run > 0.2);
    }
}
