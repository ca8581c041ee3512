//! Grouping GA with an island model.
//!
//! Label chromosomes with a variable cluster count evolve on independent
//! islands; crossover and mutation probabilities interpolate linearly from
//! initial to final values across generations, a one-step k-means local
//! search fires with probability `pb`, and each island's best migrates to a
//! random other island with probability `pe` per generation.

use crate::chromosome::{Chromosome, LabelChromosome};
use crate::cluster::centroids::{assign_to_live_centroids, recompute};
use crate::crossover::merge_crossover;
use crate::distance::Distance;
use crate::error::{Error, Result};
use crate::fitness::simplified_silhouette;
use crate::instance::Dataset;
use crate::mutate::{merge_mutation, splitting_mutation};
use crate::select::CumulativeDistribution;
use crate::strategy::{EvolveConfig, FitnessOrdering, RunOutcome, RunSummary, RuntimeLog};
use log::debug;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use std::time::Instant;

pub struct Gga {
    config: EvolveConfig,
}

/// A GGA run: the global outcome plus each island's best objective.
#[derive(Debug, Clone)]
pub struct GgaOutcome {
    pub outcome: RunOutcome<LabelChromosome>,
    pub island_best_objectives: Vec<f64>,
}

fn interpolate(initial: f64, final_value: f64, generation: usize, max_generations: usize) -> f64 {
    if max_generations <= 1 {
        return initial;
    }
    let t = (generation - 1) as f64 / (max_generations - 1) as f64;
    initial + (final_value - initial) * t
}

impl Gga {
    pub fn new(config: EvolveConfig) -> Self {
        Self { config }
    }

    fn evaluate<D: Distance>(chromosome: &mut LabelChromosome, dataset: &Dataset, dist: &D) {
        let k = chromosome.num_clusters;
        let (centroids, _, counts) = recompute(&chromosome.labels, k, dataset);
        let evaluation =
            simplified_silhouette(&centroids, &chromosome.labels, &counts, dataset, dist);
        chromosome.set_objective(evaluation.objective);
        chromosome.set_fitness(evaluation.objective + 1.0);
    }

    fn clamp_k<R: Rng>(
        chromosome: &mut LabelChromosome,
        k_min: usize,
        k_max: usize,
        rng: &mut R,
    ) {
        while chromosome.num_clusters < k_min {
            splitting_mutation(chromosome, rng);
        }
        while chromosome.num_clusters > k_max {
            merge_mutation(chromosome, rng);
        }
    }

    /// One k-means step: recompute centroids from the labels, reassign each
    /// instance to its nearest live centroid, compact unused labels.
    fn local_search<D: Distance>(chromosome: &mut LabelChromosome, dataset: &Dataset, dist: &D) {
        let k = chromosome.num_clusters;
        let (centroids, _, _) = recompute(&chromosome.labels, k, dataset);
        if let Ok(labels) = assign_to_live_centroids(&centroids, dataset, dist) {
            chromosome.labels = labels;
            chromosome.compact_labels();
        }
    }

    pub fn run<D: Distance>(&self, dataset: &Dataset, dist: &D) -> Result<GgaOutcome> {
        let n = dataset.num_instances();
        let k_min = self.config.k_min;
        if k_min > n {
            return Err(Error::ConfigurationInvalid(
                "k_min exceeds the number of instances",
            ));
        }
        let k_max = self.config.effective_k_max(n);

        let ordering = FitnessOrdering::Maximize;
        let num_islands = self.config.num_islands;
        let island_size = self.config.size_population;
        let mut rng = SmallRng::seed_from_u64(self.config.random_seed);
        let started = Instant::now();
        let mut log = RuntimeLog::new();
        let mut generation = 0usize;
        let mut iteration_gets_best = 0;
        let mut run_time_gets_best = started.elapsed();

        let mut islands: Vec<Vec<LabelChromosome>> = (0..num_islands)
            .map(|_| {
                (0..island_size)
                    .map(|_| {
                        let k = rng.gen_range(k_min..=k_max);
                        let mut chromosome = LabelChromosome::random(n, k, &mut rng);
                        chromosome.compact_labels();
                        Self::clamp_k(&mut chromosome, k_min, k_max, &mut rng);
                        chromosome
                    })
                    .collect()
            })
            .collect();
        let mut island_best: Vec<Option<LabelChromosome>> = vec![None; num_islands];

        loop {
            generation += 1;
            let pc = interpolate(
                self.config.pc_initial,
                self.config.pc_final,
                generation,
                self.config.max_generations,
            );
            let pm = interpolate(
                self.config.pm_initial,
                self.config.pm_final,
                generation,
                self.config.max_generations,
            );
            let pb = interpolate(
                self.config.pb_initial,
                self.config.pb_final,
                generation,
                self.config.max_generations,
            );

            for (island, best_slot) in islands.iter_mut().zip(island_best.iter_mut()) {
                for chromosome in island.iter_mut() {
                    Self::evaluate(chromosome, dataset, dist);
                }
                let generation_best = island
                    .iter()
                    .max_by(|a, b| a.objective().total_cmp(&b.objective()))
                    .expect("islands are non-empty");
                let improved = best_slot
                    .as_ref()
                    .map_or(true, |b| {
                        ordering.improves(generation_best.objective(), b.objective())
                    });
                if improved {
                    *best_slot = Some(generation_best.clone());
                }
            }

            let (global_best_island, global_best_objective) = island_best
                .iter()
                .enumerate()
                .map(|(i, b)| (i, b.as_ref().map_or(ordering.worst(), |c| c.objective())))
                .max_by(|(_, a), (_, b)| a.total_cmp(b))
                .expect("at least one island");
            if iteration_gets_best == 0
                || log
                    .samples()
                    .last()
                    .is_some_and(|s| ordering.improves(global_best_objective, s.best_objective))
            {
                iteration_gets_best = generation;
                run_time_gets_best = started.elapsed();
            }
            log.record(
                generation,
                global_best_objective,
                islands.iter().flatten().map(|c| c.objective()),
            );
            debug!(
                "generation {generation}: global best {global_best_objective:.6} (island {global_best_island}), pc {pc:.3} pm {pm:.3} pb {pb:.3}"
            );

            if ordering.reached(global_best_objective, self.config.desirable_objective)
                || generation >= self.config.max_generations
                || started.elapsed() >= self.config.max_execution_time
            {
                break;
            }

            for (island, best_slot) in islands.iter_mut().zip(island_best.iter()) {
                let elite = best_slot.as_ref().expect("island evaluated").clone();
                let weights: Vec<f64> = island.iter().map(|c| c.fitness()).collect();
                let distribution = CumulativeDistribution::from_weights(&weights);

                let mut pool = Vec::with_capacity(island_size);
                pool.push(elite);
                while pool.len() < island_size {
                    let chromosome = if rng.gen::<f64>() < pc {
                        let parent1 = &island[distribution.sample(&mut rng)];
                        let parent2 = &island[distribution.sample(&mut rng)];
                        merge_crossover(parent1, parent2, &mut rng)
                    } else {
                        island[distribution.sample(&mut rng)].clone()
                    };
                    pool.push(chromosome);
                }
                for chromosome in pool.iter_mut().skip(1) {
                    if rng.gen::<f64>() < pm {
                        if rng.gen::<f64>() < 0.5 {
                            splitting_mutation(chromosome, &mut rng);
                        } else {
                            merge_mutation(chromosome, &mut rng);
                        }
                    }
                    Self::clamp_k(chromosome, k_min.max(2), k_max, &mut rng);
                    if rng.gen::<f64>() < pb {
                        Self::local_search(chromosome, dataset, dist);
                        Self::clamp_k(chromosome, k_min.max(2), k_max, &mut rng);
                    }
                }
                *island = pool;
            }

            // island migration
            for source in 0..num_islands {
                if num_islands > 1 && rng.gen::<f64>() < self.config.pe {
                    let mut target = rng.gen_range(0..num_islands);
                    while target == source {
                        target = rng.gen_range(0..num_islands);
                    }
                    let migrant = island_best[source]
                        .as_ref()
                        .expect("island evaluated")
                        .clone();
                    let slot = rng.gen_range(0..island_size);
                    islands[target][slot] = migrant;
                }
            }
        }

        let island_best_objectives: Vec<f64> = island_best
            .iter()
            .map(|b| b.as_ref().map_or(ordering.worst(), |c| c.objective()))
            .collect();
        let best = island_best
            .into_iter()
            .flatten()
            .max_by(|a, b| a.objective().total_cmp(&b.objective()))
            .ok_or(Error::DegenerateCluster)?;
        let summary = RunSummary {
            num_cluster_k: best.num_clusters(),
            metric_func_run: best.objective(),
            fitness: best.fitness(),
            algorithm_run_time: started.elapsed(),
            num_total_generations: generation,
            iteration_gets_best,
            run_time_gets_best,
            total_invalid_offspring: 0,
        };
        Ok(GgaOutcome {
            outcome: RunOutcome { best, summary, log },
            island_best_objectives,
        })
    }
}
