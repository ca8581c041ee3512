//! CGA: clustering GA over label strings with an active cluster count.
//!
//! Recombination transplants whole clusters from one parent onto the other;
//! mutation splits or merges a cluster; fitness is the simplified
//! silhouette.

use crate::chromosome::{Chromosome, LabelChromosome};
use crate::cluster::centroids::recompute;
use crate::crossover::cga_crossover;
use crate::distance::Distance;
use crate::error::{Error, Result};
use crate::fitness::simplified_silhouette;
use crate::instance::Dataset;
use crate::mutate::{merge_mutation, splitting_mutation};
use crate::select::CumulativeDistribution;
use crate::strategy::{EvolveConfig, FitnessOrdering, RunOutcome, RunSummary, RuntimeLog};
use itertools::Itertools;
use log::debug;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use std::time::Instant;

pub struct Cga {
    config: EvolveConfig,
}

impl Cga {
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

    fn clamp_k<R: Rng>(chromosome: &mut LabelChromosome, k_max: usize, rng: &mut R) {
        while chromosome.num_clusters < 2 {
            splitting_mutation(chromosome, rng);
        }
        while chromosome.num_clusters > k_max {
            merge_mutation(chromosome, rng);
        }
    }

    pub fn run<D: Distance>(
        &self,
        dataset: &Dataset,
        dist: &D,
    ) -> Result<RunOutcome<LabelChromosome>> {
        let n = dataset.num_instances();
        let k_min = self.config.k_min;
        if k_min > n {
            return Err(Error::ConfigurationInvalid(
                "k_min exceeds the number of instances",
            ));
        }
        let k_max = self.config.effective_k_max(n);

        let ordering = FitnessOrdering::Maximize;
        let mut rng = SmallRng::seed_from_u64(self.config.random_seed);
        let started = Instant::now();
        let mut log = RuntimeLog::new();
        let mut best: Option<LabelChromosome> = None;
        let mut best_objective = ordering.worst();
        let mut iteration_gets_best = 0;
        let mut run_time_gets_best = started.elapsed();
        let mut generation = 0usize;

        let mut population: Vec<LabelChromosome> = (0..self.config.size_population)
            .map(|_| {
                let k = rng.gen_range(k_min..=k_max);
                let mut chromosome = LabelChromosome::random(n, k, &mut rng);
                chromosome.compact_labels();
                Self::clamp_k(&mut chromosome, k_max, &mut rng);
                chromosome
            })
            .collect();

        loop {
            generation += 1;
            for chromosome in &mut population {
                Self::evaluate(chromosome, dataset, dist);
            }

            if let Some(generation_best) = population
                .iter()
                .max_by(|a, b| a.objective().total_cmp(&b.objective()))
            {
                if ordering.improves(generation_best.objective(), best_objective) {
                    best = Some(generation_best.clone());
                    best_objective = generation_best.objective();
                    iteration_gets_best = generation;
                    run_time_gets_best = started.elapsed();
                }
            }
            log.record(generation, best_objective, population.iter().map(|c| c.objective()));
            debug!("generation {generation}: best silhouette {best_objective:.6}");

            if ordering.reached(best_objective, self.config.desirable_objective)
                || generation >= self.config.max_generations
                || started.elapsed() >= self.config.max_execution_time
            {
                break;
            }

            let weights: Vec<f64> = population.iter().map(|c| c.fitness()).collect();
            let distribution = CumulativeDistribution::from_weights(&weights);
            let elite = best.clone().expect("evaluated population has a best");
            let mut pool = Vec::with_capacity(self.config.size_population);
            pool.push(elite);
            for _ in 1..self.config.size_population {
                pool.push(population[distribution.sample(&mut rng)].clone());
            }

            // cluster transplant on consecutive pairs; the child replaces
            // the second parent of the pair
            for (a, b) in (1..pool.len()).tuples() {
                if rng.gen::<f64>() < self.config.pc {
                    let (child, _, _, _) =
                        cga_crossover(&pool[a], &pool[b], dataset, dist, &mut rng);
                    pool[b] = child;
                }
            }
            for chromosome in pool.iter_mut().skip(1) {
                if rng.gen::<f64>() < self.config.pm {
                    if rng.gen::<f64>() < 0.5 {
                        splitting_mutation(chromosome, &mut rng);
                    } else {
                        merge_mutation(chromosome, &mut rng);
                    }
                }
                Self::clamp_k(chromosome, k_max, &mut rng);
            }

            population = pool;
        }

        let best = best.ok_or(Error::DegenerateCluster)?;
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
        Ok(RunOutcome { best, summary, log })
    }
}
