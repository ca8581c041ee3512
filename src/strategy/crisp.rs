//! GA over crisp partition matrices at fixed `k`.
//!
//! The population is kept sorted by J1; the lowest-cost chromosomes breed
//! through column-swap crossover and bit mutation, and parents compete with
//! offspring for the next generation's slots.

use crate::chromosome::{Chromosome, CrispChromosome};
use crate::cluster::centroids::{assign_to_centroids, random_centroids, recompute};
use crate::distance::Distance;
use crate::error::{Error, Result};
use crate::fitness::sse;
use crate::instance::Dataset;
use crate::crossover::crisp_column_crossover;
use crate::mutate::bit_mutation;
use crate::population::Population;
use crate::strategy::{EvolveConfig, FitnessOrdering, RunOutcome, RunSummary, RuntimeLog};
use itertools::Itertools;
use log::debug;
use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use std::time::Instant;

pub struct CrispGa {
    config: EvolveConfig,
}

impl CrispGa {
    pub fn new(config: EvolveConfig) -> Self {
        Self { config }
    }

    /// Decodes and scores a chromosome. A matrix with an empty row encodes
    /// a degenerate clustering: it gets the worst objective so the sorted
    /// replacement culls it, and it counts as an invalid offspring.
    fn evaluate<D: Distance>(
        chromosome: &mut CrispChromosome,
        k: usize,
        dataset: &Dataset,
        dist: &D,
    ) -> bool {
        let labels = chromosome.decode(dataset, dist);
        let (centroids, _, counts) = recompute(&labels, k, dataset);
        if counts.iter().any(|&c| c == 0) {
            chromosome.set_objective(f64::MAX);
            chromosome.set_fitness(-f64::MAX);
            return false;
        }
        let evaluation = sse(&labels, centroids.as_row_matrix(), dataset, dist);
        chromosome.set_objective(evaluation.objective);
        chromosome.set_fitness(-evaluation.objective);
        true
    }

    pub fn run<D: Distance>(
        &self,
        dataset: &Dataset,
        dist: &D,
    ) -> Result<RunOutcome<CrispChromosome>> {
        let n = dataset.num_instances();
        let k = self
            .config
            .k
            .ok_or(Error::ConfigurationInvalid("the crisp GA needs a fixed k"))?;
        if k > n {
            return Err(Error::ConfigurationInvalid(
                "k exceeds the number of instances",
            ));
        }
        let pool_size = self
            .config
            .size_mating_pool
            .unwrap_or(self.config.size_population / 2)
            .max(2);

        let ordering = FitnessOrdering::Minimize;
        let mut rng = SmallRng::seed_from_u64(self.config.random_seed);
        let started = Instant::now();
        let mut log = RuntimeLog::new();
        let mut total_invalid_offspring = 0usize;
        let mut best: Option<CrispChromosome> = None;
        let mut best_objective = ordering.worst();
        let mut iteration_gets_best = 0;
        let mut run_time_gets_best = started.elapsed();
        let mut generation = 0usize;

        let mut population = Population::new(
            (0..self.config.size_population)
                .map(|_| {
                    let seeds = random_centroids(k, dataset, &mut rng);
                    let labels = assign_to_centroids(&seeds, dataset, dist);
                    CrispChromosome::from_labels(&labels, k)
                })
                .collect(),
        );
        for chromosome in &mut population.chromosomes {
            if !Self::evaluate(chromosome, k, dataset, dist) {
                total_invalid_offspring += 1;
            }
        }

        loop {
            generation += 1;
            population.sort_by_objective_asc();

            let generation_best = &population.chromosomes[0];
            if ordering.improves(generation_best.objective(), best_objective) {
                best = Some(generation_best.clone());
                best_objective = generation_best.objective();
                iteration_gets_best = generation;
                run_time_gets_best = started.elapsed();
            }
            log.record(generation, best_objective, population.objectives());
            debug!("generation {generation}: best J1 {best_objective:.6}");

            if ordering.reached(best_objective, self.config.desirable_objective)
                || generation >= self.config.max_generations
                || started.elapsed() >= self.config.max_execution_time
            {
                break;
            }

            // the lowest-J1 chromosomes breed
            let mut offspring: Vec<CrispChromosome> =
                population.chromosomes[..pool_size].to_vec();
            let mut order: Vec<usize> = (0..offspring.len()).collect();
            order.shuffle(&mut rng);
            for (a, b) in order.into_iter().tuples() {
                if rng.gen::<f64>() < self.config.pc {
                    let (lo, hi) = if a < b { (a, b) } else { (b, a) };
                    let (head, tail) = offspring.split_at_mut(hi);
                    crisp_column_crossover(&mut head[lo], &mut tail[0], &mut rng);
                }
            }
            for chromosome in &mut offspring {
                bit_mutation(chromosome, self.config.pm, &mut rng);
                if !Self::evaluate(chromosome, k, dataset, dist) {
                    total_invalid_offspring += 1;
                }
            }

            // parents and offspring compete for the population slots
            population.chromosomes.extend(offspring);
            population.sort_by_objective_asc();
            population.chromosomes.truncate(self.config.size_population);
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
            total_invalid_offspring,
        };
        Ok(RunOutcome { best, summary, log })
    }
}
