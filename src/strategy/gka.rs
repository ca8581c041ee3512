//! GKA: the genetic k-means algorithm.
//!
//! Fixed-length label strings at fixed `k`, no crossover: selection plus
//! the distance-based GKA mutation carry the search, with the best string
//! preserved across generations.

use crate::chromosome::{Chromosome, LabelChromosome};
use crate::cluster::centroids::recompute;
use crate::distance::Distance;
use crate::error::{Error, Result};
use crate::fitness::sse;
use crate::instance::Dataset;
use crate::mutate::gka_mutation;
use crate::select::CumulativeDistribution;
use crate::strategy::{EvolveConfig, FitnessOrdering, RunOutcome, RunSummary, RuntimeLog};
use log::debug;
use rand::rngs::SmallRng;
use rand::SeedableRng;
use std::time::Instant;

pub struct Gka {
    config: EvolveConfig,
}

impl Gka {
    pub fn new(config: EvolveConfig) -> Self {
        Self { config }
    }

    /// J1 of the labeling. A string that leaves some cluster empty is
    /// illegal and takes the worst objective, so selection weeds it out.
    fn evaluate<D: Distance>(
        chromosome: &mut LabelChromosome,
        dataset: &Dataset,
        dist: &D,
    ) -> bool {
        let k = chromosome.num_clusters;
        let (centroids, _, counts) = recompute(&chromosome.labels, k, dataset);
        if counts.iter().any(|&c| c == 0) {
            chromosome.set_objective(f64::MAX);
            chromosome.set_fitness(0.0);
            return false;
        }
        let evaluation = sse(&chromosome.labels, centroids.as_row_matrix(), dataset, dist);
        chromosome.set_objective(evaluation.objective);
        chromosome.set_fitness(1.0 / (1.0 + evaluation.objective));
        true
    }

    pub fn run<D: Distance>(
        &self,
        dataset: &Dataset,
        dist: &D,
    ) -> Result<RunOutcome<LabelChromosome>> {
        let n = dataset.num_instances();
        let k = self
            .config
            .k
            .ok_or(Error::ConfigurationInvalid("GKA needs a fixed k"))?;
        if k > n {
            return Err(Error::ConfigurationInvalid(
                "k exceeds the number of instances",
            ));
        }

        let ordering = FitnessOrdering::Minimize;
        let mut rng = SmallRng::seed_from_u64(self.config.random_seed);
        let started = Instant::now();
        let mut log = RuntimeLog::new();
        let mut total_invalid_offspring = 0usize;
        let mut best: Option<LabelChromosome> = None;
        let mut best_objective = ordering.worst();
        let mut iteration_gets_best = 0;
        let mut run_time_gets_best = started.elapsed();
        let mut generation = 0usize;

        let mut population: Vec<LabelChromosome> = (0..self.config.size_population)
            .map(|_| LabelChromosome::random(n, k, &mut rng))
            .collect();

        loop {
            generation += 1;
            for chromosome in &mut population {
                if !Self::evaluate(chromosome, dataset, dist) {
                    total_invalid_offspring += 1;
                }
            }

            if let Some(generation_best) = population
                .iter()
                .min_by(|a, b| a.objective().total_cmp(&b.objective()))
            {
                if ordering.improves(generation_best.objective(), best_objective) {
                    best = Some(generation_best.clone());
                    best_objective = generation_best.objective();
                    iteration_gets_best = generation;
                    run_time_gets_best = started.elapsed();
                }
            }
            log.record(generation, best_objective, population.iter().map(|c| c.objective()));
            debug!("generation {generation}: best J1 {best_objective:.6}");

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

            for chromosome in pool.iter_mut().skip(1) {
                gka_mutation(chromosome, self.config.pm, dataset, dist, &mut rng);
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
            total_invalid_offspring,
        };
        Ok(RunOutcome { best, summary, log })
    }
}
