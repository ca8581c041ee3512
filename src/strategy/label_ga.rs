//! Baseline fixed-k GA over label strings: one-point crossover, random gene
//! reassignment, J1 objective, elitism.

use crate::chromosome::{Chromosome, LabelChromosome};
use crate::cluster::centroids::recompute;
use crate::crossover::one_point;
use crate::distance::Distance;
use crate::error::{Error, Result};
use crate::fitness::sse;
use crate::instance::Dataset;
use crate::select::CumulativeDistribution;
use crate::strategy::{EvolveConfig, FitnessOrdering, RunOutcome, RunSummary, RuntimeLog};
use itertools::Itertools;
use log::debug;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use std::time::Instant;

pub struct LabelGa {
    config: EvolveConfig,
}

impl LabelGa {
    pub fn new(config: EvolveConfig) -> Self {
        Self { config }
    }

    fn evaluate<D: Distance>(chromosome: &mut LabelChromosome, dataset: &Dataset, dist: &D) {
        let k = chromosome.num_clusters;
        let (centroids, _, _) = recompute(&chromosome.labels, k, dataset);
        let evaluation = sse(&chromosome.labels, centroids.as_row_matrix(), dataset, dist);
        chromosome.set_objective(evaluation.objective);
        chromosome.set_fitness(1.0 / (1.0 + evaluation.objective));
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
            .ok_or(Error::ConfigurationInvalid("the label GA needs a fixed k"))?;
        if k > n {
            return Err(Error::ConfigurationInvalid(
                "k exceeds the number of instances",
            ));
        }

        let ordering = FitnessOrdering::Minimize;
        let mut rng = SmallRng::seed_from_u64(self.config.random_seed);
        let started = Instant::now();
        let mut log = RuntimeLog::new();
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
                Self::evaluate(chromosome, dataset, dist);
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

            for (a, b) in (1..pool.len()).tuples() {
                if rng.gen::<f64>() < self.config.pc {
                    let (head, tail) = pool.split_at_mut(b);
                    one_point(&mut head[a], &mut tail[0], &mut rng);
                }
            }
            for chromosome in pool.iter_mut().skip(1) {
                for gene in chromosome.labels.iter_mut() {
                    if rng.gen::<f64>() < self.config.pm {
                        *gene = rng.gen_range(0..k);
                    }
                }
                chromosome.reset_evaluation();
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
