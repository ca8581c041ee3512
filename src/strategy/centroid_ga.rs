//! GA over variable-length centroid strings.
//!
//! Three mutation flavors share the loop: a global random-δ rescale, a
//! per-element bidirectional pull toward the feature box, and the
//! population-scaled bidirectional variant whose radius follows the
//! chromosome's standing in the objective range.

use crate::chromosome::{CentroidChromosome, Chromosome};
use crate::crossover::one_point_indivisible;
use crate::distance::Distance;
use crate::error::{Error, Result};
use crate::fitness::sse;
use crate::instance::Dataset;
use crate::mutate::{
    bidirectional_mutation, bidirectional_scaled_mutation, random_delta_mutation,
};
use crate::select::CumulativeDistribution;
use crate::strategy::{EvolveConfig, FitnessOrdering, RunOutcome, RunSummary, RuntimeLog};
use log::debug;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use std::time::Instant;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CentroidVariant {
    /// Random-δ rescale mutation.
    Gcuk,
    /// Per-element bidirectional mutation.
    Tgca,
    /// Population-scaled bidirectional mutation.
    Kga,
}

pub struct CentroidGa {
    variant: CentroidVariant,
    config: EvolveConfig,
}

impl CentroidGa {
    pub fn new(variant: CentroidVariant, config: EvolveConfig) -> Self {
        Self { variant, config }
    }

    fn evaluate<D: Distance>(chromosome: &mut CentroidChromosome, dataset: &Dataset, dist: &D) {
        let labels = chromosome.decode(dataset, dist);
        let evaluation = sse(&labels, &chromosome.to_matrix(), dataset, dist);
        chromosome.set_objective(evaluation.objective);
        chromosome.set_fitness(1.0 / (1.0 + evaluation.objective));
    }

    pub fn run<D: Distance>(
        &self,
        dataset: &Dataset,
        dist: &D,
    ) -> Result<RunOutcome<CentroidChromosome>> {
        let n = dataset.num_instances();
        let k_min = self.config.k_min;
        if k_min > n {
            return Err(Error::ConfigurationInvalid(
                "k_min exceeds the number of instances",
            ));
        }
        let k_max = self.config.effective_k_max(n);

        let ordering = FitnessOrdering::Minimize;
        let mut rng = SmallRng::seed_from_u64(self.config.random_seed);
        let started = Instant::now();
        let mut log = RuntimeLog::new();
        let mut best: Option<CentroidChromosome> = None;
        let mut best_objective = ordering.worst();
        let mut iteration_gets_best = 0;
        let mut run_time_gets_best = started.elapsed();
        let mut generation = 0usize;

        let mut population: Vec<CentroidChromosome> = (0..self.config.size_population)
            .map(|_| {
                let k = rng.gen_range(k_min..=k_max);
                CentroidChromosome::random(k, dataset, &mut rng)
            })
            .collect();

        loop {
            generation += 1;
            for chromosome in &mut population {
                Self::evaluate(chromosome, dataset, dist);
            }
            let min_objective = population
                .iter()
                .map(|c| c.objective())
                .fold(f64::INFINITY, f64::min);
            let max_objective = population
                .iter()
                .map(|c| c.objective())
                .fold(f64::NEG_INFINITY, f64::max);

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

            let mut index = 1;
            while index + 1 < pool.len() {
                if rng.gen::<f64>() < self.config.pc {
                    let (child1, child2) =
                        one_point_indivisible(&pool[index], &pool[index + 1], k_max, &mut rng);
                    pool[index] = child1;
                    pool[index + 1] = child2;
                }
                index += 2;
            }
            for chromosome in pool.iter_mut().skip(1) {
                if rng.gen::<f64>() < self.config.pm {
                    match self.variant {
                        CentroidVariant::Gcuk => random_delta_mutation(chromosome, &mut rng),
                        CentroidVariant::Tgca => {
                            bidirectional_mutation(chromosome, dataset, &mut rng)
                        }
                        CentroidVariant::Kga => bidirectional_scaled_mutation(
                            chromosome,
                            min_objective,
                            max_objective,
                            dataset,
                            &mut rng,
                        ),
                    }
                }
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
