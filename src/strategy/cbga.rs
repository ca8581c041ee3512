//! Codebook GA: elitist recombination of centroid codebooks through
//! pairwise-nearest-neighbor crossover.
//!
//! The population holds fixed-size codebooks sorted by distortion (J1). The
//! surviving codebooks are crossed pair by pair in the deterministic elitist
//! order — (0,1), (0,2), … — each child optionally perturbed by the random-δ
//! mutation and polished by a couple of k-means steps before it competes for
//! a slot.

use crate::chromosome::{CentroidChromosome, Chromosome};
use crate::cluster::centroids::recompute;
use crate::crossover::pnn_crossover;
use crate::distance::Distance;
use crate::error::{Error, Result};
use crate::fitness::sse;
use crate::instance::Dataset;
use crate::mutate::random_delta_mutation;
use crate::population::Population;
use crate::select::ElitistPairs;
use crate::strategy::{EvolveConfig, FitnessOrdering, RunOutcome, RunSummary, RuntimeLog};
use log::debug;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use std::time::Instant;

/// How many k-means polish steps each offspring receives.
const REFINEMENT_STEPS: usize = 2;

pub struct Cbga {
    config: EvolveConfig,
}

impl Cbga {
    pub fn new(config: EvolveConfig) -> Self {
        Self { config }
    }

    fn evaluate<D: Distance>(chromosome: &mut CentroidChromosome, dataset: &Dataset, dist: &D) {
        let labels = chromosome.decode(dataset, dist);
        let evaluation = sse(&labels, &chromosome.to_matrix(), dataset, dist);
        chromosome.set_objective(evaluation.objective);
        chromosome.set_fitness(-evaluation.objective);
    }

    /// Lloyd steps over the codebook: assign, recompute means, write the
    /// occupied entries back. Entries that attract no instance keep their
    /// previous position.
    fn refine<D: Distance>(chromosome: &mut CentroidChromosome, dataset: &Dataset, dist: &D) {
        for _ in 0..REFINEMENT_STEPS {
            let labels = chromosome.decode(dataset, dist);
            let (means, _, _) = recompute(&labels, chromosome.num_clusters(), dataset);
            let dim = chromosome.dim;
            for (j, row) in means.live_rows() {
                chromosome.genes[j * dim..(j + 1) * dim].copy_from_slice(row);
            }
        }
        chromosome.reset_evaluation();
    }

    pub fn run<D: Distance>(
        &self,
        dataset: &Dataset,
        dist: &D,
    ) -> Result<RunOutcome<CentroidChromosome>> {
        let n = dataset.num_instances();
        let k = self
            .config
            .k
            .ok_or(Error::ConfigurationInvalid("the codebook GA needs a fixed k"))?;
        if k > n {
            return Err(Error::ConfigurationInvalid(
                "k exceeds the number of instances",
            ));
        }
        let survivors = self
            .config
            .size_mating_pool
            .unwrap_or(self.config.size_population / 2)
            .max(2);

        let ordering = FitnessOrdering::Minimize;
        let mut rng = SmallRng::seed_from_u64(self.config.random_seed);
        let started = Instant::now();
        let mut log = RuntimeLog::new();
        let mut best: Option<CentroidChromosome> = None;
        let mut best_objective = ordering.worst();
        let mut iteration_gets_best = 0;
        let mut run_time_gets_best = started.elapsed();
        let mut generation = 0usize;

        let mut population = Population::new(
            (0..self.config.size_population)
                .map(|_| CentroidChromosome::random(k, dataset, &mut rng))
                .collect::<Vec<_>>(),
        );
        for chromosome in &mut population.chromosomes {
            Self::evaluate(chromosome, dataset, dist);
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
            debug!("generation {generation}: best distortion {best_objective:.6}");

            if ordering.reached(best_objective, self.config.desirable_objective)
                || generation >= self.config.max_generations
                || started.elapsed() >= self.config.max_execution_time
            {
                break;
            }

            let mut next = Vec::with_capacity(self.config.size_population);
            next.push(population.chromosomes[0].clone());
            let mut pairs = ElitistPairs::new(0, survivors.min(population.size()));
            while next.len() < self.config.size_population {
                let (a, b) = match pairs.next() {
                    Some(pair) => pair,
                    None => {
                        // exhausted the pair stream: start it over
                        pairs = ElitistPairs::new(0, survivors.min(population.size()));
                        pairs.next().expect("at least one pair")
                    }
                };
                let mut child = pnn_crossover(
                    &population.chromosomes[a],
                    &population.chromosomes[b],
                    dataset,
                    k,
                    dist,
                );
                if rng.gen::<f64>() < self.config.pm {
                    random_delta_mutation(&mut child, &mut rng);
                }
                Self::refine(&mut child, dataset, dist);
                Self::evaluate(&mut child, dataset, dist);
                next.push(child);
            }

            population = Population::new(next);
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
