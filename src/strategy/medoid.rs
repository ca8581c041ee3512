//! Medoid GAs: GCA and HKA.
//!
//! Genes are instance indices naming medoids. Both variants recombine with
//! D-MX and mutate with the medoid point mutation; GCA selects by roulette
//! wheel while HKA selects by tournament and additionally applies a
//! PAM-style swap improvement as local search.

use crate::chromosome::{Chromosome, MedoidChromosome};
use crate::cluster::pam::{pam_improve, total_medoid_cost};
use crate::crossover::dmx_crossover;
use crate::distance::{Distance, DissimilarityMatrix};
use crate::error::{Error, Result};
use crate::instance::Dataset;
use crate::mutate::point_mutation;
use crate::select::{tournament, CumulativeDistribution};
use crate::strategy::{EvolveConfig, FitnessOrdering, RunOutcome, RunSummary, RuntimeLog};
use log::debug;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use std::time::Instant;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MedoidVariant {
    Gca,
    Hka,
}

pub struct MedoidGa {
    variant: MedoidVariant,
    config: EvolveConfig,
}

impl MedoidGa {
    pub fn new(variant: MedoidVariant, config: EvolveConfig) -> Self {
        Self { variant, config }
    }

    fn evaluate(chromosome: &mut MedoidChromosome, dissimilarity: &DissimilarityMatrix) {
        let cost = total_medoid_cost(&chromosome.medoids, dissimilarity);
        chromosome.set_objective(cost);
        chromosome.set_fitness(1.0 / (1.0 + cost));
    }

    pub fn run<D: Distance>(
        &self,
        dataset: &Dataset,
        dist: &D,
    ) -> Result<RunOutcome<MedoidChromosome>> {
        let n = dataset.num_instances();
        let k = self
            .config
            .k
            .ok_or(Error::ConfigurationInvalid("the medoid GA needs a fixed k"))?;
        if k >= n {
            return Err(Error::ConfigurationInvalid(
                "k must stay below the number of instances",
            ));
        }
        let dissimilarity = DissimilarityMatrix::compute(dataset, dist);

        let ordering = FitnessOrdering::Minimize;
        let mut rng = SmallRng::seed_from_u64(self.config.random_seed);
        let started = Instant::now();
        let mut log = RuntimeLog::new();
        let mut best: Option<MedoidChromosome> = None;
        let mut best_objective = ordering.worst();
        let mut iteration_gets_best = 0;
        let mut run_time_gets_best = started.elapsed();
        let mut generation = 0usize;

        let mut population: Vec<MedoidChromosome> = (0..self.config.size_population)
            .map(|_| MedoidChromosome::random(k, n, &mut rng))
            .collect();

        loop {
            generation += 1;

            if self.variant == MedoidVariant::Hka {
                for chromosome in &mut population {
                    pam_improve(&mut chromosome.medoids, &dissimilarity);
                }
            }
            for chromosome in &mut population {
                Self::evaluate(chromosome, &dissimilarity);
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
            debug!("generation {generation}: best medoid cost {best_objective:.6}");

            if ordering.reached(best_objective, self.config.desirable_objective)
                || generation >= self.config.max_generations
                || started.elapsed() >= self.config.max_execution_time
            {
                break;
            }

            let elite = best.clone().expect("evaluated population has a best");
            let mut pool = Vec::with_capacity(self.config.size_population);
            pool.push(elite);
            match self.variant {
                MedoidVariant::Gca => {
                    let weights: Vec<f64> = population.iter().map(|c| c.fitness()).collect();
                    let distribution = CumulativeDistribution::from_weights(&weights);
                    for _ in 1..self.config.size_population {
                        pool.push(population[distribution.sample(&mut rng)].clone());
                    }
                }
                MedoidVariant::Hka => {
                    for _ in 1..self.config.size_population {
                        let winner =
                            tournament(&population, self.config.tournament_order, &mut rng);
                        pool.push(population[winner].clone());
                    }
                }
            }

            // D-MX on consecutive pairs past the elitist slot
            let mut index = 1;
            while index + 1 < pool.len() {
                if rng.gen::<f64>() < self.config.pc {
                    let (child1, child2) =
                        dmx_crossover(&pool[index], &pool[index + 1], n, self.config.pm, &mut rng);
                    pool[index] = child1;
                    pool[index + 1] = child2;
                }
                index += 2;
            }
            for chromosome in pool.iter_mut().skip(1) {
                if rng.gen::<f64>() < self.config.pm {
                    point_mutation(chromosome, n, &mut rng);
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
