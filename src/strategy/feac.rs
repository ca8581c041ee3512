//! The EAC family: EAC, EAC-I, EAC-II, EAC-III and F-EAC.
//!
//! Label-plus-centroids chromosomes with a variable cluster count are
//! improved by a k-means local search every generation, evaluated by the
//! simplified silhouette (or the partial Rand index when class labels
//! exist), and mutated by cluster elimination (MO1) or cluster split (MO2).
//! The variants differ in fitness scaling, in how clusters are picked for
//! mutation, and in whether the MO1/MO2 proportion adapts to the operators'
//! recent gains.

use crate::chromosome::feac::{AppliedOperator, FeacChromosome};
use crate::chromosome::{Chromosome, WORST_FITNESS};
use crate::cluster::kmeans::kmeans_local_search;
use crate::distance::Distance;
use crate::error::{Error, Result};
use crate::fitness::{
    confusion_matrix, linear_normalization, partial_rand_index, simplified_silhouette, Evaluation,
};
use crate::instance::Dataset;
use crate::mutate::mo::{mo1, mo2, operator_proportion, ClusterWeighting};
use crate::select::CumulativeDistribution;
use crate::strategy::{EvolveConfig, FitnessOrdering, RunOutcome, RunSummary, RuntimeLog};
use log::debug;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use std::time::Instant;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeacVariant {
    Eac,
    EacI,
    EacII,
    EacIII,
    Feac,
}

impl FeacVariant {
    fn weighting(self) -> ClusterWeighting {
        match self {
            FeacVariant::Eac => ClusterWeighting::Uniform,
            FeacVariant::EacI | FeacVariant::EacIII => ClusterWeighting::Complement,
            FeacVariant::EacII | FeacVariant::Feac => ClusterWeighting::LinearRank,
        }
    }

    fn adapts_proportion(self) -> bool {
        matches!(self, FeacVariant::EacIII | FeacVariant::Feac)
    }

    fn uses_linear_ranking(self) -> bool {
        !matches!(self, FeacVariant::Eac)
    }
}

/// Which objective scores the chromosomes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeacObjective {
    SimplifiedSilhouette,
    /// Needs class labels on the dataset.
    PartialRandIndex,
}

pub struct Feac {
    variant: FeacVariant,
    config: EvolveConfig,
    objective: FeacObjective,
}

impl Feac {
    pub fn new(variant: FeacVariant, config: EvolveConfig) -> Self {
        Self {
            variant,
            config,
            objective: FeacObjective::SimplifiedSilhouette,
        }
    }

    pub fn with_objective(mut self, objective: FeacObjective) -> Self {
        self.objective = objective;
        self
    }

    fn evaluate<D: Distance>(
        &self,
        chromosome: &FeacChromosome,
        dataset: &Dataset,
        dist: &D,
    ) -> Evaluation {
        match self.objective {
            FeacObjective::SimplifiedSilhouette => simplified_silhouette(
                &chromosome.centroids,
                &chromosome.labels,
                &chromosome.counts,
                dataset,
                dist,
            ),
            FeacObjective::PartialRandIndex => {
                let num_classes = dataset
                    .instances()
                    .iter()
                    .filter_map(|i| i.class_idx())
                    .max()
                    .map_or(0, |c| c + 1);
                let confusion = confusion_matrix(
                    &chromosome.labels,
                    chromosome.num_clusters(),
                    num_classes,
                    dataset,
                );
                partial_rand_index(&confusion)
            }
        }
    }

    pub fn run<D: Distance + Sync>(
        &self,
        dataset: &Dataset,
        dist: &D,
    ) -> Result<RunOutcome<FeacChromosome>> {
        let n = dataset.num_instances();
        let k_min = self.config.k_min;
        if k_min > n {
            return Err(Error::ConfigurationInvalid(
                "k_min exceeds the number of instances",
            ));
        }
        let k_max = self.config.effective_k_max(n);
        if self.objective == FeacObjective::PartialRandIndex && !dataset.has_class_labels() {
            return Err(Error::ConfigurationInvalid(
                "partial Rand index needs class labels",
            ));
        }

        let ordering = FitnessOrdering::Maximize;
        let mut rng = SmallRng::seed_from_u64(self.config.random_seed);
        let started = Instant::now();
        let mut log = RuntimeLog::new();
        let mut best: Option<FeacChromosome> = None;
        let mut best_objective = ordering.worst();
        let mut iteration_gets_best = 0;
        let mut run_time_gets_best = started.elapsed();
        let mut p_mo = 0.5;
        let mut generation = 0usize;

        let mut population: Vec<FeacChromosome> = (0..self.config.size_population)
            .map(|_| {
                let k = rng.gen_range(k_min..=k_max);
                FeacChromosome::random(k, dataset, dist, &mut rng)
            })
            .collect();

        loop {
            generation += 1;

            // local search
            let local_search = |chromosome: &mut FeacChromosome| {
                if kmeans_local_search(
                    chromosome,
                    dataset,
                    dist,
                    self.config.kmeans_max_iter,
                    self.config.kmeans_eps,
                )
                .is_err()
                {
                    chromosome.set_fitness(WORST_FITNESS);
                }
            };
            if self.config.par_fitness {
                population.par_iter_mut().for_each(local_search);
            } else {
                population.iter_mut().for_each(local_search);
            }

            // evaluate
            for chromosome in &mut population {
                chromosome.save_last_objective();
            }
            let evaluations: Vec<Evaluation> = if self.config.par_fitness {
                population
                    .par_iter()
                    .map(|c| self.evaluate(c, dataset, dist))
                    .collect()
            } else {
                population
                    .iter()
                    .map(|c| self.evaluate(c, dataset, dist))
                    .collect()
            };
            for (chromosome, evaluation) in population.iter_mut().zip(evaluations) {
                chromosome.set_partial_fc(evaluation.partials);
                chromosome.set_objective(evaluation.objective);
            }

            // fitness scaling
            if self.variant.uses_linear_ranking() {
                let objectives: Vec<f64> = population.iter().map(|c| c.objective()).collect();
                let ranked = linear_normalization(&objectives, 1.0);
                for (chromosome, fitness) in population.iter_mut().zip(ranked) {
                    chromosome.set_fitness(fitness);
                }
            } else {
                for chromosome in &mut population {
                    chromosome.set_fitness(chromosome.objective() + 1.0);
                }
            }
            for chromosome in &mut population {
                if !chromosome.is_viable() {
                    chromosome.set_fitness(WORST_FITNESS);
                }
            }

            // elitism bookkeeping (comparison is by objective)
            if let Some(generation_best) = population
                .iter()
                .filter(|c| c.is_viable())
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
            debug!(
                "generation {generation}: best objective {best_objective:.6}, p_mo {p_mo:.3}"
            );

            if ordering.reached(best_objective, self.config.desirable_objective)
                || generation >= self.config.max_generations
                || started.elapsed() >= self.config.max_execution_time
            {
                break;
            }

            // selection (roulette over fitness, elitist slot 0). With no
            // viable chromosome seen yet, reseed the population instead.
            let Some(elite) = best.clone() else {
                population = (0..self.config.size_population)
                    .map(|_| {
                        let k = rng.gen_range(k_min..=k_max);
                        FeacChromosome::random(k, dataset, dist, &mut rng)
                    })
                    .collect();
                continue;
            };
            let weights: Vec<f64> = population.iter().map(|c| c.fitness().max(0.0)).collect();
            let distribution = CumulativeDistribution::from_weights(&weights);
            let mut pool = Vec::with_capacity(self.config.size_population);
            pool.push(elite);
            for _ in 1..self.config.size_population {
                let index = distribution.sample(&mut rng);
                pool.push(population[index].clone());
            }

            // adaptive MO1/MO2 proportion
            if self.variant.adapts_proportion() {
                let mut gain = [(0.0, 0usize), (0.0, 0usize)];
                for chromosome in &pool {
                    if !chromosome.last_objective().is_finite() {
                        continue;
                    }
                    let delta = chromosome.objective() - chromosome.last_objective();
                    match chromosome.applied_operator {
                        AppliedOperator::Mo1 => {
                            gain[0].0 += delta;
                            gain[0].1 += 1;
                        }
                        AppliedOperator::Mo2 => {
                            gain[1].0 += delta;
                            gain[1].1 += 1;
                        }
                        AppliedOperator::None => {}
                    }
                }
                let daf = |(sum, count): (f64, usize)| {
                    if count == 0 {
                        0.0
                    } else {
                        sum / count as f64
                    }
                };
                p_mo = operator_proportion(daf(gain[0]), daf(gain[1]));
            }

            // mutation
            let weighting = self.variant.weighting();
            let evaluate_inline =
                |c: &FeacChromosome, ds: &Dataset| -> Evaluation { self.evaluate(c, ds, dist) };
            for chromosome in &mut pool {
                if rng.gen::<f64>() < p_mo {
                    chromosome.applied_operator = AppliedOperator::Mo1;
                    mo1(chromosome, dataset, dist, weighting, &evaluate_inline, &mut rng);
                } else {
                    chromosome.applied_operator = AppliedOperator::Mo2;
                    mo2(
                        chromosome,
                        dataset,
                        dist,
                        weighting,
                        k_max,
                        &evaluate_inline,
                        &mut rng,
                    );
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
