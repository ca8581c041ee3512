//! Evolutionary drivers.
//!
//! Every driver runs the same generation pipeline — initialize, optional
//! local search, evaluate, scale fitness, keep the best, check the stop
//! rule, select, recombine, mutate, replace — and differs only in encoding,
//! selection policy, operator pool and scaling. Runs are bit-reproducible
//! per configured seed.

pub mod cbga;
pub mod centroid_ga;
pub mod cga;
pub mod config;
pub mod crisp;
pub mod feac;
pub mod gga;
pub mod gka;
pub mod label_ga;
pub mod medoid;
pub mod runtime;

pub use config::{Builder as EvolveConfigBuilder, EvolveConfig, TryFromBuilderError};
pub use runtime::{GenerationSample, RuntimeLog};

use std::time::Duration;

/// Whether a driver's objective improves upward or downward.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FitnessOrdering {
    Maximize,
    Minimize,
}

impl FitnessOrdering {
    pub(crate) fn improves(self, candidate: f64, incumbent: f64) -> bool {
        match self {
            FitnessOrdering::Maximize => candidate > incumbent,
            FitnessOrdering::Minimize => candidate < incumbent,
        }
    }

    /// Worst representable objective under this ordering.
    pub(crate) fn worst(self) -> f64 {
        match self {
            FitnessOrdering::Maximize => f64::NEG_INFINITY,
            FitnessOrdering::Minimize => f64::INFINITY,
        }
    }

    pub(crate) fn reached(self, best: f64, desirable: Option<f64>) -> bool {
        desirable.is_some_and(|target| self.improves(best, target))
    }
}

/// What a run reports besides the best chromosome.
#[derive(Debug, Clone, PartialEq)]
pub struct RunSummary {
    pub num_cluster_k: usize,
    /// Final objective of the best chromosome.
    pub metric_func_run: f64,
    pub fitness: f64,
    pub algorithm_run_time: Duration,
    pub num_total_generations: usize,
    pub iteration_gets_best: usize,
    pub run_time_gets_best: Duration,
    pub total_invalid_offspring: usize,
}

impl std::fmt::Display for RunSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "run_summary:")?;
        writeln!(f, "  num_cluster_k: {}", self.num_cluster_k)?;
        writeln!(f, "  metric_func_run: {}", self.metric_func_run)?;
        writeln!(f, "  fitness: {}", self.fitness)?;
        writeln!(f, "  algorithm_run_time: {:?}", self.algorithm_run_time)?;
        writeln!(f, "  num_total_generations: {}", self.num_total_generations)?;
        writeln!(f, "  iteration_gets_best: {}", self.iteration_gets_best)?;
        writeln!(f, "  run_time_gets_best: {:?}", self.run_time_gets_best)?;
        writeln!(
            f,
            "  total_invalid_offspring: {}",
            self.total_invalid_offspring
        )
    }
}

/// The best chromosome with its run summary and the per-generation log.
#[derive(Debug, Clone)]
pub struct RunOutcome<C> {
    pub best: C,
    pub summary: RunSummary,
    pub log: RuntimeLog,
}
