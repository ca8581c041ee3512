//! Bidirectional centroid mutations: elements move toward the per-dimension
//! dataset maximum on a positive draw and toward the minimum on a negative
//! one.

use crate::chromosome::{CentroidChromosome, Chromosome};
use crate::instance::Dataset;
use crate::kernel;
use rand::Rng;

/// One `Δ ∈ [−R, R]` for the whole chromosome, with
/// `R = (M − M_min)/(M_max − M_min)` over the population's objective range
/// (1 when the range is zero). `Δ ≥ 0` pulls every element toward the
/// dataset maximum of its dimension, `Δ < 0` toward the minimum.
pub fn bidirectional_scaled_mutation<R: Rng>(
    chromosome: &mut CentroidChromosome,
    min_objective: f64,
    max_objective: f64,
    dataset: &Dataset,
    rng: &mut R,
) {
    let radius = if max_objective != min_objective {
        (chromosome.objective() - min_objective) / (max_objective - min_objective)
    } else {
        1.0
    };
    let delta = if radius > 0.0 {
        rng.gen_range(-radius..=radius)
    } else {
        0.0
    };
    let dim = chromosome.dim;
    if delta >= 0.0 {
        kernel::aasxpa(-delta, &mut chromosome.genes, dim, dataset.max_features());
    } else {
        kernel::aasxpa(delta, &mut chromosome.genes, dim, dataset.min_features());
    }
    chromosome.reset_evaluation();
}

/// A fresh `δ ∈ [−1, 1]` per element: `g += δ·(max_l − g)` when `δ ≥ 0`,
/// `g += δ·(g − min_l)` otherwise.
pub fn bidirectional_mutation<R: Rng>(
    chromosome: &mut CentroidChromosome,
    dataset: &Dataset,
    rng: &mut R,
) {
    let dim = chromosome.dim;
    let min_features = dataset.min_features();
    let max_features = dataset.max_features();
    for row in chromosome.genes.chunks_exact_mut(dim) {
        for (l, gene) in row.iter_mut().enumerate() {
            let delta: f64 = rng.gen_range(-1.0..=1.0);
            if delta >= 0.0 {
                *gene += delta * (max_features[l] - *gene);
            } else {
                *gene += delta * (*gene - min_features[l]);
            }
        }
    }
    chromosome.reset_evaluation();
}
