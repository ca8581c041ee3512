//! Variable-length real string of concatenated centroids.

use super::{Chromosome, UNEVALUATED_FITNESS, UNEVALUATED_OBJECTIVE};
use crate::cluster::centroids::{assign_to_centroids, random_centroids};
use crate::distance::Distance;
use crate::instance::Dataset;
use crate::matrix::RowMatrix;
use rand::Rng;

/// A string of `k·d` reals, reshaped as a `k × d` centroid matrix. `k` may
/// grow or shrink between generations within the configured range.
#[derive(Debug, Clone)]
pub struct CentroidChromosome {
    pub genes: Vec<f64>,
    pub dim: usize,
    fitness: f64,
    objective: f64,
}

impl CentroidChromosome {
    pub fn new(genes: Vec<f64>, dim: usize) -> Self {
        debug_assert_eq!(genes.len() % dim, 0);
        Self {
            genes,
            dim,
            fitness: UNEVALUATED_FITNESS,
            objective: UNEVALUATED_OBJECTIVE,
        }
    }

    pub fn from_matrix(matrix: &RowMatrix) -> Self {
        Self::new(matrix.as_slice().to_vec(), matrix.num_cols())
    }

    /// `k` random instances become the initial centroids.
    pub fn random<R: Rng>(k: usize, dataset: &Dataset, rng: &mut R) -> Self {
        Self::from_matrix(&random_centroids(k, dataset, rng))
    }

    pub fn to_matrix(&self) -> RowMatrix {
        RowMatrix::from_vec(self.dim, self.genes.clone())
    }

    pub fn centroid(&self, k: usize) -> &[f64] {
        &self.genes[k * self.dim..(k + 1) * self.dim]
    }

    pub fn centroids(&self) -> impl Iterator<Item = &[f64]> {
        self.genes.chunks_exact(self.dim)
    }
}

impl PartialEq for CentroidChromosome {
    fn eq(&self, other: &Self) -> bool {
        self.dim == other.dim && self.genes == other.genes
    }
}

impl Chromosome for CentroidChromosome {
    fn fitness(&self) -> f64 {
        self.fitness
    }

    fn set_fitness(&mut self, fitness: f64) {
        self.fitness = fitness;
    }

    fn objective(&self) -> f64 {
        self.objective
    }

    fn set_objective(&mut self, objective: f64) {
        self.objective = objective;
    }

    fn num_clusters(&self) -> usize {
        self.genes.len() / self.dim
    }

    fn decode<D: Distance>(&self, dataset: &Dataset, dist: &D) -> Vec<usize> {
        assign_to_centroids(&self.to_matrix(), dataset, dist)
    }
}
