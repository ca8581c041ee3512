//! Crisp binary partition matrix encoding.

use super::{Chromosome, UNEVALUATED_FITNESS, UNEVALUATED_OBJECTIVE};
use crate::distance::Distance;
use crate::instance::Dataset;
use crate::matrix::BitMatrix;
use crate::partition::{labels_to_crisp, CrispPartition, Partition};

/// A `k × n` bit matrix with exactly one set bit per column; row `k` set in
/// column `i` means instance `i` belongs to cluster `k`.
#[derive(Debug, Clone)]
pub struct CrispChromosome {
    pub matrix: BitMatrix,
    fitness: f64,
    objective: f64,
}

impl CrispChromosome {
    pub fn new(matrix: BitMatrix) -> Self {
        Self {
            matrix,
            fitness: UNEVALUATED_FITNESS,
            objective: UNEVALUATED_OBJECTIVE,
        }
    }

    pub fn from_labels(labels: &[usize], num_clusters: usize) -> Self {
        Self::new(labels_to_crisp(labels, num_clusters))
    }

    pub fn num_instances(&self) -> usize {
        self.matrix.num_cols()
    }

    /// Every column sums to one and every row is non-empty.
    pub fn is_well_formed(&self) -> bool {
        let columns_ok = (0..self.matrix.num_cols()).all(|c| {
            (0..self.matrix.num_rows())
                .filter(|&r| self.matrix.get(r, c))
                .count()
                == 1
        });
        let rows_ok = (0..self.matrix.num_rows()).all(|r| self.matrix.row_count_ones(r) >= 1);
        columns_ok && rows_ok
    }
}

impl PartialEq for CrispChromosome {
    fn eq(&self, other: &Self) -> bool {
        self.matrix == other.matrix
    }
}

impl Chromosome for CrispChromosome {
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
        self.matrix.num_rows()
    }

    fn decode<D: Distance>(&self, _dataset: &Dataset, _dist: &D) -> Vec<usize> {
        CrispPartition::new(&self.matrix).to_labels()
    }
}
