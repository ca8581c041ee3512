//! Label-plus-centroids hybrid used by the EAC/F-EAC family.

use super::{label, Chromosome, UNEVALUATED_FITNESS, UNEVALUATED_OBJECTIVE, WORST_FITNESS};
use crate::cluster::centroids::{assign_to_centroids, random_centroids, recompute};
use crate::distance::Distance;
use crate::instance::Dataset;
use crate::matrix::{NullableRowMatrix, RowMatrix};
use rand::Rng;

/// Which mutation the chromosome last went through; drives the adaptive
/// operator proportion of F-EAC.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AppliedOperator {
    #[default]
    None,
    Mo1,
    Mo2,
}

/// A label string of length `n` together with a `k × d` centroid matrix
/// (rows may be dead when a cluster collapses), per-cluster instance counts
/// and per-cluster partial fitness values.
///
/// The three per-cluster vectors always have length equal to the current
/// `k`; a dead centroid row corresponds to a count of zero.
#[derive(Debug, Clone)]
pub struct FeacChromosome {
    pub labels: Vec<usize>,
    pub centroids: NullableRowMatrix,
    pub counts: Vec<u64>,
    pub partial_fc: Vec<f64>,
    pub applied_operator: AppliedOperator,
    last_objective: f64,
    fitness: f64,
    objective: f64,
}

impl FeacChromosome {
    /// Builds from a label array, recomputing centroids and counts.
    pub fn from_labels(labels: Vec<usize>, k: usize, dataset: &Dataset) -> Self {
        let (centroids, _, counts) = recompute(&labels, k, dataset);
        Self {
            labels,
            centroids,
            counts,
            partial_fc: vec![0.0; k],
            applied_operator: AppliedOperator::None,
            last_objective: UNEVALUATED_OBJECTIVE,
            fitness: UNEVALUATED_FITNESS,
            objective: UNEVALUATED_OBJECTIVE,
        }
    }

    /// Builds from a centroid matrix by nearest assignment.
    pub fn from_centroids<D: Distance>(seeds: &RowMatrix, dataset: &Dataset, dist: &D) -> Self {
        let labels = assign_to_centroids(seeds, dataset, dist);
        Self::from_labels(labels, seeds.num_rows(), dataset)
    }

    /// Random genotype: `k` instances drawn without replacement seed the
    /// centroids, labels follow by nearest assignment.
    pub fn random<D: Distance, R: Rng>(
        k: usize,
        dataset: &Dataset,
        dist: &D,
        rng: &mut R,
    ) -> Self {
        let seeds = random_centroids(k, dataset, rng);
        Self::from_centroids(&seeds, dataset, dist)
    }

    pub fn num_instances(&self) -> usize {
        self.labels.len()
    }

    /// A chromosome needs at least two clusters to encode a partition worth
    /// evolving.
    pub fn is_viable(&self) -> bool {
        self.num_clusters() >= 2
    }

    pub fn last_objective(&self) -> f64 {
        self.last_objective
    }

    /// Remembers the current objective before re-evaluation, so the mean
    /// objective change per operator can be estimated next generation.
    pub fn save_last_objective(&mut self) {
        self.last_objective = self.objective;
    }

    pub fn set_partial_fc(&mut self, partial_fc: Vec<f64>) {
        debug_assert_eq!(partial_fc.len(), self.num_clusters());
        self.partial_fc = partial_fc;
    }

    /// Drops dead clusters, relabels the survivors contiguously and shrinks
    /// the per-cluster vectors. With fewer than two survivors the chromosome
    /// is kept but marked non-viable with the worst fitness.
    pub fn compact(&mut self) {
        let keep: Vec<usize> = (0..self.counts.len())
            .filter(|&j| self.counts[j] != 0)
            .collect();
        if keep.len() != self.counts.len() {
            label::relabel_keep(&mut self.labels, &keep);
            self.centroids.keep_rows(&keep);
            self.counts = keep.iter().map(|&j| self.counts[j]).collect();
            self.partial_fc = keep.iter().map(|&j| self.partial_fc[j]).collect();
        }
        if self.num_clusters() < 2 {
            self.fitness = WORST_FITNESS;
        }
    }
}

impl PartialEq for FeacChromosome {
    fn eq(&self, other: &Self) -> bool {
        self.labels == other.labels && self.centroids == other.centroids
    }
}

impl std::fmt::Display for FeacChromosome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "k={} labels={:?}", self.num_clusters(), self.labels)?;
        writeln!(f, "counts={:?}", self.counts)?;
        write!(f, "centroids:")?;
        for (j, row) in self.centroids.live_rows() {
            write!(f, " [{j}]{row:?}")?;
        }
        Ok(())
    }
}

impl Chromosome for FeacChromosome {
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
        self.centroids.num_rows()
    }

    fn decode<D: Distance>(&self, _dataset: &Dataset, _dist: &D) -> Vec<usize> {
        self.labels.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::distance::Euclidean;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    fn dataset() -> Dataset {
        Dataset::from_rows(&[vec![0.0], vec![1.0], vec![10.0], vec![11.0]]).unwrap()
    }

    #[test]
    fn random_chromosome_is_consistent() {
        let dataset = dataset();
        let mut rng = SmallRng::seed_from_u64(11);
        let chromosome = FeacChromosome::random(2, &dataset, &Euclidean, &mut rng);
        assert_eq!(chromosome.counts.iter().sum::<u64>(), 4);
        assert_eq!(chromosome.partial_fc.len(), 2);
        assert!(chromosome.labels.iter().all(|&l| l < 2));
    }

    #[test]
    fn compacting_below_two_clusters_marks_nonviable() {
        let dataset = dataset();
        let mut chromosome = FeacChromosome::from_labels(vec![1, 1, 1, 1], 3, &dataset);
        chromosome.compact();
        assert_eq!(chromosome.num_clusters(), 1);
        assert!(!chromosome.is_viable());
        assert_eq!(chromosome.fitness(), WORST_FITNESS);
        assert_eq!(chromosome.labels, vec![0, 0, 0, 0]);
    }
}
