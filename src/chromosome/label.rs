//! Fixed-length integer label string.

use super::{Chromosome, UNEVALUATED_FITNESS, UNEVALUATED_OBJECTIVE};
use crate::distance::Distance;
use crate::instance::Dataset;
use rand::Rng;

/// One gene per instance, each carrying a cluster index in `0..k`. The
/// active `k` is carried alongside the string.
#[derive(Debug, Clone)]
pub struct LabelChromosome {
    pub labels: Vec<usize>,
    pub num_clusters: usize,
    fitness: f64,
    objective: f64,
}

impl LabelChromosome {
    pub fn new(labels: Vec<usize>, num_clusters: usize) -> Self {
        debug_assert!(labels.iter().all(|&l| l < num_clusters));
        Self {
            labels,
            num_clusters,
            fitness: UNEVALUATED_FITNESS,
            objective: UNEVALUATED_OBJECTIVE,
        }
    }

    /// Random genotype: each gene takes a uniform value in `0..k`.
    pub fn random<R: Rng>(num_instances: usize, num_clusters: usize, rng: &mut R) -> Self {
        let labels = (0..num_instances)
            .map(|_| rng.gen_range(0..num_clusters))
            .collect();
        Self::new(labels, num_clusters)
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Drops unused cluster indices and renumbers the rest contiguously in
    /// order of first appearance. Returns the new `k`.
    pub fn compact_labels(&mut self) -> usize {
        self.num_clusters = compact_labels(&mut self.labels);
        self.num_clusters
    }
}

impl PartialEq for LabelChromosome {
    fn eq(&self, other: &Self) -> bool {
        self.labels == other.labels && self.num_clusters == other.num_clusters
    }
}

impl std::fmt::Display for LabelChromosome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "k={} labels={:?}", self.num_clusters, self.labels)
    }
}

impl Chromosome for LabelChromosome {
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
        self.num_clusters
    }

    fn decode<D: Distance>(&self, _dataset: &Dataset, _dist: &D) -> Vec<usize> {
        self.labels.clone()
    }
}

/// Relabels so that the clusters listed in `keep` become `0..keep.len()`,
/// in the given order. Labels not listed must no longer occur.
pub fn relabel_keep(labels: &mut [usize], keep: &[usize]) {
    for (new, &old) in keep.iter().enumerate() {
        if old != new {
            for label in labels.iter_mut() {
                if *label == old {
                    *label = new;
                }
            }
        }
    }
}

/// Renumbers the labels contiguously in order of first appearance and
/// returns the resulting cluster count.
pub fn compact_labels(labels: &mut [usize]) -> usize {
    let mut mapping: Vec<Option<usize>> = Vec::new();
    let mut next = 0;
    for label in labels.iter_mut() {
        if *label >= mapping.len() {
            mapping.resize(*label + 1, None);
        }
        let mapped = match mapping[*label] {
            Some(m) => m,
            None => {
                mapping[*label] = Some(next);
                next += 1;
                next - 1
            }
        };
        *label = mapped;
    }
    next
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    #[test]
    fn random_genes_stay_in_range() {
        let mut rng = SmallRng::seed_from_u64(5);
        let chromosome = LabelChromosome::random(40, 3, &mut rng);
        assert!(chromosome.labels.iter().all(|&l| l < 3));
    }

    #[test]
    fn relabel_keep_renumbers_in_order() {
        let mut labels = vec![0, 2, 2, 3, 0];
        relabel_keep(&mut labels, &[0, 2, 3]);
        assert_eq!(labels, vec![0, 1, 1, 2, 0]);
    }

    #[test]
    fn compact_follows_first_appearance() {
        let mut labels = vec![4, 1, 4, 7];
        assert_eq!(compact_labels(&mut labels), 3);
        assert_eq!(labels, vec![0, 1, 0, 2]);
    }

    #[test]
    fn payload_equality_ignores_scores() {
        let mut a = LabelChromosome::new(vec![0, 1], 2);
        let b = LabelChromosome::new(vec![0, 1], 2);
        a.set_fitness(3.0);
        assert_eq!(a, b);
    }
}
