//! Medoid index string: genes are dataset indices naming cluster
//! representatives.

use super::{Chromosome, UNEVALUATED_FITNESS, UNEVALUATED_OBJECTIVE};
use crate::cluster::nearest::nearest_medoid;
use crate::distance::{Distance, DissimilarityMatrix};
use crate::instance::Dataset;
use rand::Rng;

#[derive(Debug, Clone)]
pub struct MedoidChromosome {
    pub medoids: Vec<usize>,
    fitness: f64,
    objective: f64,
}

impl MedoidChromosome {
    pub fn new(medoids: Vec<usize>) -> Self {
        Self {
            medoids,
            fitness: UNEVALUATED_FITNESS,
            objective: UNEVALUATED_OBJECTIVE,
        }
    }

    /// `k` distinct instance indices drawn without replacement.
    pub fn random<R: Rng>(k: usize, num_instances: usize, rng: &mut R) -> Self {
        Self::new(rand::seq::index::sample(rng, num_instances, k).into_vec())
    }

    /// Labels through the precomputed dissimilarity matrix.
    pub fn decode_with_dissimilarity(&self, dissimilarity: &DissimilarityMatrix) -> Vec<usize> {
        (0..dissimilarity.num_instances())
            .map(|i| nearest_medoid(i, &self.medoids, dissimilarity).0)
            .collect()
    }
}

impl PartialEq for MedoidChromosome {
    fn eq(&self, other: &Self) -> bool {
        self.medoids == other.medoids
    }
}

impl Chromosome for MedoidChromosome {
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
        self.medoids.len()
    }

    fn decode<D: Distance>(&self, dataset: &Dataset, dist: &D) -> Vec<usize> {
        (0..dataset.num_instances())
            .map(|i| {
                let x = dataset.features(i);
                self.medoids
                    .iter()
                    .enumerate()
                    .map(|(k, &m)| (k, dist.distance(x, dataset.features(m))))
                    .min_by(|(_, a), (_, b)| a.total_cmp(b))
                    .map(|(k, _)| k)
                    .expect("at least one medoid")
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::distance::Euclidean;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    #[test]
    fn random_medoids_are_distinct() {
        let mut rng = SmallRng::seed_from_u64(2);
        let chromosome = MedoidChromosome::random(4, 10, &mut rng);
        let mut sorted = chromosome.medoids.clone();
        sorted.sort_unstable();
        sorted.dedup();
        assert_eq!(sorted.len(), 4);
    }

    #[test]
    fn decode_matches_dissimilarity_decode() {
        let dataset =
            Dataset::from_rows(&[vec![0.0], vec![1.0], vec![9.0], vec![10.0]]).unwrap();
        let dissimilarity = DissimilarityMatrix::compute(&dataset, &Euclidean);
        let chromosome = MedoidChromosome::new(vec![0, 3]);
        assert_eq!(
            chromosome.decode(&dataset, &Euclidean),
            chromosome.decode_with_dissimilarity(&dissimilarity)
        );
    }
}
