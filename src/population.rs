//! The population container.

use crate::chromosome::Chromosome;
use ordered_float::OrderedFloat;

#[derive(Debug, Clone)]
pub struct Population<C: Chromosome> {
    pub chromosomes: Vec<C>,
}

impl<C: Chromosome> Population<C> {
    pub fn new(chromosomes: Vec<C>) -> Self {
        Self { chromosomes }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            chromosomes: Vec::with_capacity(capacity),
        }
    }

    pub fn size(&self) -> usize {
        self.chromosomes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chromosomes.is_empty()
    }

    pub fn push(&mut self, chromosome: C) {
        self.chromosomes.push(chromosome);
    }

    pub fn best_by_objective(&self) -> Option<&C> {
        self.chromosomes
            .iter()
            .max_by_key(|c| OrderedFloat(c.objective()))
    }

    pub fn best_index_by_objective(&self) -> Option<usize> {
        (0..self.chromosomes.len()).max_by_key(|&i| OrderedFloat(self.chromosomes[i].objective()))
    }

    /// Ascending objective sort (lowest first), stable.
    pub fn sort_by_objective_asc(&mut self) {
        self.chromosomes
            .sort_by_key(|c| OrderedFloat(c.objective()));
    }

    pub fn objectives(&self) -> impl Iterator<Item = f64> + '_ {
        self.chromosomes.iter().map(|c| c.objective())
    }

    pub fn fitnesses(&self) -> impl Iterator<Item = f64> + '_ {
        self.chromosomes.iter().map(|c| c.fitness())
    }
}
