//! D-MX recombination for medoid index strings.

use crate::chromosome::MedoidChromosome;
use rand::seq::SliceRandom;
use rand::Rng;

fn take_distinct(source: impl Iterator<Item = usize>, k: usize) -> Vec<usize> {
    let mut taken = Vec::with_capacity(k);
    for value in source {
        if taken.len() == k {
            break;
        }
        if !taken.contains(&value) {
            taken.push(value);
        }
    }
    taken
}

/// Mixes the two parent strings into a pool of `2k` indices, shuffles it,
/// replaces each of the first `k` elements with a random dataset index with
/// probability `mix_mutation_prob`, shuffles again, and builds one child by
/// collecting `k` distinct indices left-to-right and the other right-to-left.
pub fn dmx_crossover<R: Rng>(
    parent1: &MedoidChromosome,
    parent2: &MedoidChromosome,
    num_instances: usize,
    mix_mutation_prob: f64,
    rng: &mut R,
) -> (MedoidChromosome, MedoidChromosome) {
    let k = parent1.medoids.len();
    debug_assert_eq!(k, parent2.medoids.len());

    let mut pool: Vec<usize> = parent1
        .medoids
        .iter()
        .chain(&parent2.medoids)
        .copied()
        .collect();
    pool.shuffle(rng);
    for slot in pool.iter_mut().take(k) {
        if rng.gen::<f64>() < mix_mutation_prob {
            *slot = rng.gen_range(0..num_instances);
        }
    }
    pool.shuffle(rng);

    let mut child1 = take_distinct(pool.iter().copied(), k);
    let mut child2 = take_distinct(pool.iter().rev().copied(), k);
    // the mix mutation can collapse the pool below k distinct values
    while child1.len() < k {
        let candidate = rng.gen_range(0..num_instances);
        if !child1.contains(&candidate) {
            child1.push(candidate);
        }
    }
    while child2.len() < k {
        let candidate = rng.gen_range(0..num_instances);
        if !child2.contains(&candidate) {
            child2.push(candidate);
        }
    }

    (MedoidChromosome::new(child1), MedoidChromosome::new(child2))
}
