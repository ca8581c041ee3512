//! Fitness-proportional selection through a cumulative distribution.

use rand::Rng;

/// A cumulative probability distribution over indices, built by dividing
/// each weight by the total. When the total is zero or negative the
/// distribution falls back to uniform.
#[derive(Debug, Clone)]
pub struct CumulativeDistribution {
    cumulative: Vec<f64>,
}

impl CumulativeDistribution {
    pub fn from_weights(weights: &[f64]) -> Self {
        let n = weights.len();
        let total: f64 = weights.iter().sum();
        let cumulative = if total > 0.0 {
            let mut acc = 0.0;
            weights
                .iter()
                .map(|w| {
                    acc += w / total;
                    acc
                })
                .collect()
        } else {
            (1..=n).map(|i| i as f64 / n as f64).collect()
        };
        Self { cumulative }
    }

    pub fn len(&self) -> usize {
        self.cumulative.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cumulative.is_empty()
    }

    /// Draws an index in `0..len` proportionally to the weights.
    pub fn sample<R: Rng>(&self, rng: &mut R) -> usize {
        self.sample_in(0, rng)
    }

    /// Draws an index in `[begin, len)`, scanning the cumulative from
    /// `begin`; the leading slots stay reserved (elitism).
    pub fn sample_in<R: Rng>(&self, begin: usize, rng: &mut R) -> usize {
        let u: f64 = rng.gen();
        let mut idx = begin;
        while idx < self.cumulative.len() && u > self.cumulative[idx] {
            idx += 1;
        }
        idx.min(self.cumulative.len() - 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    #[test]
    fn heavier_weights_win_more_often() {
        let distribution = CumulativeDistribution::from_weights(&[1.0, 9.0]);
        let mut rng = SmallRng::seed_from_u64(0);
        let wins = (0..1000)
            .filter(|_| distribution.sample(&mut rng) == 1)
            .count();
        assert!(wins > 800);
    }

    #[test]
    fn non_positive_sum_falls_back_to_uniform() {
        let distribution = CumulativeDistribution::from_weights(&[0.0, 0.0, 0.0]);
        let mut rng = SmallRng::seed_from_u64(1);
        let mut seen = [0usize; 3];
        for _ in 0..3000 {
            seen[distribution.sample(&mut rng)] += 1;
        }
        assert!(seen.iter().all(|&count| count > 800));
    }

    #[test]
    fn begin_offset_reserves_leading_slots() {
        let distribution = CumulativeDistribution::from_weights(&[100.0, 1.0, 1.0]);
        let mut rng = SmallRng::seed_from_u64(2);
        for _ in 0..100 {
            assert!(distribution.sample_in(1, &mut rng) >= 1);
        }
    }
}
