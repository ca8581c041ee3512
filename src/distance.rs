//! Distance functors and the precomputed dissimilarity matrix.

use crate::instance::Dataset;
use crate::matrix::TriangularMatrix;

/// A stateless dissimilarity between two feature vectors of equal dimension.
///
/// Implementations must be nonnegative, symmetric and zero iff `x ≡ y`. The
/// triangle inequality is only assumed where named (MST construction);
/// fitness functions do not require it, which is why [`SquaredEuclidean`] is
/// admissible there.
pub trait Distance {
    fn distance(&self, x: &[f64], y: &[f64]) -> f64;
}

/// Euclidean (L2) distance.
#[derive(Clone, Copy, Debug, Default)]
pub struct Euclidean;

impl Distance for Euclidean {
    fn distance(&self, x: &[f64], y: &[f64]) -> f64 {
        debug_assert_eq!(x.len(), y.len());
        x.iter()
            .zip(y)
            .map(|(a, b)| (a - b) * (a - b))
            .sum::<f64>()
            .sqrt()
    }
}

/// Squared Euclidean distance; the metric J1/SSE accumulates.
#[derive(Clone, Copy, Debug, Default)]
pub struct SquaredEuclidean;

impl Distance for SquaredEuclidean {
    fn distance(&self, x: &[f64], y: &[f64]) -> f64 {
        debug_assert_eq!(x.len(), y.len());
        x.iter().zip(y).map(|(a, b)| (a - b) * (a - b)).sum()
    }
}

/// Pairwise instance dissimilarities, computed once per run and read-only
/// afterwards. Backs the medoid operators and the graph primitives.
#[derive(Debug, Clone)]
pub struct DissimilarityMatrix {
    matrix: TriangularMatrix,
}

impl DissimilarityMatrix {
    pub fn compute<D: Distance>(dataset: &Dataset, dist: &D) -> Self {
        let n = dataset.num_instances();
        let mut matrix = TriangularMatrix::zeroed(n);
        for i in 1..n {
            for j in 0..i {
                matrix.set(i, j, dist.distance(dataset.features(i), dataset.features(j)));
            }
        }
        Self { matrix }
    }

    pub fn num_instances(&self) -> usize {
        self.matrix.len()
    }

    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.matrix.get(i, j)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::instance::Dataset;
    use approx::assert_relative_eq;

    #[test]
    fn euclidean_vs_squared() {
        let x = [0.0, 0.0];
        let y = [3.0, 4.0];
        assert_relative_eq!(Euclidean.distance(&x, &y), 5.0);
        assert_relative_eq!(SquaredEuclidean.distance(&x, &y), 25.0);
    }

    #[test]
    fn dissimilarity_is_symmetric() {
        let dataset =
            Dataset::from_rows(&[vec![0.0, 0.0], vec![3.0, 4.0], vec![0.0, 1.0]]).unwrap();
        let d = DissimilarityMatrix::compute(&dataset, &Euclidean);
        assert_relative_eq!(d.get(0, 1), 5.0);
        assert_relative_eq!(d.get(1, 0), 5.0);
        assert_relative_eq!(d.get(2, 2), 0.0);
    }
}
