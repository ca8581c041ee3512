//! Objective functions and fitness scaling.
//!
//! Every objective reports per-cluster partial scores alongside the scalar,
//! so the cluster-aware mutation operators can weight cluster selection by
//! cluster quality.

pub mod rand_index;
pub mod ranking;
pub mod silhouette;
pub mod sse;

pub use rand_index::{confusion_matrix, partial_rand_index};
pub use ranking::linear_normalization;
pub use silhouette::simplified_silhouette;
pub use sse::sse;

/// A scalar objective plus its per-cluster decomposition.
#[derive(Debug, Clone, PartialEq)]
pub struct Evaluation {
    pub objective: f64,
    pub partials: Vec<f64>,
}

impl Evaluation {
    /// Mean of the partials as the scalar objective.
    pub fn from_partial_means(partials: Vec<f64>) -> Self {
        let objective = if partials.is_empty() {
            0.0
        } else {
            partials.iter().sum::<f64>() / partials.len() as f64
        };
        Self {
            objective,
            partials,
        }
    }
}
