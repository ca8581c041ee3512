//! The dataset model: instances, the dataset container and the class-label
//! interner.

use crate::error::{Error, Result};

/// An immutable feature vector, optionally carrying an id, an interned class
/// label index and an integer frequency (multiplicity).
#[derive(Debug, Clone, PartialEq)]
pub struct Instance {
    features: Vec<f64>,
    id: Option<String>,
    class_idx: Option<usize>,
    frequency: u64,
}

impl Instance {
    pub fn new(features: Vec<f64>) -> Self {
        Self {
            features,
            id: None,
            class_idx: None,
            frequency: 1,
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_class_idx(mut self, class_idx: usize) -> Self {
        self.class_idx = Some(class_idx);
        self
    }

    pub fn with_frequency(mut self, frequency: u64) -> Self {
        self.frequency = frequency;
        self
    }

    pub fn features(&self) -> &[f64] {
        &self.features
    }

    pub fn dim(&self) -> usize {
        self.features.len()
    }

    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    pub fn class_idx(&self) -> Option<usize> {
        self.class_idx
    }

    pub fn frequency(&self) -> u64 {
        self.frequency
    }
}

/// An ordered sequence of instances of one fixed dimension.
///
/// The dimension is set by the first instance and is an invariant for the
/// run; a mismatching instance is rejected at construction. Per-dimension
/// feature ranges are computed once and cached, since the bidirectional
/// mutations draw on them every generation.
#[derive(Debug, Clone)]
pub struct Dataset {
    instances: Vec<Instance>,
    dim: usize,
    min_features: Vec<f64>,
    max_features: Vec<f64>,
}

impl Dataset {
    pub fn new(instances: Vec<Instance>) -> Result<Self> {
        let Some(first) = instances.first() else {
            return Err(Error::ConfigurationInvalid("dataset is empty"));
        };
        let dim = first.dim();
        if dim == 0 {
            return Err(Error::ConfigurationInvalid("instances have no features"));
        }
        for instance in &instances {
            if instance.dim() != dim {
                return Err(Error::DimensionMismatch {
                    expected: dim,
                    actual: instance.dim(),
                });
            }
        }
        let mut min_features = vec![f64::INFINITY; dim];
        let mut max_features = vec![f64::NEG_INFINITY; dim];
        for instance in &instances {
            for (l, &x) in instance.features().iter().enumerate() {
                min_features[l] = min_features[l].min(x);
                max_features[l] = max_features[l].max(x);
            }
        }
        Ok(Self {
            instances,
            dim,
            min_features,
            max_features,
        })
    }

    /// Convenience constructor from bare feature rows.
    pub fn from_rows(rows: &[Vec<f64>]) -> Result<Self> {
        Self::new(rows.iter().cloned().map(Instance::new).collect())
    }

    pub fn num_instances(&self) -> usize {
        self.instances.len()
    }

    pub fn dim(&self) -> usize {
        self.dim
    }

    pub fn instance(&self, i: usize) -> &Instance {
        &self.instances[i]
    }

    pub fn features(&self, i: usize) -> &[f64] {
        self.instances[i].features()
    }

    pub fn instances(&self) -> &[Instance] {
        &self.instances
    }

    /// Per-dimension minimum over all instances.
    pub fn min_features(&self) -> &[f64] {
        &self.min_features
    }

    /// Per-dimension maximum over all instances.
    pub fn max_features(&self) -> &[f64] {
        &self.max_features
    }

    /// True when at least one instance carries a class label.
    pub fn has_class_labels(&self) -> bool {
        self.instances.iter().any(|i| i.class_idx().is_some())
    }
}

/// Maps string class labels to dense indices `0..num_classes`.
#[derive(Debug, Clone, Default)]
pub struct ClassLabels {
    labels: Vec<String>,
}

impl ClassLabels {
    pub fn new() -> Self {
        Self::default()
    }

    /// Interns `label`, returning its dense index.
    pub fn intern(&mut self, label: &str) -> usize {
        match self.labels.iter().position(|l| l == label) {
            Some(idx) => idx,
            None => {
                self.labels.push(label.to_owned());
                self.labels.len() - 1
            }
        }
    }

    pub fn get(&self, idx: usize) -> Option<&str> {
        self.labels.get(idx).map(String::as_str)
    }

    pub fn index_of(&self, label: &str) -> Option<usize> {
        self.labels.iter().position(|l| l == label)
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dimension_mismatch_is_rejected() {
        let err = Dataset::new(vec![
            Instance::new(vec![1.0, 2.0]),
            Instance::new(vec![1.0]),
        ])
        .unwrap_err();
        assert_eq!(
            err,
            Error::DimensionMismatch {
                expected: 2,
                actual: 1
            }
        );
    }

    #[test]
    fn feature_ranges_are_cached() {
        let dataset =
            Dataset::from_rows(&[vec![0.0, 5.0], vec![2.0, -1.0], vec![1.0, 3.0]]).unwrap();
        assert_eq!(dataset.min_features(), &[0.0, -1.0]);
        assert_eq!(dataset.max_features(), &[2.0, 5.0]);
    }

    #[test]
    fn labels_intern_densely() {
        let mut labels = ClassLabels::new();
        assert_eq!(labels.intern("setosa"), 0);
        assert_eq!(labels.intern("virginica"), 1);
        assert_eq!(labels.intern("setosa"), 0);
        assert_eq!(labels.index_of("virginica"), Some(1));
    }
}
