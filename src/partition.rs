//! Interchangeable read views of a clustering.
//!
//! A partition maps each instance `0..n` to one cluster in `0..k`. Four
//! representations share the same read interface: a label array, a crisp
//! bit-matrix, a centroid set under nearest assignment, and union-find
//! trees. Fitness functions and operators are written against the
//! [`Partition`] trait so any view can back them.

use crate::distance::Distance;
use crate::graph::DisjointSets;
use crate::instance::Dataset;
use crate::matrix::{BitMatrix, RowMatrix};

pub trait Partition {
    fn num_instances(&self) -> usize;

    fn num_clusters(&self) -> usize;

    /// The cluster of instance `i`.
    fn cluster_of(&self, i: usize) -> usize;

    /// Decodes the view into a label array.
    fn to_labels(&self) -> Vec<usize> {
        (0..self.num_instances()).map(|i| self.cluster_of(i)).collect()
    }

    /// The members of cluster `k`, in instance order.
    fn members(&self, k: usize) -> Vec<usize> {
        (0..self.num_instances())
            .filter(|&i| self.cluster_of(i) == k)
            .collect()
    }

    /// Instance counts per cluster.
    fn cluster_sizes(&self) -> Vec<usize> {
        let mut sizes = vec![0; self.num_clusters()];
        for i in 0..self.num_instances() {
            sizes[self.cluster_of(i)] += 1;
        }
        sizes
    }
}

/// Label-array view; borrows the labels it exposes.
#[derive(Debug, Clone, Copy)]
pub struct LabelPartition<'a> {
    labels: &'a [usize],
    num_clusters: usize,
}

impl<'a> LabelPartition<'a> {
    pub fn new(labels: &'a [usize], num_clusters: usize) -> Self {
        debug_assert!(labels.iter().all(|&l| l < num_clusters));
        Self {
            labels,
            num_clusters,
        }
    }

    pub fn labels(&self) -> &'a [usize] {
        self.labels
    }
}

impl Partition for LabelPartition<'_> {
    fn num_instances(&self) -> usize {
        self.labels.len()
    }

    fn num_clusters(&self) -> usize {
        self.num_clusters
    }

    fn cluster_of(&self, i: usize) -> usize {
        self.labels[i]
    }
}

/// Crisp bit-matrix view: `k × n` with exactly one set bit per column.
#[derive(Debug, Clone, Copy)]
pub struct CrispPartition<'a> {
    matrix: &'a BitMatrix,
}

impl<'a> CrispPartition<'a> {
    pub fn new(matrix: &'a BitMatrix) -> Self {
        Self { matrix }
    }
}

impl Partition for CrispPartition<'_> {
    fn num_instances(&self) -> usize {
        self.matrix.num_cols()
    }

    fn num_clusters(&self) -> usize {
        self.matrix.num_rows()
    }

    fn cluster_of(&self, i: usize) -> usize {
        self.matrix
            .column_one(i)
            .expect("crisp column carries exactly one set bit")
    }
}

/// Centroid view: each instance belongs to its nearest centroid. Assignment
/// happens eagerly at construction so reads are O(1).
#[derive(Debug, Clone)]
pub struct CentroidPartition {
    labels: Vec<usize>,
    num_clusters: usize,
}

impl CentroidPartition {
    pub fn assign<D: Distance>(centroids: &RowMatrix, dataset: &Dataset, dist: &D) -> Self {
        let labels = (0..dataset.num_instances())
            .map(|i| {
                let x = dataset.features(i);
                let (nearest, _) = centroids
                    .rows()
                    .enumerate()
                    .map(|(k, c)| (k, dist.distance(x, c)))
                    .min_by(|(_, a), (_, b)| a.total_cmp(b))
                    .expect("at least one centroid");
                nearest
            })
            .collect();
        Self {
            labels,
            num_clusters: centroids.num_rows(),
        }
    }
}

impl Partition for CentroidPartition {
    fn num_instances(&self) -> usize {
        self.labels.len()
    }

    fn num_clusters(&self) -> usize {
        self.num_clusters
    }

    fn cluster_of(&self, i: usize) -> usize {
        self.labels[i]
    }
}

/// Union-find view: tree roots enumerate clusters, renumbered densely in
/// order of first appearance.
#[derive(Debug, Clone)]
pub struct DisjointSetsPartition {
    labels: Vec<usize>,
    num_clusters: usize,
}

impl DisjointSetsPartition {
    pub fn new(sets: &DisjointSets) -> Self {
        let n = sets.len();
        let mut root_to_cluster = vec![usize::MAX; n];
        let mut labels = Vec::with_capacity(n);
        let mut next = 0;
        for i in 0..n {
            let root = sets.root(i);
            if root_to_cluster[root] == usize::MAX {
                root_to_cluster[root] = next;
                next += 1;
            }
            labels.push(root_to_cluster[root]);
        }
        Self {
            labels,
            num_clusters: next,
        }
    }
}

impl Partition for DisjointSetsPartition {
    fn num_instances(&self) -> usize {
        self.labels.len()
    }

    fn num_clusters(&self) -> usize {
        self.num_clusters
    }

    fn cluster_of(&self, i: usize) -> usize {
        self.labels[i]
    }
}

/// Encodes a label array as a crisp bit-matrix.
pub fn labels_to_crisp(labels: &[usize], num_clusters: usize) -> BitMatrix {
    let mut matrix = BitMatrix::zeroed(num_clusters, labels.len());
    for (i, &k) in labels.iter().enumerate() {
        matrix.set(k, i, true);
    }
    matrix
}

/// Encodes a label array as union-find trees.
pub fn labels_to_disjoint_sets(labels: &[usize], num_clusters: usize) -> DisjointSets {
    let mut sets = DisjointSets::new(labels.len());
    let mut first_of = vec![usize::MAX; num_clusters];
    for (i, &k) in labels.iter().enumerate() {
        if first_of[k] == usize::MAX {
            first_of[k] = i;
        } else {
            sets.union(first_of[k], i);
        }
    }
    sets
}
